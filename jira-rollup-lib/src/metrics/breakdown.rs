use super::round1;
use crate::HashSet;
use crate::facts::Issue;
use core::hash::Hash;
use serde::Serialize;

/// Part of an issue's effort attributed to one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Share {
    pub estimate: f64,
    pub spent: f64,
}

impl Share {
    #[must_use]
    pub fn is_overspent(&self) -> bool {
        self.estimate != 0.0 && self.spent > self.estimate
    }
}

/// One issue and its share in each column, `None` where the issue is not a member.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow<'a> {
    pub issue: &'a Issue,
    pub shares: Vec<Option<Share>>,
}

/// Per-issue grid of a set of issues against the columns of a dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown<'a> {
    pub rows: Vec<BreakdownRow<'a>>,

    /// Column sums of the unrounded shares, rounded to one decimal.
    pub totals: Vec<Share>,
}

/// Splits each issue's effort evenly across the columns it belongs to.
///
/// `keys_of` lists the column keys of an issue. An issue with k distinct keys contributes
/// `estimate / k` and `spent / k` to each of its columns, so its effort is counted once in total
/// even when it spans several columns.
pub fn breakdown<'a, K, F>(issues: &[&'a Issue], columns: &[K], keys_of: F) -> Breakdown<'a>
where
    K: Eq + Hash,
    F: Fn(&'a Issue) -> Vec<K>,
{
    let mut sums = vec![(0.0, 0.0); columns.len()];

    let rows = issues
        .iter()
        .map(|&issue| {
            let issue_keys = keys_of(issue);
            let keys: HashSet<&K> = issue_keys.iter().collect();

            #[expect(clippy::cast_precision_loss, reason = "an issue belongs to a handful of columns")]
            let divisor = keys.len().max(1) as f64;
            let estimate = issue.estimate / divisor;
            let spent = issue.spent / divisor;

            let shares = columns
                .iter()
                .zip(sums.iter_mut())
                .map(|(column, sum)| {
                    keys.contains(column).then(|| {
                        sum.0 += estimate;
                        sum.1 += spent;
                        Share {
                            estimate: round1(estimate),
                            spent: round1(spent),
                        }
                    })
                })
                .collect();

            BreakdownRow { issue, shares }
        })
        .collect();

    let totals = sums
        .into_iter()
        .map(|(estimate, spent)| Share {
            estimate: round1(estimate),
            spent: round1(spent),
        })
        .collect();

    Breakdown { rows, totals }
}
