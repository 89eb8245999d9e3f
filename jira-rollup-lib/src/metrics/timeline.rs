use crate::facts::{Sprint, Version};
use chrono::{DateTime, NaiveDate, Utc};

/// Chronological position of a version: release date (undated last), start date, id.
pub type VersionKey = (bool, Option<NaiveDate>, Option<NaiveDate>, String);

/// Chronological position of a sprint: sort key, id.
pub type SprintKey = (DateTime<Utc>, u64);

/// One time bucket of a timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period<T, K> {
    pub item: T,
    pub key: K,
    pub closed: bool,
}

/// A chronologically ordered sequence of time buckets.
///
/// The only way to build one sorts its periods, so code consuming a timeline can rely on the
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline<T, K> {
    periods: Vec<Period<T, K>>,
}

impl<T, K: Ord> Timeline<T, K> {
    pub fn new(
        items: impl IntoIterator<Item = T>,
        key_fn: impl Fn(&T) -> K,
        closed_fn: impl Fn(&T) -> bool,
    ) -> Self {
        let mut periods: Vec<Period<T, K>> = items
            .into_iter()
            .map(|item| Period {
                key: key_fn(&item),
                closed: closed_fn(&item),
                item,
            })
            .collect();

        periods.sort_by(|a, b| a.key.cmp(&b.key));
        Self { periods }
    }

    #[must_use]
    pub fn periods(&self) -> &[Period<T, K>] {
        &self.periods
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.periods.iter().map(|p| &p.item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

impl<'a> Timeline<&'a Version, VersionKey> {
    /// Active versions in release order. Released versions are closed.
    pub fn of_versions(versions: impl IntoIterator<Item = &'a Version>) -> Self {
        Self::new(
            versions.into_iter().filter(|v| v.is_active()),
            |v| (v.release_date.is_none(), v.release_date, v.start_date, v.id.clone()),
            |v| v.released,
        )
    }
}

impl<'a> Timeline<&'a Sprint, SprintKey> {
    /// Sprints in chronological order, with undated sprints placed at `now`.
    pub fn of_sprints(sprints: impl IntoIterator<Item = &'a Sprint>, now: DateTime<Utc>) -> Self {
        Self::new(sprints, |s| (s.sort_key(now), s.id), |s| s.is_closed())
    }
}
