use super::{ratio, round1, round2};
use crate::facts::{Component, Issue};
use serde::Serialize;

/// Effort totals of a set of issues.
///
/// `estimate` and `spent` are rounded to one decimal and `left` is derived from the rounded values,
/// so it is never negative. `overtime` is only present when both estimate and spent are nonzero.
/// `projected_estimate` is only ever filled in by the overtime projector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateCell {
    pub count: usize,
    pub estimate: f64,
    pub spent: f64,
    pub left: f64,
    pub overtime: Option<f64>,
    pub projected_estimate: Option<f64>,
}

impl AggregateCell {
    /// Builds a cell from raw hour sums.
    #[must_use]
    pub fn from_sums(count: usize, estimate: f64, spent: f64) -> Self {
        let estimate = round1(estimate);
        let spent = round1(spent);

        Self {
            count,
            estimate,
            spent,
            left: round1(estimate - spent).max(0.0),
            overtime: ratio(spent, estimate).map(round2),
            projected_estimate: None,
        }
    }

    /// More hours were spent than estimated.
    #[must_use]
    pub fn is_overspent(&self) -> bool {
        self.estimate != 0.0 && self.spent > self.estimate
    }

    /// Unrounded `spent / estimate` of the rounded totals, the value overtime history is built from.
    #[must_use]
    pub fn raw_overtime(&self) -> Option<f64> {
        ratio(self.spent, self.estimate)
    }
}

/// A (group × component) cell.
///
/// `Empty` means no issue of the group carries the component and is distinct from a computed cell
/// whose totals happen to be zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentCell {
    Empty,
    Filled(AggregateCell),
}

impl ComponentCell {
    #[must_use]
    pub const fn cell(&self) -> Option<&AggregateCell> {
        match self {
            Self::Empty => None,
            Self::Filled(cell) => Some(cell),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Aggregates a set of issues into a single cell.
#[must_use]
pub fn aggregate(issues: &[&Issue]) -> AggregateCell {
    let (estimate, spent) = issues
        .iter()
        .fold((0.0, 0.0), |(estimate, spent), issue| (estimate + issue.estimate, spent + issue.spent));

    AggregateCell::from_sums(issues.len(), estimate, spent)
}

/// The members of `issues` that carry `component`.
#[must_use]
pub fn issues_with_component<'a>(issues: &[&'a Issue], component: &Component) -> Vec<&'a Issue> {
    issues.iter().copied().filter(|issue| issue.has_component(&component.id)).collect()
}

/// Aggregates the members of `issues` carrying `component`, or `Empty` when there are none.
#[must_use]
pub fn component_cell(issues: &[&Issue], component: &Component) -> ComponentCell {
    let members = issues_with_component(issues, component);
    if members.is_empty() {
        ComponentCell::Empty
    } else {
        ComponentCell::Filled(aggregate(&members))
    }
}

/// One cell per catalog component, in catalog order.
#[must_use]
pub fn component_cells(issues: &[&Issue], components: &[Component]) -> Vec<ComponentCell> {
    components.iter().map(|component| component_cell(issues, component)).collect()
}
