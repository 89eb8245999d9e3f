use super::{
    AggregateCell, ComponentCell, Timeline, aggregate, group_by, issues_with_component, mean, ratio, round1, round2,
};
use crate::HashMap;
use crate::facts::{Component, Issue};
use core::hash::Hash;
use serde::Serialize;

/// Cells computed for one timeline row or for a timeline summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedCells {
    pub cell: AggregateCell,
    pub components: Vec<ComponentCell>,
}

/// A timeline period with its projected cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow<T> {
    pub item: T,
    pub closed: bool,
    pub cells: ProjectedCells,
}

/// All rows of a projected timeline plus the summary over its whole population.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedTimeline<T> {
    pub rows: Vec<TimelineRow<T>>,
    pub summary: ProjectedCells,
}

/// Running overtime history over a chronologically ordered sequence of groups.
///
/// A projector lives for exactly one timeline. Each closed group with a defined overtime appends
/// one entry to the global history and one entry per component with a nonzero estimate to that
/// component's history. Entries are never rewritten.
#[derive(Debug, Clone)]
pub struct OvertimeProjector<K> {
    global: Vec<f64>,
    per_component: HashMap<String, Vec<f64>>,
    last_key: Option<K>,
}

impl<K> Default for OvertimeProjector<K> {
    fn default() -> Self {
        Self {
            global: Vec::new(),
            per_component: HashMap::default(),
            last_key: None,
        }
    }
}

impl<K: Ord + Clone> OvertimeProjector<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean overtime of all closed groups seen so far.
    #[must_use]
    pub fn average(&self) -> Option<f64> {
        mean(&self.global)
    }

    #[must_use]
    pub fn component_average(&self, component_id: &str) -> Option<f64> {
        mean(self.component_history(component_id))
    }

    #[must_use]
    pub fn history(&self) -> &[f64] {
        &self.global
    }

    #[must_use]
    pub fn component_history(&self, component_id: &str) -> &[f64] {
        self.per_component.get(component_id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Computes the cells of the next group and then folds the group into the history.
    ///
    /// Projections use only groups processed before this one. Own overtime is only reported for
    /// closed groups.
    pub fn step(&mut self, key: &K, closed: bool, issues: &[&Issue], components: &[Component]) -> ProjectedCells {
        debug_assert!(
            self.last_key.as_ref().is_none_or(|last| last <= key),
            "timeline groups must be processed in chronological order"
        );
        self.last_key = Some(key.clone());

        let mut cell = aggregate(issues);
        let overtime = cell.raw_overtime();
        cell.projected_estimate = project(cell.estimate, self.average());
        if !closed {
            cell.overtime = None;
        }

        let component_cells = components
            .iter()
            .map(|component| {
                let members = issues_with_component(issues, component);
                if members.is_empty() {
                    return ComponentCell::Empty;
                }

                let mut component_cell = aggregate(&members);
                component_cell.projected_estimate =
                    project(component_cell.estimate, self.component_average(&component.id));
                if !closed {
                    component_cell.overtime = None;
                }

                ComponentCell::Filled(component_cell)
            })
            .collect();

        if closed && let Some(overtime) = overtime {
            self.global.push(overtime);
            self.record_components(issues, components);
        }

        ProjectedCells {
            cell,
            components: component_cells,
        }
    }

    /// Cells for the summary row of a timeline whose population is `issues`.
    ///
    /// Overtime is the mean of the history, and the projection applies that mean to the total
    /// estimate. Both are absent while the history is empty.
    #[must_use]
    pub fn summary(&self, issues: &[&Issue], components: &[Component]) -> ProjectedCells {
        let average = self.average();
        let mut cell = aggregate(issues);
        cell.overtime = average.map(round2);
        cell.projected_estimate = project(cell.estimate, average);

        let component_cells = components
            .iter()
            .map(|component| {
                let members = issues_with_component(issues, component);
                if members.is_empty() {
                    return ComponentCell::Empty;
                }

                let average = self.component_average(&component.id);
                let mut component_cell = aggregate(&members);
                component_cell.overtime = average.map(round2);
                component_cell.projected_estimate = project(component_cell.estimate, average);
                ComponentCell::Filled(component_cell)
            })
            .collect();

        ProjectedCells {
            cell,
            components: component_cells,
        }
    }

    fn record_components(&mut self, issues: &[&Issue], components: &[Component]) {
        for component in components {
            let (estimate, spent) = issues_with_component(issues, component)
                .iter()
                .fold((0.0, 0.0), |(estimate, spent), issue| (estimate + issue.estimate, spent + issue.spent));

            // Components without an estimate have no ratio and leave their history untouched.
            if estimate == 0.0 {
                continue;
            }

            let value = ratio(spent, estimate).unwrap_or(0.0);
            self.per_component.entry(component.id.clone()).or_default().push(value);
        }
    }
}

fn project(estimate: f64, average: Option<f64>) -> Option<f64> {
    if estimate == 0.0 {
        return None;
    }

    average.map(|average| round1(estimate * average))
}

/// Groups `population` along `timeline` and projects every period.
///
/// `period_key` names a period and `issue_keys` lists the period names an issue belongs to, which
/// may be several. The summary covers the whole population.
pub fn project_timeline<'a, T, K, G, P, F, I>(
    timeline: &Timeline<T, K>,
    population: &[&'a Issue],
    components: &[Component],
    period_key: P,
    issue_keys: F,
) -> ProjectedTimeline<T>
where
    T: Clone,
    K: Ord + Clone,
    G: Clone + Eq + Hash,
    P: Fn(&T) -> G,
    F: Fn(&'a Issue) -> I,
    I: IntoIterator<Item = G>,
{
    let key_order: Vec<G> = timeline.items().map(period_key).collect();
    let groups = group_by(population, &key_order, issue_keys);

    let mut projector = OvertimeProjector::new();
    let rows = timeline
        .periods()
        .iter()
        .zip(&groups)
        .map(|(period, group)| TimelineRow {
            item: period.item.clone(),
            closed: period.closed,
            cells: projector.step(&period.key, period.closed, &group.issues, components),
        })
        .collect();

    ProjectedTimeline {
        rows,
        summary: projector.summary(population, components),
    }
}
