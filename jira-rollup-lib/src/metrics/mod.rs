//! The rollup and projection engine.
//!
//! Issues are split into [`Partitions`], grouped along a reporting dimension with [`group_by`],
//! and reduced to [`AggregateCell`] values, optionally crossed with the component catalog. Time
//! based dimensions go through a [`Timeline`] and an [`OvertimeProjector`], which projects the
//! effort of open groups from the overtime of the closed groups before them.
//!
//! Everything here is pure: no I/O and no state that outlives a call, other than the projector a
//! caller creates for a single timeline.

mod aggregate;
mod breakdown;
mod grouping;
mod parents;
mod partition;
mod projector;
mod rounding;
mod timeline;

pub use aggregate::{AggregateCell, ComponentCell, aggregate, component_cell, component_cells, issues_with_component};
pub use breakdown::{Breakdown, BreakdownRow, Share, breakdown};
pub use grouping::{Group, group_by};
pub use parents::{ParentRollup, parent_rollups};
pub use partition::{PartitionKind, Partitions, partition};
pub use projector::{OvertimeProjector, ProjectedCells, ProjectedTimeline, TimelineRow, project_timeline};
pub use rounding::{mean, ratio, round1, round2};
pub use timeline::{Period, SprintKey, Timeline, VersionKey};
