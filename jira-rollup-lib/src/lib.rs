#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for jira-rollup
//!
//! This library consolidates all functionality for the jira-rollup tool, which turns
//! an exported issue-tracker snapshot into effort rollups and overtime projections.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Snapshot loading and normalization into typed issues
//! - [`metrics`]: Partitioning, grouping, aggregation, and overtime projection
//! - [`sections`]: Composition of the named report sections
//! - [`reports`]: Text, JSON, and CSV emitters for computed sections

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub(crate) type HashMap<K, V> = rustc_hash::FxHashMap<K, V>;
pub(crate) type HashSet<T> = rustc_hash::FxHashSet<T>;

pub(crate) fn hash_map_with_capacity<K, V>(capacity: usize) -> HashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

pub mod commands;
pub mod facts;
pub mod metrics;
pub mod reports;
pub mod sections;

pub use crate::commands::{Host, run};
