//! Name-based station reconciliation
//!
//! Regional networks publish one feed per pollutant, so a physical station
//! often arrives as several single-column records sharing a name. This module
//! encodes that domain assumption: records with the same name describe the
//! same station and are merged into one record whose table is the full outer
//! union of the source tables on the timestamp key.
//!
//! Two related algorithms operate on the model:
//! - [`merge::merge_by_name`] de-duplicates within one collection
//! - [`collections::merge_collections`] combines collections that cover
//!   disjoint time windows of the same stations (e.g. different years)
//!
//! Geographic distance-based unification of nearby but differently named
//! stations is out of scope.

use crate::app::models::Station;
use crate::app::services::collection::StationCollection;
use std::collections::BTreeMap;

pub mod collections;
pub mod merge;

#[cfg(test)]
pub mod tests;

pub use collections::merge_collections;
pub use merge::merge_by_name;

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Number of multi-member groups that were merged
    pub groups_merged: usize,

    /// Number of source records consumed by those merges
    pub stations_consumed: usize,
}

impl MergeReport {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "merged {} groups, consuming {} source stations",
            self.groups_merged, self.stations_consumed
        )
    }
}

/// Group a collection's records by station name
///
/// Returns a mapping from name to the records sharing it, both in the
/// collection's deterministic order. Distinct records under one name are
/// assumed to be separate single-pollutant sensor feeds of the same physical
/// station.
pub fn group_by_name<'a>(collection: &'a StationCollection) -> BTreeMap<String, Vec<&'a Station>> {
    let mut groups: BTreeMap<String, Vec<&Station>> = BTreeMap::new();
    for station in collection.iter() {
        groups
            .entry(station.name().to_string())
            .or_default()
            .push(station);
    }
    groups
}
