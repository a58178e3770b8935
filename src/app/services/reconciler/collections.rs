//! Cross-collection reconciliation of disjoint time windows
//!
//! Independently downloaded collections assign fresh identities, so stations
//! are matched by exact name here, never by identity. The typical use is
//! combining snapshots of the same region covering different years.

use crate::app::models::series::MeasurementTable;
use crate::app::models::Station;
use crate::app::services::collection::StationCollection;
use crate::Result;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Combine collections covering disjoint time ranges of the same stations
///
/// For each name present in at least one collection: a name found in exactly
/// one collection is carried over unchanged; a name found in several gets a
/// fresh record whose table is the union of the matching tables on the
/// timestamp key (rows identical in timestamp and values collapse into one)
/// and whose address and metadata come from the first collection's matching
/// record.
///
/// Collections that disagree on station counts signal incomplete coverage;
/// this is logged as a warning, not an error.
pub fn merge_collections(collections: &[&StationCollection]) -> Result<StationCollection> {
    let counts: Vec<usize> = collections.iter().map(|collection| collection.len()).collect();
    if counts.windows(2).any(|pair| pair[0] != pair[1]) {
        warn!(
            "Collections contain differing station counts {:?}; coverage may be incomplete",
            counts
        );
    }

    let names: BTreeSet<String> = collections
        .iter()
        .flat_map(|collection| collection.iter().map(|station| station.name().to_string()))
        .collect();

    let mut merged_collection = StationCollection::new();
    for name in names {
        let matches: Vec<&Station> = collections
            .iter()
            .flat_map(|collection| collection.find_by_exact_name(&name))
            .collect();

        if matches.len() == 1 {
            merged_collection.add(matches[0].clone());
            continue;
        }

        debug!("Combining {} records named '{}'", matches.len(), name);
        let first = matches[0];
        let mut merged = Station::new(&name)?;
        merged.set_address(Some(first.region), Some(first.province), first.comune.as_deref());
        merged.geolocation = first.geolocation;
        merged.metadata.created_at = first.metadata().created_at;
        merged.metadata.premerge_history = first.metadata().premerge_history.clone();

        let mut table = MeasurementTable::new();
        for station in &matches {
            let conflicts = table.merge_from(station.table());
            if conflicts > 0 {
                warn!(
                    "Combining '{}': {} overlapping cells disagreed across collections",
                    name, conflicts
                );
            }
        }
        merged.set_table(table);
        merged_collection.add(merged);
    }

    info!(
        "Combined {} collections into {} stations",
        collections.len(),
        merged_collection.len()
    );
    Ok(merged_collection)
}
