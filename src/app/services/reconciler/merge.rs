//! Intra-collection merge of same-named records
//!
//! For each group of records sharing a name, produces one replacement record:
//! the first member (in collection order) supplies the address, every member
//! contributes provenance and table cells, and the sources are removed from
//! the collection in the same operation as the merged record is added.

use super::{group_by_name, MergeReport};
use crate::app::models::series::MeasurementTable;
use crate::app::models::{PremergeSource, Station, StationId};
use crate::app::services::collection::StationCollection;
use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Merge every multi-member same-named group of `collection` into one record
///
/// The replacement record carries:
/// - the group name, and the address of the group's first member (first-wins,
///   no consensus policy; geolocation reconciliation is not attempted)
/// - one provenance entry per source pollutant column, recording the source's
///   original name and geolocation
/// - the full outer union of the source tables on the timestamp key; when two
///   sources supply the same (timestamp, column) cell with differing values,
///   the last-applied value wins and the conflict is logged
///
/// Source records are removed and the merged record added within this single
/// `&mut` borrow, so no observer can see both old and new entries coexist.
pub fn merge_by_name(collection: &mut StationCollection) -> Result<MergeReport> {
    let groups: Vec<(String, Vec<StationId>)> = group_by_name(collection)
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(name, members)| {
            let ids = members.iter().map(|station| station.id()).collect();
            (name, ids)
        })
        .collect();

    let mut report = MergeReport::default();
    for (name, ids) in groups {
        let sources: Vec<Station> = ids.iter().filter_map(|id| collection.remove(*id)).collect();
        debug!("Merging {} records named '{}'", sources.len(), name);

        let merged = merge_group(&name, &sources)?;
        collection.add(merged);

        report.groups_merged += 1;
        report.stations_consumed += sources.len();
    }

    info!("Reconciliation complete: {}", report.summary());
    Ok(report)
}

/// Build the replacement record for one group of same-named sources
pub fn merge_group(name: &str, sources: &[Station]) -> Result<Station> {
    let first = sources
        .first()
        .ok_or_else(|| Error::validation("Merge group cannot be empty"))?;

    let mut merged = Station::new(name)?;
    merged.set_address(Some(first.region), Some(first.province), first.comune.as_deref());

    let mut table = MeasurementTable::new();
    let mut provenance = Vec::new();
    for source in sources {
        for column in source.table().columns() {
            provenance.push(PremergeSource {
                pollutant: column,
                source_name: source.name().to_string(),
                source_geolocation: source.geolocation,
            });
        }

        let conflicts = table.merge_from(source.table());
        if conflicts > 0 {
            warn!(
                "Merging '{}': source '{}' ({}) overwrote {} cells supplied by an earlier source",
                name,
                source.name(),
                source.id(),
                conflicts
            );
        }
    }

    merged.metadata.premerge_history = provenance;
    merged.set_table(table);
    Ok(merged)
}
