//! Bidirectional mapping between station records and their persisted form
//!
//! This module converts [`Station`] records to and from the canonical wire
//! documents defined in [`document`], and serializes whole collections as a
//! single self-describing MessagePack blob (an array of record maps).
//!
//! # Round-trip contract
//!
//! `decode(encode(station))` reproduces name, region, province, comune,
//! geolocation and every table cell exactly, along with the record's identity
//! and creation time. Derived metadata is not persisted: it is recomputed
//! from the decoded table and is identical by construction. Timestamps travel
//! as integer epoch seconds, so sub-second precision does not survive a
//! round trip.

use crate::app::models::geography::{Province, Region};
use crate::app::models::pollutant::Pollutant;
use crate::app::models::series::MeasurementTable;
use crate::app::models::{Geolocation, PremergeSource, Station, StationId};
use crate::constants::SCHEMA_VERSION;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

pub mod document;

#[cfg(test)]
pub mod tests;

pub use document::{GeolocationDocument, MetadataDocument, PremergeDocument, StationDocument};

/// Encode a station record as a wire document
pub fn encode(station: &Station) -> StationDocument {
    let mut table: BTreeMap<i64, BTreeMap<String, f64>> = BTreeMap::new();
    for (timestamp, cells) in station.table().rows() {
        let row = table.entry(timestamp.timestamp()).or_default();
        for (pollutant, value) in cells {
            row.insert(pollutant.code().to_string(), *value);
        }
    }

    let metadata = station.metadata();
    StationDocument {
        schema_version: SCHEMA_VERSION,
        name: station.name().to_string(),
        region: station.region.ordinal(),
        province: station.province.ordinal(),
        comune: station.comune.clone(),
        geolocation: station.geolocation.map(GeolocationDocument::from),
        metadata: MetadataDocument {
            uuid: station.id().as_uuid().to_string(),
            created_at: metadata.created_at.timestamp(),
            premerge_history: metadata
                .premerge_history
                .iter()
                .map(|source| PremergeDocument {
                    pollutant: source.pollutant.code().to_string(),
                    source_name: source.source_name.clone(),
                    source_geolocation: source.source_geolocation.map(GeolocationDocument::from),
                })
                .collect(),
        },
        table,
    }
}

/// Decode a wire document back into a station record
///
/// Fails with a schema error when the document carries an unknown enumeration
/// ordinal, an unknown pollutant code, a malformed UUID or an out-of-range
/// timestamp.
pub fn decode(document: StationDocument) -> Result<Station> {
    if document.schema_version > SCHEMA_VERSION {
        return Err(Error::schema(format!(
            "Unsupported schema version {}: this build reads up to version {}",
            document.schema_version, SCHEMA_VERSION
        )));
    }

    let uuid = Uuid::parse_str(&document.metadata.uuid)
        .map_err(|e| Error::schema(format!("Malformed station UUID: {}", e)))?;
    let created_at = epoch_to_datetime(document.metadata.created_at)?;

    let mut station = Station::restore(StationId::from_uuid(uuid), document.name, created_at)?;
    station.region = Region::try_from_ordinal(document.region)?;
    station.province = Province::try_from_ordinal(document.province)?;
    station.comune = document.comune;
    station.geolocation = document.geolocation.map(Geolocation::from);

    station.metadata.premerge_history = document
        .metadata
        .premerge_history
        .into_iter()
        .map(|entry| {
            Ok(PremergeSource {
                pollutant: Pollutant::from_str(&entry.pollutant)?,
                source_name: entry.source_name,
                source_geolocation: entry.source_geolocation.map(Geolocation::from),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = MeasurementTable::new();
    for (epoch, cells) in document.table {
        let timestamp = epoch_to_datetime(epoch)?;
        for (code, value) in cells {
            let pollutant = Pollutant::from_str(&code)?;
            if !pollutant.is_column() {
                return Err(Error::schema(
                    "Pollutant UNSET cannot appear as a table column",
                ));
            }
            table.insert(timestamp, pollutant, value)?;
        }
    }
    station.set_table(table);

    Ok(station)
}

/// Serialize an ordered sequence of station records into one snapshot file
pub fn save_collection(stations: &[&Station], path: &Path) -> Result<()> {
    let documents: Vec<StationDocument> = stations.iter().map(|station| encode(station)).collect();

    let bytes = rmp_serde::to_vec_named(&documents)
        .map_err(|e| Error::encode("Failed to encode collection snapshot", e))?;
    fs::write(path, &bytes).map_err(|e| {
        Error::io(
            format!("Failed to write snapshot '{}'", path.display()),
            e,
        )
    })?;

    info!(
        "Saved {} stations ({} bytes) to '{}'",
        stations.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Deserialize a snapshot file back into station records
///
/// Fails with a file-not-found error when `path` does not exist, a decoding
/// error for a malformed blob, and a schema error for documents outside the
/// known enumerations.
pub fn load_collection(path: &Path) -> Result<Vec<Station>> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let bytes = fs::read(path).map_err(|e| {
        Error::io(
            format!("Failed to read snapshot '{}'", path.display()),
            e,
        )
    })?;
    let documents: Vec<StationDocument> = rmp_serde::from_slice(&bytes).map_err(|e| {
        Error::decode(
            format!("Malformed snapshot '{}'", path.display()),
            e,
        )
    })?;

    debug!(
        "Read {} encoded stations from '{}'",
        documents.len(),
        path.display()
    );
    documents.into_iter().map(decode).collect()
}

fn epoch_to_datetime(epoch: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(epoch, 0)
        .ok_or_else(|| Error::schema(format!("Timestamp {} is out of range", epoch)))
}
