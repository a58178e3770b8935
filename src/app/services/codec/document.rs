//! Wire document structures for persisted station records
//!
//! The canonical, language-neutral representation of a station: enumeration
//! values travel as 1-based integer ordinals, timestamps as integer epoch
//! seconds, and the whole document uses only map, array and scalar MessagePack
//! primitives so any consumer can read a snapshot without Rust-specific type
//! tags.

use crate::app::models::Geolocation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Encoded form of one station record
///
/// `schema_version` was introduced after the first snapshots were written;
/// documents without the field decode as version 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationDocument {
    /// Snapshot schema version; absent in pre-versioning snapshots
    #[serde(default)]
    pub schema_version: u32,

    /// Station display and grouping name
    pub name: String,

    /// Region as a 1-based enumeration ordinal
    pub region: u8,

    /// Province as a 1-based enumeration ordinal
    pub province: u8,

    /// Comune, when known
    pub comune: Option<String>,

    /// Geolocation triple, when known
    pub geolocation: Option<GeolocationDocument>,

    /// Identity, creation time and merge provenance
    pub metadata: MetadataDocument,

    /// Measurement table keyed by integer epoch seconds, with pollutant-code
    /// string columns
    pub table: BTreeMap<i64, BTreeMap<String, f64>>,
}

/// Encoded geolocation triple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationDocument {
    pub lat: f64,
    pub lng: f64,
    pub alt: Option<f64>,
}

impl From<Geolocation> for GeolocationDocument {
    fn from(geolocation: Geolocation) -> Self {
        Self {
            lat: geolocation.lat,
            lng: geolocation.lng,
            alt: geolocation.alt,
        }
    }
}

impl From<GeolocationDocument> for Geolocation {
    fn from(document: GeolocationDocument) -> Self {
        Self {
            lat: document.lat,
            lng: document.lng,
            alt: document.alt,
        }
    }
}

/// Encoded station metadata
///
/// Only non-derivable metadata is persisted: identity, creation time and the
/// premerge audit trail. Table shape and coverage are recomputed from the
/// decoded table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataDocument {
    /// Station identity as a canonical UUID string
    pub uuid: String,

    /// Creation time as integer epoch seconds
    pub created_at: i64,

    /// Merge provenance entries, empty for never-merged records
    #[serde(default)]
    pub premerge_history: Vec<PremergeDocument>,
}

/// Encoded provenance entry for one pre-merge source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PremergeDocument {
    /// Pollutant column the source contributed, as a code string
    pub pollutant: String,

    /// Original name of the source record
    pub source_name: String,

    /// Geolocation of the source record, when it had one
    pub source_geolocation: Option<GeolocationDocument>,
}
