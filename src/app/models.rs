//! Data models for air quality aggregation
//!
//! This module contains the core data structures for representing pollutant
//! measuring stations: identity, address, geolocation, the timestamp-indexed
//! measurement table and the metadata derived from it.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod geography;
pub mod pollutant;
pub mod series;

use geography::{Province, Region};
use pollutant::Pollutant;
use series::MeasurementTable;

// =============================================================================
// Station Identity
// =============================================================================

/// Process-unique opaque identity token for a station record
///
/// Assigned at creation and never reassigned; uniquely determines the record
/// within any collection that holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(Uuid);

impl StationId {
    /// Generate a fresh identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (used when restoring persisted records)
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for StationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Geolocation
// =============================================================================

/// Geographic coordinates of a station
///
/// Stored verbatim: plausibility checks are the producing crawler's
/// responsibility, and coordinate reconciliation across merged sources is
/// deliberately not attempted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geolocation {
    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,

    /// Altitude in meters above sea level, when known
    pub alt: Option<f64>,
}

impl Geolocation {
    /// Create a geolocation triple
    pub fn new(lat: f64, lng: f64, alt: Option<f64>) -> Self {
        Self { lat, lng, alt }
    }
}

// =============================================================================
// Derived Metadata
// =============================================================================

/// Shape and coverage of a station's measurement table
///
/// Recomputed whenever the table is replaced; never edited directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataInfo {
    /// Number of rows (unique timestamps)
    pub row_count: usize,

    /// Number of populated cells
    pub cell_count: usize,

    /// Column set, sorted alphabetically by pollutant code
    pub columns: Vec<Pollutant>,

    /// Minimum and maximum row timestamps, absent for an empty table
    pub time_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl DataInfo {
    fn from_table(table: &MeasurementTable) -> Self {
        Self {
            row_count: table.row_count(),
            cell_count: table.cell_count(),
            columns: table.columns(),
            time_range: table.time_range(),
        }
    }
}

/// Provenance entry pointing a merged station back to one pre-merge source
///
/// An audit trail, not used operationally: records which source feed supplied
/// a pollutant column, under which name, and where that feed was located.
#[derive(Debug, Clone, PartialEq)]
pub struct PremergeSource {
    /// Pollutant column the source contributed
    pub pollutant: Pollutant,

    /// Original name of the source record
    pub source_name: String,

    /// Geolocation of the source record, when it had one
    pub source_geolocation: Option<Geolocation>,
}

/// Station metadata: creation/modification times, derived table info and
/// merge provenance
#[derive(Debug, Clone)]
pub struct StationMetadata {
    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the measurement table was last replaced
    pub updated_at: DateTime<Utc>,

    /// Derived shape and coverage of the measurement table
    pub data_info: DataInfo,

    /// Provenance entries when this record is a merge product
    pub premerge_history: Vec<PremergeSource>,
}

impl StationMetadata {
    fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at: created_at,
            data_info: DataInfo::default(),
            premerge_history: Vec::new(),
        }
    }
}

// =============================================================================
// Station Record
// =============================================================================

/// One physical or logical pollutant-measuring sensor feed
///
/// Created by a crawler or by decoding a persisted snapshot; its address,
/// geolocation and table may be set any number of times before the record is
/// placed in a collection, but its identity never changes.
///
/// # Examples
///
/// ```
/// use aria_aggregator::{Province, Region, Station};
///
/// let mut station = Station::new("Torino Rebaudengo").unwrap();
/// station.set_address(Some(Region::Piemonte), Some(Province::To), Some("Torino"));
/// ```
#[derive(Debug, Clone)]
pub struct Station {
    /// Identity token, stable for the record's lifetime
    pub(crate) id: StationId,

    /// Non-empty display and grouping key
    pub(crate) name: String,

    /// Region in which the station is located
    pub region: Region,

    /// Province in which the station is located
    pub province: Province,

    /// Comune (municipality) in which the station is located
    pub comune: Option<String>,

    /// Geographic coordinates of the station
    pub geolocation: Option<Geolocation>,

    /// Timestamp-indexed pollutant measurements
    pub(crate) table: MeasurementTable,

    /// Derived metadata, recomputed when the table is replaced
    pub(crate) metadata: StationMetadata,
}

impl Station {
    /// Create a station with a fresh identity and an empty table
    ///
    /// Fails with a validation error if `name` is empty or whitespace-only.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::restore(StationId::new(), name, Utc::now())
    }

    /// Rebuild a station with a known identity and creation time
    ///
    /// Used by the codec when decoding persisted records; the name invariant
    /// is enforced the same way as for fresh records.
    pub(crate) fn restore(
        id: StationId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::validation("Station name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            region: Region::Unset,
            province: Province::Unset,
            comune: None,
            geolocation: None,
            table: MeasurementTable::new(),
            metadata: StationMetadata::new(created_at),
        })
    }

    /// The record's identity token
    pub fn id(&self) -> StationId {
        self.id
    }

    /// The station's display and grouping name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set region, province and comune of the station
    ///
    /// Each argument is independently optional; `None` leaves the current
    /// value unchanged. The closed enumerations make an out-of-range region
    /// or province unrepresentable, so no runtime rejection path exists.
    pub fn set_address(
        &mut self,
        region: Option<Region>,
        province: Option<Province>,
        comune: Option<&str>,
    ) {
        if let Some(region) = region {
            self.region = region;
        }
        if let Some(province) = province {
            self.province = province;
        }
        if let Some(comune) = comune {
            self.comune = Some(comune.to_string());
        }
    }

    /// Set geographic coordinates of the station
    pub fn set_geolocation(&mut self, lat: f64, lng: f64, alt: Option<f64>) {
        self.geolocation = Some(Geolocation::new(lat, lng, alt));
    }

    /// Replace the measurement table wholesale and recompute derived metadata
    ///
    /// There is no incremental merge at this layer; combining tables is the
    /// reconciler's job.
    pub fn set_table(&mut self, table: MeasurementTable) {
        self.metadata.data_info = DataInfo::from_table(&table);
        self.metadata.updated_at = Utc::now();
        self.table = table;
    }

    /// The station's measurement table
    pub fn table(&self) -> &MeasurementTable {
        &self.table
    }

    /// The station's metadata
    pub fn metadata(&self) -> &StationMetadata {
        &self.metadata
    }

    /// Deterministic ordering key: name, then creation time, then identity
    pub(crate) fn ordering_key(&self) -> (&str, DateTime<Utc>, StationId) {
        (&self.name, self.metadata.created_at, self.id)
    }
}

impl std::fmt::Display for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = &self.metadata.data_info;
        let columns: Vec<&str> = info.columns.iter().map(|p| p.code()).collect();
        write!(
            f,
            "{} [{}] {}, {}, {} | {} rows, {} cells, columns: {}",
            self.name,
            self.id,
            self.comune.as_deref().unwrap_or("-"),
            self.province,
            self.region,
            info.row_count,
            info.cell_count,
            if columns.is_empty() {
                "-".to_string()
            } else {
                columns.join(", ")
            }
        )
    }
}
