//! Shared test utilities and fixtures for codec tests

use crate::app::models::geography::{Province, Region};
use crate::app::models::pollutant::Pollutant;
use crate::app::models::series::MeasurementTable;
use crate::app::models::Station;
use chrono::{DateTime, Duration, TimeZone, Utc};


/// Timestamp helper: hours after the epoch (small, readable wire values)
pub fn ts(hour: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hour)
}

/// A fully populated station touching every encodable field
pub fn create_full_station() -> Station {
    let mut station = Station::new("Mount Doom").unwrap();
    station.set_address(Some(Region::Piemonte), Some(Province::To), Some("Mordor"));
    station.set_geolocation(-39.15683, 175.6315464, Some(291.0));

    let mut table = MeasurementTable::new();
    for hour in (1..30i64).step_by(2) {
        table
            .insert(ts(hour), Pollutant::So2, 0.1 * hour as f64)
            .unwrap();
    }
    table.insert(ts(1), Pollutant::No2, 30.0).unwrap();
    station.set_table(table);
    station
}

/// Assert that two stations are equal on every round-tripped field
pub fn assert_stations_equal(actual: &Station, expected: &Station) {
    assert_eq!(actual.id(), expected.id());
    assert_eq!(actual.name(), expected.name());
    assert_eq!(actual.region, expected.region);
    assert_eq!(actual.province, expected.province);
    assert_eq!(actual.comune, expected.comune);
    assert_eq!(actual.geolocation, expected.geolocation);
    assert_eq!(actual.table(), expected.table());
    assert_eq!(
        actual.metadata().created_at.timestamp(),
        expected.metadata().created_at.timestamp()
    );
    assert_eq!(
        actual.metadata().premerge_history,
        expected.metadata().premerge_history
    );
    // Derived metadata is recomputed, not persisted, and must re-derive
    // identically from the decoded table
    assert_eq!(actual.metadata().data_info, expected.metadata().data_info);
}
