//! Shared test utilities and fixtures for reconciler tests

use crate::app::models::pollutant::Pollutant;
use crate::app::models::series::MeasurementTable;
use crate::app::models::Station;
use chrono::{DateTime, TimeZone, Utc};


/// Timestamp helper: hours into 2020-01-01
pub fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap()
}

/// Create a single-pollutant feed the way regional crawlers produce them
pub fn create_test_feed(name: &str, pollutant: Pollutant, cells: &[(u32, f64)]) -> Station {
    let mut station = Station::new(name).unwrap();
    let mut table = MeasurementTable::new();
    for (hour, value) in cells {
        table.insert(ts(*hour), pollutant, *value).unwrap();
    }
    station.set_table(table);
    station
}
