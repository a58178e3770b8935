//! Shared test utilities and fixtures for collection tests

use crate::app::models::pollutant::Pollutant;
use crate::app::models::series::MeasurementTable;
use crate::app::models::Station;
use chrono::{DateTime, TimeZone, Utc};

pub mod collection_tests;

/// Timestamp helper: hours into 2020-01-01
pub fn ts(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap()
}

/// Create a test station with the given (hour, pollutant, value) cells
pub fn create_test_station(name: &str, cells: &[(u32, Pollutant, f64)]) -> Station {
    let station = Station::new(name).unwrap();
    with_cells(station, cells)
}

/// Replace a station's table with the given cells
pub fn with_cells(mut station: Station, cells: &[(u32, Pollutant, f64)]) -> Station {
    if !cells.is_empty() {
        let mut table = MeasurementTable::new();
        for (hour, pollutant, value) in cells {
            table.insert(ts(*hour), *pollutant, *value).unwrap();
        }
        station.set_table(table);
    }
    station
}
