//! Typed station predicates
//!
//! A small closed set of predicate combinators composed via builder calls.
//! This replaces free-form expression querying with filters the compiler can
//! check: name substring, minimum row count, timestamp-range overlap and
//! measured pollutant.

use crate::app::models::pollutant::Pollutant;
use crate::app::models::Station;
use chrono::{DateTime, Utc};

/// Conjunction of station predicates
///
/// Every configured predicate must hold for a station to match; an empty
/// query matches everything.
///
/// # Examples
///
/// ```
/// use aria_aggregator::app::services::collection::StationQuery;
/// use aria_aggregator::Pollutant;
///
/// let query = StationQuery::new()
///     .name_contains("torino")
///     .measures(Pollutant::Pm10)
///     .min_rows(24);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StationQuery {
    name_contains: Option<String>,
    min_rows: Option<usize>,
    overlaps: Option<(DateTime<Utc>, DateTime<Utc>)>,
    measures: Option<Pollutant>,
}

impl StationQuery {
    /// Create a query with no predicates
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the station name to contain `term` (case-insensitive)
    pub fn name_contains(mut self, term: impl Into<String>) -> Self {
        self.name_contains = Some(term.into().to_lowercase());
        self
    }

    /// Require at least `rows` unique timestamps in the table
    pub fn min_rows(mut self, rows: usize) -> Self {
        self.min_rows = Some(rows);
        self
    }

    /// Require the table's time range to overlap `[start, end]`
    ///
    /// Stations with empty tables never match this predicate.
    pub fn overlapping(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.overlaps = Some((start, end));
        self
    }

    /// Require `pollutant` to appear among the table's columns
    pub fn measures(mut self, pollutant: Pollutant) -> Self {
        self.measures = Some(pollutant);
        self
    }

    /// Evaluate all predicates against one station
    pub(crate) fn matches(&self, station: &Station) -> bool {
        if let Some(term) = &self.name_contains
            && !station.name().to_lowercase().contains(term)
        {
            return false;
        }

        if let Some(min_rows) = self.min_rows
            && station.table().row_count() < min_rows
        {
            return false;
        }

        if let Some((start, end)) = self.overlaps {
            match station.table().time_range() {
                Some((first, last)) => {
                    if first > end || last < start {
                        return false;
                    }
                }
                None => return false,
            }
        }

        if let Some(pollutant) = self.measures
            && !station.table().columns().contains(&pollutant)
        {
            return false;
        }

        true
    }
}
