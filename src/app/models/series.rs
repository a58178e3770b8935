//! Sparse timestamp-indexed measurement table
//!
//! The single pollutant table carried by every station. Rows are unique
//! timestamps in ascending order (guaranteed by the ordered map), columns are
//! pollutant codes, and cells may be absent.

use crate::app::models::pollutant::Pollutant;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Ordered, timestamp-indexed set of pollutant measurements
///
/// The table is sparse: a cell exists only where a source supplied a value.
/// Timestamp uniqueness and ascending row order hold by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementTable {
    rows: BTreeMap<DateTime<Utc>, BTreeMap<Pollutant, f64>>,
}

impl MeasurementTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one measurement cell, overwriting any previous value for the
    /// same (timestamp, pollutant) pair
    ///
    /// Fails with a validation error if `pollutant` is the `Unset` sentinel,
    /// which never appears as a column.
    pub fn insert(
        &mut self,
        timestamp: DateTime<Utc>,
        pollutant: Pollutant,
        value: f64,
    ) -> Result<()> {
        if !pollutant.is_column() {
            return Err(Error::validation(
                "Pollutant UNSET cannot be used as a table column",
            ));
        }
        self.rows.entry(timestamp).or_default().insert(pollutant, value);
        Ok(())
    }

    /// Get the cell value for a (timestamp, pollutant) pair, if present
    pub fn value(&self, timestamp: DateTime<Utc>, pollutant: Pollutant) -> Option<f64> {
        self.rows.get(&timestamp)?.get(&pollutant).copied()
    }

    /// Get the row at a timestamp, if present
    pub fn row(&self, timestamp: DateTime<Utc>) -> Option<&BTreeMap<Pollutant, f64>> {
        self.rows.get(&timestamp)
    }

    /// Iterate rows in ascending timestamp order
    pub fn rows(&self) -> impl Iterator<Item = (DateTime<Utc>, &BTreeMap<Pollutant, f64>)> {
        self.rows.iter().map(|(timestamp, cells)| (*timestamp, cells))
    }

    /// Iterate row timestamps in ascending order
    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.rows.keys().copied()
    }

    /// The column set of the table, sorted alphabetically by code
    pub fn columns(&self) -> Vec<Pollutant> {
        let set: BTreeSet<Pollutant> = self
            .rows
            .values()
            .flat_map(|cells| cells.keys().copied())
            .collect();
        let mut columns: Vec<Pollutant> = set.into_iter().collect();
        columns.sort_by_key(|pollutant| pollutant.code());
        columns
    }

    /// Number of rows (unique timestamps)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|cells| cells.len()).sum()
    }

    /// Check whether the table holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Minimum and maximum row timestamps, absent for an empty table
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.rows.keys().next()?;
        let last = self.rows.keys().next_back()?;
        Some((*first, *last))
    }

    /// Outer union of `other` into this table on the timestamp key
    ///
    /// Every cell of `other` is applied over this table; cells present in
    /// both with the same value collapse silently, while conflicting values
    /// are overwritten (last-applied-wins). Returns the number of cells that
    /// were overwritten with a different value, so callers can surface the
    /// conflict.
    pub fn merge_from(&mut self, other: &MeasurementTable) -> usize {
        let mut conflicts = 0;
        for (timestamp, cells) in &other.rows {
            let row = self.rows.entry(*timestamp).or_default();
            for (pollutant, value) in cells {
                if let Some(previous) = row.insert(*pollutant, *value)
                    && previous != *value
                {
                    conflicts += 1;
                }
            }
        }
        conflicts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_insert_and_value() {
        let mut table = MeasurementTable::new();
        table.insert(ts(6), Pollutant::So2, 12.0).unwrap();
        table.insert(ts(7), Pollutant::So2, 9.0).unwrap();

        assert_eq!(table.value(ts(6), Pollutant::So2), Some(12.0));
        assert_eq!(table.value(ts(6), Pollutant::No2), None);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell_count(), 2);
    }

    #[test]
    fn test_unset_column_rejected() {
        let mut table = MeasurementTable::new();
        let err = table.insert(ts(6), Pollutant::Unset, 1.0).unwrap_err();
        assert!(matches!(err, crate::Error::Validation { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_timestamp_overwrites_cell() {
        let mut table = MeasurementTable::new();
        table.insert(ts(6), Pollutant::Pm10, 40.0).unwrap();
        table.insert(ts(6), Pollutant::Pm10, 42.0).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(ts(6), Pollutant::Pm10), Some(42.0));
    }

    #[test]
    fn test_rows_are_timestamp_ordered() {
        let mut table = MeasurementTable::new();
        table.insert(ts(9), Pollutant::O3, 80.0).unwrap();
        table.insert(ts(6), Pollutant::O3, 70.0).unwrap();
        table.insert(ts(7), Pollutant::O3, 75.0).unwrap();

        let timestamps: Vec<_> = table.timestamps().collect();
        assert_eq!(timestamps, vec![ts(6), ts(7), ts(9)]);
        assert_eq!(table.time_range(), Some((ts(6), ts(9))));
    }

    #[test]
    fn test_columns_sorted_alphabetically() {
        let mut table = MeasurementTable::new();
        table.insert(ts(6), Pollutant::So2, 1.0).unwrap();
        table.insert(ts(6), Pollutant::Benzene, 2.0).unwrap();
        table.insert(ts(7), Pollutant::No2, 3.0).unwrap();

        // BENZENE < NO2 < SO2
        assert_eq!(
            table.columns(),
            vec![Pollutant::Benzene, Pollutant::No2, Pollutant::So2]
        );
    }

    #[test]
    fn test_merge_from_outer_union() {
        let mut left = MeasurementTable::new();
        left.insert(ts(1), Pollutant::So2, 12.0).unwrap();
        left.insert(ts(2), Pollutant::So2, 9.0).unwrap();

        let mut right = MeasurementTable::new();
        right.insert(ts(2), Pollutant::No2, 30.0).unwrap();
        right.insert(ts(3), Pollutant::No2, 28.0).unwrap();

        let conflicts = left.merge_from(&right);
        assert_eq!(conflicts, 0);
        assert_eq!(left.row_count(), 3);
        assert_eq!(left.columns(), vec![Pollutant::No2, Pollutant::So2]);
        assert_eq!(left.value(ts(2), Pollutant::So2), Some(9.0));
        assert_eq!(left.value(ts(2), Pollutant::No2), Some(30.0));
        assert_eq!(left.value(ts(1), Pollutant::No2), None);
        assert_eq!(left.value(ts(3), Pollutant::So2), None);
    }

    #[test]
    fn test_merge_from_counts_conflicting_cells() {
        let mut left = MeasurementTable::new();
        left.insert(ts(1), Pollutant::Pm10, 40.0).unwrap();
        left.insert(ts(2), Pollutant::Pm10, 41.0).unwrap();

        let mut right = MeasurementTable::new();
        right.insert(ts(1), Pollutant::Pm10, 40.0).unwrap(); // identical, no conflict
        right.insert(ts(2), Pollutant::Pm10, 99.0).unwrap(); // conflicting

        let conflicts = left.merge_from(&right);
        assert_eq!(conflicts, 1);
        assert_eq!(left.value(ts(2), Pollutant::Pm10), Some(99.0));
    }
}
