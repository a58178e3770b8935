//! Pollutant enumeration
//!
//! The closed set of pollutant codes measured by Italian regional networks.
//! Snapshot table columns travel as the canonical code strings, and the
//! 1-based ordinals are the enumeration numbering published to external
//! snapshot consumers, so renaming or renumbering variants is a breaking
//! schema change.

use crate::{Error, Result};
use std::str::FromStr;

/// Pollutant measured by a station sensor
///
/// `Unset` is a sentinel for crawler plumbing and never appears as a
/// measurement table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Pollutant {
    Pm10 = 1,
    Pm25,
    No2,
    Nox,
    O3,
    Benzene,
    Co,
    So2,
    No,
    Unset = 10,
}

impl Pollutant {
    /// All variants, in ordinal order
    pub const ALL: [Pollutant; 10] = [
        Pollutant::Pm10,
        Pollutant::Pm25,
        Pollutant::No2,
        Pollutant::Nox,
        Pollutant::O3,
        Pollutant::Benzene,
        Pollutant::Co,
        Pollutant::So2,
        Pollutant::No,
        Pollutant::Unset,
    ];

    /// Canonical code strings, aligned with [`Pollutant::ALL`]
    const CODES: [&'static str; 10] = [
        "PM10", "PM2_5", "NO2", "NOX", "O3", "BENZENE", "CO", "SO2", "NO", "UNSET",
    ];

    /// Get the stable 1-based ordinal of this pollutant
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Look up a pollutant by its stable 1-based ordinal
    pub fn try_from_ordinal(value: u8) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|pollutant| *pollutant as u8 == value)
            .ok_or_else(|| {
                Error::schema(format!(
                    "Unknown pollutant ordinal {}: must be between 1 and {}",
                    value,
                    Self::ALL.len()
                ))
            })
    }

    /// Get the canonical code string (e.g. "PM2_5")
    pub fn code(self) -> &'static str {
        Self::CODES[(self as u8 - 1) as usize]
    }

    /// Check whether this pollutant may appear as a measurement table column
    pub fn is_column(self) -> bool {
        self != Pollutant::Unset
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::CODES
            .iter()
            .position(|code| *code == s.trim())
            .map(|index| Self::ALL[index])
            .ok_or_else(|| Error::schema(format!("Unknown pollutant code '{}'", s)))
    }
}

impl std::fmt::Display for Pollutant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_are_stable() {
        assert_eq!(Pollutant::Pm10.ordinal(), 1);
        assert_eq!(Pollutant::So2.ordinal(), 8);
        assert_eq!(Pollutant::No.ordinal(), 9);
        assert_eq!(Pollutant::Unset.ordinal(), 10);
    }

    #[test]
    fn test_ordinal_round_trip() {
        for pollutant in Pollutant::ALL {
            assert_eq!(
                Pollutant::try_from_ordinal(pollutant.ordinal()).unwrap(),
                pollutant
            );
        }
    }

    #[test]
    fn test_unknown_ordinal_is_schema_error() {
        let err = Pollutant::try_from_ordinal(0).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
        assert!(Pollutant::try_from_ordinal(11).is_err());
    }

    #[test]
    fn test_code_round_trip() {
        for pollutant in Pollutant::ALL {
            assert_eq!(pollutant.code().parse::<Pollutant>().unwrap(), pollutant);
        }
        assert_eq!("PM2_5".parse::<Pollutant>().unwrap(), Pollutant::Pm25);
        assert!("PM99".parse::<Pollutant>().is_err());
    }

    #[test]
    fn test_unset_is_not_a_column() {
        assert!(!Pollutant::Unset.is_column());
        assert!(Pollutant::Pm10.is_column());
    }
}
