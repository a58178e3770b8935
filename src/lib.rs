//! Aria Aggregator Library
//!
//! A Rust library for aggregating time-series air pollution measurements
//! collected from heterogeneous Italian regional sources into a unified,
//! de-duplicated, persistable dataset.
//!
//! This library provides tools for:
//! - Modelling pollutant-measuring stations with validated geographic metadata
//! - Owning and querying de-duplicated station collections
//! - Reconciling same-named single-pollutant sensor feeds into one station
//!   via an outer union of their measurement tables on the timestamp key
//! - Combining collections covering disjoint time windows of the same stations
//! - Persisting collections as cross-language MessagePack snapshots
//!
//! Crawlers (network fetching and regional CSV/HTML dialects), viewers and
//! command-line orchestration are external collaborators: they produce and
//! consume the entities defined here but are not part of this crate.
//!
//! # Concurrency
//!
//! The core is single-threaded and synchronous. A [`StationCollection`] is
//! not internally synchronized; it assumes one writer at a time. Merge
//! operations take `&mut` and perform multi-step remove+add sequences, so
//! embedders that share a collection must guard it with one exclusive lock
//! per instance.

pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod codec;
        pub mod collection;
        pub mod reconciler;
    }
}

// Re-export commonly used types
pub use app::models::geography::{Province, Region};
pub use app::models::pollutant::Pollutant;
pub use app::models::series::MeasurementTable;
pub use app::models::{DataInfo, Geolocation, PremergeSource, Station, StationId, StationMetadata};
pub use app::services::collection::{SearchResult, StationCollection};

/// Result type alias for aggregation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for station modelling, reconciliation and persistence
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Entity construction or mutation violated an invariant
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// A persisted collection path does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A persisted document does not match the known schema
    #[error("Schema error: {message}")]
    Schema { message: String },

    /// MessagePack encoding failed
    #[error("Encoding error: {message}")]
    Encode {
        message: String,
        #[source]
        source: rmp_serde::encode::Error,
    },

    /// MessagePack decoding failed
    #[error("Decoding error: {message}")]
    Decode {
        message: String,
        #[source]
        source: rmp_serde::decode::Error,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create an encoding error with context
    pub fn encode(message: impl Into<String>, source: rmp_serde::encode::Error) -> Self {
        Self::Encode {
            message: message.into(),
            source,
        }
    }

    /// Create a decoding error with context
    pub fn decode(message: impl Into<String>, source: rmp_serde::decode::Error) -> Self {
        Self::Decode {
            message: message.into(),
            source,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(error: rmp_serde::encode::Error) -> Self {
        Self::Encode {
            message: "MessagePack encoding failed".to_string(),
            source: error,
        }
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(error: rmp_serde::decode::Error) -> Self {
        Self::Decode {
            message: "MessagePack decoding failed".to_string(),
            source: error,
        }
    }
}
