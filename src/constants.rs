//! Application constants for the aggregation core
//!
//! This module contains the schema and file-format constants shared by the
//! codec and the collection persistence layer.

// =============================================================================
// Persisted Snapshot Format
// =============================================================================

/// Schema version written into every encoded station document
///
/// Snapshots produced before versioning carry no `schema_version` key; they
/// decode as [`SCHEMA_VERSION_LEGACY`].
pub const SCHEMA_VERSION: u32 = 1;

/// Version assigned to documents that predate the `schema_version` field
pub const SCHEMA_VERSION_LEGACY: u32 = 0;

/// Conventional file extension for persisted collection snapshots
pub const SNAPSHOT_FILE_EXTENSION: &str = "msgpack";
