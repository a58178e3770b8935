//! Owning store of station records keyed by identity
//!
//! A [`StationCollection`] exclusively owns its records. Duplicate additions
//! and removals of unknown identities are non-fatal: the operation is skipped
//! and a warning is logged. Iteration is ordered by station name (ties broken
//! by creation time, then identity) so grouping and persisted snapshots are
//! deterministic.
//!
//! The collection is not internally synchronized. It assumes a single writer
//! at a time; reconciler merges perform multi-step remove+add sequences
//! through `&mut self`, which is what makes them appear atomic to other
//! observers.

use crate::app::models::{Station, StationId};
use crate::app::services::codec;
use crate::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

pub mod query;

#[cfg(test)]
pub mod tests;

pub use query::StationQuery;

/// Result of a name search over a collection
///
/// Exactly one match yields the single record; zero or several matches yield
/// the (possibly empty) list. Callers that require exactly one match must
/// check the variant.
#[derive(Debug)]
pub enum SearchResult<'a> {
    /// Exactly one record matched the search term
    Unique(&'a Station),

    /// Zero, two or more records matched, in name order
    Matches(Vec<&'a Station>),
}

impl<'a> SearchResult<'a> {
    /// Number of matching records
    pub fn len(&self) -> usize {
        match self {
            SearchResult::Unique(_) => 1,
            SearchResult::Matches(matches) => matches.len(),
        }
    }

    /// Check whether nothing matched
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The single match, if the search was unambiguous
    pub fn unique(&self) -> Option<&'a Station> {
        match self {
            SearchResult::Unique(station) => Some(station),
            SearchResult::Matches(_) => None,
        }
    }

    /// All matches as a list, regardless of ambiguity
    pub fn into_vec(self) -> Vec<&'a Station> {
        match self {
            SearchResult::Unique(station) => vec![station],
            SearchResult::Matches(matches) => matches,
        }
    }
}

/// Owning, de-duplicated set of station records
#[derive(Debug, Clone, Default)]
pub struct StationCollection {
    /// Records indexed by identity for O(1) lookups
    stations: HashMap<StationId, Station>,
}

impl StationCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a collection from a persisted snapshot
    ///
    /// Fails with a file-not-found error when `path` does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut collection = Self::new();
        collection.add_all(codec::load_collection(path.as_ref())?);
        Ok(collection)
    }

    /// Insert a record by identity
    ///
    /// Returns `true` if the record was inserted. If the identity is already
    /// present the insertion is skipped with a warning; duplicate insertion
    /// is not an error condition.
    pub fn add(&mut self, station: Station) -> bool {
        if self.stations.contains_key(&station.id()) {
            warn!(
                "Station '{}' ({}) already present in collection, skipping addition",
                station.name(),
                station.id()
            );
            return false;
        }
        self.stations.insert(station.id(), station);
        true
    }

    /// Insert multiple records, returning how many were actually inserted
    pub fn add_all(&mut self, stations: impl IntoIterator<Item = Station>) -> usize {
        let mut inserted = 0;
        for station in stations {
            if self.add(station) {
                inserted += 1;
            }
        }
        inserted
    }

    /// Remove the record with the given identity
    ///
    /// Returns the removed record, or `None` with a warning when no record
    /// carries that identity.
    pub fn remove(&mut self, id: StationId) -> Option<Station> {
        let removed = self.stations.remove(&id);
        if removed.is_none() {
            warn!("No station with identity {}, ignoring removal", id);
        }
        removed
    }

    /// Remove multiple identities, returning how many records were removed
    pub fn remove_all(&mut self, ids: &[StationId]) -> usize {
        ids.iter().filter(|id| self.remove(**id).is_some()).count()
    }

    /// Remove records whose tables hold no cells, returning how many went
    pub fn remove_empty(&mut self) -> usize {
        let empty: Vec<StationId> = self
            .stations
            .values()
            .filter(|station| station.table().is_empty())
            .map(|station| station.id())
            .collect();
        self.remove_all(&empty)
    }

    /// Get a record by identity (O(1) lookup)
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Check whether a record with the given identity is present
    pub fn contains(&self, id: StationId) -> bool {
        self.stations.contains_key(&id)
    }

    /// Number of records in the collection
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Check whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All records ordered by name, then creation time, then identity
    pub fn stations(&self) -> Vec<&Station> {
        let mut stations: Vec<&Station> = self.stations.values().collect();
        stations.sort_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));
        stations
    }

    /// Iterate records in name order
    ///
    /// Each call produces a fresh, finite iterator over the current contents.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations().into_iter()
    }

    /// Records matching `name` exactly, in collection order
    pub(crate) fn find_by_exact_name(&self, name: &str) -> Vec<&Station> {
        self.stations()
            .into_iter()
            .filter(|station| station.name() == name)
            .collect()
    }

    /// Case-insensitive substring search against station names
    ///
    /// Exactly one match returns [`SearchResult::Unique`]; zero or several
    /// matches return [`SearchResult::Matches`]. An ambiguous search is not
    /// an error, but it is logged.
    pub fn search(&self, term: &str) -> SearchResult<'_> {
        let term_lower = term.to_lowercase();
        let mut matches: Vec<&Station> = self
            .stations()
            .into_iter()
            .filter(|station| station.name().to_lowercase().contains(&term_lower))
            .collect();

        if matches.len() == 1 {
            SearchResult::Unique(matches.remove(0))
        } else {
            if matches.len() > 1 {
                warn!(
                    "Search term '{}' matched {} stations",
                    term,
                    matches.len()
                );
            }
            SearchResult::Matches(matches)
        }
    }

    /// Records matching all predicates of `query`, in name order
    pub fn select(&self, query: &StationQuery) -> Vec<&Station> {
        self.stations()
            .into_iter()
            .filter(|station| query.matches(station))
            .collect()
    }

    /// Persist the collection as one snapshot file, records in name order
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        codec::save_collection(&self.stations(), path.as_ref())
    }
}

impl std::fmt::Display for StationCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "StationCollection ({} stations)", self.len())?;
        for station in self.iter() {
            writeln!(f, "  {}", station)?;
        }
        Ok(())
    }
}
