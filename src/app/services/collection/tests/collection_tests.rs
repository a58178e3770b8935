//! Tests for collection ownership, search and persistence

use super::*;
use crate::app::models::pollutant::Pollutant;
use crate::app::services::collection::{SearchResult, StationCollection};
use crate::Error;
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tracing::subscriber::with_default;
use tracing_subscriber::fmt::MakeWriter;

/// Collects formatted log output so warning behavior can be asserted
#[derive(Clone, Default)]
struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber capturing WARN and above
fn capture_warnings(f: impl FnOnce()) -> String {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    with_default(subscriber, f);
    capture.contents()
}

#[test]
fn test_add_and_get() {
    let mut collection = StationCollection::new();
    let station = create_test_station("Rebaudengo", &[(1, Pollutant::So2, 12.0)]);
    let id = station.id();

    assert!(collection.add(station));
    assert_eq!(collection.len(), 1);
    assert!(collection.contains(id));
    assert_eq!(collection.get(id).unwrap().name(), "Rebaudengo");
}

#[test]
fn test_duplicate_add_is_skipped() {
    let mut collection = StationCollection::new();
    let station = create_test_station("Rebaudengo", &[]);
    let duplicate = station.clone();

    assert!(collection.add(station));
    assert!(!collection.add(duplicate));
    assert_eq!(collection.len(), 1);
}

#[test]
fn test_same_name_different_identity_both_kept() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Rebaudengo", &[]));
    collection.add(create_test_station("Rebaudengo", &[]));
    assert_eq!(collection.len(), 2);
}

#[test]
fn test_remove_absent_is_noop() {
    let mut collection = StationCollection::new();
    let station = create_test_station("Rebaudengo", &[]);
    let id = station.id();
    collection.add(station);

    let stranger = create_test_station("Stranger", &[]);
    assert!(collection.remove(stranger.id()).is_none());
    assert_eq!(collection.len(), 1);

    assert!(collection.remove(id).is_some());
    assert!(collection.is_empty());
}

#[test]
fn test_remove_all_counts_removed() {
    let mut collection = StationCollection::new();
    let a = create_test_station("A", &[]);
    let b = create_test_station("B", &[]);
    let a_id = a.id();
    let b_id = b.id();
    collection.add_all(vec![a, b]);

    let absent = create_test_station("C", &[]).id();
    assert_eq!(collection.remove_all(&[a_id, absent, b_id]), 2);
    assert!(collection.is_empty());
}

#[test]
fn test_remove_empty_drops_dataless_stations() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Empty", &[]));
    let kept = create_test_station("Full", &[(1, Pollutant::Pm10, 40.0)]);
    let kept_id = kept.id();
    collection.add(kept);

    assert_eq!(collection.remove_empty(), 1);
    assert_eq!(collection.len(), 1);
    assert!(collection.contains(kept_id));
}

#[test]
fn test_iteration_is_name_ordered_and_restartable() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Torino Consolata", &[]));
    collection.add(create_test_station("Asti Baussano", &[]));
    collection.add(create_test_station("Milano Senato", &[]));

    let names: Vec<&str> = collection.iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec!["Asti Baussano", "Milano Senato", "Torino Consolata"]
    );

    // A second call produces a fresh pass over the same sequence
    let again: Vec<&str> = collection.iter().map(|s| s.name()).collect();
    assert_eq!(names, again);
}

#[test]
fn test_search_unique_match_returns_single_record() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Rebaudengo", &[]));
    collection.add(create_test_station("Consolata", &[]));

    match collection.search("rebaud") {
        SearchResult::Unique(station) => assert_eq!(station.name(), "Rebaudengo"),
        SearchResult::Matches(_) => panic!("expected a unique match"),
    }
}

#[test]
fn test_search_no_match_returns_empty_list() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Rebaudengo", &[]));

    let result = collection.search("zzz");
    assert!(result.is_empty());
    assert!(result.unique().is_none());
    assert!(result.into_vec().is_empty());
}

#[test]
fn test_search_ambiguous_returns_list() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Torino Rebaudengo", &[]));
    collection.add(create_test_station("Torino Consolata", &[]));

    let result = collection.search("TORINO");
    assert_eq!(result.len(), 2);
    assert!(result.unique().is_none());
    let names: Vec<&str> = result.into_vec().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Torino Consolata", "Torino Rebaudengo"]);
}

#[test]
fn test_duplicate_add_emits_one_warning() {
    let logs = capture_warnings(|| {
        let mut collection = StationCollection::new();
        let station = create_test_station("Rebaudengo", &[]);
        let duplicate = station.clone();
        assert!(collection.add(station));
        assert!(!collection.add(duplicate));
        assert_eq!(collection.len(), 1);
    });

    assert_eq!(logs.matches("already present").count(), 1);
    assert!(logs.contains("Rebaudengo"));
}

#[test]
fn test_remove_absent_emits_warning() {
    let logs = capture_warnings(|| {
        let mut collection = StationCollection::new();
        collection.add(create_test_station("Rebaudengo", &[]));
        let absent = create_test_station("Stranger", &[]).id();
        assert!(collection.remove(absent).is_none());
    });

    assert_eq!(logs.matches("ignoring removal").count(), 1);
}

#[test]
fn test_ambiguous_search_emits_warning() {
    let logs = capture_warnings(|| {
        let mut collection = StationCollection::new();
        collection.add(create_test_station("Torino Rebaudengo", &[]));
        collection.add(create_test_station("Torino Consolata", &[]));
        assert_eq!(collection.search("Torino").len(), 2);
    });

    assert!(logs.contains("matched 2 stations"));
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("piemonte.msgpack");

    let mut collection = StationCollection::new();
    let mut station = create_test_station("Rebaudengo", &[(1, Pollutant::So2, 12.0)]);
    station.set_address(None, None, Some("Torino"));
    collection.add(station);
    collection.save(&path).unwrap();

    let loaded = StationCollection::load(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    let station = loaded.search("Rebaudengo").unique().unwrap().clone();
    assert_eq!(station.comune.as_deref(), Some("Torino"));
    assert_eq!(station.table().value(ts(1), Pollutant::So2), Some(12.0));
}

#[test]
fn test_load_missing_path_fails_with_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does_not_exist.msgpack");

    match StationCollection::load(&path) {
        Err(Error::FileNotFound { .. }) => {}
        other => panic!("expected FileNotFound, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn test_display_lists_stations() {
    let mut collection = StationCollection::new();
    collection.add(create_test_station("Rebaudengo", &[(1, Pollutant::So2, 12.0)]));

    let rendered = collection.to_string();
    assert!(rendered.contains("1 stations"));
    assert!(rendered.contains("Rebaudengo"));
    assert!(rendered.contains("SO2"));
}
