//! Favorite marks keyed by derived record identifiers.
//!
//! The set is an immutable value: toggling produces a new set, and the
//! store replaces its copy wholesale before persisting. Persistence is
//! best-effort in both directions: an absent or corrupt payload loads
//! as the empty set, and a failed write is logged and swallowed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const DATA_DIR: &str = "ausflug";
const FAVORITES_FILE: &str = "favorites.json";
const DATA_DIR_ENV_VAR: &str = "AUSFLUG_DATA_DIR";

/// The set of favorite record keys.
///
/// Only `true` is ever stored; toggling a favorite off removes the key
/// entirely. Serializes as a bare JSON object (`{"id": true}`), the
/// same payload shape the original storage used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(BTreeMap<String, bool>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Pure toggle: a new set with the key removed if present, added
    /// as `true` if absent.
    pub fn toggle(&self, id: &str) -> FavoriteSet {
        let mut next = self.clone();
        if next.contains(id) {
            next.0.remove(id);
        } else {
            next.0.insert(id.to_string(), true);
        }
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Favorite identifiers in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// External key-value persistence collaborator.
///
/// Reads may find nothing (missing file, disabled storage) and writes
/// may fail (full disk); callers treat both as non-events.
pub trait FavoriteBackend {
    /// The stored payload, or `None` when there is none to read.
    fn read(&self) -> Option<String>;
    fn write(&self, payload: &str) -> std::io::Result<()>;
}

/// File-backed persistence under the local data directory.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FavoriteBackend for FileBackend {
    fn read(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn write(&self, payload: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, payload)
    }
}

/// In-memory backend for tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    payload: std::cell::RefCell<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        MemoryBackend {
            payload: std::cell::RefCell::new(Some(payload.into())),
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.payload.borrow().clone()
    }
}

impl FavoriteBackend for MemoryBackend {
    fn read(&self) -> Option<String> {
        self.payload.borrow().clone()
    }

    fn write(&self, payload: &str) -> std::io::Result<()> {
        *self.payload.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

/// Default location for the favorites file. The environment variable
/// override keeps integration tests away from the real data dir.
pub fn default_favorites_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV_VAR) {
        return Some(PathBuf::from(dir).join(FAVORITES_FILE));
    }
    dirs::data_dir().map(|d| d.join(DATA_DIR).join(FAVORITES_FILE))
}

/// The favorite set plus its persistence collaborator.
///
/// Every mutation persists the new set immediately; persistence
/// failures never surface to the caller.
pub struct FavoriteStore {
    backend: Box<dyn FavoriteBackend>,
    set: FavoriteSet,
}

impl FavoriteStore {
    /// Load whatever the backend holds; any failure yields the empty
    /// set, never an error.
    pub fn open(backend: Box<dyn FavoriteBackend>) -> Self {
        let set = load_set(&*backend);
        FavoriteStore { backend, set }
    }

    pub fn set(&self) -> &FavoriteSet {
        &self.set
    }

    /// Toggle one favorite and persist. Returns the new favorite state
    /// of the id.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.set = self.set.toggle(id);
        self.persist();
        self.set.contains(id)
    }

    /// Remove all favorites and persist.
    pub fn clear(&mut self) {
        self.set = FavoriteSet::new();
        self.persist();
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.set) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize favorites");
                return;
            }
        };
        if let Err(err) = self.backend.write(&payload) {
            tracing::warn!(error = %err, "failed to persist favorites");
        }
    }
}

fn load_set(backend: &dyn FavoriteBackend) -> FavoriteSet {
    let Some(payload) = backend.read() else {
        return FavoriteSet::new();
    };
    match serde_json::from_str(&payload) {
        Ok(set) => set,
        Err(err) => {
            tracing::warn!(error = %err, "favorites payload unreadable, starting empty");
            FavoriteSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let set = FavoriteSet::new();
        let on = set.toggle("70000::Zoo");
        assert!(on.contains("70000::Zoo"));
        assert_eq!(on.len(), 1);

        let off = on.toggle("70000::Zoo");
        assert!(!off.contains("70000::Zoo"));
        assert!(off.is_empty());
        // The original set was never mutated.
        assert!(set.is_empty());
    }

    #[test]
    fn false_is_never_stored() {
        let set = FavoriteSet::new().toggle("a").toggle("a");
        assert_eq!(serde_json::to_string(&set).unwrap(), "{}");

        let set = FavoriteSet::new().toggle("a");
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"{"a":true}"#);
    }

    #[test]
    fn store_loads_existing_payload() {
        let backend = MemoryBackend::with_payload(r#"{"70000::Zoo":true}"#);
        let store = FavoriteStore::open(Box::new(backend));
        assert!(store.set().contains("70000::Zoo"));
    }

    #[test]
    fn missing_payload_loads_empty() {
        let store = FavoriteStore::open(Box::new(MemoryBackend::new()));
        assert!(store.set().is_empty());
    }

    #[test]
    fn corrupt_payload_loads_empty() {
        for payload in ["not json", "[1,2,3]", r#"{"a": "yes"}"#, "42"] {
            let backend = MemoryBackend::with_payload(payload);
            let store = FavoriteStore::open(Box::new(backend));
            assert!(store.set().is_empty(), "payload {payload:?}");
        }
    }

    #[test]
    fn every_toggle_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let mut store = FavoriteStore::open(Box::new(FileBackend::new(&path)));
        store.toggle("a");
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"a":true}"#);
        store.toggle("a");
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");

        let mut store = FavoriteStore::open(Box::new(FileBackend::new(&path)));
        store.toggle("70000::Zoo");
        store.toggle("70001::Museum");

        let reopened = FavoriteStore::open(Box::new(FileBackend::new(&path)));
        assert!(reopened.set().contains("70000::Zoo"));
        assert!(reopened.set().contains("70001::Museum"));
        assert_eq!(reopened.set().len(), 2);
    }

    #[test]
    fn write_failure_is_swallowed() {
        struct BrokenBackend;
        impl FavoriteBackend for BrokenBackend {
            fn read(&self) -> Option<String> {
                None
            }
            fn write(&self, _payload: &str) -> std::io::Result<()> {
                Err(std::io::Error::other("disk full"))
            }
        }

        let mut store = FavoriteStore::open(Box::new(BrokenBackend));
        // The in-memory state still advances.
        assert!(store.toggle("a"));
        assert!(store.set().contains("a"));
    }

    #[test]
    fn clear_empties_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        let mut store = FavoriteStore::open(Box::new(FileBackend::new(&path)));
        store.toggle("a");
        store.toggle("b");
        store.clear();
        assert!(store.set().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
