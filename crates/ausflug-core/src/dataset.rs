//! Dataset loading with silent degradation to an empty collection.
//!
//! The catalog is fetched once at startup. Per the engine contract a
//! broken source never crashes the session: the loader returns an
//! empty collection and names the reason instead of erroring, and the
//! caller decides how loudly to report it.

use std::fmt;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::record::Record;

/// Why a load produced no (or fewer) records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    MissingFile,
    Unreadable,
    MalformedJson,
    NotAnArray,
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::MissingFile => write!(f, "file not found"),
            DegradeReason::Unreadable => write!(f, "file could not be read"),
            DegradeReason::MalformedJson => write!(f, "payload is not valid JSON"),
            DegradeReason::NotAnArray => write!(f, "payload is not a JSON array"),
        }
    }
}

/// Result of a dataset load. `degraded` is set when the whole source
/// was unusable; `skipped` counts array entries that were not objects.
#[derive(Debug, Default)]
pub struct DatasetLoad {
    pub records: Vec<Record>,
    pub degraded: Option<DegradeReason>,
    pub skipped: usize,
}

impl DatasetLoad {
    fn degraded(reason: DegradeReason) -> Self {
        DatasetLoad {
            records: Vec::new(),
            degraded: Some(reason),
            skipped: 0,
        }
    }
}

/// Load a JSON array of records from a file. Never errors.
pub fn load(path: &Path) -> DatasetLoad {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "dataset file missing, starting empty");
        return DatasetLoad::degraded(DegradeReason::MissingFile);
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "dataset unreadable, starting empty");
            return DatasetLoad::degraded(DegradeReason::Unreadable);
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "dataset is not valid JSON, starting empty");
            return DatasetLoad::degraded(DegradeReason::MalformedJson);
        }
    };

    let Value::Array(entries) = value else {
        tracing::warn!(path = %path.display(), "dataset is not a JSON array, starting empty");
        return DatasetLoad::degraded(DegradeReason::NotAnArray);
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for entry in entries {
        match Record::from_value(entry) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "dropped non-object dataset entries");
    }

    DatasetLoad {
        records,
        degraded: None,
        skipped,
    }
}
