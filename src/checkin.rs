//! Daily wellness check-ins and the JSON log that keeps them between sessions.

use crate::slots;
use crate::store::{self, StoreError};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the check-in log.
pub const DEFAULT_LOG_PATH: &str = "wellness_log.json";

/// One check-in as stored in the log.
///
/// The timestamp is kept as the text found in the file so entries written by
/// other tools, or without a timestamp at all, survive a rewrite unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub energy: String,
    #[serde(default)]
    pub stress: String,
    #[serde(default)]
    pub objectives: Vec<String>,
}

impl CheckinEntry {
    /// Build an entry stamped with the current UTC time.
    pub fn new(mood: &str, energy: &str, stress: &str, objectives: &str) -> Self {
        Self::at(Utc::now(), mood, energy, stress, objectives)
    }

    pub fn at(
        timestamp: DateTime<Utc>,
        mood: &str,
        energy: &str,
        stress: &str,
        objectives: &str,
    ) -> Self {
        let mut list = Vec::new();
        slots::append_unique(&mut list, objectives);

        Self {
            timestamp: Some(format_timestamp(&timestamp)),
            mood: mood.to_string(),
            energy: energy.to_string(),
            stress: stress.to_string(),
            objectives: list,
        }
    }

    /// The timestamp as UTC, if present and readable. Values without an
    /// offset are taken to be UTC.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}

/// ISO-8601 with a trailing `Z`; microseconds only when non-zero.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    let precision = if ts.timestamp_subsec_micros() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(precision, true)
}

/// Append-only history of check-ins stored as one JSON array.
///
/// Appending rereads and rewrites the whole file. Two writers racing on the
/// same path lose entries; the last one to write wins.
#[derive(Debug, Clone)]
pub struct CheckinLog {
    path: PathBuf,
}

impl CheckinLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the log, telling a missing file apart from a broken one.
    pub fn read(&self) -> Result<Vec<CheckinEntry>, StoreError> {
        store::read_json(&self.path)
    }

    /// Read the log, degrading every failure to an empty history.
    pub fn load(&self) -> Vec<CheckinEntry> {
        match self.read() {
            Ok(entries) => entries,
            Err(StoreError::NotFound(_)) => Vec::new(),
            Err(e) => {
                log::error!("Failed to load wellness log: {}", e);
                Vec::new()
            }
        }
    }

    pub fn last(&self) -> Option<CheckinEntry> {
        self.load().pop()
    }

    /// Add `entry` at the end of the log. Returns the new number of entries.
    pub fn append(&self, entry: CheckinEntry) -> Result<usize, StoreError> {
        let mut entries = self.load();
        entries.push(entry);

        match store::write_pretty(&self.path, &entries) {
            Ok(()) => {
                log::info!(
                    "Saved check-in #{} to {}",
                    entries.len(),
                    self.path.display()
                );
                Ok(entries.len())
            }
            Err(e) => {
                log::error!("Failed to save wellness log: {}", e);
                Err(e)
            }
        }
    }
}

/// One sentence recalling the previous check-in, or an empty string.
pub fn summarize_last(entry: Option<&CheckinEntry>) -> String {
    match entry {
        Some(entry) => format!(
            "Yesterday you felt {} with {} energy.",
            entry.mood.to_lowercase(),
            entry.energy.to_lowercase()
        ),
        None => String::new(),
    }
}
