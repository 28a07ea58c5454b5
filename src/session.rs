//! Per-class entry/exit tallies for one counting session and the flat JSON
//! record they are saved as.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::crossing::{CrossingDirection, CrossingEvent};
use crate::error::TrackError;

/*----------------------------------------------------------------------------
SessionAggregate
----------------------------------------------------------------------------*/

#[derive(Debug, Clone, PartialEq)]
pub struct SessionAggregate {
    entries: BTreeMap<usize, u64>,
    exits: BTreeMap<usize, u64>,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl Default for SessionAggregate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionAggregate {
    /// Start a session now.
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    pub fn started_at(start: DateTime<Utc>) -> Self {
        Self {
            entries: BTreeMap::new(),
            exits: BTreeMap::new(),
            start,
            end: None,
        }
    }

    /// Rebuild an aggregate from a saved record. The end timestamp is kept.
    pub fn from_record(record: &SessionRecord) -> Self {
        Self {
            entries: record.entries.clone(),
            exits: record.exits.clone(),
            start: record.start,
            end: Some(record.end),
        }
    }

    pub fn record_entry(&mut self, class_id: usize) {
        *self.entries.entry(class_id).or_insert(0) += 1;
    }

    pub fn record_exit(&mut self, class_id: usize) {
        *self.exits.entry(class_id).or_insert(0) += 1;
    }

    pub fn record(&mut self, event: &CrossingEvent) {
        match event.direction {
            CrossingDirection::Entry => self.record_entry(event.class_id),
            CrossingDirection::Exit => self.record_exit(event.class_id),
        }
    }

    pub fn entries(&self) -> &BTreeMap<usize, u64> {
        &self.entries
    }

    pub fn exits(&self) -> &BTreeMap<usize, u64> {
        &self.exits
    }

    pub fn entry_count(&self, class_id: usize) -> u64 {
        self.entries.get(&class_id).copied().unwrap_or(0)
    }

    pub fn exit_count(&self, class_id: usize) -> u64 {
        self.exits.get(&class_id).copied().unwrap_or(0)
    }

    pub fn total_entries(&self) -> u64 {
        self.entries.values().sum()
    }

    pub fn total_exits(&self) -> u64 {
        self.exits.values().sum()
    }

    /// Total entries minus total exits.
    pub fn net(&self) -> i64 {
        self.total_entries() as i64 - self.total_exits() as i64
    }

    /// Every class id with at least one entry or exit, ascending.
    pub fn classes(&self) -> Vec<usize> {
        self.entries
            .keys()
            .chain(self.exits.keys())
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    /// Close the session at `end` and produce the record to persist.
    pub fn snapshot(&mut self, mode: impl Into<String>, end: DateTime<Utc>) -> SessionRecord {
        self.end = Some(end);
        SessionRecord {
            mode: mode.into(),
            start: self.start,
            end,
            entries: self.entries.clone(),
            exits: self.exits.clone(),
        }
    }
}

/*----------------------------------------------------------------------------
SessionRecord
----------------------------------------------------------------------------*/

/// Serialized form of a session: `{mode, start, end, entries, exits}`.
///
/// Timestamps are RFC 3339; count maps are keyed by class id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub mode: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub entries: BTreeMap<usize, u64>,
    pub exits: BTreeMap<usize, u64>,
}

impl SessionRecord {
    pub fn to_json(&self) -> Result<String, TrackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `<mode>_<YYYYmmdd_HHMMSS>.json`, stamped with the end time.
    pub fn file_name(&self) -> String {
        format!("{}_{}.json", self.mode, self.end.format("%Y%m%d_%H%M%S"))
    }

    /// Write the record into `dir` and return the path of the new file.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, TrackError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;

        info!(path = %path.display(), mode = %self.mode, "saved session");
        Ok(path)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TrackError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
