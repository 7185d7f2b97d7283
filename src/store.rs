use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, info, warn};

use crate::error::SnapshotError;
use crate::models::{ClassEntry, NewClass, ScheduleStatistics};

/// Owns every scheduled class, keyed by [`ClassEntry::key`].
///
/// Entries keep the order in which their keys were first added; overwriting
/// an existing key replaces the entry in place.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    entries: Vec<ClassEntry>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key() == key)
    }

    /// Stores a class under its derived key, replacing any entry with that
    /// key. No conflict checking happens here.
    pub fn add_class(&mut self, class: NewClass) -> ClassEntry {
        let entry = ClassEntry::new(class);
        match self.position(entry.key()) {
            Some(idx) => {
                debug!(key = entry.key(), "overwriting class");
                self.entries[idx] = entry.clone();
            }
            None => {
                debug!(key = entry.key(), "adding class");
                self.entries.push(entry.clone());
            }
        }
        entry
    }

    pub fn get_class(&self, key: &str) -> Option<&ClassEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn remove_class(&mut self, key: &str) -> Option<ClassEntry> {
        let idx = self.position(key)?;
        debug!(key, "removing class");
        Some(self.entries.remove(idx))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassEntry> {
        self.entries.iter()
    }

    pub fn all_classes(&self) -> Vec<ClassEntry> {
        self.entries.clone()
    }

    fn filtered(&self, pred: impl Fn(&ClassEntry) -> bool) -> Vec<ClassEntry> {
        self.entries.iter().filter(|e| pred(e)).cloned().collect()
    }

    pub fn classes_by_course(&self, code: &str) -> Vec<ClassEntry> {
        self.filtered(|e| e.course_code() == code)
    }

    pub fn classes_by_trainer(&self, trainer: &str) -> Vec<ClassEntry> {
        self.filtered(|e| e.trainer() == trainer)
    }

    pub fn classes_by_venue(&self, venue: &str) -> Vec<ClassEntry> {
        self.filtered(|e| e.venue() == venue)
    }

    pub fn statistics(&self) -> ScheduleStatistics {
        let mut trainers = BTreeSet::new();
        let mut venues = BTreeSet::new();
        let mut classes_per_day = BTreeMap::new();
        let mut classes_per_course = BTreeMap::new();

        for entry in &self.entries {
            trainers.insert(entry.trainer());
            venues.insert(entry.venue());
            *classes_per_day.entry(entry.day().to_string()).or_insert(0) += 1;
            *classes_per_course
                .entry(entry.course_code().to_string())
                .or_insert(0) += 1;
        }

        ScheduleStatistics {
            total_classes: self.entries.len(),
            trainers: trainers.len(),
            venues: venues.len(),
            classes_per_day,
            classes_per_course,
        }
    }

    pub fn export_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Replaces the whole store with the entries in `text`.
    ///
    /// The snapshot is parsed and checked in full before anything is
    /// installed; on error the current entries are left untouched.
    pub fn import_json(&mut self, text: &str) -> Result<usize, SnapshotError> {
        let entries = parse_snapshot(text).inspect_err(|err| {
            warn!(error = %err, "rejected timetable snapshot");
        })?;
        info!(classes = entries.len(), "imported timetable snapshot");
        self.entries = entries;
        Ok(self.entries.len())
    }
}

fn parse_snapshot(text: &str) -> Result<Vec<ClassEntry>, SnapshotError> {
    let entries: Vec<ClassEntry> = serde_json::from_str(text)?;
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in &entries {
        if !seen.insert(entry.key()) {
            return Err(SnapshotError::DuplicateKey(entry.key().to_string()));
        }
    }
    Ok(entries)
}
