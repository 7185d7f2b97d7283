use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Derives the identity of a class from the four fields that place it.
///
/// Whitespace inside the intake label is dropped, so `"SEP 25"` and
/// `"SEP25"` name the same cohort. Parts are joined with `-` unescaped, so a
/// `-` inside the day, course code or intake can make two different classes
/// share a key; strict validation rejects such values.
pub fn class_key(day: &str, course_code: &str, intake: &str, time_slot: usize) -> String {
    let intake: String = intake.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{day}-{course_code}-{intake}-{time_slot}")
}

/// A class as submitted by a caller, before it gets a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewClass {
    pub day: String,
    pub course_code: String,
    pub intake: String,
    pub time_slot: usize,
    pub subject: String,
    pub trainer: String,
    pub venue: String,
}

impl NewClass {
    pub fn key(&self) -> String {
        class_key(&self.day, &self.course_code, &self.intake, self.time_slot)
    }
}

/// A scheduled class together with its derived key.
///
/// Entries are immutable once built; changing any field means building a new
/// entry, which recomputes the key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "EntryRecord", into = "EntryRecord")]
pub struct ClassEntry {
    key: String,
    class: NewClass,
}

impl ClassEntry {
    pub fn new(class: NewClass) -> Self {
        Self {
            key: class.key(),
            class,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn details(&self) -> &NewClass {
        &self.class
    }

    pub fn into_details(self) -> NewClass {
        self.class
    }

    pub fn day(&self) -> &str {
        &self.class.day
    }

    pub fn course_code(&self) -> &str {
        &self.class.course_code
    }

    pub fn intake(&self) -> &str {
        &self.class.intake
    }

    pub fn time_slot(&self) -> usize {
        self.class.time_slot
    }

    pub fn subject(&self) -> &str {
        &self.class.subject
    }

    pub fn trainer(&self) -> &str {
        &self.class.trainer
    }

    pub fn venue(&self) -> &str {
        &self.class.venue
    }
}

impl From<NewClass> for ClassEntry {
    fn from(class: NewClass) -> Self {
        Self::new(class)
    }
}

#[derive(Debug, Error)]
#[error("key {found:?} does not match derived key {expected:?}")]
pub struct KeyMismatch {
    pub expected: String,
    pub found: String,
}

/// Snapshot shape of a [`ClassEntry`]: the seven fields plus the key.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct EntryRecord {
    day: String,
    course_code: String,
    intake: String,
    time_slot: usize,
    subject: String,
    trainer: String,
    venue: String,
    key: String,
}

impl TryFrom<EntryRecord> for ClassEntry {
    type Error = KeyMismatch;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let entry = ClassEntry::new(NewClass {
            day: record.day,
            course_code: record.course_code,
            intake: record.intake,
            time_slot: record.time_slot,
            subject: record.subject,
            trainer: record.trainer,
            venue: record.venue,
        });
        if entry.key != record.key {
            return Err(KeyMismatch {
                expected: entry.key,
                found: record.key,
            });
        }
        Ok(entry)
    }
}

impl From<ClassEntry> for EntryRecord {
    fn from(entry: ClassEntry) -> Self {
        let ClassEntry { key, class } = entry;
        Self {
            day: class.day,
            course_code: class.course_code,
            intake: class.intake,
            time_slot: class.time_slot,
            subject: class.subject,
            trainer: class.trainer,
            venue: class.venue,
            key,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Trainer,
    Venue,
    TrainerAndVenue,
}

impl ConflictKind {
    pub fn involves_trainer(self) -> bool {
        matches!(self, ConflictKind::Trainer | ConflictKind::TrainerAndVenue)
    }

    pub fn involves_venue(self) -> bool {
        matches!(self, ConflictKind::Venue | ConflictKind::TrainerAndVenue)
    }
}

/// An existing entry that collides with a candidate placement.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub entry: ClassEntry,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatistics {
    pub total_classes: usize,
    pub trainers: usize,
    pub venues: usize,
    pub classes_per_day: BTreeMap<String, usize>,
    pub classes_per_course: BTreeMap<String, usize>,
}
