pub mod catalog;
pub mod conflict;
pub mod error;
pub mod models;
pub mod settings;
pub mod store;
pub mod validation;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::conflict::ConflictChecker;
use crate::error::{ScheduleError, SnapshotError};
use crate::models::{ClassEntry, NewClass};
use crate::settings::Settings;
use crate::store::ScheduleStore;

/// Installs the fmt subscriber. Calling it again after a subscriber is set
/// does nothing.
pub fn init_tracing(settings: &Settings) {
    let env_filter = if settings.debug { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .try_init();
}

/// One timetable: a store, the catalog it is checked against, and the
/// validate-then-check-then-commit flow callers use to change it.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    catalog: Catalog,
    strict_references: bool,
    store: ScheduleStore,
}

impl Timetable {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            strict_references: false,
            store: ScheduleStore::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.catalog()).with_strict_references(settings.strict_catalog)
    }

    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// Direct store access for callers that decide to commit despite
    /// conflicts.
    pub fn store_mut(&mut self) -> &mut ScheduleStore {
        &mut self.store
    }

    pub fn checker(&self) -> ConflictChecker<'_> {
        ConflictChecker::new(&self.store, &self.catalog)
            .with_strict_references(self.strict_references)
    }

    /// Adds `class`, or replaces the class already stored under the same
    /// key. A replaced class never counts as a conflict with itself.
    pub fn schedule_class(&mut self, class: NewClass) -> Result<ClassEntry, ScheduleError> {
        let key = class.key();
        self.admit(&class, Some(&key))?;
        Ok(self.store.add_class(class))
    }

    /// Replaces the class stored under `key` with `class`. The old entry is
    /// ignored when checking conflicts and is removed if the new class ends
    /// up under a different key. Moving onto a key held by another class is
    /// rejected.
    pub fn reschedule_class(
        &mut self,
        key: &str,
        class: NewClass,
    ) -> Result<ClassEntry, ScheduleError> {
        let new_key = class.key();
        if new_key != key && self.store.contains_key(&new_key) {
            warn!(from = key, to = %new_key, "rejected move onto an occupied key");
            return Err(ScheduleError::KeyTaken(new_key));
        }
        self.admit(&class, Some(key))?;
        if new_key != key {
            self.store.remove_class(key);
        }
        Ok(self.store.add_class(class))
    }

    fn admit(&self, class: &NewClass, exclude_key: Option<&str>) -> Result<(), ScheduleError> {
        let checker = self.checker();

        let failures = checker.validate(class);
        if !failures.is_empty() {
            warn!(key = %class.key(), failures = failures.len(), "rejected invalid class");
            return Err(ScheduleError::Invalid(failures));
        }

        let conflicts = checker.conflicts_for(class, exclude_key);
        if !conflicts.is_empty() {
            let trainer = conflicts.iter().filter(|c| c.kind.involves_trainer()).count();
            let venue = conflicts.iter().filter(|c| c.kind.involves_venue()).count();
            warn!(key = %class.key(), trainer, venue, "rejected conflicting class");
            return Err(ScheduleError::Conflict(conflicts));
        }

        if let Some(slot) = self.catalog.time_slot(class.time_slot) {
            debug!(day = %class.day, slot = %slot, trainer = %class.trainer, "class admitted");
        }
        Ok(())
    }

    pub fn remove_class(&mut self, key: &str) -> Option<ClassEntry> {
        self.store.remove_class(key)
    }

    pub fn export_json(&self) -> Result<String, SnapshotError> {
        self.store.export_json()
    }

    pub fn import_json(&mut self, text: &str) -> Result<usize, SnapshotError> {
        self.store.import_json(text)
    }
}
