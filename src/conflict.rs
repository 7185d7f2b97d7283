use crate::catalog::Catalog;
use crate::models::{ClassEntry, Conflict, ConflictKind, NewClass};
use crate::store::ScheduleStore;
use crate::validation::{ValidationFailure, validate_class};

/// Read-only view over a [`ScheduleStore`] that answers whether a placement
/// collides with what is already scheduled.
#[derive(Debug, Clone, Copy)]
pub struct ConflictChecker<'a> {
    store: &'a ScheduleStore,
    catalog: &'a Catalog,
    strict_references: bool,
}

impl<'a> ConflictChecker<'a> {
    pub fn new(store: &'a ScheduleStore, catalog: &'a Catalog) -> Self {
        Self {
            store,
            catalog,
            strict_references: false,
        }
    }

    /// Also reject course codes, venues and trainers missing from the catalog.
    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    /// Every stored class in the same day and slot that shares the trainer or
    /// the venue, in store order. `exclude_key` skips the class being edited.
    pub fn check_conflicts(
        &self,
        day: &str,
        time_slot: usize,
        trainer: &str,
        venue: &str,
        exclude_key: Option<&str>,
    ) -> Vec<Conflict> {
        self.store
            .iter()
            .filter(|e| e.day() == day && e.time_slot() == time_slot)
            .filter(|e| exclude_key != Some(e.key()))
            .filter_map(|e| {
                let kind = match (e.trainer() == trainer, e.venue() == venue) {
                    (true, true) => ConflictKind::TrainerAndVenue,
                    (true, false) => ConflictKind::Trainer,
                    (false, true) => ConflictKind::Venue,
                    (false, false) => return None,
                };
                Some(Conflict {
                    kind,
                    entry: e.clone(),
                })
            })
            .collect()
    }

    pub fn conflicts_for(&self, class: &NewClass, exclude_key: Option<&str>) -> Vec<Conflict> {
        self.check_conflicts(
            &class.day,
            class.time_slot,
            &class.trainer,
            &class.venue,
            exclude_key,
        )
    }

    pub fn is_trainer_available(&self, trainer: &str, day: &str, time_slot: usize) -> bool {
        !self
            .store
            .iter()
            .any(|e| e.trainer() == trainer && e.day() == day && e.time_slot() == time_slot)
    }

    pub fn is_venue_available(&self, venue: &str, day: &str, time_slot: usize) -> bool {
        !self
            .store
            .iter()
            .any(|e| e.venue() == venue && e.day() == day && e.time_slot() == time_slot)
    }

    pub fn trainer_schedule(&self, trainer: &str) -> Vec<ClassEntry> {
        self.sorted(self.store.classes_by_trainer(trainer))
    }

    pub fn venue_schedule(&self, venue: &str) -> Vec<ClassEntry> {
        self.sorted(self.store.classes_by_venue(venue))
    }

    // Catalog weekday order, unknown days last; stable for ties.
    fn sorted(&self, mut entries: Vec<ClassEntry>) -> Vec<ClassEntry> {
        entries.sort_by_key(|e| {
            (
                self.catalog.day_index(e.day()).unwrap_or(usize::MAX),
                e.time_slot(),
            )
        });
        entries
    }

    pub fn validate(&self, class: &NewClass) -> Vec<ValidationFailure> {
        validate_class(class, self.catalog, self.strict_references)
    }
}
