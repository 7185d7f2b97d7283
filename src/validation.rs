use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::models::NewClass;

/// Text fields a class cannot be scheduled without.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ClassField {
    Day,
    CourseCode,
    Intake,
    Subject,
    Trainer,
    Venue,
}

impl fmt::Display for ClassField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClassField::Day => "day",
            ClassField::CourseCode => "courseCode",
            ClassField::Intake => "intake",
            ClassField::Subject => "subject",
            ClassField::Trainer => "trainer",
            ClassField::Venue => "venue",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum ValidationFailure {
    #[error("{0} is required")]
    MissingField(ClassField),
    #[error("{0:?} is not a recognized day")]
    UnknownDay(String),
    #[error("time slot {slot} is out of range (0..{available})")]
    TimeSlotOutOfRange { slot: usize, available: usize },
    #[error("course {0:?} is not in the course catalog")]
    UnknownCourse(String),
    #[error("venue {0:?} is not in the venue catalog")]
    UnknownVenue(String),
    #[error("trainer {0:?} is not in the trainer roster")]
    UnknownTrainer(String),
    #[error("{0} must not contain '-'")]
    SeparatorInKey(ClassField),
}

/// Structural checks on a candidate class. An empty result means valid.
///
/// Catalog membership of course, venue and trainer is only checked when
/// `strict_references` is set.
pub fn validate_class(
    class: &NewClass,
    catalog: &Catalog,
    strict_references: bool,
) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    let required = [
        (ClassField::Day, &class.day),
        (ClassField::CourseCode, &class.course_code),
        (ClassField::Intake, &class.intake),
        (ClassField::Subject, &class.subject),
        (ClassField::Trainer, &class.trainer),
        (ClassField::Venue, &class.venue),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            failures.push(ValidationFailure::MissingField(field));
        }
    }

    if !class.day.trim().is_empty() && !catalog.is_known_day(&class.day) {
        failures.push(ValidationFailure::UnknownDay(class.day.clone()));
    }

    let available = catalog.time_slots.len();
    if class.time_slot >= available {
        failures.push(ValidationFailure::TimeSlotOutOfRange {
            slot: class.time_slot,
            available,
        });
    }

    if strict_references {
        let key_parts = [
            (ClassField::Day, &class.day),
            (ClassField::CourseCode, &class.course_code),
            (ClassField::Intake, &class.intake),
        ];
        for (field, value) in key_parts {
            if value.contains('-') {
                failures.push(ValidationFailure::SeparatorInKey(field));
            }
        }
        if !class.course_code.trim().is_empty() && !catalog.has_course(&class.course_code) {
            failures.push(ValidationFailure::UnknownCourse(class.course_code.clone()));
        }
        if !class.venue.trim().is_empty() && !catalog.has_venue(&class.venue) {
            failures.push(ValidationFailure::UnknownVenue(class.venue.clone()));
        }
        if !class.trainer.trim().is_empty() && !catalog.has_trainer(&class.trainer) {
            failures.push(ValidationFailure::UnknownTrainer(class.trainer.clone()));
        }
    }

    failures
}
