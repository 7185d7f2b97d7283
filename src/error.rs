use thiserror::Error;

use crate::models::Conflict;
use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Malformed timetable snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate class key {0:?} in snapshot")]
    DuplicateKey(String),
}

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Class is invalid: {}", describe_failures(.0))]
    Invalid(Vec<ValidationFailure>),
    #[error("Class collides with {} scheduled class(es)", .0.len())]
    Conflict(Vec<Conflict>),
    #[error("Class key {0:?} already belongs to another class")]
    KeyTaken(String),
}

impl ScheduleError {
    pub fn failures(&self) -> &[ValidationFailure] {
        match self {
            ScheduleError::Invalid(failures) => failures,
            _ => &[],
        }
    }

    pub fn conflicts(&self) -> &[Conflict] {
        match self {
            ScheduleError::Conflict(conflicts) => conflicts,
            _ => &[],
        }
    }
}

fn describe_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
