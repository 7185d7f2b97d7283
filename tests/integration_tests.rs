use timetable_manager::Timetable;
use timetable_manager::catalog::Catalog;
use timetable_manager::error::{ScheduleError, SnapshotError};
use timetable_manager::models::{ConflictKind, NewClass};
use timetable_manager::settings::Settings;
use timetable_manager::validation::{ClassField, ValidationFailure};

/// Helper building a class for the SEP 25 intake
fn class(day: &str, course: &str, slot: usize, trainer: &str, venue: &str) -> NewClass {
    NewClass {
        day: day.to_string(),
        course_code: course.to_string(),
        intake: "SEP 25".to_string(),
        time_slot: slot,
        subject: "Engineering Maths".to_string(),
        trainer: trainer.to_string(),
        venue: venue.to_string(),
    }
}

fn dme() -> NewClass {
    class("Monday", "DME", 0, "Dorothy Adhiambo", "ASC 2")
}

fn physics() -> NewClass {
    NewClass {
        subject: "Physics".to_string(),
        ..class("Monday", "ABC", 0, "Dorothy Adhiambo", "LH 2")
    }
}

#[test]
fn test_schedule_and_lookup() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());

    // Act
    let entry = timetable.schedule_class(dme()).unwrap();

    // Assert
    assert_eq!(entry.key(), "Monday-DME-SEP25-0");
    assert_eq!(timetable.store().get_class("Monday-DME-SEP25-0"), Some(&entry));
    assert_eq!(entry.details(), &dme());
}

#[test]
fn test_trainer_double_booking_rejected() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    let first = timetable.schedule_class(dme()).unwrap();

    // Act
    let err = timetable.schedule_class(physics()).unwrap_err();

    // Assert - exactly the DME class, as a trainer conflict
    let conflicts = err.conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].entry, first);
    assert_eq!(conflicts[0].kind, ConflictKind::Trainer);
    assert_eq!(timetable.store().len(), 1);
    assert!(err.to_string().contains("1 scheduled class"));
}

#[test]
fn test_venue_availability_after_booking() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable.schedule_class(dme()).unwrap();

    // Act
    let checker = timetable.checker();

    // Assert
    assert!(!checker.is_venue_available("ASC 2", "Monday", 0));
    for (day, slot) in [("Monday", 1), ("Tuesday", 0), ("Friday", 3)] {
        assert!(checker.is_venue_available("ASC 2", day, slot));
    }
}

#[test]
fn test_commit_despite_conflict_through_store() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable.schedule_class(dme()).unwrap();
    assert!(timetable.schedule_class(physics()).is_err());

    // Act - caller chooses to proceed anyway
    timetable.store_mut().add_class(physics());

    // Assert
    assert_eq!(timetable.store().len(), 2);
    assert!(!timetable.checker().is_trainer_available("Dorothy Adhiambo", "Monday", 0));
}

#[test]
fn test_invalid_class_rejected_before_conflicts() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable.schedule_class(dme()).unwrap();
    let mut candidate = dme();
    candidate.day = "Sunday".to_string();
    candidate.venue = String::new();

    // Act
    let err = timetable.schedule_class(candidate).unwrap_err();

    // Assert
    assert!(matches!(err, ScheduleError::Invalid(_)));
    assert_eq!(
        err.failures(),
        &[
            ValidationFailure::MissingField(ClassField::Venue),
            ValidationFailure::UnknownDay("Sunday".to_string()),
        ]
    );
    assert_eq!(timetable.store().len(), 1);
}

#[test]
fn test_strict_catalog_rejects_unknown_course() {
    // Arrange
    let settings = Settings::from_toml_str("strict_catalog = true").unwrap();
    let mut timetable = Timetable::from_settings(&settings);

    // Act
    let err = timetable.schedule_class(physics()).unwrap_err();

    // Assert
    assert_eq!(
        err.failures(),
        &[ValidationFailure::UnknownCourse("ABC".to_string())]
    );
}

#[test]
fn test_reschedule_in_place_ignores_itself() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    let original = timetable.schedule_class(dme()).unwrap();
    let mut edited = dme();
    edited.trainer = "Grace Wanjiru".to_string();

    // Act
    let entry = timetable.reschedule_class(original.key(), edited).unwrap();

    // Assert
    assert_eq!(entry.key(), original.key());
    assert_eq!(timetable.store().len(), 1);
    assert_eq!(
        timetable.store().get_class(original.key()).unwrap().trainer(),
        "Grace Wanjiru"
    );
}

#[test]
fn test_reschedule_to_new_slot_moves_entry() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    let original = timetable.schedule_class(dme()).unwrap();
    timetable
        .schedule_class(class("Monday", "DEE", 1, "Peter Kamau", "LH 1"))
        .unwrap();

    // Act - slot 1 venue is taken
    let clash = timetable.reschedule_class(
        original.key(),
        class("Monday", "DME", 1, "Dorothy Adhiambo", "LH 1"),
    );
    let moved = timetable
        .reschedule_class(
            original.key(),
            class("Monday", "DME", 2, "Dorothy Adhiambo", "ASC 2"),
        )
        .unwrap();

    // Assert
    let conflicts = clash.unwrap_err();
    assert_eq!(conflicts.conflicts()[0].kind, ConflictKind::Venue);
    assert_eq!(moved.key(), "Monday-DME-SEP25-2");
    assert!(timetable.store().get_class(original.key()).is_none());
    assert_eq!(timetable.store().len(), 2);
}

#[test]
fn test_reschedule_onto_taken_key_rejected() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    let original = timetable.schedule_class(dme()).unwrap();
    let other = timetable
        .schedule_class(class("Monday", "DME", 1, "Peter Kamau", "LH 1"))
        .unwrap();

    // Act - free trainer and venue, but the slot 1 key belongs to Peter's class
    let err = timetable
        .reschedule_class(
            original.key(),
            class("Monday", "DME", 1, "Grace Wanjiru", "Workshop A"),
        )
        .unwrap_err();

    // Assert - both classes survive untouched
    assert!(matches!(&err, ScheduleError::KeyTaken(key) if key == other.key()));
    assert_eq!(timetable.store().len(), 2);
    assert_eq!(timetable.store().get_class(original.key()), Some(&original));
    assert_eq!(timetable.store().get_class(other.key()), Some(&other));
}

#[test]
fn test_schedule_same_key_replaces_without_self_conflict() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    let original = timetable.schedule_class(dme()).unwrap();
    let mut resubmitted = dme();
    resubmitted.trainer = "Grace Wanjiru".to_string();

    // Act - same key and venue as the stored class
    let entry = timetable.schedule_class(resubmitted).unwrap();

    // Assert
    assert_eq!(entry.key(), original.key());
    assert_eq!(timetable.store().len(), 1);
    assert_eq!(
        timetable.store().get_class(original.key()).unwrap().trainer(),
        "Grace Wanjiru"
    );
}

#[test]
fn test_trainer_schedule_view() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable
        .schedule_class(class("Thursday", "DME", 2, "Dorothy Adhiambo", "ASC 2"))
        .unwrap();
    timetable
        .schedule_class(class("Tuesday", "DEE", 3, "Dorothy Adhiambo", "LH 1"))
        .unwrap();
    timetable
        .schedule_class(class("Tuesday", "DCE", 0, "Dorothy Adhiambo", "LH 2"))
        .unwrap();

    // Act
    let schedule = timetable.checker().trainer_schedule("Dorothy Adhiambo");

    // Assert
    let placements: Vec<(&str, usize)> = schedule
        .iter()
        .map(|e| (e.day(), e.time_slot()))
        .collect();
    assert_eq!(placements, vec![("Tuesday", 0), ("Tuesday", 3), ("Thursday", 2)]);
}

#[test]
fn test_export_import_round_trip() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable.schedule_class(dme()).unwrap();
    timetable
        .schedule_class(class("Wednesday", "DICT", 1, "Samuel Otieno", "Computer Lab"))
        .unwrap();
    let exported = timetable.export_json().unwrap();

    // Act
    let mut restored = Timetable::new(Catalog::default());
    let count = restored.import_json(&exported).unwrap();

    // Assert
    assert_eq!(count, 2);
    assert_eq!(restored.export_json().unwrap(), exported);
    assert_eq!(restored.store().statistics(), timetable.store().statistics());
    assert!(exported.contains("\"courseCode\": \"DICT\""));
    assert!(exported.contains("\"key\": \"Monday-DME-SEP25-0\""));
}

#[test]
fn test_malformed_import_keeps_state() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable.schedule_class(dme()).unwrap();
    let before = timetable.store().all_classes();

    // Act
    let err = timetable
        .import_json(r#"[{"day": "Monday", "courseCode": "DME"}]"#)
        .unwrap_err();

    // Assert
    assert!(matches!(err, SnapshotError::Parse(_)));
    assert_eq!(timetable.store().all_classes(), before);
}

#[test]
fn test_statistics_after_changes() {
    // Arrange
    let mut timetable = Timetable::new(Catalog::default());
    timetable.schedule_class(dme()).unwrap();
    timetable
        .schedule_class(class("Monday", "DME", 1, "Peter Kamau", "ASC 2"))
        .unwrap();
    timetable
        .schedule_class(class("Friday", "DEE", 0, "Peter Kamau", "LH 1"))
        .unwrap();

    // Act
    timetable.remove_class("Monday-DME-SEP25-0");
    timetable.remove_class("Monday-DME-SEP25-0");
    let stats = timetable.store().statistics();

    // Assert
    assert_eq!(stats.total_classes, 2);
    assert_eq!(stats.trainers, 1);
    assert_eq!(stats.venues, 2);
    assert_eq!(stats.classes_per_day.get("Monday"), Some(&1));
    assert_eq!(stats.classes_per_course.get("DME"), Some(&1));
}
