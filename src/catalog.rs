use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub code: String,
    pub name: String,
}

/// Read-only lookup tables the timetable is checked against.
///
/// Missing sections in a configured catalog fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Catalog {
    pub days: Vec<String>,
    pub time_slots: Vec<TimeSlot>,
    pub courses: Vec<Course>,
    pub venues: Vec<String>,
    pub trainers: Vec<String>,
}

impl Catalog {
    pub fn day_index(&self, day: &str) -> Option<usize> {
        self.days.iter().position(|d| d == day)
    }

    pub fn is_known_day(&self, day: &str) -> bool {
        self.day_index(day).is_some()
    }

    pub fn time_slot(&self, index: usize) -> Option<&TimeSlot> {
        self.time_slots.get(index)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    pub fn has_course(&self, code: &str) -> bool {
        self.course(code).is_some()
    }

    pub fn has_venue(&self, venue: &str) -> bool {
        self.venues.iter().any(|v| v == venue)
    }

    pub fn has_trainer(&self, trainer: &str) -> bool {
        self.trainers.iter().any(|t| t == trainer)
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid default time slot")
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            days: names(&["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]),
            time_slots: vec![
                TimeSlot::new(hm(8, 0), hm(10, 0)),
                TimeSlot::new(hm(10, 0), hm(12, 0)),
                TimeSlot::new(hm(14, 0), hm(16, 0)),
                TimeSlot::new(hm(16, 0), hm(18, 0)),
            ],
            courses: vec![
                Course {
                    code: "DME".to_string(),
                    name: "Diploma in Mechanical Engineering".to_string(),
                },
                Course {
                    code: "DEE".to_string(),
                    name: "Diploma in Electrical Engineering".to_string(),
                },
                Course {
                    code: "DCE".to_string(),
                    name: "Diploma in Civil Engineering".to_string(),
                },
                Course {
                    code: "DICT".to_string(),
                    name: "Diploma in Information Communication Technology".to_string(),
                },
            ],
            venues: names(&["ASC 1", "ASC 2", "LH 1", "LH 2", "Workshop A", "Computer Lab"]),
            trainers: names(&[
                "Dorothy Adhiambo",
                "Peter Kamau",
                "Grace Wanjiru",
                "Samuel Otieno",
            ]),
        }
    }
}
