//! Scheduled event and room records as produced by the external scheduler

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{lenient, SectionId};

/// Meeting type tag; only `lab` changes palette selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Lecture,
    Lab,
    /// Any other tag the scheduler emits, kept verbatim
    Other(String),
}

impl EventKind {
    pub fn is_lab(&self) -> bool {
        matches!(self, Self::Lab)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Lecture => "lecture",
            Self::Lab => "lab",
            Self::Other(tag) => tag,
        }
    }
}

impl Default for EventKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for EventKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "lecture" => Self::Lecture,
            "lab" => Self::Lab,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for EventKind {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(tag) => tag,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a start slot: the catalog label (wire default) or its index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotRef {
    Index(usize),
    Label(String),
}

impl SlotRef {
    /// Raw label text, if this reference is a label
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Index(_) => None,
        }
    }
}

impl Default for SlotRef {
    fn default() -> Self {
        Self::Label(String::new())
    }
}

impl From<&str> for SlotRef {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

impl From<String> for SlotRef {
    fn from(label: String) -> Self {
        Self::Label(label)
    }
}

impl From<usize> for SlotRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl fmt::Display for SlotRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => f.write_str(label),
            Self::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// One scheduled meeting of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, deserialize_with = "lenient::string")]
    pub section_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subject_code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub subject_name: String,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(default, deserialize_with = "lenient::string")]
    pub teacher_name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub room_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub day: String,
    #[serde(
        rename = "start_time_slot",
        default,
        deserialize_with = "lenient::slot_ref"
    )]
    pub start_slot: SlotRef,
    /// Non-positive or missing values are kept as-is; consumers clamp
    #[serde(default, deserialize_with = "lenient::slot_count")]
    pub duration_slots: i64,
}

impl Event {
    pub fn new(
        section_id: impl Into<String>,
        subject_code: impl Into<String>,
        kind: impl Into<EventKind>,
        day: impl Into<String>,
        start_slot: impl Into<SlotRef>,
        duration_slots: i64,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            subject_code: subject_code.into(),
            subject_name: String::new(),
            kind: kind.into(),
            teacher_name: String::new(),
            room_id: String::new(),
            day: day.into(),
            start_slot: start_slot.into(),
            duration_slots,
        }
    }

    pub fn with_subject_name(mut self, name: impl Into<String>) -> Self {
        self.subject_name = name.into();
        self
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher_name = teacher.into();
        self
    }

    pub fn with_room(mut self, room_id: impl Into<String>) -> Self {
        self.room_id = room_id.into();
        self
    }

    /// Subject display text: name, falling back to code
    pub fn subject_label(&self) -> &str {
        if self.subject_name.is_empty() {
            &self.subject_code
        } else {
            &self.subject_name
        }
    }

    /// Typed section id, or None when the id does not follow the grammar
    pub fn section(&self) -> Option<SectionId> {
        self.section_id.parse().ok()
    }

    /// Year digit of the section, if parseable
    pub fn year(&self) -> Option<u8> {
        self.section().map(|s| s.year)
    }
}

/// Room directory record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(deserialize_with = "lenient::string")]
    pub room_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub room_name: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_laboratory: bool,
}

impl Room {
    pub fn new(room_id: impl Into<String>, room_name: impl Into<String>, is_laboratory: bool) -> Self {
        Self {
            room_id: room_id.into(),
            room_name: room_name.into(),
            is_laboratory,
        }
    }

    /// Display name: room_name, falling back to room_id
    pub fn display_name(&self) -> &str {
        if self.room_name.is_empty() {
            &self.room_id
        } else {
            &self.room_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== EventKind ==========

    #[test]
    fn test_event_kind_from_tag() {
        assert_eq!(EventKind::from("lab"), EventKind::Lab);
        assert_eq!(EventKind::from("lecture"), EventKind::Lecture);
        assert_eq!(
            EventKind::from("seminar"),
            EventKind::Other("seminar".into())
        );
        assert!(EventKind::Lab.is_lab());
        assert!(!EventKind::from("Lab").is_lab());
    }

    #[test]
    fn test_event_kind_round_trips_as_string() {
        let json = serde_json::to_string(&EventKind::from("seminar")).unwrap();
        assert_eq!(json, "\"seminar\"");
        let kind: EventKind = serde_json::from_str("\"lab\"").unwrap();
        assert_eq!(kind, EventKind::Lab);
    }

    // ========== Event deserialization ==========

    #[test]
    fn test_event_from_scheduler_json() {
        let json = r#"{
            "section_id": "CS2A",
            "subject_code": "CS101",
            "subject_name": "Intro to Computing",
            "type": "lecture",
            "teacher_name": "Ada Reyes",
            "room_id": "R1",
            "day": "Mon",
            "start_time_slot": "08:00-08:30",
            "duration_slots": 2
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.section_id, "CS2A");
        assert_eq!(event.kind, EventKind::Lecture);
        assert_eq!(event.start_slot, SlotRef::Label("08:00-08:30".into()));
        assert_eq!(event.duration_slots, 2);
        assert_eq!(event.subject_label(), "Intro to Computing");
    }

    #[test]
    fn test_event_tolerates_loose_types() {
        let json = r#"{
            "section_id": "IT3B",
            "subject_code": "IT200",
            "subject_name": null,
            "type": "lab",
            "room_id": 101,
            "day": "Tue",
            "start_time_slot": 4,
            "duration_slots": "3"
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.room_id, "101");
        assert_eq!(event.subject_name, "");
        assert_eq!(event.subject_label(), "IT200");
        assert_eq!(event.teacher_name, "");
        assert_eq!(event.start_slot, SlotRef::Index(4));
        assert_eq!(event.duration_slots, 3);
    }

    #[test]
    fn test_event_missing_duration_is_zero() {
        let json = r#"{"section_id": "CS1A", "day": "Mon", "start_time_slot": "08:00-08:30"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.duration_slots, 0);
        assert_eq!(event.kind, EventKind::default());
    }

    #[test]
    fn test_event_year_from_section() {
        let event = Event::new("CS3C", "CS301", "lecture", "Wed", "08:00-08:30", 2);
        assert_eq!(event.year(), Some(3));
        let odd = Event::new("Guest", "X", "lecture", "Wed", "08:00-08:30", 2);
        assert_eq!(odd.year(), None);
    }

    // ========== Room ==========

    #[test]
    fn test_room_from_directory_json() {
        let json = r#"{"room_id": 7, "room_name": "Lab 2", "is_laboratory": 1}"#;
        let room: Room = serde_json::from_str(json).unwrap();
        assert_eq!(room.room_id, "7");
        assert_eq!(room.display_name(), "Lab 2");
        assert!(room.is_laboratory);
    }

    #[test]
    fn test_room_display_name_falls_back_to_id() {
        let room = Room::new("R9", "", false);
        assert_eq!(room.display_name(), "R9");
    }
}
