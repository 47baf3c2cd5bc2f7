//! JSON payload decoding (simd-json)

use serde::Deserialize;

use crate::types::{Event, Result, Room, TimegridError};

/// Scheduler response: the event list plus solver log lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchedulePayload {
    pub schedule: Vec<Event>,
    pub logs: Vec<String>,
}

/// Accepted layouts: a bare event array, or `{schedule, logs}`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPayload {
    Bare(Vec<Event>),
    Wrapped {
        #[serde(default)]
        schedule: Vec<Event>,
        #[serde(default)]
        logs: Vec<String>,
    },
}

/// Decode a scheduler response. The buffer is parsed in place.
pub fn parse_schedule(bytes: &mut [u8]) -> Result<SchedulePayload> {
    let raw: RawPayload =
        simd_json::from_slice(bytes).map_err(|e| TimegridError::Parse(e.to_string()))?;
    Ok(match raw {
        RawPayload::Bare(schedule) => SchedulePayload {
            schedule,
            logs: Vec::new(),
        },
        RawPayload::Wrapped { schedule, logs } => SchedulePayload { schedule, logs },
    })
}

/// Decode a room directory array. The buffer is parsed in place.
pub fn parse_rooms(bytes: &mut [u8]) -> Result<Vec<Room>> {
    simd_json::from_slice(bytes).map_err(|e| TimegridError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventKind, SlotRef};

    fn parse(json: &str) -> Result<SchedulePayload> {
        let mut bytes = json.as_bytes().to_vec();
        parse_schedule(&mut bytes)
    }

    #[test]
    fn test_parse_bare_array() {
        let payload = parse(
            r#"[{"section_id": "CS2A", "subject_code": "CS101", "type": "lecture",
                 "day": "Mon", "start_time_slot": "08:00-08:30", "duration_slots": 2}]"#,
        )
        .unwrap();
        assert!(payload.logs.is_empty());
        let event = &payload.schedule[0];
        assert_eq!(event.kind, EventKind::Lecture);
        assert_eq!(event.start_slot, SlotRef::Label("08:00-08:30".into()));
        assert_eq!(event.duration_slots, 2);
    }

    #[test]
    fn test_parse_lenient_fields() {
        let payload = parse(
            r#"[{"section_id": "CS2A", "room_id": 101, "teacher_name": null,
                 "start_time_slot": 3, "duration_slots": "2"}]"#,
        )
        .unwrap();
        let event = &payload.schedule[0];
        assert_eq!(event.room_id, "101");
        assert_eq!(event.teacher_name, "");
        assert_eq!(event.start_slot, SlotRef::Index(3));
        assert_eq!(event.duration_slots, 2);
    }

    #[test]
    fn test_parse_wrapped_without_logs() {
        let payload = parse(r#"{"schedule": []}"#).unwrap();
        assert_eq!(payload, SchedulePayload::default());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse("{not json"), Err(TimegridError::Parse(_))));
        assert!(matches!(parse(r#""text""#), Err(TimegridError::Parse(_))));
    }

    #[test]
    fn test_parse_rooms() {
        let mut bytes = br#"[
            {"room_id": "R1", "room_name": "Room 101", "is_laboratory": 0},
            {"room_id": "L1", "room_name": "Lab 1", "is_laboratory": true}
        ]"#
        .to_vec();
        let rooms = parse_rooms(&mut bytes).unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(!rooms[0].is_laboratory);
        assert!(rooms[1].is_laboratory);
    }
}
