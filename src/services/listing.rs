//! Flat schedule listing (one row per event)

use serde::Serialize;

use crate::services::{RoomDirectory, SlotIndex};
use crate::types::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleRow {
    pub section_id: String,
    pub subject: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub teacher: String,
    pub room: String,
    pub day: String,
    pub time: String,
}

/// Listing rows in input order. Unknown rooms show their raw id and
/// unknown slots their raw label.
pub fn schedule_rows(events: &[Event], index: &SlotIndex, rooms: &RoomDirectory) -> Vec<ScheduleRow> {
    events
        .iter()
        .map(|event| ScheduleRow {
            section_id: event.section_id.clone(),
            subject: event.subject_label().to_string(),
            kind: event.kind.to_string(),
            teacher: event.teacher_name.clone(),
            room: rooms.display_name(&event.room_id),
            day: event.day.clone(),
            time: index.event_range(event),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Room;
    use chrono::Weekday::Mon;

    #[test]
    fn test_schedule_rows() {
        let index = SlotIndex::new(vec![Mon], &["08:00-08:30", "08:30-09:00"]).unwrap();
        let rooms = RoomDirectory::new(vec![Room::new("R1", "Room 101", false)]);
        let events = vec![
            Event::new("CS2A", "CS101", "lecture", "Mon", "08:00-08:30", 2)
                .with_subject_name("Intro to Computing")
                .with_teacher("Reyes")
                .with_room("R1"),
            Event::new("CS2A", "CS102", "lab", "Wed", "13:00-13:30", 1).with_room("X9"),
        ];

        let rows = schedule_rows(&events, &index, &rooms);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subject, "Intro to Computing");
        assert_eq!(rows[0].room, "Room 101");
        assert_eq!(rows[0].time, "08:00-09:00");
        assert_eq!(rows[1].subject, "CS102");
        assert_eq!(rows[1].kind, "lab");
        assert_eq!(rows[1].room, "X9");
        assert_eq!(rows[1].time, "13:00-13:30");
    }
}
