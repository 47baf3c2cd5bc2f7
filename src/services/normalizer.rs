//! Event normalization service
//!
//! Deduplicates logically-identical schedule entries so that a repeated
//! meeting is drawn once. Events with unknown days or slots are kept: the
//! grid builder excludes them later with a recorded reason.

use std::collections::HashSet;

use crate::services::SlotIndex;
use crate::types::{Event, EventKind};

/// Start slot as compared for identity: catalog index when resolvable,
/// otherwise the raw reference text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StartKey {
    Index(usize),
    Raw(String),
}

/// Identity tuple `(section_id, type, day, start slot)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub section_id: String,
    pub kind: EventKind,
    pub day: String,
    pub start: StartKey,
}

impl EventKey {
    pub fn of(event: &Event, index: &SlotIndex) -> Self {
        let start = match index.resolve(&event.start_slot) {
            Ok(slot) => StartKey::Index(slot),
            Err(_) => StartKey::Raw(event.start_slot.to_string()),
        };
        Self {
            section_id: event.section_id.clone(),
            kind: event.kind.clone(),
            day: event.day.clone(),
            start,
        }
    }
}

/// Deduplicate events by identity, keeping the first occurrence and input order.
///
/// # Examples
/// ```
/// use chrono::Weekday::Mon;
/// use timegrid::services::{normalize, SlotIndex};
/// use timegrid::types::Event;
///
/// let index = SlotIndex::new(vec![Mon], &["08:00-08:30", "08:30-09:00"]).unwrap();
/// let events = vec![
///     Event::new("CS2A", "CS101", "lecture", "Mon", "08:00-08:30", 2).with_teacher("Reyes"),
///     Event::new("CS2A", "CS101", "lecture", "Mon", "08:00-08:30", 2).with_teacher("Santos"),
/// ];
/// let normalized = normalize(&events, &index);
/// assert_eq!(normalized.len(), 1);
/// assert_eq!(normalized[0].teacher_name, "Reyes");
/// ```
pub fn normalize(events: &[Event], index: &SlotIndex) -> Vec<Event> {
    let mut seen: HashSet<EventKey> = HashSet::with_capacity(events.len());
    let mut normalized = Vec::with_capacity(events.len());

    for event in events {
        if seen.insert(EventKey::of(event, index)) {
            normalized.push(event.clone());
        } else {
            log::debug!(
                "dropping duplicate entry {} {} {} {}",
                event.section_id,
                event.kind,
                event.day,
                event.start_slot
            );
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday::{Mon, Tue};

    fn index() -> SlotIndex {
        SlotIndex::new(
            vec![Mon, Tue],
            &["08:00-08:30", "08:30-09:00", "09:00-09:30"],
        )
        .unwrap()
    }

    fn lecture(section: &str, day: &str, start: &str) -> Event {
        Event::new(section, "CS101", "lecture", day, start, 2)
    }

    // ========== Deduplication ==========

    #[test]
    fn test_duplicate_keeps_first_seen() {
        let events = vec![
            lecture("CS2A", "Mon", "08:00-08:30").with_teacher("Reyes"),
            lecture("CS2A", "Mon", "08:00-08:30").with_teacher("Santos"),
        ];
        let result = normalize(&events, &index());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].teacher_name, "Reyes");
    }

    #[test]
    fn test_differing_kind_is_not_duplicate() {
        let events = vec![
            lecture("CS2A", "Mon", "08:00-08:30"),
            Event::new("CS2A", "CS101", "lab", "Mon", "08:00-08:30", 2),
        ];
        assert_eq!(normalize(&events, &index()).len(), 2);
    }

    #[test]
    fn test_differing_section_day_or_start_is_not_duplicate() {
        let events = vec![
            lecture("CS2A", "Mon", "08:00-08:30"),
            lecture("CS2B", "Mon", "08:00-08:30"),
            lecture("CS2A", "Tue", "08:00-08:30"),
            lecture("CS2A", "Mon", "08:30-09:00"),
        ];
        assert_eq!(normalize(&events, &index()).len(), 4);
    }

    #[test]
    fn test_label_and_index_references_collapse() {
        let events = vec![
            lecture("CS2A", "Mon", "08:30-09:00"),
            Event::new("CS2A", "CS101", "lecture", "Mon", 1usize, 2),
        ];
        let result = normalize(&events, &index());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].start_slot.label(), Some("08:30-09:00"));
    }

    // ========== Tolerance ==========

    #[test]
    fn test_invalid_day_and_slot_are_kept() {
        let events = vec![
            lecture("CS2A", "Funday", "08:00-08:30"),
            lecture("CS2A", "Mon", "12:00-12:30"),
        ];
        let result = normalize(&events, &index());
        assert_eq!(result, events);
    }

    #[test]
    fn test_invalid_slots_dedup_by_raw_label() {
        let events = vec![
            lecture("CS2A", "Mon", "12:00-12:30"),
            lecture("CS2A", "Mon", "12:00-12:30"),
        ];
        assert_eq!(normalize(&events, &index()).len(), 1);
    }

    #[test]
    fn test_preserves_order() {
        let events = vec![
            lecture("CS3A", "Tue", "09:00-09:30"),
            lecture("CS1A", "Mon", "08:00-08:30"),
            lecture("CS3A", "Tue", "09:00-09:30"),
            lecture("CS2A", "Mon", "08:30-09:00"),
        ];
        let sections: Vec<String> = normalize(&events, &index())
            .into_iter()
            .map(|e| e.section_id)
            .collect();
        assert_eq!(sections, vec!["CS3A", "CS1A", "CS2A"]);
    }

    #[test]
    fn test_idempotent() {
        let events = vec![
            lecture("CS2A", "Mon", "08:00-08:30"),
            lecture("CS2A", "Mon", "08:00-08:30"),
            lecture("CS2B", "Funday", "08:00-08:30"),
        ];
        let once = normalize(&events, &index());
        let twice = normalize(&once, &index());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[], &index()).is_empty());
    }
}
