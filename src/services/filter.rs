//! Filter service: option derivation and cascading selection updates
//!
//! All operations are synchronous and pure over the current event set.
//! Stale selections never raise; they reset to `All`.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::services::RoomDirectory;
use crate::types::{Event, FilterState, Selection};

/// Distinct section years present, ascending
pub fn year_options(events: &[Event]) -> Vec<u8> {
    events
        .iter()
        .filter_map(Event::year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct, sorted section ids consistent with `year` (`All` ⇒ every year)
pub fn section_options(events: &[Event], year: &Selection<u8>) -> Vec<String> {
    events
        .iter()
        .filter(|e| e.year().is_some_and(|y| year.admits(&y)))
        .map(|e| e.section_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct, sorted room display names referenced by events; the whole
/// directory when no event references a room yet
pub fn room_options(events: &[Event], rooms: &RoomDirectory) -> Vec<String> {
    let referenced: BTreeSet<String> = events
        .iter()
        .filter(|e| !e.room_id.is_empty())
        .map(|e| rooms.display_name(&e.room_id))
        .collect();

    if referenced.is_empty() {
        rooms.names()
    } else {
        referenced.into_iter().collect()
    }
}

/// Distinct, sorted, non-empty teacher names
pub fn teacher_options(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter(|e| !e.teacher_name.is_empty())
        .map(|e| e.teacher_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Room filter matches either the raw id or its resolved name
fn room_matches(event: &Event, room: &str, rooms: &RoomDirectory) -> bool {
    event.room_id == room || rooms.display_name(&event.room_id) == room
}

/// Events that satisfy every pinned field of `state`, in input order
pub fn apply(events: &[Event], state: &FilterState, rooms: &RoomDirectory) -> Vec<Event> {
    events
        .iter()
        .filter(|e| matches_state(e, state, rooms))
        .cloned()
        .collect()
}

fn matches_state(event: &Event, state: &FilterState, rooms: &RoomDirectory) -> bool {
    if let Selection::Only(year) = state.year {
        if event.year() != Some(year) {
            return false;
        }
    }
    if !state.section.admits(&event.section_id) {
        return false;
    }
    if let Selection::Only(room) = &state.room {
        if !room_matches(event, room, rooms) {
            return false;
        }
    }
    state.teacher.admits(&event.teacher_name)
}

/// All four option lists for the current selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterOptions {
    pub years: Vec<u8>,
    pub sections: Vec<String>,
    pub rooms: Vec<String>,
    pub teachers: Vec<String>,
}

impl FilterOptions {
    pub fn collect(events: &[Event], state: &FilterState, rooms: &RoomDirectory) -> Self {
        Self {
            years: year_options(events),
            sections: section_options(events, &state.year),
            rooms: room_options(events, rooms),
            teachers: teacher_options(events),
        }
    }
}

impl FilterState {
    /// Select a year. A different year clears the section, whose options
    /// are rebuilt for it.
    pub fn with_year(self, year: Selection<u8>) -> Self {
        if year == self.year {
            return self;
        }
        Self {
            year,
            section: Selection::All,
            ..self
        }
    }

    pub fn with_section(self, section: Selection<String>) -> Self {
        Self { section, ..self }
    }

    pub fn with_room(self, room: Selection<String>) -> Self {
        Self { room, ..self }
    }

    pub fn with_teacher(self, teacher: Selection<String>) -> Self {
        Self { teacher, ..self }
    }

    /// Re-validate against a new event set: any selection that is no longer
    /// an option resets to `All`. The section is checked under the
    /// (possibly reset) year.
    pub fn reconcile(self, events: &[Event], rooms: &RoomDirectory) -> Self {
        let year = match self.year {
            Selection::Only(y) if !year_options(events).contains(&y) => {
                log::debug!("year {} no longer present, resetting filter", y);
                Selection::All
            }
            other => other,
        };

        let section = match self.section {
            Selection::Only(s) if !section_options(events, &year).contains(&s) => {
                log::debug!("section {:?} no longer present, resetting filter", s);
                Selection::All
            }
            other => other,
        };

        let room = match self.room {
            Selection::Only(r)
                if !room_options(events, rooms).contains(&r)
                    && !events.iter().any(|e| e.room_id == r) =>
            {
                log::debug!("room {:?} no longer present, resetting filter", r);
                Selection::All
            }
            other => other,
        };

        let teacher = match self.teacher {
            Selection::Only(t) if !teacher_options(events).contains(&t) => {
                log::debug!("teacher {:?} no longer present, resetting filter", t);
                Selection::All
            }
            other => other,
        };

        Self {
            year,
            section,
            room,
            teacher,
        }
    }
}
