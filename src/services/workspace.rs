//! Workspace: the current event set, room directory and filter state
//!
//! Every event replacement bumps a generation counter. A render carries the
//! generation it was computed from, and `accept` discards renders that were
//! overtaken by a newer replacement (last write wins).

use serde::Serialize;

use crate::services::{filter, normalize, ColorAssigner, FilterOptions, GridBuilder};
use crate::services::{RoomDirectory, SlotIndex};
use crate::types::{Event, FilterState, Grid, GridMode};

/// Monotonic version of the event set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Grid and option lists computed from one generation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered {
    pub generation: Generation,
    pub filter: FilterState,
    pub grid: Grid,
    pub options: FilterOptions,
}

#[derive(Debug, Clone)]
pub struct Workspace {
    index: SlotIndex,
    rooms: RoomDirectory,
    events: Vec<Event>,
    filter: FilterState,
    generation: Generation,
}

impl Workspace {
    pub fn new(index: SlotIndex, rooms: RoomDirectory) -> Self {
        Self {
            index,
            rooms,
            events: Vec::new(),
            filter: FilterState::all(),
            generation: Generation::default(),
        }
    }

    pub fn index(&self) -> &SlotIndex {
        &self.index
    }

    pub fn rooms(&self) -> &RoomDirectory {
        &self.rooms
    }

    /// Normalized events of the current generation
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Swap in a new scheduler response. Selections that no longer match
    /// any event reset to `All`.
    pub fn replace_events(&mut self, raw: &[Event]) -> Generation {
        self.events = normalize(raw, &self.index);
        self.generation = self.generation.next();
        self.filter = std::mem::take(&mut self.filter).reconcile(&self.events, &self.rooms);
        log::debug!(
            "generation {}: {} events ({} raw)",
            self.generation.0,
            self.events.len(),
            raw.len()
        );
        self.generation
    }

    pub fn set_filter(&mut self, state: FilterState) {
        self.filter = state.reconcile(&self.events, &self.rooms);
    }

    pub fn set_rooms(&mut self, rooms: RoomDirectory) {
        self.rooms = rooms;
        self.filter = std::mem::take(&mut self.filter).reconcile(&self.events, &self.rooms);
    }

    /// Filter the current generation and build its grid
    pub fn render(&self, colors: &mut ColorAssigner) -> Rendered {
        let visible = filter::apply(&self.events, &self.filter, &self.rooms);
        let mode = GridMode::for_filter(&self.filter);
        let grid = GridBuilder::new(&self.index, &self.rooms).build(&visible, mode, colors);
        Rendered {
            generation: self.generation,
            filter: self.filter.clone(),
            grid,
            options: FilterOptions::collect(&self.events, &self.filter, &self.rooms),
        }
    }

    /// The render if it belongs to the current generation, else None
    pub fn accept(&self, rendered: Rendered) -> Option<Rendered> {
        if rendered.generation == self.generation {
            Some(rendered)
        } else {
            log::debug!(
                "discarding stale render from generation {} (current {})",
                rendered.generation.0,
                self.generation.0
            );
            None
        }
    }
}
