//! Rendered grid types

use chrono::Weekday;
use serde::Serialize;

use super::{ColorPair, Event, FilterState};

/// Grid layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// Every section at once; events starting in the same cell are stacked
    #[default]
    Combined,
    /// One section; multi-slot events merge into a single spanning cell
    SingleSection,
}

impl GridMode {
    pub fn for_filter(state: &FilterState) -> Self {
        if state.is_single_section() {
            Self::SingleSection
        } else {
            Self::Combined
        }
    }
}

/// One event as drawn in a cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellEntry {
    pub event: Event,
    /// Rows covered from this cell downward (clipped to the catalog)
    pub span_rows: usize,
    /// e.g. "08:00-09:00"
    pub time_range: String,
    pub room_name: String,
    /// The room is a laboratory in the room directory
    pub lab_room: bool,
    pub colors: ColorPair,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum GridCell {
    Empty,
    /// Covered by a spanning cell above (single-section mode)
    Continuation,
    Entries(Vec<CellEntry>),
}

impl GridCell {
    pub fn entries(&self) -> &[CellEntry] {
        match self {
            Self::Entries(entries) => entries,
            Self::Empty | Self::Continuation => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub slot_index: usize,
    pub label: String,
    /// One cell per catalog day, in catalog order
    pub cells: Vec<GridCell>,
}

/// Why an event was left out of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "value", rename_all = "snake_case")]
pub enum ExclusionReason {
    UnknownDay(String),
    UnknownStartSlot(String),
    /// Combined mode: duration is zero or negative, so no slot is covered
    NoDuration(i64),
    /// Single-section mode: hidden behind the event at this index, which
    /// starts in or spans over the same cell
    Shadowed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// Position in the event slice handed to the builder
    pub event_index: usize,
    pub section_id: String,
    pub subject_code: String,
    pub reason: ExclusionReason,
}

/// A slots × days matrix of render cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub mode: GridMode,
    pub days: Vec<Weekday>,
    pub rows: Vec<GridRow>,
    pub exclusions: Vec<Exclusion>,
}

impl Grid {
    pub fn cell(&self, slot_index: usize, day_index: usize) -> Option<&GridCell> {
        self.rows.get(slot_index)?.cells.get(day_index)
    }

    /// Total entries drawn across all cells
    pub fn entry_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .map(|cell| cell.entries().len())
            .sum()
    }
}
