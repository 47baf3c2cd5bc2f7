//! Grid builder: places events into a slots × days matrix
//!
//! Two layouts:
//! - Combined: every section at once. Each event is drawn only at its start
//!   row; concurrent events starting in the same cell are stacked.
//! - Single-section: one representative per start cell, merged downward over
//!   its duration (rowspan). Covered cells become continuations.
//!
//! Events whose day or start slot is outside the catalog are never placed;
//! they are reported in `Grid::exclusions` instead.

use std::collections::HashSet;

use crate::services::normalizer::EventKey;
use crate::services::{ColorAssigner, RoomDirectory, SlotIndex};
use crate::types::{
    CellEntry, Event, Exclusion, ExclusionReason, Grid, GridCell, GridMode, GridRow,
};

/// One event reference in the placement matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position in the event slice
    pub event_index: usize,
    /// Whether this cell is the event's start row (not a continuation)
    pub is_start: bool,
}

/// `[slot][day]` matrix of placements
pub type PlacementMatrix = Vec<Vec<Vec<Placement>>>;

/// Resolved catalog position of an event
#[derive(Debug, Clone, Copy)]
struct Located {
    slot: usize,
    day: usize,
}

pub struct GridBuilder<'a> {
    index: &'a SlotIndex,
    rooms: &'a RoomDirectory,
}

impl<'a> GridBuilder<'a> {
    pub fn new(index: &'a SlotIndex, rooms: &'a RoomDirectory) -> Self {
        Self { index, rooms }
    }

    /// Build the grid for already-filtered events
    pub fn build(&self, events: &[Event], mode: GridMode, colors: &mut ColorAssigner) -> Grid {
        let (located, mut exclusions) = self.locate(events);
        let rows = match mode {
            GridMode::Combined => {
                exclusions.extend(no_duration(events, &located));
                self.combined_rows(events, &located, colors)
            }
            GridMode::SingleSection => {
                self.single_section_rows(events, &located, colors, &mut exclusions)
            }
        };
        Grid {
            mode,
            days: self.index.days().to_vec(),
            rows,
            exclusions,
        }
    }

    /// Every slot each event covers in the combined layout, clipped to the
    /// catalog. Exactly one placement per placed event has `is_start` set;
    /// events with a non-positive duration have none.
    pub fn placements(&self, events: &[Event]) -> PlacementMatrix {
        let (located, _) = self.locate(events);
        self.placement_matrix(events, &located)
    }

    fn placement_matrix(&self, events: &[Event], located: &[Option<Located>]) -> PlacementMatrix {
        let mut matrix: PlacementMatrix =
            vec![vec![Vec::new(); self.index.day_count()]; self.index.slot_count()];
        for (event_index, (event, at)) in events.iter().zip(located).enumerate() {
            let Some(at) = at else { continue };
            let covered = self.index.covered_slots(at.slot, event.duration_slots);
            for offset in 0..covered {
                matrix[at.slot + offset][at.day].push(Placement {
                    event_index,
                    is_start: offset == 0,
                });
            }
        }
        matrix
    }

    fn locate(&self, events: &[Event]) -> (Vec<Option<Located>>, Vec<Exclusion>) {
        let mut exclusions = Vec::new();
        let located = events
            .iter()
            .enumerate()
            .map(|(event_index, event)| {
                let reason = match (
                    self.index.day_index_of(&event.day),
                    self.index.resolve(&event.start_slot),
                ) {
                    (Ok(day), Ok(slot)) => return Some(Located { slot, day }),
                    (Err(_), _) => ExclusionReason::UnknownDay(event.day.clone()),
                    (Ok(_), Err(_)) => {
                        ExclusionReason::UnknownStartSlot(event.start_slot.to_string())
                    }
                };
                log::debug!(
                    "excluding {} {} from grid: {:?}",
                    event.section_id,
                    event.subject_code,
                    reason
                );
                exclusions.push(Exclusion {
                    event_index,
                    section_id: event.section_id.clone(),
                    subject_code: event.subject_code.clone(),
                    reason,
                });
                None
            })
            .collect();
        (located, exclusions)
    }

    fn entry(&self, event: &Event, slot: usize, colors: &mut ColorAssigner) -> CellEntry {
        CellEntry {
            event: event.clone(),
            span_rows: self.index.clipped_span(slot, event.duration_slots),
            time_range: self.index.event_range(event),
            room_name: self.rooms.display_name(&event.room_id),
            lab_room: self.rooms.is_laboratory(&event.room_id),
            colors: colors.color_for(&event.subject_code, &event.kind),
        }
    }

    fn row(&self, slot: usize, cells: Vec<GridCell>) -> GridRow {
        GridRow {
            slot_index: slot,
            label: self
                .index
                .label_of(slot)
                .map(String::from)
                .unwrap_or_default(),
            cells,
        }
    }

    fn combined_rows(
        &self,
        events: &[Event],
        located: &[Option<Located>],
        colors: &mut ColorAssigner,
    ) -> Vec<GridRow> {
        let matrix = self.placement_matrix(events, located);
        let mut rows = Vec::with_capacity(matrix.len());

        for (slot, days) in matrix.iter().enumerate() {
            let mut cells = Vec::with_capacity(days.len());
            for placements in days {
                // Continuation rows are not drawn in combined mode
                let mut seen: HashSet<EventKey> = HashSet::new();
                let mut entries = Vec::new();
                for placement in placements.iter().filter(|p| p.is_start) {
                    let event = &events[placement.event_index];
                    if seen.insert(EventKey::of(event, self.index)) {
                        entries.push(self.entry(event, slot, colors));
                    }
                }
                cells.push(if entries.is_empty() {
                    GridCell::Empty
                } else {
                    GridCell::Entries(entries)
                });
            }
            rows.push(self.row(slot, cells));
        }

        rows
    }

    fn single_section_rows(
        &self,
        events: &[Event],
        located: &[Option<Located>],
        colors: &mut ColorAssigner,
        exclusions: &mut Vec<Exclusion>,
    ) -> Vec<GridRow> {
        let slots = self.index.slot_count();
        let days = self.index.day_count();

        // Events starting in each cell, in input order
        let mut starts: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); days]; slots];
        for (event_index, at) in located.iter().enumerate() {
            if let Some(at) = at {
                starts[at.slot][at.day].push(event_index);
            }
        }

        // skip[slot][day] holds the event whose span covers the cell
        let mut skip: Vec<Vec<Option<usize>>> = vec![vec![None; days]; slots];
        let mut rows = Vec::with_capacity(slots);

        for slot in 0..slots {
            let mut cells = Vec::with_capacity(days);
            for day in 0..days {
                if let Some(owner) = skip[slot][day] {
                    for &hidden in &starts[slot][day] {
                        exclusions.push(shadowed(events, hidden, owner));
                    }
                    cells.push(GridCell::Continuation);
                    continue;
                }

                let Some((&first, rest)) = starts[slot][day].split_first() else {
                    cells.push(GridCell::Empty);
                    continue;
                };
                for &hidden in rest {
                    exclusions.push(shadowed(events, hidden, first));
                }

                let entry = self.entry(&events[first], slot, colors);
                for offset in 1..entry.span_rows {
                    skip[slot + offset][day] = Some(first);
                }
                cells.push(GridCell::Entries(vec![entry]));
            }
            rows.push(self.row(slot, cells));
        }

        rows
    }
}

fn no_duration<'e>(
    events: &'e [Event],
    located: &'e [Option<Located>],
) -> impl Iterator<Item = Exclusion> + 'e {
    events
        .iter()
        .zip(located)
        .enumerate()
        .filter(|(_, (event, at))| at.is_some() && event.duration_slots <= 0)
        .map(|(event_index, (event, _))| {
            log::debug!(
                "{} {} has duration {}, not drawn",
                event.section_id,
                event.subject_code,
                event.duration_slots
            );
            Exclusion {
                event_index,
                section_id: event.section_id.clone(),
                subject_code: event.subject_code.clone(),
                reason: ExclusionReason::NoDuration(event.duration_slots),
            }
        })
}

fn shadowed(events: &[Event], hidden: usize, owner: usize) -> Exclusion {
    let event = &events[hidden];
    log::debug!(
        "{} {} hidden behind overlapping event #{}",
        event.section_id,
        event.subject_code,
        owner
    );
    Exclusion {
        event_index: hidden,
        section_id: event.section_id.clone(),
        subject_code: event.subject_code.clone(),
        reason: ExclusionReason::Shadowed(owner),
    }
}
