//! Slot index: the ordered day and time-slot catalog
//!
//! Index position is the canonical identity of a slot. The catalog must be
//! identical to the one the scheduler used to produce `day`/`start_time_slot`
//! values; events referencing labels outside it are dropped at render time.

use chrono::{NaiveTime, Weekday};
use std::collections::HashSet;

use crate::types::{Event, Result, SlotError, SlotRef, TimegridError};

/// Lunch break: the only permitted discontinuity between consecutive slots
const MAX_GAPS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot {
    label: String,
    start_text: String,
    end_text: String,
    start: NaiveTime,
    end: NaiveTime,
}

impl Slot {
    fn parse(label: &str) -> Result<Self> {
        let invalid = || TimegridError::Catalog(format!("invalid slot label {:?}", label));
        let (start_text, end_text) = label.split_once('-').ok_or_else(invalid)?;
        let start = NaiveTime::parse_from_str(start_text, "%H:%M").map_err(|_| invalid())?;
        let end = NaiveTime::parse_from_str(end_text, "%H:%M").map_err(|_| invalid())?;
        if end <= start {
            return Err(TimegridError::Catalog(format!(
                "slot {:?} ends before it starts",
                label
            )));
        }
        Ok(Self {
            label: label.to_string(),
            start_text: start_text.to_string(),
            end_text: end_text.to_string(),
            start,
            end,
        })
    }
}

/// Validated day × slot catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotIndex {
    days: Vec<Weekday>,
    day_labels: Vec<String>,
    slots: Vec<Slot>,
}

impl SlotIndex {
    /// Build a catalog, enforcing ordering invariants:
    /// non-empty, unique days; slots strictly increasing and non-overlapping,
    /// contiguous except for at most one gap.
    pub fn new<S: AsRef<str>>(days: Vec<Weekday>, slot_labels: &[S]) -> Result<Self> {
        if days.is_empty() {
            return Err(TimegridError::Catalog("day list is empty".into()));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = days.iter().find(|d| !seen.insert(**d)) {
            return Err(TimegridError::Catalog(format!("duplicate day {}", dup)));
        }
        if slot_labels.is_empty() {
            return Err(TimegridError::Catalog("slot list is empty".into()));
        }

        let slots = slot_labels
            .iter()
            .map(|label| Slot::parse(label.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut gaps = 0;
        for pair in slots.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start < prev.end {
                return Err(TimegridError::Catalog(format!(
                    "slot {:?} overlaps or precedes {:?}",
                    next.label, prev.label
                )));
            }
            if next.start > prev.end {
                gaps += 1;
                if gaps > MAX_GAPS {
                    return Err(TimegridError::Catalog(format!(
                        "more than {} gap in slot list (at {:?})",
                        MAX_GAPS, next.label
                    )));
                }
            }
        }

        let day_labels = days.iter().map(|d| d.to_string()).collect();
        Ok(Self {
            days,
            day_labels,
            slots,
        })
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Day labels as they appear on the wire ("Mon", "Tue", ...)
    pub fn day_labels(&self) -> &[String] {
        &self.day_labels
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Exact label lookup
    pub fn index_of(&self, label: &str) -> std::result::Result<usize, SlotError> {
        self.slots
            .iter()
            .position(|s| s.label == label)
            .ok_or_else(|| SlotError::NotFound(label.to_string()))
    }

    pub fn label_of(&self, index: usize) -> std::result::Result<&str, SlotError> {
        self.slots
            .get(index)
            .map(|s| s.label.as_str())
            .ok_or(SlotError::OutOfRange {
                index,
                len: self.slots.len(),
            })
    }

    /// Exact day label lookup
    pub fn day_index_of(&self, day: &str) -> std::result::Result<usize, SlotError> {
        self.day_labels
            .iter()
            .position(|d| d == day)
            .ok_or_else(|| SlotError::UnknownDay(day.to_string()))
    }

    pub fn resolve(&self, slot: &SlotRef) -> std::result::Result<usize, SlotError> {
        match slot {
            SlotRef::Label(label) => self.index_of(label),
            SlotRef::Index(index) => self.label_of(*index).map(|_| *index),
        }
    }

    /// Number of rows an event starting at `start` covers, clipped to the catalog.
    /// Non-positive durations still cover their start row.
    pub fn clipped_span(&self, start: usize, duration_slots: i64) -> usize {
        let remaining = self.slots.len().saturating_sub(start);
        let duration = usize::try_from(duration_slots.max(1)).unwrap_or(usize::MAX);
        duration.min(remaining).max(1)
    }

    /// Rows an event covers in the combined layout: the duration clipped to
    /// the catalog, zero when the duration is not positive.
    pub fn covered_slots(&self, start: usize, duration_slots: i64) -> usize {
        let remaining = self.slots.len().saturating_sub(start);
        usize::try_from(duration_slots)
            .unwrap_or(0)
            .min(remaining)
    }

    /// `"{start of first slot}-{end of last slot}"`.
    ///
    /// Falls back to the raw start label when the label is unknown or the
    /// duration is not positive. Never fails.
    pub fn range_label(&self, start_label: &str, duration_slots: i64) -> String {
        let start = match self.index_of(start_label) {
            Ok(index) if duration_slots > 0 => index,
            _ => return start_label.to_string(),
        };
        let offset = usize::try_from(duration_slots - 1).unwrap_or(usize::MAX);
        let end = start.saturating_add(offset).min(self.slots.len() - 1);
        format!("{}-{}", self.slots[start].start_text, self.slots[end].end_text)
    }

    /// Time range for an event's start reference (label or index)
    pub fn event_range(&self, event: &Event) -> String {
        match &event.start_slot {
            SlotRef::Label(label) => self.range_label(label, event.duration_slots),
            SlotRef::Index(index) => match self.label_of(*index) {
                Ok(label) => self.range_label(label, event.duration_slots),
                Err(_) => String::new(),
            },
        }
    }
}
