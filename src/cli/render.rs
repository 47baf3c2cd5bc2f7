//! Plain-text table output

use std::fmt::Write;

use timegrid::services::{FilterOptions, ScheduleRow};
use timegrid::types::{CellEntry, Grid, GridCell};

const CONTINUATION: &str = "  |";
const COLUMN_GAP: &str = "  ";

fn entry_text(entry: &CellEntry) -> String {
    let mut text = format!("{} {}", entry.event.subject_code, entry.event.section_id);
    if !entry.room_name.is_empty() {
        let _ = write!(text, " @{}", entry.room_name);
    }
    text
}

fn cell_text(cell: &GridCell) -> String {
    match cell {
        GridCell::Empty => String::new(),
        GridCell::Continuation => CONTINUATION.to_string(),
        GridCell::Entries(entries) => entries
            .iter()
            .map(entry_text)
            .collect::<Vec<_>>()
            .join(" / "),
    }
}

/// Left-aligned columns sized to their widest value
fn table(header: Vec<String>, rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn grid_table(grid: &Grid) -> String {
    let header = std::iter::once("Time".to_string())
        .chain(grid.days.iter().map(|d| d.to_string()))
        .collect();
    let rows = grid
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.label.clone())
                .chain(row.cells.iter().map(cell_text))
                .collect()
        })
        .collect();
    table(header, rows)
}

fn join_or_none<T: ToString>(values: &[T]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn options_text(options: &FilterOptions) -> String {
    format!(
        "Years:    {}\nSections: {}\nRooms:    {}\nTeachers: {}\n",
        join_or_none(&options.years),
        join_or_none(&options.sections),
        join_or_none(&options.rooms),
        join_or_none(&options.teachers),
    )
}

pub fn listing_table(rows: &[ScheduleRow]) -> String {
    let header = ["Section", "Subject", "Type", "Teacher", "Room", "Day", "Time"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let body = rows
        .iter()
        .map(|r| {
            vec![
                r.section_id.clone(),
                r.subject.clone(),
                r.kind.clone(),
                r.teacher.clone(),
                r.room.clone(),
                r.day.clone(),
                r.time.clone(),
            ]
        })
        .collect();
    table(header, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use timegrid::services::{ColorAssigner, GridBuilder, RoomDirectory, SlotIndex};
    use timegrid::types::{Event, GridMode, Room};
    use chrono::Weekday::{Mon, Tue};

    fn grid(mode: GridMode) -> Grid {
        let index = SlotIndex::new(vec![Mon, Tue], &["08:00-08:30", "08:30-09:00"]).unwrap();
        let rooms = RoomDirectory::new(vec![Room::new("R1", "Room 101", false)]);
        let events = vec![
            Event::new("CS2A", "CS101", "lecture", "Mon", 0usize, 2).with_room("R1"),
            Event::new("CS2B", "CS102", "lecture", "Mon", 0usize, 1),
        ];
        GridBuilder::new(&index, &rooms).build(&events, mode, &mut ColorAssigner::default())
    }

    #[test]
    fn test_grid_table_combined() {
        let text = grid_table(&grid(GridMode::Combined));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Time"));
        assert!(lines[0].ends_with("Tue"));
        assert!(lines[1].contains("CS101 CS2A @Room 101 / CS102 CS2B"));
        assert_eq!(lines[2], "08:30-09:00");
    }

    #[test]
    fn test_grid_table_marks_continuation() {
        let text = grid_table(&grid(GridMode::SingleSection));
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[1].contains("CS101 CS2A"));
        assert!(!lines[1].contains("CS102"));
        assert!(lines[2].ends_with(CONTINUATION.trim_start()));
    }

    #[test]
    fn test_options_text() {
        let options = FilterOptions {
            years: vec![1, 2],
            sections: vec!["CS1A".into(), "CS2A".into()],
            rooms: vec![],
            teachers: vec!["Reyes".into()],
        };
        let text = options_text(&options);
        assert!(text.contains("Years:    1, 2\n"));
        assert!(text.contains("Rooms:    (none)\n"));
    }

    #[test]
    fn test_listing_table_aligns_columns() {
        let rows = vec![ScheduleRow {
            section_id: "CS2A".into(),
            subject: "Intro to Computing".into(),
            kind: "lecture".into(),
            teacher: "Reyes".into(),
            room: "Room 101".into(),
            day: "Mon".into(),
            time: "08:00-09:00".into(),
        }];
        let text = listing_table(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].find("Subject"), lines[1].find("Intro"));
        assert!(lines[1].ends_with("08:00-09:00"));
    }
}
