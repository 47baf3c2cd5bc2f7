//! Room directory: resolves scheduler room ids to display names

use std::collections::{BTreeSet, HashMap};

use crate::types::Room;

#[derive(Debug, Clone, Default)]
pub struct RoomDirectory {
    rooms: Vec<Room>,
    names: HashMap<String, String>,
}

impl RoomDirectory {
    pub fn new(rooms: Vec<Room>) -> Self {
        let names = rooms
            .iter()
            .filter(|r| !r.room_id.is_empty())
            .map(|r| (r.room_id.clone(), r.display_name().to_string()))
            .collect();
        Self { rooms, names }
    }

    /// Mapped name for `room_id`, or the raw id when unknown
    pub fn display_name(&self, room_id: &str) -> String {
        self.names
            .get(room_id)
            .cloned()
            .unwrap_or_else(|| room_id.to_string())
    }

    pub fn is_laboratory(&self, room_id: &str) -> bool {
        self.rooms
            .iter()
            .any(|r| r.room_id == room_id && r.is_laboratory)
    }

    /// Sorted, distinct, non-empty display names of every room
    pub fn names(&self) -> Vec<String> {
        self.rooms
            .iter()
            .map(|r| r.display_name())
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
