//! Input sources and payload decoding for scheduler responses and room lists

mod file;
mod http;
mod payload;

pub use file::FileSource;
pub use http::HttpSource;
pub use payload::{parse_rooms, parse_schedule, SchedulePayload};

use crate::types::{Result, Room};

/// Where a JSON payload comes from
pub trait ScheduleSource {
    /// Human-readable location (path or URL)
    fn describe(&self) -> String;

    /// Raw payload bytes
    fn read_bytes(&self) -> Result<Vec<u8>>;

    /// Read and decode a scheduler response
    fn load_schedule(&self) -> Result<SchedulePayload> {
        let mut bytes = self.read_bytes()?;
        let payload = parse_schedule(&mut bytes)?;
        for line in &payload.logs {
            log::debug!("[{}] {}", self.describe(), line);
        }
        log::info!(
            "loaded {} events from {}",
            payload.schedule.len(),
            self.describe()
        );
        Ok(payload)
    }

    /// Read and decode a room directory
    fn load_rooms(&self) -> Result<Vec<Room>> {
        let mut bytes = self.read_bytes()?;
        let rooms = parse_rooms(&mut bytes)?;
        log::info!("loaded {} rooms from {}", rooms.len(), self.describe());
        Ok(rooms)
    }
}

/// `http://` / `https://` locations are fetched, anything else is a file path
pub fn source_for(location: &str) -> Box<dyn ScheduleSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}
