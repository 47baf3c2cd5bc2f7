//! Services for catalog lookup, normalization, filtering and grid building

pub mod config;
pub mod filter;
pub mod grid_builder;
pub mod listing;
pub mod normalizer;
pub mod palette;
pub mod rooms;
pub mod slot_index;
pub mod workspace;

pub use config::TimetableConfig;
pub use filter::FilterOptions;
pub use grid_builder::{GridBuilder, Placement};
pub use listing::{schedule_rows, ScheduleRow};
pub use normalizer::{normalize, EventKey};
pub use palette::ColorAssigner;
pub use rooms::RoomDirectory;
pub use slot_index::SlotIndex;
pub use workspace::{Generation, Rendered, Workspace};
