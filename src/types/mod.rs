//! Type definitions for timegrid

mod color;
mod error;
mod event;
mod filter;
mod grid;
mod lenient;
mod section;

pub use color::*;
pub use error::*;
pub use event::*;
pub use filter::*;
pub use grid::*;
pub use section::*;
