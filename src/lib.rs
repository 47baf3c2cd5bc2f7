//! timegrid: renders scheduler output into day × time-slot timetable grids
//!
//! Core modules (`types`, `services`) are synchronous and perform no I/O;
//! `parsers` reads payloads from files or HTTP.

pub mod parsers;
pub mod services;
pub mod types;
