//! Timetable configuration: day/slot catalog and palettes
//!
//! Loaded from `~/.timegrid/config.json` unless a path is given. A missing
//! default file means built-in defaults.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::palette::{LAB_PALETTE, SUBJECT_PALETTE};
use crate::services::{ColorAssigner, SlotIndex};
use crate::types::{Result, Rgb, TimegridError};

const CONFIG_DIR: &str = ".timegrid";
const CONFIG_FILE: &str = "config.json";

/// First and last bookable hours, and the lunch hour left out of the catalog
const DAY_START_HOUR: u32 = 6;
const DAY_END_HOUR: u32 = 22;
const LUNCH_HOUR: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Day labels in display order
    pub days: Vec<Weekday>,
    /// `HH:MM-HH:MM` slot labels in display order
    pub slots: Vec<String>,
    pub subject_palette: Vec<Rgb>,
    pub lab_palette: Vec<Rgb>,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ],
            slots: default_slots(),
            subject_palette: SUBJECT_PALETTE.to_vec(),
            lab_palette: LAB_PALETTE.to_vec(),
        }
    }
}

/// Half-hour slots from 06:00 to 22:00, skipping 12:00-13:00
fn default_slots() -> Vec<String> {
    (DAY_START_HOUR..DAY_END_HOUR)
        .filter(|hour| *hour != LUNCH_HOUR)
        .flat_map(|hour| {
            [
                format!("{:02}:00-{:02}:30", hour, hour),
                format!("{:02}:30-{:02}:00", hour, hour + 1),
            ]
        })
        .collect()
}

impl TimetableConfig {
    /// Load from `path`, or from the default location when None.
    ///
    /// An explicit path must exist and parse. The default file may be
    /// absent or broken; either way the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::default_path()?;
                if !path.exists() {
                    return Ok(Self::default());
                }
                match Self::load_from(&path) {
                    Ok(config) => Ok(config),
                    Err(e) => {
                        log::warn!("ignoring {}: {}", path.display(), e);
                        Ok(Self::default())
                    }
                }
            }
        }
    }

    /// Default config path (~/.timegrid/config.json)
    pub fn default_path() -> Result<PathBuf> {
        let base_dirs = directories::BaseDirs::new()
            .ok_or_else(|| TimegridError::Config("Cannot determine home directory".into()))?;
        Ok(base_dirs.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            TimegridError::Config(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TimegridError::Config(format!("Serialization failed: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Validated catalog
    pub fn slot_index(&self) -> Result<SlotIndex> {
        SlotIndex::new(self.days.clone(), &self.slots)
    }

    pub fn color_assigner(&self) -> ColorAssigner {
        ColorAssigner::new(self.subject_palette.clone(), self.lab_palette.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_catalog() {
        let config = TimetableConfig::default();
        assert_eq!(config.days.len(), 7);
        assert_eq!(config.slots.len(), 30);
        assert_eq!(config.slots[0], "06:00-06:30");
        assert_eq!(config.slots[11], "11:30-12:00");
        assert_eq!(config.slots[12], "13:00-13:30");
        assert_eq!(config.slots[29], "21:30-22:00");

        let index = config.slot_index().unwrap();
        assert_eq!(index.slot_count(), 30);
        assert_eq!(index.day_labels()[6], "Sun");
    }

    #[test]
    fn test_load_explicit_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r##"{"days": ["Mon", "Wed"], "subject_palette": ["#102030"]}"##,
        )
        .unwrap();

        let config = TimetableConfig::load(Some(&path)).unwrap();
        assert_eq!(config.days, vec![Weekday::Mon, Weekday::Wed]);
        assert_eq!(config.slots.len(), 30);
        assert_eq!(config.lab_palette, LAB_PALETTE.to_vec());

        let pair = config
            .color_assigner()
            .color_for("CS101", &EventKind::Lecture);
        assert_eq!(pair.background, Rgb::new(0x10, 0x20, 0x30));
    }

    #[test]
    fn test_load_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = TimetableConfig::load(Some(&dir.path().join("nope.json")));
        assert!(matches!(result, Err(TimegridError::Io(_))));
    }

    #[test]
    fn test_load_explicit_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"subject_palette": ["blue"]}"#).unwrap();
        let result = TimetableConfig::load(Some(&path));
        assert!(matches!(result, Err(TimegridError::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = TimetableConfig {
            days: vec![Weekday::Sat],
            ..TimetableConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(TimetableConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_invalid_catalog_rejected_by_slot_index() {
        let config = TimetableConfig {
            slots: vec!["09:00-09:30".into(), "08:00-08:30".into()],
            ..TimetableConfig::default()
        };
        assert!(matches!(
            config.slot_index(),
            Err(TimegridError::Catalog(_))
        ));
    }
}
