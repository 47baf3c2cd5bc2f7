//! Local JSON file source

use std::fs;
use std::path::{Path, PathBuf};

use super::ScheduleSource;
use crate::types::Result;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ScheduleSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        Ok(fs::read(&self.path)?)
    }
}
