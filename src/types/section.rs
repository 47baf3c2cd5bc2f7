//! Section id grammar: `{Program}{YearDigit}{Letter}` (e.g. `CS2A`, `IT3B`)

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)([0-9])([A-Za-z]*)$").expect("valid regex"));

/// Parsed section id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SectionId {
    pub program: String,
    pub year: u8,
    pub letter: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("section id {0:?} does not match {{program}}{{year}}{{letter}}")]
pub struct SectionParseError(pub String);

impl FromStr for SectionId {
    type Err = SectionParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let caps = SECTION_RE
            .captures(raw.trim())
            .ok_or_else(|| SectionParseError(raw.to_string()))?;
        let year = caps[2]
            .parse()
            .map_err(|_| SectionParseError(raw.to_string()))?;
        Ok(Self {
            program: caps[1].to_string(),
            year,
            letter: caps[3].to_string(),
        })
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.program, self.year, self.letter)
    }
}
