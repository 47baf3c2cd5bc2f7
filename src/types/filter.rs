//! Filter selections (year → section → room → teacher)

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const ALL: &str = "all";

/// A single filter field: either unrestricted or pinned to one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: PartialEq> Selection<T> {
    /// True when unrestricted or equal to `value`
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == value,
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::All, Self::Only)
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
            return Ok(Self::All);
        }
        raw.parse().map(Self::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: Serialize> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str(ALL),
            Self::Only(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Num(n) => n.to_string(),
            Raw::Text(s) => s,
        };
        text.parse().map_err(de::Error::custom)
    }
}

/// Current filter selection. Values are immutable; updates return a new state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub year: Selection<u8>,
    #[serde(default)]
    pub section: Selection<String>,
    #[serde(default)]
    pub room: Selection<String>,
    #[serde(default)]
    pub teacher: Selection<String>,
}

impl FilterState {
    /// Unrestricted state
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether a single section is pinned (drives single-section grid mode)
    pub fn is_single_section(&self) -> bool {
        !self.section.is_all()
    }
}
