//! Tolerant field decoders for upstream payloads
//!
//! Scheduler and room-directory payloads are inconsistent about value types
//! (numbers vs strings, `null` vs missing). These helpers accept every
//! observed form instead of failing the whole payload.

use serde::{Deserialize, Deserializer};

use super::SlotRef;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// String field that may arrive as a number or `null`
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Text(s)) => s,
        Some(Scalar::Int(n)) => n.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
        Some(Scalar::Bool(b)) => b.to_string(),
        None => String::new(),
    })
}

/// Integer slot count; numeric strings are read by their leading digits.
/// Anything unreadable becomes 0.
pub(crate) fn slot_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) => n,
        Some(Scalar::Float(f)) if f.is_finite() => f.trunc() as i64,
        Some(Scalar::Text(s)) => leading_int(&s).unwrap_or(0),
        _ => 0,
    })
}

/// Boolean that may arrive as 0/1 or "true"/"false"
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Bool(b)) => b,
        Some(Scalar::Int(n)) => n != 0,
        Some(Scalar::Float(f)) => f != 0.0,
        Some(Scalar::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        None => false,
    })
}

/// Start slot given either as a catalog label or as an integer index
pub(crate) fn slot_ref<'de, D>(deserializer: D) -> Result<SlotRef, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        Some(Scalar::Int(n)) if n >= 0 => SlotRef::Index(n as usize),
        Some(Scalar::Int(n)) => SlotRef::Label(n.to_string()),
        Some(Scalar::Text(s)) => SlotRef::Label(s),
        Some(Scalar::Float(f)) => SlotRef::Label(f.to_string()),
        Some(Scalar::Bool(b)) => SlotRef::Label(b.to_string()),
        None => SlotRef::default(),
    })
}

/// Parse an optional sign followed by leading ASCII digits ("4", " 3 slots", "-1")
pub(crate) fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
