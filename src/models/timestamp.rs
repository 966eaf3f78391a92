//! Lenient timestamp decoding.
//!
//! The backend mixes RFC 3339 (`2025-07-20T10:00:00.000000Z`) with plain SQL
//! datetimes (`2025-07-20 10:00:00`). Anything else decodes to `None` so one
//! odd row never sinks a whole list.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a backend timestamp; naive datetimes are taken as UTC
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => {
            let parsed = parse(&raw);
            if parsed.is_none() {
                debug!("Ignoring unrecognized timestamp '{}'", raw);
            }
            parsed
        }
        _ => None,
    })
}
