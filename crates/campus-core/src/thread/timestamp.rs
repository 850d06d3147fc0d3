//! Lenient comment timestamp parsing

use chrono::{DateTime, NaiveDateTime, Utc};

/// Offset-carrying layouts Postgres emits for `timestamptz::text`
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Layouts without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a creation timestamp for ordering.
///
/// Anything unparsable maps to the Unix epoch so it sorts earliest instead of
/// failing the whole batch.
pub fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.with_timezone(&Utc);
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return ts.with_timezone(&Utc);
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return ts.and_utc();
        }
    }

    DateTime::<Utc>::default()
}
