//! Table-scoped database operations.
//!
//! Timestamps are stored as RFC 3339 with fixed nanosecond precision so that
//! lexical order matches chronological order and values round-trip exactly.

mod summary;
mod symptom;

use chrono::{DateTime, SecondsFormat, Utc};

use super::DatabaseError;

pub use summary::*;
pub use symptom::*;

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DatabaseError::MalformedRecord {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_format_is_fixed_width() {
        let a = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 0).unwrap();
        let b = a + chrono::Duration::nanoseconds(1_500);
        let (fa, fb) = (format_timestamp(&a), format_timestamp(&b));
        assert_eq!(fa.len(), fb.len());
        assert!(fa < fb);
        assert_eq!(parse_timestamp("logged_at", &fb).unwrap(), b);
    }

    #[test]
    fn unparseable_timestamp_is_malformed() {
        let err = parse_timestamp("logged_at", "yesterday").unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::MalformedRecord { field: "logged_at", .. }
        ));
    }
}
