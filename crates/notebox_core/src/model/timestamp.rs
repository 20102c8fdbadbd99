//! Serde adapter for stored note timestamps.
//!
//! Writes `YYYY-MM-DDTHH:MM:SS.mmmZ`. Reads any RFC 3339 value (normalized to
//! UTC). An offset-less date-time is local wall time; a bare date is UTC
//! midnight.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse(raw.trim())
        .ok_or_else(|| de::Error::custom(format!("unparseable timestamp `{raw}`")))
}

pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        // Skipped-over local times (DST gaps) have no instant.
        return Local
            .from_local_datetime(&value)
            .earliest()
            .map(|local| local.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|value| value.and_utc())
}

#[cfg(test)]
mod tests {
    use super::parse;
    use chrono::{Local, TimeZone, Utc};

    #[test]
    fn parse_normalizes_offsets_to_utc() {
        let parsed = parse("2024-05-01T11:30:00.250+02:00").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
            + chrono::TimeDelta::milliseconds(250);
        assert_eq!(parsed, expected);
    }

    #[test]
    fn parse_reads_offsetless_date_time_as_local_and_date_as_utc() {
        assert_eq!(
            parse("2024-05-01T09:30:00").unwrap(),
            Local
                .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
                .unwrap()
                .with_timezone(&Utc)
        );
        assert_eq!(
            parse("2024-05-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse("yesterday").is_none());
    }
}
