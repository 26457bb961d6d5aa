use chrono::{DateTime, NaiveDateTime, ParseError, SecondsFormat, Utc};

/// Layout of timestamps in tabular files: UTC, no zone suffix.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_date_time(value: &str) -> Result<DateTime<Utc>, ParseError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT).map(|parsed| parsed.and_utc())
}

pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// RFC 3339 with a `Z` suffix, as written in structured files.
pub fn format_rfc3339(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(value).map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn tabular_layout_round_trips_at_second_resolution() {
        let value = Utc.with_ymd_and_hms(2010, 1, 1, 12, 30, 5).unwrap();
        let text = format_date_time(&value);
        assert_eq!(text, "2010-01-01 12:30:05");
        assert_eq!(parse_date_time(&text).unwrap(), value);
    }

    #[test]
    fn tabular_layout_rejects_other_shapes() {
        assert!(parse_date_time("2010-01-01T12:30:05Z").is_err());
        assert!(parse_date_time("2010-01-01").is_err());
        assert!(parse_date_time("").is_err());
    }

    #[test]
    fn rfc3339_uses_zulu_suffix() {
        let value = parse_rfc3339("2011-01-01T13:00:00+01:00").unwrap();
        assert_eq!(format_rfc3339(&value), "2011-01-01T12:00:00Z");
    }
}
