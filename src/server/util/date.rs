use chrono::{DateTime, NaiveDateTime, Utc};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const READABLE_FORMAT: &str = "%H-%M-%S %a,%d %b, %Y";

/// Parses `YYYY-MM-DD HH:MM:SS` (taken as UTC) or an RFC 3339 timestamp.
pub fn parse_datetime(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, DATETIME_FORMAT) {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Returns true when `input` is strictly later than now. Unparseable input is never
/// in the future.
pub fn greater_than_now(input: &str) -> bool {
    parse_datetime(input).is_some_and(|dt| dt > Utc::now())
}

/// Formats a timestamp like `14-30-00 Mon,05 Jan, 2026`.
pub fn readable_datetime(dt: DateTime<Utc>) -> String {
    dt.format(READABLE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn formats_readable_datetime() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 5, 14, 30, 0).unwrap();

        assert_eq!(readable_datetime(dt), "14-30-00 Mon,05 Jan, 2026");
    }

    #[test]
    fn accepts_both_datetime_formats() {
        let plain = parse_datetime("2026-03-01 09:15:00").unwrap();
        let rfc = parse_datetime("2026-03-01T09:15:00Z").unwrap();

        assert_eq!(plain, rfc);
    }

    #[test]
    fn compares_against_now() {
        let future = (Utc::now() + Duration::days(2)).format(DATETIME_FORMAT).to_string();
        let past = (Utc::now() - Duration::days(2)).format(DATETIME_FORMAT).to_string();

        assert!(greater_than_now(&future));
        assert!(!greater_than_now(&past));
        assert!(!greater_than_now("tomorrow"));
    }
}
