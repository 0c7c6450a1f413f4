use chrono::{DateTime, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
}

// Time Helper functions

/// Used for axis labels and tables. Out-of-range timestamps render as "?".
pub fn epoch_sec_to_date_string(epoch_sec: i64) -> String {
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => "?".to_string(),
    }
}

/// Accepts `YYYY-MM-DD` (midnight UTC) or a full RFC 3339 timestamp.
pub fn parse_date_to_epoch_sec(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, TimeUtils::STANDARD_TIME_FORMAT) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp());
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_strings_round_trip_through_epoch_seconds() {
        let secs = parse_date_to_epoch_sec("2024-01-02").unwrap();
        assert_eq!(secs, 1_704_153_600);
        assert_eq!(epoch_sec_to_date_string(secs), "2024-01-02");
    }

    #[test]
    fn rfc3339_is_accepted_and_garbage_is_not() {
        assert_eq!(
            parse_date_to_epoch_sec("2024-01-02T01:00:00+01:00"),
            Some(1_704_153_600)
        );
        assert_eq!(parse_date_to_epoch_sec("02.01.2024"), None);
    }
}
