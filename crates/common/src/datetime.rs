//! Interview slot arithmetic and datetime formatting.

use chrono::{DateTime, Duration, Timelike, Utc};

/// Hour of day (UTC) at which interview scheduling starts.
const INTERVIEW_START_HOUR: u32 = 9;

/// The first interview slot after `now`: the next day at 09:00 UTC.
pub fn next_interview_day(now: DateTime<Utc>) -> DateTime<Utc> {
    (now + Duration::days(1))
        .with_hour(INTERVIEW_START_HOUR)
        .and_then(|t| t.with_minute(0))
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .expect("09:00:00 is a valid time of day")
}

/// Iterator over one-hour interview slots starting the day after `now`.
pub fn interview_slots(now: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
    let start = next_interview_day(now);
    (0..).map(move |i| start + Duration::hours(i))
}

/// Format an interview slot for display (`YYYY-MM-DD HH:MM:SS`).
pub fn format_interview_slot(slot: DateTime<Utc>) -> String {
    slot.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_interview_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 15, 42, 7).unwrap();
        let slot = next_interview_day(now);
        assert_eq!(slot, Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_next_interview_day_crosses_month() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 23, 0, 0).unwrap();
        let slot = next_interview_day(now);
        assert_eq!(slot, Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_interview_slots_are_hourly() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap();
        let slots: Vec<_> = interview_slots(now).take(3).collect();
        assert_eq!(slots[0], Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap());
        assert_eq!(slots[1], Utc.with_ymd_and_hms(2025, 3, 5, 10, 0, 0).unwrap());
        assert_eq!(slots[2], Utc.with_ymd_and_hms(2025, 3, 5, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_format_interview_slot() {
        let slot = Utc.with_ymd_and_hms(2025, 3, 5, 9, 0, 0).unwrap();
        assert_eq!(format_interview_slot(slot), "2025-03-05 09:00:00");
    }
}
