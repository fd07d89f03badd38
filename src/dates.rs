use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};

pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Local calendar day of an epoch-millisecond timestamp in `tz`.
pub fn local_day<Tz: TimeZone>(tz: &Tz, timestamp_ms: i64) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|instant| instant.date_naive())
}

pub fn today<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDate {
    now.date_naive()
}

/// First instant of `date` in `tz`, as epoch milliseconds.
///
/// Zones that skip midnight fall back to the first representable instant
/// of that wall-clock hour, then to UTC midnight.
pub fn start_of_day_ms<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    if let Some(instant) = tz.from_local_datetime(&midnight).earliest() {
        return instant.timestamp_millis();
    }
    let after_gap = midnight + chrono::Duration::hours(1);
    match tz.from_local_datetime(&after_gap).earliest() {
        Some(instant) => instant.timestamp_millis(),
        None => midnight.and_utc().timestamp_millis(),
    }
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Integer division rounding halves up. Zero divisor yields zero.
pub fn round_div(sum: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (sum + count / 2) / count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn local_day_follows_offset() {
        // 2026-01-05T23:30:00Z
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 23, 30, 0).unwrap().timestamp_millis();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();

        assert_eq!(local_day(&Utc, ts), NaiveDate::from_ymd_opt(2026, 1, 5));
        assert_eq!(local_day(&tokyo, ts), NaiveDate::from_ymd_opt(2026, 1, 6));
        assert_eq!(local_day(&new_york, ts), NaiveDate::from_ymd_opt(2026, 1, 5));
    }

    #[test]
    fn start_of_day_is_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let expected = tz.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap().timestamp_millis();
        assert_eq!(start_of_day_ms(&tz, date), expected);
        assert_eq!(local_day(&tz, expected), Some(date));
    }

    #[test]
    fn round_div_rounds_half_up() {
        assert_eq!(round_div(280, 7), 40);
        assert_eq!(round_div(3, 2), 2);
        assert_eq!(round_div(10, 4), 3);
        assert_eq!(round_div(9, 4), 2);
        assert_eq!(round_div(5, 0), 0);
    }

    #[test]
    fn date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 3).unwrap();
        assert_eq!(date_key(date), "2026-02-03");
    }
}
