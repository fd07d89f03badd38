use crate::dates::{date_key, local_day, round_div, start_of_day_ms, today};
use crate::models::{DailyStat, ExerciseEntry, ExerciseType};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use std::collections::HashMap;

pub const DEFAULT_WINDOW_DAYS: usize = 30;
pub const MOVING_AVERAGE_DAYS: usize = 7;
pub const MAX_WINDOW_DAYS: usize = 3660;

/// Named chart windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Year,
}

impl TimeRange {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    pub fn days(self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

pub fn build_series(entries: &[ExerciseEntry], kind: ExerciseType, window_days: usize) -> Vec<DailyStat> {
    build_daily_series(entries, kind, window_days, &Local::now())
}

/// Builds `window_days` consecutive daily buckets ending at `now`'s local day,
/// oldest first. Days without entries are zero-filled.
///
/// The moving average only looks at buckets inside the window, so the first
/// days of a window average over fewer than seven samples.
pub fn build_daily_series<Tz: TimeZone>(
    entries: &[ExerciseEntry],
    kind: ExerciseType,
    window_days: usize,
    now: &DateTime<Tz>,
) -> Vec<DailyStat> {
    let tz = now.timezone();
    let today = today(now);

    let mut buckets: HashMap<NaiveDate, (u64, u32)> = HashMap::new();
    for entry in entries.iter().filter(|entry| entry.kind() == kind) {
        let Some(day) = local_day(&tz, entry.timestamp) else {
            continue;
        };
        let bucket = buckets.entry(day).or_default();
        bucket.0 = bucket.0.saturating_add(u64::from(entry.value));
        bucket.1 = bucket.1.saturating_add(1);
    }

    let mut series = Vec::with_capacity(window_days);
    for offset in (0..window_days).rev() {
        let date = today - Duration::days(offset as i64);
        let (total_value, entry_count) = buckets.get(&date).copied().unwrap_or_default();
        series.push(DailyStat {
            date: date_key(date),
            timestamp: start_of_day_ms(&tz, date),
            total_value,
            entry_count,
            moving_average: 0,
            is_today: date == today,
        });
    }

    apply_moving_average(&mut series, MOVING_AVERAGE_DAYS);
    series
}

fn apply_moving_average(series: &mut [DailyStat], window: usize) {
    let window = window.max(1);
    let mut running = 0u64;
    for index in 0..series.len() {
        running += series[index].total_value;
        if index >= window {
            running -= series[index - window].total_value;
        }
        let samples = (index + 1).min(window) as u64;
        series[index].moving_average = round_div(running, samples);
    }
}
