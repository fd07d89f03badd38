use crate::dates::{local_day, round_div, today, DAY_MS};
use crate::models::{ExerciseEntry, ExerciseStats, ExerciseType, Statistics, VariantTotals};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use std::collections::BTreeSet;

const WEEK_DAYS: u64 = 7;

pub fn build_statistics(entries: &[ExerciseEntry]) -> Statistics {
    compute_statistics(entries, &Local::now())
}

/// Derives the per-kind statistics snapshot for `now`.
///
/// Day-based figures use the calendar of `now`'s time zone. The weekly
/// average always divides by seven, however many of those days have data.
pub fn compute_statistics<Tz: TimeZone>(entries: &[ExerciseEntry], now: &DateTime<Tz>) -> Statistics {
    Statistics {
        plank: kind_stats(entries, ExerciseType::Plank, now),
        pushup: kind_stats(entries, ExerciseType::Pushup, now),
    }
}

fn kind_stats<Tz: TimeZone>(
    entries: &[ExerciseEntry],
    kind: ExerciseType,
    now: &DateTime<Tz>,
) -> ExerciseStats {
    let tz = now.timezone();
    let today = today(now);
    let yesterday = today - Duration::days(1);
    let now_ms = now.timestamp_millis();
    let week_start_ms = now_ms.saturating_sub(WEEK_DAYS as i64 * DAY_MS);

    let names = kind.variant_names();
    let mut variants: Vec<VariantTotals> = names
        .iter()
        .map(|&variant| VariantTotals {
            variant,
            total: 0,
            yesterday: 0,
        })
        .collect();

    let mut today_total = 0u64;
    let mut week_total = 0u64;
    let mut personal_best = 0u32;
    let mut entry_count = 0usize;
    let mut total_value = 0u64;
    let mut active_days = BTreeSet::new();

    for entry in entries.iter().filter(|entry| entry.kind() == kind) {
        let value = u64::from(entry.value);
        entry_count += 1;
        total_value = total_value.saturating_add(value);
        personal_best = personal_best.max(entry.value);

        if entry.timestamp >= week_start_ms && entry.timestamp <= now_ms {
            week_total = week_total.saturating_add(value);
        }

        let day = local_day(&tz, entry.timestamp);
        let slot = variants
            .iter_mut()
            .find(|totals| totals.variant == entry.exercise.variant_name());
        if let Some(totals) = slot {
            totals.total = totals.total.saturating_add(value);
            if day == Some(yesterday) {
                totals.yesterday = totals.yesterday.saturating_add(value);
            }
        }

        if let Some(day) = day {
            if day == today {
                today_total = today_total.saturating_add(value);
            }
            active_days.insert(day);
        }
    }

    ExerciseStats {
        today_total,
        weekly_average: round_div(week_total, WEEK_DAYS),
        personal_best,
        current_streak: current_streak(&active_days, today),
        entry_count,
        total_value,
        variants,
    }
}

/// Walks back from `today` over the distinct active days, newest first.
/// Each day must land exactly on the cursor, so an empty today ends the
/// streak at zero. Days after `today` are ignored.
fn current_streak(active_days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0u32;
    let mut cursor = today;
    for &day in active_days.range(..=today).rev() {
        if day != cursor {
            break;
        }
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}
