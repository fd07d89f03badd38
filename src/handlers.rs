use crate::errors::AppError;
use crate::models::{
    CreateEntryRequest, DailyStat, Exercise, ExerciseEntry, ExerciseType, SeriesQuery, Side,
    Statistics, UpdateEntryRequest,
};
use crate::series::{build_series, TimeRange, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::state::AppState;
use crate::stats::build_statistics;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<ExerciseEntry>> {
    Json(state.store.list().await)
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<ExerciseEntry>), AppError> {
    let kind = ExerciseType::parse(&payload.exercise_type)
        .ok_or_else(|| AppError::bad_request("exerciseType must be 'plank' or 'pushup'"))?;
    let exercise = parse_exercise(kind, payload.variant.as_deref(), payload.side)?;
    let value = positive_value(payload.value)?;

    let entry = state.store.create(exercise, value).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEntryRequest>,
) -> Result<Json<ExerciseEntry>, AppError> {
    let Some(existing) = state.store.list().await.into_iter().find(|entry| entry.id == id) else {
        return Err(AppError::not_found(format!("no entry with id {id}")));
    };

    let exercise = parse_exercise(existing.kind(), payload.variant.as_deref(), payload.side)?;
    let value = positive_value(payload.value)?;
    let edited = ExerciseEntry {
        exercise,
        value,
        ..existing
    };

    match state.store.update(edited).await? {
        Some(entry) => Ok(Json(entry)),
        None => Err(AppError::not_found(format!("no entry with id {id}"))),
    }
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("no entry with id {id}")))
    }
}

pub async fn get_stats(State(state): State<AppState>) -> Json<Statistics> {
    let entries = state.store.list().await;
    Json(build_statistics(&entries))
}

pub async fn get_series(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> Result<Json<Vec<DailyStat>>, AppError> {
    let kind = ExerciseType::parse(&kind)
        .ok_or_else(|| AppError::bad_request("kind must be 'plank' or 'pushup'"))?;
    let window_days = resolve_window(&query)?;

    let entries = state.store.list().await;
    Ok(Json(build_series(&entries, kind, window_days)))
}

fn parse_exercise(
    kind: ExerciseType,
    variant: Option<&str>,
    side: Option<Side>,
) -> Result<Exercise, AppError> {
    Exercise::from_parts(kind, variant, side).ok_or_else(|| {
        AppError::bad_request(format!(
            "variant must be one of {}",
            kind.variant_names().join(", ")
        ))
    })
}

fn positive_value(value: u32) -> Result<u32, AppError> {
    if value == 0 {
        return Err(AppError::bad_request("value must be greater than zero"));
    }
    Ok(value)
}

fn resolve_window(query: &SeriesQuery) -> Result<usize, AppError> {
    let days = match (query.days, query.range.as_deref()) {
        (Some(days), _) => days,
        (None, Some(range)) => TimeRange::parse(range)
            .map(TimeRange::days)
            .ok_or_else(|| AppError::bad_request("range must be 'week', 'month' or 'year'"))?,
        (None, None) => DEFAULT_WINDOW_DAYS,
    };

    if days > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be at most {MAX_WINDOW_DAYS}"
        )));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_defaults_to_thirty_days() {
        assert_eq!(resolve_window(&SeriesQuery::default()).unwrap(), 30);
    }

    #[test]
    fn explicit_days_win_over_range() {
        let query = SeriesQuery {
            days: Some(14),
            range: Some("year".to_string()),
        };
        assert_eq!(resolve_window(&query).unwrap(), 14);
    }

    #[test]
    fn window_rejects_unknown_range_and_huge_days() {
        let unknown = SeriesQuery {
            days: None,
            range: Some("decade".to_string()),
        };
        assert!(resolve_window(&unknown).is_err());

        let huge = SeriesQuery {
            days: Some(MAX_WINDOW_DAYS + 1),
            range: None,
        };
        assert_eq!(resolve_window(&huge).unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn zero_value_is_rejected() {
        assert!(positive_value(0).is_err());
        assert_eq!(positive_value(12).unwrap(), 12);
    }
}
