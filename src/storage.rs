use crate::errors::AppError;
use crate::models::{ExerciseEntry, LegacyPlankEntry};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Loads the entry log, migrating the legacy plank file when the data file
/// does not exist yet. Read and parse failures degrade to an empty log.
pub async fn load_entries(path: &Path, legacy_path: &Path) -> Vec<ExerciseEntry> {
    match fs::read(path).await {
        Ok(bytes) => decode_entries(&bytes).unwrap_or_else(|err| {
            error!("failed to parse data file: {err}");
            Vec::new()
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => migrate_legacy(path, legacy_path).await,
        Err(err) => {
            error!("failed to read data file: {err}");
            Vec::new()
        }
    }
}

pub async fn persist_entries(path: &Path, entries: &[ExerciseEntry]) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(entries).map_err(AppError::internal)?;
    fs::write(path, payload).await?;
    Ok(())
}

/// Decodes a JSON array of records one by one. Records in the legacy
/// `{id, timestamp, duration, type}` shape are converted; anything else that
/// does not decode is skipped.
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<ExerciseEntry>, serde_json::Error> {
    let records: Vec<Value> = serde_json::from_slice(bytes)?;
    let mut entries = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        match decode_record(record) {
            Some(entry) => entries.push(entry),
            None => warn!("skipping undecodable entry record at index {index}"),
        }
    }
    Ok(entries)
}

fn decode_record(record: Value) -> Option<ExerciseEntry> {
    if record.get("exerciseType").is_some() {
        return serde_json::from_value::<ExerciseEntry>(record).ok();
    }
    serde_json::from_value::<LegacyPlankEntry>(record)
        .ok()
        .map(ExerciseEntry::from)
}

async fn migrate_legacy(path: &Path, legacy_path: &Path) -> Vec<ExerciseEntry> {
    let bytes = match fs::read(legacy_path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            error!("failed to read legacy data file: {err}");
            return Vec::new();
        }
    };

    let entries = match decode_entries(&bytes) {
        Ok(entries) => entries,
        Err(err) => {
            error!("failed to parse legacy data file: {err}");
            return Vec::new();
        }
    };

    match persist_entries(path, &entries).await {
        Ok(()) => info!(
            "migrated {} legacy entries from {}",
            entries.len(),
            legacy_path.display()
        ),
        Err(err) => error!("failed to write migrated entries: {}", err.message),
    }
    entries
}
