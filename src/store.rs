use crate::errors::AppError;
use crate::models::{Exercise, ExerciseEntry};
use crate::storage::persist_entries;
use chrono::Utc;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

/// Entry log kept in memory, most recent first, and written back to
/// `data_path` after every mutation.
pub struct EntryStore {
    data_path: PathBuf,
    entries: Mutex<Vec<ExerciseEntry>>,
}

impl EntryStore {
    pub fn new(data_path: PathBuf, entries: Vec<ExerciseEntry>) -> Self {
        Self {
            data_path,
            entries: Mutex::new(entries),
        }
    }

    pub async fn list(&self) -> Vec<ExerciseEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn create(&self, exercise: Exercise, value: u32) -> Result<ExerciseEntry, AppError> {
        let entry = ExerciseEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            exercise,
            value,
        };

        let mut entries = self.entries.lock().await;
        entries.insert(0, entry.clone());
        if let Err(err) = persist_entries(&self.data_path, &entries).await {
            entries.remove(0);
            return Err(err);
        }

        info!(id = %entry.id, kind = ?entry.kind(), value, "entry created");
        Ok(entry)
    }

    /// Replaces the entry with the same id, keeping its original timestamp.
    /// Returns `None` when no entry matches.
    pub async fn update(&self, entry: ExerciseEntry) -> Result<Option<ExerciseEntry>, AppError> {
        let mut entries = self.entries.lock().await;
        let Some(index) = entries.iter().position(|existing| existing.id == entry.id) else {
            return Ok(None);
        };

        let replacement = ExerciseEntry {
            timestamp: entries[index].timestamp,
            ..entry
        };
        let previous = std::mem::replace(&mut entries[index], replacement.clone());
        if let Err(err) = persist_entries(&self.data_path, &entries).await {
            entries[index] = previous;
            return Err(err);
        }

        info!(id = %replacement.id, value = replacement.value, "entry updated");
        Ok(Some(replacement))
    }

    /// Removes the entry with `id`. Returns `false` when no entry matches.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut entries = self.entries.lock().await;
        let Some(index) = entries.iter().position(|existing| existing.id == id) else {
            return Ok(false);
        };

        let removed = entries.remove(index);
        if let Err(err) = persist_entries(&self.data_path, &entries).await {
            entries.insert(index, removed);
            return Err(err);
        }

        info!(id, "entry deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseType, PlankVariant, PushupVariant, Side};
    use crate::storage::decode_entries;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("exercise_log_store_{}_{}_{}.json", name, std::process::id(), nanos));
        path
    }

    async fn stored(path: &std::path::Path) -> Vec<ExerciseEntry> {
        let bytes = tokio::fs::read(path).await.unwrap();
        decode_entries(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_prepends_and_persists() {
        let path = temp_path("create");
        let store = EntryStore::new(path.clone(), Vec::new());

        let first = store
            .create(Exercise::plank(PlankVariant::Regular, None), 30)
            .await
            .unwrap();
        let second = store
            .create(Exercise::Pushup { variant: PushupVariant::Diamond }, 12)
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let listed = store.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].kind(), ExerciseType::Plank);
        assert_eq!(stored(&path).await, listed);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn update_keeps_timestamp() {
        let path = temp_path("update");
        let store = EntryStore::new(path.clone(), Vec::new());
        let created = store
            .create(Exercise::plank(PlankVariant::Regular, None), 30)
            .await
            .unwrap();

        let edited = ExerciseEntry {
            id: created.id.clone(),
            timestamp: 0,
            exercise: Exercise::plank(PlankVariant::OneSide, Some(Side::Right)),
            value: 50,
        };
        let updated = store.update(edited).await.unwrap().unwrap();

        assert_eq!(updated.timestamp, created.timestamp);
        assert_eq!(updated.value, 50);
        assert_eq!(store.list().await, vec![updated.clone()]);
        assert_eq!(stored(&path).await, vec![updated]);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn unknown_id_is_a_no_op() {
        let path = temp_path("noop");
        let store = EntryStore::new(path.clone(), Vec::new());
        let ghost = ExerciseEntry {
            id: "ghost".to_string(),
            timestamp: 1,
            exercise: Exercise::Pushup { variant: PushupVariant::Knee },
            value: 5,
        };

        assert_eq!(store.update(ghost).await.unwrap(), None);
        assert!(!store.delete("ghost").await.unwrap());
        assert!(store.list().await.is_empty());
        assert!(tokio::fs::metadata(&path).await.is_err());
    }

    #[tokio::test]
    async fn delete_removes_entry() {
        let path = temp_path("delete");
        let store = EntryStore::new(path.clone(), Vec::new());
        let keep = store
            .create(Exercise::Pushup { variant: PushupVariant::Regular }, 10)
            .await
            .unwrap();
        let removed = store
            .create(Exercise::Pushup { variant: PushupVariant::Regular }, 20)
            .await
            .unwrap();

        assert!(store.delete(&removed.id).await.unwrap());
        assert_eq!(store.list().await, vec![keep.clone()]);
        assert_eq!(stored(&path).await, vec![keep]);

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn failed_write_rolls_back() {
        let mut path = temp_path("missing_dir");
        path.push("entries.json");
        let store = EntryStore::new(path, Vec::new());

        let result = store
            .create(Exercise::plank(PlankVariant::Regular, None), 30)
            .await;
        assert!(result.is_err());
        assert!(store.list().await.is_empty());
    }
}
