use crate::models::ExerciseEntry;
use crate::store::EntryStore;
use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EntryStore>,
}

impl AppState {
    pub fn new(data_path: PathBuf, entries: Vec<ExerciseEntry>) -> Self {
        Self {
            store: Arc::new(EntryStore::new(data_path, entries)),
        }
    }
}
