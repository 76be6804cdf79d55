use crate::calendar::WeekStart;
use crate::errors::{AppError, StoreError};
use crate::storage::JsonFileStore;
use crate::store::HabitStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<HabitStore<JsonFileStore>>>,
    pub week_start: WeekStart,
}

impl AppState {
    pub fn new(store: HabitStore<JsonFileStore>, week_start: WeekStart) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            week_start,
        }
    }

    /// Runs a store mutation on the blocking pool, since every mutation
    /// rewrites the data file with synchronous I/O.
    pub async fn mutate<T, F>(&self, op: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut HabitStore<JsonFileStore>) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let mut store = Arc::clone(&self.store).lock_owned().await;
        let result = tokio::task::spawn_blocking(move || op(&mut *store))
            .await
            .map_err(AppError::internal)?;
        Ok(result?)
    }
}
