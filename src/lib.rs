pub mod app;
pub mod calendar;
pub mod config;
pub mod date_key;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod status;
pub mod storage;
pub mod store;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use errors::StoreError;
pub use state::AppState;
pub use storage::{HabitPersistence, JsonFileStore, MemoryStore};
pub use store::HabitStore;
