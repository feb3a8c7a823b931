pub mod app;
pub mod autofill;
pub mod catalog;
pub mod config;
pub mod diet;
pub mod errors;
pub mod handlers;
pub mod meals;
pub mod models;
pub mod nutrition;
pub mod state;
pub mod storage;
pub mod supplements;
pub mod training;
pub mod volume;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
