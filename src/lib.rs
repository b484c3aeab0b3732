pub mod app;
pub mod auth;
pub mod clock;
pub mod dashboard;
pub mod errors;
pub mod finance;
pub mod handlers;
pub mod models;
pub mod patients;
pub mod scheduler;
pub mod seed;
pub mod state;
pub mod storage;

pub use app::router;
pub use state::AppState;
pub use storage::{load_data, resolve_data_dir};
