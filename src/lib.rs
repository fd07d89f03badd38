pub mod app;
pub mod config;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod series;
pub mod state;
pub mod stats;
pub mod storage;
pub mod store;

pub use app::router;
pub use config::AppConfig;
pub use series::build_daily_series;
pub use state::AppState;
pub use stats::compute_statistics;
pub use storage::load_entries;
