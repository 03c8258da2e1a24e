pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod round;
pub mod scoring;
pub mod state;
pub mod storage;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::load_data;
