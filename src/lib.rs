pub mod app;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod plot;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::{resolve_addr, resolve_data_path};
pub use dataset::{load_dataset, Dataset};
pub use state::AppState;
