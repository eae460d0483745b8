pub mod config;
pub mod paths;

pub use config::{AppConfig, TimeFormat};
pub use paths::resolve_data_dir;
