pub mod artindex_toml;
pub mod config;
pub mod logger;
pub mod tempfiles;

pub use config::*;
pub use logger::setup_logging;
pub use tempfiles::{temp_path_for, write_atomic};
