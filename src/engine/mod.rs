//! Engine module: CLI, index builder + consumer, output writer, and path helpers

pub mod arg_parser;
pub mod builder;
pub mod cli;
pub mod consumer;
pub mod hashing;
pub mod progress;
pub mod tools;
pub mod writer;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use builder::{ArticleIndexBuilder, ArticleRecord, IndexBuilder};
pub use cli::{handle_run, resolve_opts};
pub use consumer::{ConsumerHandle, spawn_consumer};
pub use hashing::content_hash;
pub use tools::{
    glob_match, is_excluded, path_relative_to, path_to_index_string, relative_entry_path,
    should_include_in_walk,
};
pub use writer::{normalize_separators, write_index};
