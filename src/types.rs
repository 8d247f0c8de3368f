//! Public and internal types for the artindex API and pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One regular file found under the articles root: its normalized relative path and text content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Path relative to the public root (or the scan root), always `/`-separated.
    pub relative_path: String,
    pub content: String,
}

/// Messages sent into the index consumer.
#[derive(Debug)]
pub enum ConsumerInput {
    Entry(FileEntry),
    EndOfInput,
}

/// The single message produced by the index consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsumerOutput {
    /// Builder failed; terminal.
    Error(String),
    /// Serialized index.
    Result(String),
}

/// Lib-only options for [`build_index`](crate::build_index) and [`collect_file_entries`](crate::collect_file_entries).
#[derive(Clone, Debug, Default)]
pub struct IndexOpts {
    /// Directory that emitted paths are made relative to. When None (or when a file is not under it), paths are relative to the scan root.
    pub public_root: Option<PathBuf>,
    /// Override reader worker count. When None, derived from rayon's thread count.
    pub num_threads: Option<usize>,
    /// Use parallel walk (jwalk) instead of walkdir.
    pub parallel_walk: bool,
    /// Do not follow symbolic links (they are skipped instead).
    pub no_follow_links: bool,
    /// Exclude patterns (glob syntax, e.g. `drafts`, `*.bak`).
    pub exclude: Vec<String>,
}

impl From<&IndexOpts> for Opts {
    fn from(o: &IndexOpts) -> Self {
        Opts {
            public_dir: o.public_root.clone(),
            num_threads: o.num_threads,
            parallel_walk: o.parallel_walk,
            follow_links: !o.no_follow_links,
            exclude: o.exclude.clone(),
            ..Default::default()
        }
    }
}

/// Full options (CLI). Use [`IndexOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Directory tree to scan.
    pub articles_dir: PathBuf,
    /// Public root for relative paths. None means relative to `articles_dir`.
    pub public_dir: Option<PathBuf>,
    /// Where the index JSON is written.
    pub output_path: PathBuf,
    /// Override reader worker count.
    pub num_threads: Option<usize>,
    /// Use parallel walk (jwalk).
    pub parallel_walk: bool,
    /// Follow symbolic links.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax).
    pub exclude: Vec<String>,
    /// Show progress bar and debug logs.
    pub verbose: bool,
    /// Pretty-print the index JSON.
    pub pretty: bool,
}

impl Default for Opts {
    fn default() -> Self {
        use crate::utils::config::DefaultPaths;
        Opts {
            articles_dir: PathBuf::from(DefaultPaths::ARTICLES_DIR),
            public_dir: Some(PathBuf::from(DefaultPaths::PUBLIC_DIR)),
            output_path: PathBuf::from(DefaultPaths::OUTPUT_FILE),
            num_threads: None,
            parallel_walk: false,
            follow_links: true,
            exclude: Vec::new(),
            verbose: false,
            pretty: false,
        }
    }
}
