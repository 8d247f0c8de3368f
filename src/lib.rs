//! artindex: build a JSON article index from a directory of article files

pub mod engine;
pub mod index;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::path::Path;

use crate::engine::builder::IndexBuilder;

/// Result alias used by public artindex API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Walk `root` and return every regular file as a [`FileEntry`], sorted by relative path.
///
/// Fails on the first listing, stat, or read error.
pub fn collect_file_entries(root: &Path, opts: &IndexOpts) -> Result<Vec<FileEntry>> {
    let opts = Opts::from(opts);
    let mut entries = pipeline::collect_entries(root, &opts, None)?;
    entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(entries)
}

/// Walk `root`, feed every file to `builder`, and return the serialized index.
///
/// Pass [`ArticleIndexBuilder`](crate::engine::builder::ArticleIndexBuilder) for the default article index, or your own
/// [`IndexBuilder`]. Nothing is written to disk; see [`index::index_articles`] for the CLI path that also writes the output file.
pub fn build_index<B>(root: &Path, opts: &IndexOpts, builder: B) -> Result<String>
where
    B: IndexBuilder + 'static,
{
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    index::run_index(root, &opts, Box::new(builder))
}
