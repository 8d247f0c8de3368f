//! Application configuration constants.
//! Default locations and tuning in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    temp_suffix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                temp_suffix: format!("{pkg}.tmp"),
            }
        })
    }

    /// Config file looked up in the working directory (e.g. `.artindex.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Suffix appended to the output file name while it is being written.
    pub fn temp_suffix(&self) -> &str {
        &self.temp_suffix
    }
}

// ---- Default locations ----

/// Default locations, relative to the working directory.
pub struct DefaultPaths;

impl DefaultPaths {
    /// Directory tree that holds the articles.
    pub const ARTICLES_DIR: &'static str = "public/articles";
    /// Emitted paths are relative to this directory (so `public/articles/x.md` becomes `articles/x.md`).
    pub const PUBLIC_DIR: &'static str = "public";
    /// Index output, overwritten each run.
    pub const OUTPUT_FILE: &'static str = "public/articleIndex.json";
}

// ---- Worker threads ----

/// Reader worker limits.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Never fewer readers than this.
    pub floor: usize,
    /// Never more readers than this; article trees are small and reads are I/O bound.
    pub max: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
            max: Self::MAX_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;
    pub const MAX_THREADS: usize = 16;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Reader count: `requested` if given, else all available threads; clamped to `[floor, max]`.
    pub fn reader_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.all_threads)
            .clamp(self.floor, self.max)
    }
}

// ---- Streaming channel cap ----

/// Capacity of the path and entry channels. Bounded so a huge tree does not hold every file's content in memory at once.
pub const STREAMING_CHANNEL_CAP: usize = 1_024;
