//! Load `.artindex.toml` from a directory (CLI only). Lib callers pass [`IndexOpts`](crate::IndexOpts) directly.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub struct ArtindexToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    articles_dir: Option<String>,
    public_dir: Option<String>,
    output: Option<String>,
    threads: Option<usize>,
    parallel_walk: Option<bool>,
    follow_links: Option<bool>,
    exclude: Option<Vec<String>>,
    verbose: Option<bool>,
    pretty: Option<bool>,
}

/// Load the config file from `dir`. `Ok(None)` when there is no file; an unreadable or invalid file is an error naming the path.
pub fn load_artindex_toml(dir: &Path) -> anyhow::Result<Option<ArtindexToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_artindex_toml(&s)
        .map(Some)
        .with_context(|| format!("invalid config {}", path.display()))
}

/// Parse config file contents.
pub fn parse_artindex_toml(s: &str) -> Result<ArtindexToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($settings:expr, $opts:expr, $file_field:ident => $opts_field:ident) => {
        if let Some(v) = $settings.$file_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &ArtindexToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref p) = s.articles_dir {
        opts.articles_dir = PathBuf::from(p);
    }
    if let Some(ref p) = s.public_dir {
        // Empty string means "relative to the articles dir".
        opts.public_dir = (!p.is_empty()).then(|| PathBuf::from(p));
    }
    if let Some(ref p) = s.output {
        opts.output_path = PathBuf::from(p);
    }
    if let Some(n) = s.threads {
        opts.num_threads = Some(n);
    }
    if let Some(ref v) = s.exclude {
        opts.exclude = v.clone();
    }
    apply_file_opt!(s, opts, parallel_walk => parallel_walk);
    apply_file_opt!(s, opts, follow_links => follow_links);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, pretty => pretty);
}
