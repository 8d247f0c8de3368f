//! CLI command handler: resolve options (defaults, then `.artindex.toml`, then flags) and build the index.

use anyhow::Result;
use log::{debug, warn};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::index::index_articles;
use crate::utils::artindex_toml::{apply_file_to_opts, load_artindex_toml};
use crate::utils::setup_logging;

/// Overwrite opts field from a CLI flag when it was given.
macro_rules! apply_cli_opt {
    ($cli:expr, $opts:expr, $cli_field:ident => $opts_field:ident) => {
        if let Some(v) = $cli.$cli_field {
            $opts.$opts_field = v;
        }
    };
}

/// Build [`Opts`] from defaults, the config file in `config_dir` (if any), and the CLI, in that order.
///
/// An unreadable or invalid config file is skipped and its error returned alongside the opts,
/// so the caller can report it once logging is set up.
pub fn resolve_opts(cli: &Cli, config_dir: &Path) -> (Opts, Option<anyhow::Error>) {
    let mut opts = Opts::default();
    let config_error = match load_artindex_toml(config_dir) {
        Ok(Some(file)) => {
            apply_file_to_opts(&file, &mut opts);
            None
        }
        Ok(None) => None,
        Err(e) => Some(e),
    };
    if let Some(ref dir) = cli.dir {
        opts.articles_dir = dir.clone();
    }
    if let Some(ref p) = cli.public_dir {
        opts.public_dir = (!p.as_os_str().is_empty()).then(|| p.clone());
    }
    if let Some(ref p) = cli.output {
        opts.output_path = p.clone();
    }
    if cli.threads.is_some() {
        opts.num_threads = cli.threads;
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    apply_cli_opt!(cli, opts, parallel_walk => parallel_walk);
    apply_cli_opt!(cli, opts, follow_links => follow_links);
    apply_cli_opt!(cli, opts, verbose => verbose);
    apply_cli_opt!(cli, opts, pretty => pretty);
    (opts, config_error)
}

/// Resolve options, set up logging, and build + write the index.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let (opts, config_error) = resolve_opts(cli, Path::new("."));
    setup_logging(opts.verbose);
    if let Some(e) = config_error {
        warn!("{e:#}; using defaults and flags only");
    }
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    index_articles(&opts)
}
