use clap::Parser;
use std::path::PathBuf;

/// Build a JSON index of every article under a directory.
#[derive(Clone, Debug, Default, Parser)]
#[command(name = "artindex")]
#[command(
    about = "Walk an articles directory and write its index as JSON. Settings may also come from .artindex.toml in the working directory."
)]
pub struct Cli {
    /// Directory of articles to index. Default: public/articles.
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Directory that indexed paths are made relative to. Default: public. Pass "" to make paths relative to DIR.
    #[arg(long, short = 'p')]
    pub public_dir: Option<PathBuf>,

    /// Index file to write. Default: public/articleIndex.json.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Number of reader threads. Default: available threads (capped).
    #[arg(long, short = 'j', value_parser = clap::value_parser!(usize))]
    pub threads: Option<usize>,

    /// Walk directories in parallel (jwalk) instead of serially.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub parallel_walk: Option<bool>,

    /// Follow symbolic links (default true). Broken links are an error when following.
    #[arg(long, short = 'f', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub follow_links: Option<bool>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e drafts '*.bak'
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Verbose output (debug logs and progress bar).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Pretty-print the index JSON.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub pretty: Option<bool>,
}
