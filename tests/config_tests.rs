use artindex::Opts;
use artindex::engine::{Cli, resolve_opts};
use artindex::utils::artindex_toml::{apply_file_to_opts, parse_artindex_toml};
use artindex::utils::config::{DefaultPaths, PackagePaths, WorkerThreadLimits};
use std::path::PathBuf;

#[test]
fn test_defaults_match_site_layout() {
    let opts = Opts::default();
    assert_eq!(opts.articles_dir, PathBuf::from(DefaultPaths::ARTICLES_DIR));
    assert_eq!(opts.public_dir, Some(PathBuf::from(DefaultPaths::PUBLIC_DIR)));
    assert_eq!(opts.output_path, PathBuf::from("public/articleIndex.json"));
    assert!(opts.follow_links);
}

#[test]
fn test_file_settings_applied() {
    let file = parse_artindex_toml(
        r#"
[settings]
articles_dir = "content/posts"
public_dir = ""
output = "dist/index.json"
threads = 3
exclude = ["drafts"]
pretty = true
"#,
    )
    .unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.articles_dir, PathBuf::from("content/posts"));
    assert_eq!(opts.public_dir, None);
    assert_eq!(opts.output_path, PathBuf::from("dist/index.json"));
    assert_eq!(opts.num_threads, Some(3));
    assert_eq!(opts.exclude, vec!["drafts".to_string()]);
    assert!(opts.pretty);
    assert!(!opts.verbose);
}

#[test]
fn test_unknown_setting_rejected() {
    assert!(parse_artindex_toml("[settings]\nbogus = 1\n").is_err());
}

#[test]
fn test_cli_overrides_file() {
    let dir = std::env::temp_dir().join(format!(
        "{}_{}_cli_overrides",
        env!("CARGO_PKG_NAME"),
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join(PackagePaths::get().config_filename()),
        "[settings]\noutput = \"from_file.json\"\npretty = true\nverbose = true\n",
    )
    .unwrap();

    let cli = Cli {
        output: Some(PathBuf::from("from_cli.json")),
        verbose: Some(false),
        ..Default::default()
    };
    let (opts, config_error) = resolve_opts(&cli, &dir);
    assert!(config_error.is_none());
    assert_eq!(opts.output_path, PathBuf::from("from_cli.json"));
    assert!(opts.pretty);
    assert!(!opts.verbose);
}

#[test]
fn test_invalid_config_file_error_is_returned() {
    let dir = std::env::temp_dir().join(format!(
        "{}_{}_invalid_config",
        env!("CARGO_PKG_NAME"),
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let config_name = PackagePaths::get().config_filename();
    std::fs::write(
        dir.join(config_name),
        "[settings]\noutptu = \"typo.json\"\npretty = true\n",
    )
    .unwrap();

    let cli = Cli {
        verbose: Some(true),
        ..Default::default()
    };
    let (opts, config_error) = resolve_opts(&cli, &dir);
    let err = config_error.expect("invalid config should be reported");
    assert!(format!("{err:#}").contains(config_name));
    // File is skipped as a whole; flags still apply.
    assert!(!opts.pretty);
    assert!(opts.verbose);
    assert_eq!(opts.output_path, PathBuf::from(DefaultPaths::OUTPUT_FILE));
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    let dir = std::env::temp_dir().join(format!(
        "{}_{}_no_config",
        env!("CARGO_PKG_NAME"),
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let (opts, config_error) = resolve_opts(&Cli::default(), &dir);
    assert!(config_error.is_none());
    assert_eq!(opts.articles_dir, PathBuf::from(DefaultPaths::ARTICLES_DIR));
}

#[test]
fn test_reader_count_clamped() {
    let limits = WorkerThreadLimits {
        all_threads: 64,
        ..Default::default()
    };
    assert_eq!(limits.reader_count(None), WorkerThreadLimits::MAX_THREADS);
    assert_eq!(limits.reader_count(Some(0)), WorkerThreadLimits::FLOOR_THREADS);
    assert_eq!(limits.reader_count(Some(3)), 3);
}
