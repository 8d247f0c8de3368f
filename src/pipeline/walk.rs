//! Common walk loop: consumes an iterator of walk outcomes, sends regular files to path_tx, stops on the first error.

use crossbeam_channel::Sender;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use crate::engine::tools::{is_excluded, should_include_in_walk};

use super::context::PipelineContext;

/// One result from a directory walk.
pub enum WalkOutcome {
    /// A regular file (after following links, when enabled).
    File(PathBuf),
    /// Directory, unfollowed symlink, or special file: nothing to read.
    Other,
    /// Listing or stat failure.
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a jwalk result into [`WalkOutcome`].
pub fn to_outcome_jwalk(r: Result<jwalk::DirEntry<((), ())>, jwalk::Error>) -> WalkOutcome {
    match r {
        Ok(entry) if entry.file_type().is_file() => WalkOutcome::File(entry.path()),
        Ok(_) => WalkOutcome::Other,
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

/// Convert a walkdir result into [`WalkOutcome`].
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    match r {
        Ok(entry) if entry.file_type().is_file() => WalkOutcome::File(entry.into_path()),
        Ok(_) => WalkOutcome::Other,
        Err(err) => WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        },
    }
}

fn jwalk_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use jwalk::Parallelism;
    use std::time::Duration;
    let root = ctx.root.clone();
    let exclude = ctx.exclude.clone();
    Box::new(
        jwalk::WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .skip_hidden(false)
            .parallelism(Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_secs(60),
            })
            // Excluded children are dropped before jwalk reads into them.
            .process_read_dir(move |_depth, _dir, _state, children| {
                children.retain(|child| match child {
                    Ok(entry) => !is_excluded(&entry.path(), &root, &exclude),
                    Err(_) => true,
                });
            })
            .into_iter()
            .map(to_outcome_jwalk),
    )
}

fn walkdir_iter(ctx: &PipelineContext) -> Box<dyn Iterator<Item = WalkOutcome>> {
    use walkdir::WalkDir;
    let root = ctx.root.clone();
    let exclude = ctx.exclude.clone();
    Box::new(
        WalkDir::new(&ctx.root)
            .follow_links(ctx.follow_links)
            .into_iter()
            .filter_entry(move |entry| !is_excluded(entry.path(), &root, &exclude))
            .map(to_outcome_walkdir),
    )
}

pub fn spawn_walk_thread(
    path_tx: Sender<PathBuf>,
    path_count_tx: Sender<usize>,
    ctx: PipelineContext,
    parallel_walk: bool,
) -> JoinHandle<usize> {
    thread::spawn(move || {
        let iter: Box<dyn Iterator<Item = WalkOutcome>> = match parallel_walk {
            true => jwalk_iter(&ctx),
            false => walkdir_iter(&ctx),
        };
        run_walk_loop(path_tx, path_count_tx, ctx, iter)
    })
}

/// Run the common walk loop: consume `iter`, filter files with `should_include_in_walk`, send them to `path_tx`.
/// The first error is recorded in the shared state and ends the walk.
/// Sends the count of files sent on `path_count_tx` and drops `path_tx` when done. Returns that count.
pub fn run_walk_loop<I>(
    path_tx: Sender<PathBuf>,
    path_count_tx: Sender<usize>,
    ctx: PipelineContext,
    iter: I,
) -> usize
where
    I: Iterator<Item = WalkOutcome>,
{
    let mut count = 0_usize;
    for outcome in iter {
        if ctx.state.aborted() {
            break;
        }
        match outcome {
            WalkOutcome::File(path) => {
                if should_include_in_walk(&path, &ctx.root, &ctx.skip_paths, &ctx.exclude) {
                    if path_tx.send(path).is_err() {
                        break;
                    }
                    count += 1;
                }
            }
            WalkOutcome::Other => {}
            WalkOutcome::Err { msg, path } => {
                let msg = match path {
                    Some(p) => format!("Could not list or stat {}: {}", p.display(), msg),
                    None => format!("Could not list or stat: {}", msg),
                };
                ctx.state.fail(msg);
                break;
            }
        }
    }
    let _ = path_count_tx.send(count);
    drop(path_tx);
    count
}
