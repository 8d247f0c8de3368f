use anyhow::{Result, anyhow};
use log::debug;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use crate::engine::tools::canonicalize_paths;
use crate::utils::config::WorkerThreadLimits;
use crate::{FileEntry, Opts, pipeline};

/// Start the walk + reader pipeline. Caller receives from `entry_rx` until it closes, then calls
/// [`join_pipeline`] and [`check_for_first_error`](super::check_for_first_error).
///
/// `skip_paths` are never emitted (e.g. the output file when it lives inside the tree).
pub fn run_pipeline(
    root: &Path,
    opts: &Opts,
    skip_paths: &[PathBuf],
) -> Result<pipeline::PipelineHandles> {
    let (root, public_root, skip_canonical) =
        canonicalize_paths(root, opts.public_dir.as_deref(), skip_paths)?;
    let tuning = pipeline_tuning(opts);

    let channels = pipeline::create_pipeline_channels(&root, skip_canonical, opts);

    let walk_handle = pipeline::spawn_walk_thread(
        channels.path_tx,
        channels.path_count_tx,
        channels.ctx,
        tuning.parallel_walk,
    );

    let worker_handles = pipeline::spawn_reader_workers(
        channels.path_rx,
        &channels.entry_tx,
        &root,
        public_root.as_deref(),
        &channels.state,
        tuning.num_threads,
    );

    // Dropping the last sender closes the channel once all readers exit.
    drop(channels.entry_tx);

    Ok(pipeline::PipelineHandles {
        entry_rx: channels.entry_rx,
        path_count_rx: channels.path_count_rx,
        walk_handle,
        worker_handles,
        state: channels.state,
    })
}

/// Reader count and walk mode from opts.
pub fn pipeline_tuning(opts: &Opts) -> pipeline::PipelineTuning {
    let num_threads = WorkerThreadLimits::current().reader_count(opts.num_threads);
    if opts.parallel_walk {
        debug!("Walking in parallel, {} readers", num_threads);
    } else {
        debug!("Walking serially, {} readers", num_threads);
    }
    pipeline::PipelineTuning {
        num_threads,
        parallel_walk: opts.parallel_walk,
    }
}

/// Join walk and reader threads (after the entry stream is drained). Returns the walk's file count.
pub fn join_pipeline(
    walk_handle: JoinHandle<usize>,
    worker_handles: Vec<JoinHandle<()>>,
) -> Result<usize> {
    let path_count = walk_handle
        .join()
        .map_err(|_| anyhow!("walk thread panicked"))?;
    for h in worker_handles {
        h.join().map_err(|_| anyhow!("reader thread panicked"))?;
    }
    Ok(path_count)
}

/// Collect every file under `root` via the streaming pipeline.
/// Walk → path channel → readers → entry channel → Vec (in completion order).
pub fn collect_entries(
    root: &Path,
    opts: &Opts,
    skip_paths: Option<&[PathBuf]>,
) -> Result<Vec<FileEntry>> {
    let pipeline::PipelineHandles {
        entry_rx,
        path_count_rx: _path_count_rx,
        walk_handle,
        worker_handles,
        state,
    } = run_pipeline(root, opts, skip_paths.unwrap_or(&[]))?;

    let entries: Vec<FileEntry> = entry_rx.iter().collect();
    debug!("main: channel closed, total {} entries", entries.len());

    let path_count = join_pipeline(walk_handle, worker_handles)?;
    pipeline::check_for_first_error(&state)?;
    pipeline::ensure_all_delivered(entries.len(), path_count)?;
    Ok(entries)
}
