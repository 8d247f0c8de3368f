//! Article indexing: pipeline → consumer → writer

use anyhow::{Result, bail};
use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::engine::builder::{ArticleIndexBuilder, IndexBuilder};
use crate::engine::consumer::spawn_consumer;
use crate::engine::progress::{finish_progress_bar, setup_progress, update_progress_bar};
use crate::engine::writer::write_index;
use crate::pipeline::{
    PipelineHandles, check_for_first_error, ensure_all_delivered, join_pipeline, run_pipeline,
};
use crate::utils::temp_path_for;
use crate::{ConsumerOutput, Opts};

/// Stream every file under `root` into `builder` and return its result.
///
/// End-of-input is sent only after the walk and every reader have finished and all discovered files
/// were delivered. A listing/stat/read error or a builder error is returned as `Err`.
pub fn run_index(root: &Path, opts: &Opts, builder: Box<dyn IndexBuilder>) -> Result<String> {
    run_index_skipping(root, opts, builder, &[])
}

/// [`run_index`] that never emits the files in `skip_paths`.
pub fn run_index_skipping(
    root: &Path,
    opts: &Opts,
    builder: Box<dyn IndexBuilder>,
    skip_paths: &[PathBuf],
) -> Result<String> {
    let PipelineHandles {
        entry_rx,
        path_count_rx,
        walk_handle,
        worker_handles,
        state,
    } = run_pipeline(root, opts, skip_paths)?;
    let bar = setup_progress(opts.verbose, path_count_rx);
    let consumer = spawn_consumer(builder);

    let mut delivered = 0_usize;
    let mut consumer_stopped = false;
    for entry in entry_rx.iter() {
        if !consumer.send_input(entry) {
            consumer_stopped = true;
            break;
        }
        delivered += 1;
        if let Some(ref bar) = bar {
            update_progress_bar(bar, 1);
        }
    }
    if consumer_stopped {
        debug!("consumer stopped early; aborting walk");
        state.abort();
    }
    // Readers blocked on a full entry channel see it close and exit.
    drop(entry_rx);

    let discovered = join_pipeline(walk_handle, worker_handles)?;
    check_for_first_error(&state)?;
    if let Some(ref bar) = bar {
        finish_progress_bar(bar, delivered);
        eprintln!();
    }

    if !consumer_stopped {
        ensure_all_delivered(delivered, discovered)?;
        debug!("all {} files delivered; sending end of input", delivered);
        consumer.send_end_of_input();
    }
    match consumer.wait()? {
        ConsumerOutput::Result(result) => Ok(result),
        ConsumerOutput::Error(msg) => bail!("index builder failed: {}", msg),
    }
}

/// CLI path: index `opts.articles_dir` with the article builder and write the result to `opts.output_path`.
///
/// Fatal errors are returned; a failed output write is only logged.
pub fn index_articles(opts: &Opts) -> Result<()> {
    info!("Indexing {}", opts.articles_dir.display());
    let builder = ArticleIndexBuilder::new().pretty(opts.pretty);
    let skip = [opts.output_path.clone(), temp_path_for(&opts.output_path)];
    let result = run_index_skipping(&opts.articles_dir, opts, Box::new(builder), &skip)?;
    write_index(&result, &opts.output_path);
    Ok(())
}
