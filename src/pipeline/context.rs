//! Pipeline context: shared data passed into the walk and reader threads.

use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use crate::utils::config::STREAMING_CHANNEL_CAP;
use crate::{FileEntry, Opts};

/// Worker count and walk mode for one run.
#[derive(Clone, Debug)]
pub struct PipelineTuning {
    pub num_threads: usize,
    pub parallel_walk: bool,
}

/// First fatal error and the abort flag, shared by the walk and every reader.
/// Recording an error also sets the abort flag so the other threads stop picking up work.
#[derive(Debug, Default)]
pub struct PipelineState {
    first_error: Mutex<Option<String>>,
    abort: AtomicBool,
}

impl PipelineState {
    /// Record `msg` if no error was recorded yet, and abort the run.
    pub fn fail(&self, msg: String) {
        debug!("pipeline failure: {}", msg);
        if let Ok(mut slot) = self.first_error.lock() {
            slot.get_or_insert(msg);
        }
        self.abort.store(true, Ordering::Relaxed);
    }

    /// Stop without recording an error (e.g. the consumer went away).
    pub fn abort(&self) {
        self.abort.store(true, Ordering::Relaxed);
    }

    pub fn aborted(&self) -> bool {
        self.abort.load(Ordering::Relaxed)
    }

    pub fn take_error(&self) -> Option<String> {
        self.first_error.lock().ok().and_then(|mut slot| slot.take())
    }
}

/// Shared context for the walk thread: root, filters, and error state.
pub struct PipelineContext {
    pub root: PathBuf,
    pub skip_paths: Vec<PathBuf>,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub state: Arc<PipelineState>,
}

/// Handles returned by [`run_pipeline`](super::run_pipeline): receive entries, then join when the channel closes.
/// `path_count_rx`: receives the number of files the walk discovered when it finishes.
pub struct PipelineHandles {
    pub entry_rx: Receiver<FileEntry>,
    pub path_count_rx: Receiver<usize>,
    pub walk_handle: JoinHandle<usize>,
    pub worker_handles: Vec<JoinHandle<()>>,
    pub state: Arc<PipelineState>,
}

/// Channels and shared state for the pipeline. Walk thread gets path_tx, path_count_tx, ctx; readers get path_rx, entry_tx.
pub struct PipelineChannels {
    pub path_tx: Sender<PathBuf>,
    pub path_rx: Receiver<PathBuf>,
    pub entry_tx: Sender<FileEntry>,
    pub entry_rx: Receiver<FileEntry>,
    pub path_count_tx: Sender<usize>,
    pub path_count_rx: Receiver<usize>,
    pub state: Arc<PipelineState>,
    pub ctx: PipelineContext,
}

pub fn create_pipeline_channels(
    root: &Path,
    skip_paths: Vec<PathBuf>,
    opts: &Opts,
) -> PipelineChannels {
    let (path_tx, path_rx) = bounded::<PathBuf>(STREAMING_CHANNEL_CAP);
    let (entry_tx, entry_rx) = bounded::<FileEntry>(STREAMING_CHANNEL_CAP);
    let (path_count_tx, path_count_rx) = bounded::<usize>(1);
    let state = Arc::new(PipelineState::default());

    let ctx = PipelineContext {
        root: root.to_path_buf(),
        skip_paths,
        exclude: opts.exclude.clone(),
        follow_links: opts.follow_links,
        state: Arc::clone(&state),
    };

    PipelineChannels {
        path_tx,
        path_rx,
        entry_tx,
        entry_rx,
        path_count_tx,
        path_count_rx,
        state,
        ctx,
    }
}
