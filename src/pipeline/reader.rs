use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender};
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::FileEntry;
use crate::engine::tools::relative_entry_path;

use super::context::PipelineState;

/// Single reader: take paths from path_rx, read each into a [`FileEntry`], send on entry_tx.
/// A read error is recorded in `state` and stops this reader; the abort flag stops the rest.
fn reader_worker_loop(
    path_rx: Receiver<PathBuf>,
    entry_tx: Sender<FileEntry>,
    root: PathBuf,
    public_root: Option<PathBuf>,
    state: Arc<PipelineState>,
) {
    while let Ok(abs_path) = path_rx.recv() {
        if state.aborted() {
            break;
        }
        match path_to_entry(&abs_path, &root, public_root.as_deref()) {
            Ok(entry) => {
                if entry_tx.send(entry).is_err() {
                    break;
                }
            }
            Err(e) => {
                state.fail(format!("{e:#}"));
                break;
            }
        }
    }
}

/// Spawn reader workers. Caller must drop its own entry sender after this so the entry channel closes when the readers exit.
pub fn spawn_reader_workers(
    path_rx: Receiver<PathBuf>,
    entry_tx: &Sender<FileEntry>,
    root: &Path,
    public_root: Option<&Path>,
    state: &Arc<PipelineState>,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_threads)
        .map(|_| {
            let path_rx = path_rx.clone();
            let entry_tx = entry_tx.clone();
            let root = root.to_path_buf();
            let public_root = public_root.map(Path::to_path_buf);
            let state = Arc::clone(state);
            thread::spawn(move || reader_worker_loop(path_rx, entry_tx, root, public_root, state))
        })
        .collect()
}

/// Read one file into a [`FileEntry`]. Content is decoded as UTF-8; invalid sequences become U+FFFD.
pub fn path_to_entry(abs_path: &Path, root: &Path, public_root: Option<&Path>) -> Result<FileEntry> {
    let bytes = std::fs::read(abs_path)
        .with_context(|| format!("Error reading file {}", abs_path.display()))?;
    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            warn!(
                "{} is not valid UTF-8; invalid bytes replaced",
                abs_path.display()
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(FileEntry {
        relative_path: relative_entry_path(abs_path, root, public_root),
        content,
    })
}
