//! Progress bar utilities for displaying processing status

use crossbeam_channel::Receiver;
use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};
use std::thread;

pub type ProgressBar = Arc<Mutex<Bar>>;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " files"
    )))
}

/// Update the bar's total once it is known. Refreshes the display.
pub fn set_bar_total(pb: &ProgressBar, total: usize) {
    if let Ok(mut bar) = pb.lock() {
        bar.total = total;
        let _ = bar.refresh();
    }
}

/// Advance the bar. Uses try_lock so the forwarding loop never blocks on the display.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Force the bar to `total` (e.g. after try_lock skipped some updates).
pub fn finish_progress_bar(pb: &ProgressBar, total: usize) {
    if let Ok(mut bar) = pb.lock() {
        let _ = bar.update_to(total);
        let _ = bar.refresh();
    }
}

/// Verbose-only bar for reading files. The walk sends its file count on `path_count_rx` when it finishes;
/// a helper thread sets the bar total when that arrives, since the caller is busy forwarding entries.
pub fn setup_progress(verbose: bool, path_count_rx: Receiver<usize>) -> Option<ProgressBar> {
    let bar = verbose.then(|| {
        create_progress_bar(ProgressBarConfig::new(0, "Reading", Animation::Classic))
    })?;
    let bar_clone = Arc::clone(&bar);
    thread::spawn(move || {
        if let Ok(total) = path_count_rx.recv() {
            set_bar_total(&bar_clone, total);
        }
    });
    Some(bar)
}
