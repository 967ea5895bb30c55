//! Progress tracking and concurrency slots

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::OwnedSemaphorePermit;

/// Counts finalized files for one run
pub struct Progress {
    total: usize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    bar: Option<ProgressBar>,
}

impl Progress {
    /// Create a tracker for `total` candidates
    #[must_use]
    pub fn new(total: usize, show_bar: bool) -> Self {
        let bar = show_bar.then(|| {
            let bar = ProgressBar::new(total as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{msg} {bar:40} {pos}/{len} [{elapsed_precise}]")
            {
                bar.set_style(style);
            }
            bar.set_message("Ingesting images");
            bar
        });

        Self {
            total,
            completed: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            bar,
        }
    }

    /// Start tracking one file
    ///
    /// The returned slot advances the counter exactly once when dropped,
    /// whichever way the file's processing ends.
    #[must_use]
    pub fn enter(self: &Arc<Self>) -> Slot {
        Slot {
            progress: Arc::clone(self),
            permit: None,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Files whose outcome has been finalized
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Files currently holding a concurrency slot
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of files ever in flight at once
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(crate) fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}

/// One file's claim on the run: its concurrency permit and its progress tick
pub struct Slot {
    progress: Arc<Progress>,
    permit: Option<OwnedSemaphorePermit>,
}

impl Slot {
    /// Attach the concurrency permit; the file is now in flight
    pub fn hold(&mut self, permit: OwnedSemaphorePermit) {
        let now = self.progress.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        self.permit = Some(permit);
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        if self.permit.is_some() {
            self.progress.in_flight.fetch_sub(1, Ordering::SeqCst);
        }
        self.progress.completed.fetch_add(1, Ordering::SeqCst);
        if let Some(bar) = &self.progress.bar {
            bar.inc(1);
        }
        // Permit is released after the counters, when the field drops
    }
}
