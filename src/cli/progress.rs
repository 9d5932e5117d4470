//! Spinner-driven observer for long fetches

use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::ApiError;
use crate::observe::{LogObserver, Observer};

/// Shows progress on a spinner and forwards everything to the log.
///
/// The spinner is only drawn once the first request or progress event
/// arrives, so runs answered from the cache never touch the terminal. Also
/// counts degraded requests so the caller can avoid caching partial results.
pub struct ProgressObserver {
    show_spinner: bool,
    spinner: OnceLock<ProgressBar>,
    log: LogObserver,
    failures: AtomicUsize,
}

fn new_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message("Connecting to ReportPortal...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

impl ProgressObserver {
    /// Observer with a spinner on stderr (hidden when stderr is not a terminal)
    pub fn with_spinner() -> Self {
        Self {
            show_spinner: true,
            spinner: OnceLock::new(),
            log: LogObserver,
            failures: AtomicUsize::new(0),
        }
    }

    /// Observer that only logs
    pub fn quiet() -> Self {
        Self {
            show_spinner: false,
            spinner: OnceLock::new(),
            log: LogObserver,
            failures: AtomicUsize::new(0),
        }
    }

    /// Spinner for a new event, started on first use
    fn spinner(&self) -> Option<&ProgressBar> {
        if self.show_spinner {
            Some(self.spinner.get_or_init(new_spinner))
        } else {
            None
        }
    }

    #[cfg(test)]
    fn is_spinning(&self) -> bool {
        self.spinner.get().is_some_and(|pb| !pb.is_finished())
    }

    /// Number of requests that failed and were skipped
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        if let Some(pb) = self.spinner.get() {
            pb.finish_and_clear();
        }
    }

    fn with_suspended<F: FnOnce()>(&self, f: F) {
        match self.spinner() {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

impl Observer for ProgressObserver {
    fn request(&self, method: &str, url: &str, params: &[(String, String)]) {
        self.with_suspended(|| self.log.request(method, url, params));
    }

    fn request_failed(&self, operation: &str, err: &ApiError) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.with_suspended(|| self.log.request_failed(operation, err));
    }

    fn progress(&self, message: &str) {
        if let Some(pb) = self.spinner() {
            pb.set_message(message.to_string());
        }
        self.with_suspended(|| self.log.progress(message));
    }
}

impl Drop for ProgressObserver {
    fn drop(&mut self) {
        self.finish();
    }
}
