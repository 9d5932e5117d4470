//! Fetch observers
//!
//! The client and the failed-test collector report what they are doing through
//! an [`Observer`] handed to them at construction. Nothing below `main`
//! configures logging itself.

#[cfg(test)]
use std::sync::Mutex;

use crate::error::ApiError;

/// Receives progress and failure notifications from API operations
pub trait Observer: Send + Sync {
    /// An HTTP request is about to be sent
    fn request(&self, method: &str, url: &str, params: &[(String, String)]);

    /// A listing call failed and was degraded to an empty result
    fn request_failed(&self, operation: &str, err: &ApiError);

    /// Free-form progress message
    fn progress(&self, message: &str);
}

/// Observer that forwards everything to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn request(&self, method: &str, url: &str, params: &[(String, String)]) {
        log::debug!("{} {} params={:?}", method, url, params);
    }

    fn request_failed(&self, operation: &str, err: &ApiError) {
        log::error!("{} failed: {}", operation, err);
    }

    fn progress(&self, message: &str) {
        log::info!("{}", message);
    }
}

/// A single recorded notification
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Request { method: String, url: String },
    Failed { operation: String, message: String },
    Progress(String),
}

/// Observer that keeps every notification in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<Event>>,
}

#[cfg(test)]
impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Operations reported as failed, in order
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Failed { operation, .. } => Some(operation),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
impl Observer for RecordingObserver {
    fn request(&self, method: &str, url: &str, _params: &[(String, String)]) {
        self.push(Event::Request {
            method: method.to_string(),
            url: url.to_string(),
        });
    }

    fn request_failed(&self, operation: &str, err: &ApiError) {
        self.push(Event::Failed {
            operation: operation.to_string(),
            message: err.to_string(),
        });
    }

    fn progress(&self, message: &str) {
        self.push(Event::Progress(message.to_string()));
    }
}
