//! Transient notices
//!
//! Controllers queue a notice after each user-visible outcome; the view
//! drains and shows them. Every notice is also emitted as a tracing event.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoticeLevel::Success => f.write_str("ok"),
            NoticeLevel::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Shared notice queue
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        info!(notice = %message, "Success notice");
        self.push(Notice {
            level: NoticeLevel::Success,
            message,
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!(notice = %message, "Error notice");
        self.push(Notice {
            level: NoticeLevel::Error,
            message,
        });
    }

    fn push(&self, notice: Notice) {
        self.queue.lock().push_back(notice);
    }

    /// Removes and returns every queued notice, oldest first
    pub fn drain(&self) -> Vec<Notice> {
        self.queue.lock().drain(..).collect()
    }

    /// The most recent notice, left in the queue
    pub fn last(&self) -> Option<Notice> {
        self.queue.lock().back().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
