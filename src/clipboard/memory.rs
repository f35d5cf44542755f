use std::sync::{Mutex, PoisonError};

use super::backend::{ClipboardError, ClipboardResult, ClipboardSink};

/// Sink that records every write instead of touching the host clipboard
///
/// A failing variant always returns [`ClipboardError::NativeUnavailable`]
/// and records nothing.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<String>>,
    fail: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            writes: Mutex::default(),
            fail: true,
        }
    }

    /// Every text written so far, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Current clipboard contents, if anything was written
    pub fn last(&self) -> Option<String> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl ClipboardSink for MemorySink {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        if self.fail {
            return Err(ClipboardError::NativeUnavailable(
                "memory sink configured to fail".to_string(),
            ));
        }
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}
