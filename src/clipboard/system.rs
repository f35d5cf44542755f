use arboard::Clipboard;

use super::backend::{ClipboardError, ClipboardResult, ClipboardSink};

/// In-process system clipboard via arboard
///
/// A fresh handle is opened per write. On X11 the contents are only served
/// while some process owns the selection, so the command backends are the
/// default there.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSink;

impl NativeSink {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for NativeSink {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        let mut clipboard =
            Clipboard::new().map_err(|e| ClipboardError::NativeUnavailable(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::NativeWrite(e.to_string()))
    }
}
