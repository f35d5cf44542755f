//! clipwire library - clipboard sync over a length-prefixed TCP frame
//!
//! The `clip-copy` and `clip-server` binaries are thin wrappers around the
//! [`Sender`] and [`Listener`] exposed here.

pub mod clipboard;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod listener;
pub mod logging;
pub mod protocol;
pub mod sender;

// Re-export commonly used types for convenience
pub use clipboard::{ClipboardSink, SystemClipboard};
pub use config::Config;
pub use endpoint::Endpoint;
pub use error::ClipwireError;
pub use listener::{ConnectionOutcome, Listener, ListenerOptions};
pub use sender::{SendReport, Sender};
