//! Clipboard module for clipwire
//!
//! Everything the sender and listener need from the host clipboard goes
//! through the [`ClipboardSink`] capability. Backends:
//! - External commands (xclip, wl-copy, pbcopy, termux-clipboard-set)
//! - In-process system clipboard (via arboard), opt-in only
//! - In-memory recording sink

mod backend;
pub mod command;
pub mod detect;
mod memory;
mod system;

pub use backend::{
    ClipboardError, ClipboardResult, ClipboardSink, SerializedSink, SystemClipboard,
};
pub use command::{ClipboardCommand, CommandSink};
pub use detect::{HostEnv, detect_backend};
pub use memory::MemorySink;
pub use system::NativeSink;
