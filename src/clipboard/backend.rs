use std::process::ExitStatus;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

use crate::config::{ClipboardBackend, ClipboardConfig};

use super::command::{ClipboardCommand, CommandSink};
use super::detect::{HostEnv, detect_backend};
use super::system::NativeSink;

pub type ClipboardResult = Result<(), ClipboardError>;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Unsupported OS: {os}")]
    UnsupportedPlatform { os: String },

    #[error("clipboard command `{program}` not found in PATH")]
    CommandNotFound { program: String },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write to `{program}`: {source}")]
    Write {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` exited with {status}")]
    CommandFailed { program: String, status: ExitStatus },

    #[error("system clipboard unavailable: {0}")]
    NativeUnavailable(String),

    #[error("system clipboard write failed: {0}")]
    NativeWrite(String),
}

/// Sets the host clipboard to a string
///
/// Implementations complete (or fail) before returning and must accept any
/// UTF-8 text, including the empty string.
pub trait ClipboardSink {
    fn set_clipboard(&self, text: &str) -> ClipboardResult;
}

impl<S: ClipboardSink + ?Sized> ClipboardSink for &S {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        (**self).set_clipboard(text)
    }
}

impl<S: ClipboardSink + ?Sized> ClipboardSink for Box<S> {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        (**self).set_clipboard(text)
    }
}

impl<S: ClipboardSink + ?Sized> ClipboardSink for Arc<S> {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        (**self).set_clipboard(text)
    }
}

/// Serializes access to a sink so concurrent callers never interleave writes
#[derive(Debug, Default)]
pub struct SerializedSink<S> {
    inner: Mutex<S>,
}

impl<S> SerializedSink<S> {
    pub fn new(sink: S) -> Self {
        Self {
            inner: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ClipboardSink> ClipboardSink for SerializedSink<S> {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        // A panicked writer leaves nothing half-updated on our side
        let sink = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        sink.set_clipboard(text)
    }
}

/// The clipboard mechanism chosen once at startup
#[derive(Debug)]
pub enum SystemClipboard {
    Command(CommandSink),
    Native(NativeSink),
}

impl SystemClipboard {
    /// Resolve the configured backend against the current host
    pub fn from_config(config: &ClipboardConfig) -> Result<Self, ClipboardError> {
        Self::from_config_with_env(config, &HostEnv::current())
    }

    pub fn from_config_with_env(
        config: &ClipboardConfig,
        env: &HostEnv,
    ) -> Result<Self, ClipboardError> {
        if let Some(command) = ClipboardCommand::from_argv(&config.command) {
            log::debug!("Using configured clipboard command {}", command);
            return Ok(Self::Command(CommandSink::new(command)));
        }

        let backend = match config.backend {
            ClipboardBackend::Auto => detect_backend(env)?,
            explicit => explicit,
        };

        if backend == ClipboardBackend::Native {
            return Ok(Self::Native(NativeSink::new()));
        }

        let command = ClipboardCommand::for_backend(backend).ok_or_else(|| {
            ClipboardError::UnsupportedPlatform {
                os: env.os.clone(),
            }
        })?;
        log::debug!("Clipboard backend {:?} via {}", backend, command);
        Ok(Self::Command(CommandSink::new(command)))
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        match self {
            SystemClipboard::Command(sink) => sink.set_clipboard(text),
            SystemClipboard::Native(sink) => sink.set_clipboard(text),
        }
    }
}
