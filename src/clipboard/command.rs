//! External clipboard commands
//!
//! Each platform mechanism is a program that takes the new clipboard
//! contents on stdin.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use crate::config::ClipboardBackend;

use super::backend::{ClipboardError, ClipboardResult, ClipboardSink};

/// Program plus arguments that reads clipboard text from stdin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ClipboardCommand {
    pub fn new<I, A>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Command for a concrete backend
    ///
    /// Returns `None` for `Auto` (not yet resolved) and `Native` (in-process).
    pub fn for_backend(backend: ClipboardBackend) -> Option<Self> {
        let command = match backend {
            ClipboardBackend::X11 => Self::new("xclip", ["-r", "-selection", "clipboard"]),
            ClipboardBackend::Wayland => Self::new("wl-copy", Vec::<String>::new()),
            ClipboardBackend::Macos => Self::new("pbcopy", Vec::<String>::new()),
            ClipboardBackend::Termux => Self::new("termux-clipboard-set", Vec::<String>::new()),
            ClipboardBackend::Auto | ClipboardBackend::Native => return None,
        };
        Some(command)
    }

    /// Build from a configured argv; empty means "not configured"
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self::new(program.clone(), args.iter().cloned()))
    }
}

impl fmt::Display for ClipboardCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Sink that pipes text into a clipboard command
#[derive(Debug, Clone)]
pub struct CommandSink {
    command: ClipboardCommand,
}

impl CommandSink {
    pub fn new(command: ClipboardCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ClipboardCommand {
        &self.command
    }
}

impl ClipboardSink for CommandSink {
    fn set_clipboard(&self, text: &str) -> ClipboardResult {
        let program = &self.command.program;
        let path = which::which(program).map_err(|_| ClipboardError::CommandNotFound {
            program: program.clone(),
        })?;

        // stdout is discarded; xclip forks a daemon that would otherwise hold
        // a captured pipe open
        let mut child = Command::new(path)
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::Spawn {
                program: program.clone(),
                source,
            })?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child.wait().map_err(|source| ClipboardError::Spawn {
            program: program.clone(),
            source,
        })?;

        written.map_err(|source| ClipboardError::Write {
            program: program.clone(),
            source,
        })?;

        if !status.success() {
            return Err(ClipboardError::CommandFailed {
                program: program.clone(),
                status,
            });
        }
        Ok(())
    }
}
