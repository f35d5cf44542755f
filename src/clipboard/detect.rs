//! Host probing for the auto clipboard backend

use std::env;

use crate::config::ClipboardBackend;

use super::backend::ClipboardError;

/// The parts of the environment that decide which clipboard mechanism to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    /// `std::env::consts::OS` of the running binary
    pub os: String,
    /// `XDG_SESSION_TYPE`, if set
    pub session_type: Option<String>,
    /// Whether `ANDROID_ROOT` is set (Termux and other Android userlands)
    pub android_root: bool,
}

impl HostEnv {
    pub fn current() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            session_type: env::var("XDG_SESSION_TYPE").ok(),
            android_root: env::var_os("ANDROID_ROOT").is_some(),
        }
    }
}

/// Pick a concrete backend for this host
///
/// Android is checked before the generic Linux branch since Termux reports
/// itself as Linux.
pub fn detect_backend(env: &HostEnv) -> Result<ClipboardBackend, ClipboardError> {
    let backend = match env.os.as_str() {
        "linux" | "android" if env.android_root => ClipboardBackend::Termux,
        "linux" => {
            let wayland = env
                .session_type
                .as_deref()
                .is_some_and(|session| session.eq_ignore_ascii_case("wayland"));
            if wayland {
                ClipboardBackend::Wayland
            } else {
                ClipboardBackend::X11
            }
        }
        "macos" => ClipboardBackend::Macos,
        other => {
            return Err(ClipboardError::UnsupportedPlatform {
                os: other.to_string(),
            });
        }
    };
    Ok(backend)
}
