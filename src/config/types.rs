// Configuration type definitions

use std::time::Duration;

use serde::Deserialize;

use crate::endpoint::{
    DEFAULT_FORWARD_HOST, DEFAULT_FORWARD_PORT, DEFAULT_LISTEN_HOST, DEFAULT_LISTEN_PORT,
    Endpoint,
};
use crate::protocol::DEFAULT_CHUNK_SIZE;

/// Default ceiling on a single frame body accepted by the listener (64 MiB)
pub const DEFAULT_MAX_FRAME_BYTES: u32 = 64 * 1024 * 1024;

/// Default per-read timeout on accepted connections
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Clipboard backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardBackend {
    #[default]
    Auto,
    X11,
    Wayland,
    Macos,
    Termux,
    Native,
}

/// Clipboard configuration section
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default)]
    pub backend: ClipboardBackend,
    /// Custom command (program followed by arguments); overrides `backend`
    #[serde(default)]
    pub command: Vec<String>,
}

/// Sender configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SenderConfig {
    #[serde(default = "default_forward_host")]
    pub host: String,
    #[serde(default = "default_forward_port")]
    pub port: u16,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// 0 waits for the OS connect timeout
    #[serde(default)]
    pub connect_timeout_secs: u64,
}

fn default_forward_host() -> String {
    DEFAULT_FORWARD_HOST.to_string()
}

fn default_forward_port() -> u16 {
    DEFAULT_FORWARD_PORT
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for SenderConfig {
    fn default() -> Self {
        SenderConfig {
            host: default_forward_host(),
            port: DEFAULT_FORWARD_PORT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: 0,
        }
    }
}

impl SenderConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.connect_timeout_secs)
    }
}

/// Listener configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct ListenerConfig {
    #[serde(default = "default_listen_host")]
    pub host: String,
    #[serde(default = "default_listen_port")]
    pub port: u16,
    /// 0 accepts any length a u32 header can carry
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: u32,
    /// 0 lets a stalled peer hold the connection indefinitely
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,
    #[serde(default)]
    pub concurrent: bool,
}

fn default_listen_host() -> String {
    DEFAULT_LISTEN_HOST.to_string()
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

fn default_max_frame_bytes() -> u32 {
    DEFAULT_MAX_FRAME_BYTES
}

fn default_read_timeout_secs() -> u64 {
    DEFAULT_READ_TIMEOUT_SECS
}

impl Default for ListenerConfig {
    fn default() -> Self {
        ListenerConfig {
            host: default_listen_host(),
            port: DEFAULT_LISTEN_PORT,
            max_frame_bytes: DEFAULT_MAX_FRAME_BYTES,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            concurrent: false,
        }
    }
}

impl ListenerConfig {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    pub fn max_frame_len(&self) -> Option<u32> {
        (self.max_frame_bytes > 0).then_some(self.max_frame_bytes)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.read_timeout_secs)
    }
}

fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub sender: SenderConfig,
    #[serde(default)]
    pub listener: ListenerConfig,
    #[serde(default)]
    pub clipboard: ClipboardConfig,
}
