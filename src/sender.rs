//! Sending side of the sync protocol
//!
//! One call to [`Sender::send`] is one connection carrying one frame. There
//! is no retry: either the whole frame is written or the call fails.

use std::io;
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::endpoint::Endpoint;
use crate::error::ClipwireError;
use crate::protocol::{DEFAULT_CHUNK_SIZE, FrameError, write_frame};

/// Outcome of a successful send
#[derive(Debug)]
pub struct SendReport {
    /// Payload bytes written, excluding the length header
    pub bytes: usize,
    /// Number of body chunks written
    pub chunks: usize,
    /// Local clipboard failure, if any; it does not fail the send
    pub clipboard_error: Option<ClipboardError>,
}

/// Reject payloads that carry no text
pub fn validate_payload(payload: &str) -> Result<(), ClipwireError> {
    if payload.trim().is_empty() {
        return Err(ClipwireError::EmptyInput);
    }
    Ok(())
}

pub struct Sender<S> {
    target: Endpoint,
    sink: S,
    chunk_size: usize,
    connect_timeout: Option<Duration>,
}

impl<S: ClipboardSink> Sender<S> {
    pub fn new(target: Endpoint, sink: S) -> Self {
        Self {
            target,
            sink,
            chunk_size: DEFAULT_CHUNK_SIZE,
            connect_timeout: None,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn target(&self) -> &Endpoint {
        &self.target
    }

    /// Copy `payload` locally and deliver it to the target
    pub fn send(&self, payload: &str) -> Result<SendReport, ClipwireError> {
        validate_payload(payload)?;

        let mut stream = self.connect().map_err(|source| ClipwireError::Connection {
            target: self.target.clone(),
            source,
        })?;

        // Local clipboard and network delivery are independent
        let clipboard_error = match self.sink.set_clipboard(payload) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to set local clipboard: {}", e);
                Some(e)
            }
        };

        let stats = write_frame(&mut stream, payload.as_bytes(), self.chunk_size).map_err(
            |e| match e {
                FrameError::Io(source) => ClipwireError::Connection {
                    target: self.target.clone(),
                    source,
                },
                other => ClipwireError::Frame(other),
            },
        )?;

        if let Err(e) = stream.shutdown(Shutdown::Write) {
            log::debug!("Shutdown of connection to {} failed: {}", self.target, e);
        }

        log::info!(
            "Sent {} bytes in {} chunks to {}",
            stats.bytes,
            stats.chunks,
            self.target
        );

        Ok(SendReport {
            bytes: stats.bytes,
            chunks: stats.chunks,
            clipboard_error,
        })
    }

    /// Try each resolved address in turn, returning the first connection
    fn connect(&self) -> io::Result<TcpStream> {
        let Some(timeout) = self.connect_timeout else {
            return TcpStream::connect((self.target.host.as_str(), self.target.port));
        };

        let mut last_error = None;
        for addr in self.target.socket_addrs()? {
            match TcpStream::connect_timeout(&addr, timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => {
                    log::debug!("Connect to {} failed: {}", addr, e);
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no address to connect to")
        }))
    }
}
