//! Listening side of the sync protocol
//!
//! The listener owns one bound socket and handles connections one at a time:
//! accept, decode one frame, normalize, set the clipboard, close. Failures on
//! a single connection are logged and never stop the loop.

use std::io;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::clipboard::{ClipboardError, ClipboardSink};
use crate::endpoint::Endpoint;
use crate::error::ClipwireError;
use crate::protocol::{FrameDecoder, FrameError};

/// How long the startup probe waits for an existing listener to answer
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Reject frames whose header declares more than this many bytes
    pub max_frame_len: Option<u32>,
    /// Give up on a peer that sends nothing for this long
    pub read_timeout: Option<Duration>,
}

/// What happened to one accepted connection
#[derive(Debug)]
pub enum ConnectionOutcome {
    /// Clipboard now holds this (normalized) text
    Delivered(String),
    /// Peer closed without sending a frame
    Empty,
    DecodeFailed(FrameError),
    ClipboardFailed(ClipboardError),
}

impl ConnectionOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, ConnectionOutcome::Delivered(_))
    }
}

/// Strip the trailing newlines a shell pipeline usually appends
pub fn normalize_payload(text: &str) -> &str {
    text.trim_end_matches('\n')
}

#[derive(Debug)]
pub struct Listener<S> {
    listener: TcpListener,
    sink: S,
    decoder: FrameDecoder,
    read_timeout: Option<Duration>,
}

impl<S: ClipboardSink> Listener<S> {
    /// Probe for a competing listener, then bind
    pub fn bind(
        endpoint: &Endpoint,
        options: ListenerOptions,
        sink: S,
    ) -> Result<Self, ClipwireError> {
        if is_port_in_use(endpoint) {
            return Err(ClipwireError::AddressInUse {
                endpoint: endpoint.clone(),
            });
        }

        let listener =
            TcpListener::bind((endpoint.host.as_str(), endpoint.port)).map_err(|source| {
                if source.kind() == io::ErrorKind::AddrInUse {
                    ClipwireError::AddressInUse {
                        endpoint: endpoint.clone(),
                    }
                } else {
                    ClipwireError::Bind {
                        endpoint: endpoint.clone(),
                        source,
                    }
                }
            })?;

        let decoder = match options.max_frame_len {
            Some(max) => FrameDecoder::with_max_len(max),
            None => FrameDecoder::new(),
        };

        Ok(Self {
            listener,
            sink,
            decoder,
            read_timeout: options.read_timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Accept one connection and process it to completion
    ///
    /// Only accept failures are returned; everything that goes wrong on the
    /// connection itself is folded into the outcome.
    pub fn handle_next(&self) -> io::Result<ConnectionOutcome> {
        let (stream, peer) = self.listener.accept()?;
        Ok(self.handle_connection(stream, peer))
    }

    /// Decode one frame from `stream` and hand it to the clipboard
    pub fn handle_connection(
        &self,
        mut stream: TcpStream,
        peer: SocketAddr,
    ) -> ConnectionOutcome {
        log::info!("Connection from {}", peer);

        if let Err(e) = stream.set_read_timeout(self.read_timeout) {
            log::warn!("Could not set read timeout for {}: {}", peer, e);
        }

        let outcome = match self.decoder.read_frame(&mut stream) {
            Ok(Some(text)) => {
                log::info!("Received {} bytes from {}", text.len(), peer);
                let text = normalize_payload(&text);
                match self.sink.set_clipboard(text) {
                    Ok(()) => {
                        log::info!("Clipboard updated.");
                        ConnectionOutcome::Delivered(text.to_string())
                    }
                    Err(e) => {
                        log::error!("Clipboard update failed for {}: {}", peer, e);
                        ConnectionOutcome::ClipboardFailed(e)
                    }
                }
            }
            Ok(None) => {
                log::info!("{} closed without sending data", peer);
                ConnectionOutcome::Empty
            }
            Err(e) => {
                log::error!("Failed to receive data from {}: {}", peer, e);
                ConnectionOutcome::DecodeFailed(e)
            }
        };

        if let Err(e) = stream.shutdown(Shutdown::Both) {
            log::debug!("Shutdown of connection from {} failed: {}", peer, e);
        }
        outcome
    }

    /// Handle connections one after another until the process is killed
    pub fn serve(&self) -> ! {
        self.log_listening();
        loop {
            if let Err(e) = self.handle_next() {
                log::error!("Accept failed: {}", e);
            }
        }
    }

    fn log_listening(&self) {
        match self.local_addr() {
            Ok(addr) => log::info!("Listening on {}...", addr),
            Err(_) => log::info!("Listening..."),
        }
    }
}

impl<S: ClipboardSink + Send + Sync + 'static> Listener<S> {
    /// Process an accepted connection on its own thread
    ///
    /// The sink is shared as-is; wrap it in
    /// [`SerializedSink`](crate::clipboard::SerializedSink) to keep clipboard
    /// writes from interleaving.
    pub fn spawn_handler(
        self: &Arc<Self>,
        stream: TcpStream,
        peer: SocketAddr,
    ) -> JoinHandle<ConnectionOutcome> {
        let listener = Arc::clone(self);
        thread::spawn(move || listener.handle_connection(stream, peer))
    }

    /// Accept forever, one worker thread per connection
    pub fn serve_concurrent(self) -> ! {
        self.log_listening();
        let this = Arc::new(self);
        loop {
            match this.listener.accept() {
                Ok((stream, peer)) => drop(this.spawn_handler(stream, peer)),
                Err(e) => log::error!("Accept failed: {}", e),
            }
        }
    }
}

/// Whether something already accepts connections on `endpoint`
fn is_port_in_use(endpoint: &Endpoint) -> bool {
    let Ok(addrs) = endpoint.probe_addrs() else {
        return false;
    };
    addrs
        .iter()
        .any(|addr| TcpStream::connect_timeout(addr, PROBE_TIMEOUT).is_ok())
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod listener_tests;
