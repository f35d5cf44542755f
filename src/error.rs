use thiserror::Error;

use crate::clipboard::ClipboardError;
use crate::endpoint::Endpoint;
use crate::protocol::FrameError;

#[derive(Debug, Error)]
pub enum ClipwireError {
    #[error("No input provided to copy.")]
    EmptyInput,

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Connection to {target} failed: {source}")]
    Connection {
        target: Endpoint,
        #[source]
        source: std::io::Error,
    },

    #[error("Port {} is already in use on {}. Exiting.", .endpoint.port, .endpoint.host)]
    AddressInUse { endpoint: Endpoint },

    #[error("Failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: Endpoint,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
