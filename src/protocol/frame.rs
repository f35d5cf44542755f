//! Length-prefixed frame codec
//!
//! Encoding is a pure function. Decoding works against any [`Read`] and
//! tolerates the transport splitting a frame across arbitrarily many reads.

use std::io::{self, Read, Write};

use thiserror::Error;

/// Size of the big-endian length header
pub const HEADER_LEN: usize = 4;

/// Body bytes handed to each `write_all` call on the sending side
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("payload of {len} bytes does not fit in a 32-bit length header")]
    TooLarge { len: usize },

    #[error("declared frame length {len} exceeds the {max} byte limit")]
    ExceedsLimit { len: u32, max: u32 },

    #[error("Connection closed unexpectedly: expected {expected} bytes, received {received}")]
    ConnectionClosed { expected: usize, received: usize },

    #[error("frame body is not valid UTF-8: {0}")]
    Encoding(#[source] std::str::Utf8Error),

    #[error("{count} unexpected bytes after the frame")]
    TrailingBytes { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// What [`write_frame`] put on the wire, excluding the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    pub bytes: usize,
    pub chunks: usize,
}

/// Length header value for a payload of `len` bytes
pub fn frame_len(len: usize) -> Result<u32, FrameError> {
    u32::try_from(len).map_err(|_| FrameError::TooLarge { len })
}

/// Encode a payload into a complete frame
pub fn encode(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let len = frame_len(payload.len())?;

    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&len.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Write one frame, sending the body in `chunk_size` pieces
///
/// Each piece goes through `write_all`, so short writes are retried until
/// the whole frame is out. A `chunk_size` of 0 falls back to
/// [`DEFAULT_CHUNK_SIZE`].
pub fn write_frame<W: Write>(
    writer: &mut W,
    payload: &[u8],
    chunk_size: usize,
) -> Result<WriteStats, FrameError> {
    let len = frame_len(payload.len())?;
    let chunk_size = if chunk_size == 0 {
        DEFAULT_CHUNK_SIZE
    } else {
        chunk_size
    };

    writer.write_all(&len.to_be_bytes())?;

    let mut chunks = 0;
    for chunk in payload.chunks(chunk_size) {
        writer.write_all(chunk)?;
        chunks += 1;
    }
    writer.flush()?;

    Ok(WriteStats {
        bytes: payload.len(),
        chunks,
    })
}

/// Read exactly `n` bytes, accumulating across as many reads as it takes
///
/// Fails with [`FrameError::ConnectionClosed`] if the stream ends first;
/// `received` in the error says how far it got. The buffer grows with the
/// data actually received rather than with `n`.
pub fn read_exact<R: Read>(reader: &mut R, n: usize) -> Result<Vec<u8>, FrameError> {
    let mut buf = Vec::with_capacity(n.min(DEFAULT_CHUNK_SIZE));
    reader.by_ref().take(n as u64).read_to_end(&mut buf)?;

    if buf.len() < n {
        return Err(FrameError::ConnectionClosed {
            expected: n,
            received: buf.len(),
        });
    }
    Ok(buf)
}

/// Streaming frame decoder with an optional size ceiling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameDecoder {
    max_len: Option<u32>,
}

impl FrameDecoder {
    /// Decoder that accepts any length a u32 can express
    pub fn new() -> Self {
        Self { max_len: None }
    }

    /// Decoder that rejects frames declaring more than `max` body bytes
    pub fn with_max_len(max: u32) -> Self {
        Self { max_len: Some(max) }
    }

    pub fn max_len(&self) -> Option<u32> {
        self.max_len
    }

    /// Read one frame from `reader`
    ///
    /// Returns `Ok(None)` when the stream ends cleanly before the first header
    /// byte: the peer connected and left without sending anything. A stream
    /// that ends anywhere inside the frame is [`FrameError::ConnectionClosed`].
    pub fn read_frame<R: Read>(&self, reader: &mut R) -> Result<Option<String>, FrameError> {
        let header = match read_exact(reader, HEADER_LEN) {
            Ok(header) => header,
            Err(FrameError::ConnectionClosed { received: 0, .. }) => return Ok(None),
            Err(e) => return Err(e),
        };
        let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]);

        log::debug!("Expecting {} bytes", len);

        if let Some(max) = self.max_len.filter(|&max| len > max) {
            return Err(FrameError::ExceedsLimit { len, max });
        }

        let body = if len == 0 {
            Vec::new()
        } else {
            read_exact(reader, len as usize)?
        };

        String::from_utf8(body)
            .map(Some)
            .map_err(|e| FrameError::Encoding(e.utf8_error()))
    }
}

/// Read one frame with no size ceiling
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<String>, FrameError> {
    FrameDecoder::new().read_frame(reader)
}

/// Decode a single complete frame held in memory
pub fn decode(bytes: &[u8]) -> Result<String, FrameError> {
    let mut cursor = io::Cursor::new(bytes);
    let text = read_frame(&mut cursor)?.ok_or(FrameError::ConnectionClosed {
        expected: HEADER_LEN,
        received: 0,
    })?;

    let count = bytes.len() - cursor.position() as usize;
    if count > 0 {
        return Err(FrameError::TrailingBytes { count });
    }
    Ok(text)
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod frame_tests;
