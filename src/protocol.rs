//! Wire protocol for clipwire
//!
//! A frame is a 4-byte big-endian length followed by exactly that many bytes
//! of UTF-8 text. One frame travels per connection.

pub mod frame;

pub use frame::{
    DEFAULT_CHUNK_SIZE, FrameDecoder, FrameError, HEADER_LEN, WriteStats, decode, encode,
    frame_len, read_exact, read_frame, write_frame,
};
