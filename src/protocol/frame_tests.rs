//! Tests for frame

use super::*;
use proptest::prelude::*;
use std::io::Cursor;

/// Reader that hands out at most one byte per `read` call
struct Trickle<R> {
    inner: R,
    interrupt_next: bool,
}

impl<R> Trickle<R> {
    fn new(inner: R) -> Self {
        Self {
            inner,
            interrupt_next: true,
        }
    }
}

impl<R: Read> Read for Trickle<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // Alternate spurious interrupts with single-byte reads
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
        }
        self.interrupt_next = true;
        let len = buf.len().min(1);
        self.inner.read(&mut buf[..len])
    }
}

/// Writer that accepts at most three bytes per `write` call
#[derive(Default)]
struct ShortWriter {
    written: Vec<u8>,
    flushed: bool,
}

impl Write for ShortWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let len = buf.len().min(3);
        self.written.extend_from_slice(&buf[..len]);
        Ok(len)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

fn frame_with_header(declared: u32, body: &[u8]) -> Vec<u8> {
    let mut bytes = declared.to_be_bytes().to_vec();
    bytes.extend_from_slice(body);
    bytes
}

#[test]
fn test_encode_hello() {
    let frame = encode(b"hello").unwrap();
    assert_eq!(frame, vec![0, 0, 0, 5, b'h', b'e', b'l', b'l', b'o']);
}

#[test]
fn test_encode_empty_is_header_only() {
    assert_eq!(encode(b"").unwrap(), vec![0, 0, 0, 0]);
}

#[test]
fn test_frame_len_rejects_lengths_beyond_u32() {
    let len = u32::MAX as usize + 1;
    assert!(matches!(
        frame_len(len),
        Err(FrameError::TooLarge { len: l }) if l == len
    ));
}

#[test]
fn test_frame_len_accepts_u32_max() {
    assert_eq!(frame_len(u32::MAX as usize).unwrap(), u32::MAX);
}

#[test]
fn test_decode_empty_frame() {
    assert_eq!(decode(&[0, 0, 0, 0]).unwrap(), "");
}

#[test]
fn test_read_frame_empty_body_does_not_block_on_body() {
    // Only the header is available; a zero length must not attempt a body read
    let mut cursor = Cursor::new(vec![0, 0, 0, 0]);
    assert_eq!(read_frame(&mut cursor).unwrap(), Some(String::new()));
}

#[test]
fn test_read_frame_clean_eof_is_none() {
    let mut cursor = Cursor::new(Vec::new());
    assert!(read_frame(&mut cursor).unwrap().is_none());
}

#[test]
fn test_read_frame_partial_header_is_connection_closed() {
    let mut cursor = Cursor::new(vec![0, 0]);
    assert!(matches!(
        read_frame(&mut cursor),
        Err(FrameError::ConnectionClosed {
            expected: 4,
            received: 2
        })
    ));
}

#[test]
fn test_read_frame_truncated_body_is_connection_closed() {
    let mut cursor = Cursor::new(frame_with_header(10, b"abc"));
    assert!(matches!(
        read_frame(&mut cursor),
        Err(FrameError::ConnectionClosed {
            expected: 10,
            received: 3
        })
    ));
}

#[test]
fn test_read_frame_invalid_utf8_is_encoding_error() {
    let mut cursor = Cursor::new(frame_with_header(2, &[0xc3, 0x28]));
    assert!(matches!(
        read_frame(&mut cursor),
        Err(FrameError::Encoding(_))
    ));
}

#[test]
fn test_decoder_rejects_length_over_limit_without_reading_body() {
    let decoder = FrameDecoder::with_max_len(4);
    let mut cursor = Cursor::new(frame_with_header(5, b"hello"));

    assert!(matches!(
        decoder.read_frame(&mut cursor),
        Err(FrameError::ExceedsLimit { len: 5, max: 4 })
    ));
    assert_eq!(cursor.position(), HEADER_LEN as u64);
}

#[test]
fn test_decoder_accepts_length_at_limit() {
    let decoder = FrameDecoder::with_max_len(5);
    let mut cursor = Cursor::new(frame_with_header(5, b"hello"));
    assert_eq!(decoder.read_frame(&mut cursor).unwrap().as_deref(), Some("hello"));
}

#[test]
fn test_default_decoder_is_unbounded() {
    assert_eq!(FrameDecoder::default().max_len(), None);
    assert_eq!(FrameDecoder::new(), FrameDecoder::default());
}

#[test]
fn test_read_frame_one_byte_at_a_time() {
    let text = "line one\nzweite Zeile ü\n日本語 🎉";
    let frame = encode(text.as_bytes()).unwrap();
    let mut reader = Trickle::new(Cursor::new(frame));

    assert_eq!(read_frame(&mut reader).unwrap().as_deref(), Some(text));
}

#[test]
fn test_read_frame_leaves_following_bytes_unread() {
    let mut bytes = encode(b"first").unwrap();
    bytes.extend(encode(b"second").unwrap());
    let mut cursor = Cursor::new(bytes);

    assert_eq!(read_frame(&mut cursor).unwrap().as_deref(), Some("first"));
    assert_eq!(read_frame(&mut cursor).unwrap().as_deref(), Some("second"));
    assert!(read_frame(&mut cursor).unwrap().is_none());
}

#[test]
fn test_decode_rejects_trailing_bytes() {
    let mut bytes = encode(b"hi").unwrap();
    bytes.push(b'!');
    assert!(matches!(
        decode(&bytes),
        Err(FrameError::TrailingBytes { count: 1 })
    ));
}

#[test]
fn test_decode_empty_buffer_is_connection_closed() {
    assert!(matches!(
        decode(&[]),
        Err(FrameError::ConnectionClosed { received: 0, .. })
    ));
}

#[test]
fn test_read_exact_collects_across_reads() {
    let mut reader = Trickle::new(Cursor::new(b"abcdef".to_vec()));
    assert_eq!(read_exact(&mut reader, 4).unwrap(), b"abcd");
}

#[test]
fn test_read_exact_zero_bytes() {
    let mut cursor = Cursor::new(Vec::new());
    assert!(read_exact(&mut cursor, 0).unwrap().is_empty());
}

#[test]
fn test_write_frame_chunks_body() {
    let payload = vec![b'x'; 10_000];
    let mut out = Vec::new();

    let stats = write_frame(&mut out, &payload, 4096).unwrap();

    assert_eq!(stats, WriteStats { bytes: 10_000, chunks: 3 });
    assert_eq!(out, encode(&payload).unwrap());
}

#[test]
fn test_write_frame_empty_payload_has_no_chunks() {
    let mut out = Vec::new();
    let stats = write_frame(&mut out, b"", 4096).unwrap();

    assert_eq!(stats, WriteStats { bytes: 0, chunks: 0 });
    assert_eq!(out, vec![0, 0, 0, 0]);
}

#[test]
fn test_write_frame_zero_chunk_size_uses_default() {
    let payload = vec![b'y'; DEFAULT_CHUNK_SIZE + 1];
    let mut out = Vec::new();

    let stats = write_frame(&mut out, &payload, 0).unwrap();

    assert_eq!(stats.chunks, 2);
}

#[test]
fn test_write_frame_retries_short_writes() {
    let mut writer = ShortWriter::default();
    write_frame(&mut writer, "short writes ✓".as_bytes(), 5).unwrap();

    assert!(writer.flushed);
    assert_eq!(decode(&writer.written).unwrap(), "short writes ✓");
}

// Feature: framing, Property 1: round-trip
// For any UTF-8 string, decoding its encoding yields the original string.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_decode_encode_roundtrip(text in any::<String>()) {
        let frame = encode(text.as_bytes()).unwrap();
        prop_assert_eq!(decode(&frame).unwrap(), text);
    }

    #[test]
    fn prop_roundtrip_with_newlines(lines in prop::collection::vec("[^\n]{0,20}", 0..8)) {
        let text = lines.join("\n");
        let frame = encode(text.as_bytes()).unwrap();
        prop_assert_eq!(decode(&frame).unwrap(), text);
    }
}

// Feature: framing, Property 2: framing exactness
// The frame is 4 + byte length long and its header is that byte length.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_frame_length_exact(text in any::<String>()) {
        let frame = encode(text.as_bytes()).unwrap();

        prop_assert_eq!(frame.len(), HEADER_LEN + text.len());
        let declared = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]);
        prop_assert_eq!(declared as usize, text.len());
        prop_assert_eq!(&frame[HEADER_LEN..], text.as_bytes());
    }
}

// Feature: framing, Property 3: truncation never yields a string
// Cutting a frame anywhere before its end produces ConnectionClosed (or a
// clean None when nothing at all arrived).
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_truncated_frame_is_rejected(text in ".{1,64}", cut in any::<prop::sample::Index>()) {
        let frame = encode(text.as_bytes()).unwrap();
        let cut = cut.index(frame.len());
        let mut cursor = Cursor::new(frame[..cut].to_vec());

        match read_frame(&mut cursor) {
            Ok(None) => prop_assert_eq!(cut, 0),
            Err(FrameError::ConnectionClosed { received, .. }) => {
                prop_assert!(cut > 0);
                prop_assert!(received < frame.len());
            }
            other => prop_assert!(false, "unexpected result {:?}", other),
        }
    }
}
