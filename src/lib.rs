pub mod batch;
pub mod codec;
pub mod error;
pub mod framing;

pub use batch::BatchCodec;
pub use codec::{DecodeLimit, Decoder, EncodeStats, Encoder, Token, TokenReader};
pub use error::{Error, Result};
pub use framing::{frame, FrameHeader};

/// Compress `input` into a raw coded stream. Empty input yields an empty stream.
pub fn compress(input: &[u8]) -> Vec<u8> {
    Encoder::new().encode(input).0
}

/// Compress and also return statistics about the coded stream
pub fn compress_with_stats(input: &[u8]) -> (Vec<u8>, EncodeStats) {
    Encoder::new().encode(input)
}

/// Compress and prepend the 4-byte little-endian coded length
pub fn compress_with_header(input: &[u8]) -> Vec<u8> {
    frame(&compress(input))
}

/// Decode at most `max` bytes. Returns an empty buffer when `max` is
/// implausibly large for the coded input.
pub fn decompress(coded: &[u8], max: usize) -> Vec<u8> {
    try_decompress(coded, max).unwrap_or_default()
}

/// Decode at most `max` bytes, reporting a tripped expansion guard as an error
pub fn try_decompress(coded: &[u8], max: usize) -> Result<Vec<u8>> {
    Decoder::check_expansion(max, coded.len())?;
    Ok(Decoder::new().decode(coded, DecodeLimit::MaxOutput(max)))
}

/// Decode until the coded input is exhausted
pub fn decompress_all(coded: &[u8]) -> Vec<u8> {
    Decoder::new().decode(coded, DecodeLimit::Exhaust)
}

/// Decode only the first `coded_len` bytes of `coded` (clamped to its length)
pub fn decompress_all_with_length(coded: &[u8], coded_len: usize) -> Vec<u8> {
    decompress_all(&coded[..coded_len.min(coded.len())])
}

/// Decode a length-prefixed stream. Returns an empty buffer when the prefix
/// is missing or does not match the payload length.
pub fn decompress_all_with_header(framed: &[u8]) -> Vec<u8> {
    try_decompress_all_with_header(framed).unwrap_or_default()
}

/// Decode a length-prefixed stream, reporting framing problems as errors
pub fn try_decompress_all_with_header(framed: &[u8]) -> Result<Vec<u8>> {
    let (_, coded) = FrameHeader::split(framed)?;
    Ok(decompress_all(coded))
}

/// Configuration for batch processing
#[derive(Clone, Debug, Default)]
pub struct BatchConfig {
    /// Number of worker threads (0 = auto, 1 = sequential)
    pub num_threads: usize,
    /// Read and write length-prefixed streams
    pub framed: bool,
}
