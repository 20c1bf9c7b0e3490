use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Framing errors
    #[error("Framed stream too short: {0} bytes (need at least 4 for the length prefix)")]
    HeaderTooShort(usize),

    #[error("Length prefix mismatch: header says {expected} bytes, payload has {found}")]
    LengthMismatch { expected: u32, found: usize },

    // Decoder guard
    #[error("Requested output of {requested} bytes exceeds expansion limit for {coded_len} coded bytes")]
    ExpansionRatioExceeded { requested: usize, coded_len: usize },

    // Checksum errors
    #[error("Round-trip CRC32 mismatch: expected 0x{expected:08x}, got 0x{found:08x}")]
    VerifyMismatch { expected: u32, found: u32 },

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
