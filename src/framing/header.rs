use crate::error::{Error, Result};

/// Size of the little-endian length prefix
pub const FRAME_HEADER_SIZE: usize = 4;

/// Length prefix of a framed coded stream
///
/// A framed stream is `[coded_len: u32 LE][coded stream]`; the prefix must
/// equal the number of bytes that follow it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub payload_len: u32,
}

impl FrameHeader {
    /// Parse and validate the header of a framed stream
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < FRAME_HEADER_SIZE {
            return Err(Error::HeaderTooShort(data.len()));
        }

        let payload_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let found = data.len() - FRAME_HEADER_SIZE;
        if payload_len as usize != found {
            return Err(Error::LengthMismatch { expected: payload_len, found });
        }

        Ok(Self { payload_len })
    }

    /// Parse the header and return the coded stream that follows it
    pub fn split(data: &[u8]) -> Result<(Self, &[u8])> {
        let header = Self::parse(data)?;
        Ok((header, &data[FRAME_HEADER_SIZE..]))
    }

    /// Append the 4-byte prefix
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.payload_len.to_le_bytes());
    }
}

/// Prefix a coded stream with its length
pub fn frame(coded: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(FRAME_HEADER_SIZE + coded.len());
    FrameHeader { payload_len: coded.len() as u32 }.write_to(&mut framed);
    framed.extend_from_slice(coded);
    framed
}
