use super::constants::{EXPANSION_RATIO_LIMIT, EXPANSION_SLACK, MAX_MATCH};
use super::tokens::{Token, TokenReader};
use super::window::HistoryWindow;
use crate::error::{Error, Result};

/// How much output a decode may produce
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeLimit {
    /// Decode until the coded input runs out
    Exhaust,
    /// Stop once this many bytes have been produced
    MaxOutput(usize),
}

/// Replays a coded stream against its own history window
pub struct Decoder {
    window: HistoryWindow,
}

impl Decoder {
    pub fn new() -> Self {
        Self { window: HistoryWindow::new() }
    }

    /// Reject a bounded decode whose requested size is implausible for the input.
    ///
    /// Refuses when `max + 10 > 2000 * coded_len`, which also rejects every
    /// request against empty input.
    pub fn check_expansion(max: usize, coded_len: usize) -> Result<()> {
        let requested = (max as u64).saturating_add(EXPANSION_SLACK);
        if requested > EXPANSION_RATIO_LIMIT.saturating_mul(coded_len as u64) {
            return Err(Error::ExpansionRatioExceeded { requested: max, coded_len });
        }
        Ok(())
    }

    /// Decode `coded`, stopping at `limit`, at the end of input, or at a truncated token
    pub fn decode(mut self, coded: &[u8], limit: DecodeLimit) -> Vec<u8> {
        let max = match limit {
            DecodeLimit::Exhaust => usize::MAX,
            DecodeLimit::MaxOutput(max) => max,
        };

        let capacity = match limit {
            DecodeLimit::Exhaust => coded.len().saturating_mul(5),
            DecodeLimit::MaxOutput(max) => max.min(coded.len().saturating_mul(MAX_MATCH)),
        };
        let mut output = Vec::with_capacity(capacity);

        let mut reader = TokenReader::new(coded);
        while output.len() < max {
            let Some(token) = reader.next() else {
                break;
            };
            match token {
                Token::Literal(byte) => {
                    self.window.put(byte);
                    output.push(byte);
                }
                Token::Match { position, length } => {
                    let length = (length as usize).min(max - output.len());
                    self.window.copy_match(position as usize, length, &mut output);
                }
            }
        }

        output
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}
