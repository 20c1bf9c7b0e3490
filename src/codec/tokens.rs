use super::constants::{MAX_BLOCK_BYTES, MAX_MATCH, MIN_MATCH, TOKENS_PER_BLOCK, WINDOW_SIZE};

/// Represents a single token in the coded stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// A literal byte (flag bit = 1)
    Literal(u8),
    /// A back-reference: copy `length` bytes starting at window `position` (flag bit = 0)
    Match { position: u16, length: u8 },
}

impl Token {
    /// Build a match token.
    ///
    /// Panics if `position` does not fit 12 bits or `length` is outside 3..=18;
    /// the encoder never produces either.
    pub fn new_match(position: usize, length: usize) -> Self {
        assert!(position < WINDOW_SIZE, "match position {position} out of window");
        assert!((MIN_MATCH..=MAX_MATCH).contains(&length), "match length {length} not encodable");
        Token::Match { position: position as u16, length: length as u8 }
    }

    /// Decode a match from its two wire bytes
    #[inline]
    pub fn from_match_bytes(lo: u8, hi: u8) -> Self {
        let position = lo as u16 | ((hi as u16 & 0xF0) << 4);
        let length = (hi & 0x0F) + MIN_MATCH as u8;
        Token::Match { position, length }
    }

    /// Returns the uncompressed size this token represents
    pub fn uncompressed_size(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length as usize,
        }
    }

    /// Bytes this token occupies after the control byte
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { .. } => 2,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }

    /// Append the token's wire bytes
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match *self {
            Token::Literal(byte) => out.push(byte),
            Token::Match { position, length } => out.extend_from_slice(&match_bytes(position, length)),
        }
    }
}

/// Low 8 position bits, then the high 4 position bits over the length nibble
#[inline]
fn match_bytes(position: u16, length: u8) -> [u8; 2] {
    [position as u8, ((position >> 4) & 0xF0) as u8 | (length - MIN_MATCH as u8)]
}

/// One control byte and the up to 8 tokens it describes
///
/// Bit `i` (LSB first) of the control byte is set when token `i` is a literal.
pub struct CodedBlock {
    /// Control byte followed by token bytes
    bytes: [u8; MAX_BLOCK_BYTES],
    /// Bytes used, including the control byte
    used: usize,
    tokens: usize,
}

impl CodedBlock {
    pub fn new() -> Self {
        Self { bytes: [0u8; MAX_BLOCK_BYTES], used: 1, tokens: 0 }
    }

    /// Add a token; returns true once the block holds 8 tokens
    pub fn push(&mut self, token: Token) -> bool {
        debug_assert!(self.tokens < TOKENS_PER_BLOCK);

        match token {
            Token::Literal(byte) => {
                self.bytes[0] |= 1 << self.tokens;
                self.bytes[self.used] = byte;
                self.used += 1;
            }
            Token::Match { position, length } => {
                self.bytes[self.used..self.used + 2].copy_from_slice(&match_bytes(position, length));
                self.used += 2;
            }
        }
        self.tokens += 1;
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.tokens == TOKENS_PER_BLOCK
    }

    pub fn is_empty(&self) -> bool {
        self.tokens == 0
    }

    pub fn len(&self) -> usize {
        self.tokens
    }

    /// Append control byte and tokens to `out` and reset for the next block
    pub fn flush_into(&mut self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.bytes[..self.used]);
        self.bytes[0] = 0;
        self.used = 1;
        self.tokens = 0;
    }
}

impl Default for CodedBlock {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterates over the tokens of a coded stream
///
/// Stops at the end of input or at the first token whose bytes are cut off;
/// a truncated stream is not an error.
pub struct TokenReader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Control bits in the low byte, 0xFF sentinel above them
    flags: u16,
    finished: bool,
}

impl<'a> TokenReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, flags: 0, finished: false }
    }

    /// Coded bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.pos
    }

    fn stop(&mut self) -> Option<Token> {
        self.finished = true;
        None
    }
}

impl Iterator for TokenReader<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished || self.pos >= self.data.len() {
            return self.stop();
        }

        self.flags >>= 1;
        if self.flags & 0x100 == 0 {
            self.flags = self.data[self.pos] as u16 | 0xFF00;
            self.pos += 1;
        }

        if self.flags & 1 == 1 {
            if self.pos >= self.data.len() {
                return self.stop();
            }
            let byte = self.data[self.pos];
            self.pos += 1;
            Some(Token::Literal(byte))
        } else {
            if self.pos + 1 >= self.data.len() {
                return self.stop();
            }
            let token = Token::from_match_bytes(self.data[self.pos], self.data[self.pos + 1]);
            self.pos += 2;
            Some(token)
        }
    }
}

impl std::iter::FusedIterator for TokenReader<'_> {}
