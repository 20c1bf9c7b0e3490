/// Size of the circular history window
pub const WINDOW_SIZE: usize = 4096;

/// Mask for circular window addressing
pub const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// Longest encodable match (4-bit length field + MIN_MATCH)
pub const MAX_MATCH: usize = 18;

/// Matches no longer than this are emitted as literals
pub const MATCH_THRESHOLD: usize = 2;

/// Shortest encodable match
pub const MIN_MATCH: usize = MATCH_THRESHOLD + 1;

/// Bytes mirrored past the end of the window (positions 0..17 copied to 4096..4113)
pub const LOOKAHEAD_MIRROR: usize = MAX_MATCH - 1;

/// Initial write cursor for both encoder and decoder
pub const WINDOW_START: usize = WINDOW_SIZE - MAX_MATCH; // 4078

/// Number of first-byte tree roots
pub const TREE_ROOTS: usize = 256;

/// "No link" marker in the match tree arena
pub const NIL: usize = WINDOW_SIZE;

/// Arena index of the root for first byte 0
pub const ROOT_BASE: usize = WINDOW_SIZE + 1; // 4097

/// Tokens per control byte
pub const TOKENS_PER_BLOCK: usize = 8;

/// Maximum bytes in a coded block (control byte + 8 two-byte matches)
pub const MAX_BLOCK_BYTES: usize = 1 + TOKENS_PER_BLOCK * 2;

/// Bounded decode refuses `max + EXPANSION_SLACK > EXPANSION_RATIO_LIMIT * coded_len`
pub const EXPANSION_RATIO_LIMIT: u64 = 2000;

/// Slack added to the requested size before the ratio check
pub const EXPANSION_SLACK: u64 = 10;
