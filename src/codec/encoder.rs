use super::constants::{MATCH_THRESHOLD, MAX_MATCH, WINDOW_MASK, WINDOW_START};
use super::tokens::{CodedBlock, Token};
use super::tree::MatchTree;
use super::window::HistoryWindow;

/// Statistics from a compression pass
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub literals: u64,
    pub matches: u64,
    /// Control-byte blocks written, including a trailing partial block
    pub blocks: u64,
}

/// Greedy LZSS encoder over a 4KB window
///
/// Owns its window and match tree, so one encoder compresses exactly one
/// buffer. Create a fresh one per call.
pub struct Encoder {
    window: HistoryWindow,
    tree: MatchTree,
    block: CodedBlock,
    output: Vec<u8>,
    stats: EncodeStats,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            window: HistoryWindow::new(),
            tree: MatchTree::new(),
            block: CodedBlock::new(),
            output: Vec::new(),
            stats: EncodeStats::default(),
        }
    }

    /// Compress `input` into a coded stream. Empty input yields an empty stream.
    pub fn encode(mut self, input: &[u8]) -> (Vec<u8>, EncodeStats) {
        self.stats.input_bytes = input.len() as u64;
        self.output.reserve(input.len() / 2);

        // s: oldest window slot, next to be overwritten; r: current position
        let mut s = 0usize;
        let mut r = WINDOW_START;

        let mut len = input.len().min(MAX_MATCH);
        if len == 0 {
            return (self.output, self.stats);
        }
        for (i, &byte) in input[..len].iter().enumerate() {
            self.window.write(r + i, byte);
        }
        let mut next = len;

        // The zero-filled slots behind r are valid match sources
        for i in 1..=MAX_MATCH {
            self.tree.insert(&self.window, r - i);
        }
        let mut best = self.tree.insert(&self.window, r);

        while len > 0 {
            let mut match_length = best.length.min(len);

            let token = if match_length <= MATCH_THRESHOLD {
                match_length = 1;
                self.stats.literals += 1;
                Token::Literal(self.window.read(r))
            } else {
                self.stats.matches += 1;
                Token::new_match(best.position, match_length)
            };
            self.emit(token);

            let mut step = 0;
            while step < match_length && next < input.len() {
                self.tree.delete(s);
                self.window.write(s, input[next]);
                next += 1;
                s = (s + 1) & WINDOW_MASK;
                r = (r + 1) & WINDOW_MASK;
                best = self.tree.insert(&self.window, r);
                step += 1;
            }

            // Input exhausted: drain the lookahead
            while step < match_length {
                self.tree.delete(s);
                s = (s + 1) & WINDOW_MASK;
                r = (r + 1) & WINDOW_MASK;
                len -= 1;
                if len > 0 {
                    best = self.tree.insert(&self.window, r);
                }
                step += 1;
            }
        }

        if !self.block.is_empty() {
            self.block.flush_into(&mut self.output);
            self.stats.blocks += 1;
        }

        self.stats.output_bytes = self.output.len() as u64;
        (self.output, self.stats)
    }

    fn emit(&mut self, token: Token) {
        if self.block.push(token) {
            self.block.flush_into(&mut self.output);
            self.stats.blocks += 1;
        }
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
