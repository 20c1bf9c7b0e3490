use super::constants::{LOOKAHEAD_MIRROR, MAX_MATCH, WINDOW_MASK, WINDOW_SIZE, WINDOW_START};

/// 4KB circular history buffer with a 17-byte lookahead mirror
///
/// Bytes written to positions 0..17 are also copied to 4096..4113 so that an
/// 18-byte key starting anywhere in the window can be read as one contiguous
/// slice.
pub struct HistoryWindow {
    buffer: Box<[u8; WINDOW_SIZE + LOOKAHEAD_MIRROR]>,
    /// Next write position for `put` (0-4095)
    cursor: usize,
}

impl HistoryWindow {
    pub fn new() -> Self {
        Self { buffer: Box::new([0u8; WINDOW_SIZE + LOOKAHEAD_MIRROR]), cursor: WINDOW_START }
    }

    /// Append a byte at the cursor, returning the position it was written to
    #[inline]
    pub fn put(&mut self, byte: u8) -> usize {
        let position = self.cursor;
        self.write(position, byte);
        self.cursor = (self.cursor + 1) & WINDOW_MASK;
        position
    }

    /// Overwrite the byte at `position` (mod 4096), keeping the mirror in sync
    #[inline]
    pub fn write(&mut self, position: usize, byte: u8) {
        let position = position & WINDOW_MASK;
        self.buffer[position] = byte;
        if position < LOOKAHEAD_MIRROR {
            self.buffer[position + WINDOW_SIZE] = byte;
        }
    }

    #[inline]
    pub fn read(&self, position: usize) -> u8 {
        self.buffer[position & WINDOW_MASK]
    }

    /// The 18 bytes starting at `position`, read through the mirror
    ///
    /// `position` must already be a window position (0-4095).
    #[inline]
    pub fn key(&self, position: usize) -> &[u8] {
        &self.buffer[position..position + MAX_MATCH]
    }

    /// Copy `length` bytes starting at window `position` to the cursor.
    ///
    /// Each copied byte is written before the next one is read, so a source
    /// range overlapping the cursor expands into a repeating run.
    pub fn copy_match(&mut self, position: usize, length: usize, out: &mut Vec<u8>) {
        for src in position..position + length {
            let byte = self.read(src);
            self.put(byte);
            out.push(byte);
        }
    }

    /// Current write cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self::new()
    }
}
