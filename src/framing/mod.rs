pub mod header;

pub use header::{frame, FrameHeader, FRAME_HEADER_SIZE};
