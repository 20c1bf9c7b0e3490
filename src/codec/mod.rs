pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod tokens;
pub mod tree;
pub mod window;

pub use constants::*;
pub use decoder::{DecodeLimit, Decoder};
pub use encoder::{EncodeStats, Encoder};
pub use tokens::{CodedBlock, Token, TokenReader};
pub use tree::{Match, MatchTree};
pub use window::HistoryWindow;
