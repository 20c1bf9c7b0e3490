pub mod parallel;

pub use parallel::{BatchCodec, Operation};
