//! Transit lines: ordered sequences of adjacent tiles.
//!
//! `LineManager` exclusively owns every line's track sequence. Trains read
//! it to move but never mutate it.

pub mod manager;

pub use manager::{Line, LineEnd, LineId, LineManager};
