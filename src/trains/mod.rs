//! Trains: one per line, shuttling end to end.
//!
//! A train's position is an index into its line's track sequence, never a
//! raw coordinate. Each step a train moves one track, drops off passengers
//! whose destination matches the station it stopped at, then picks up
//! passengers it can deliver somewhere on its own line.

pub mod controller;

pub use controller::{Direction, MovementReport, Train, TrainController};
