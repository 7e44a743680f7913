//! Core engine types: positions, station types, RNG, configuration, actions, state.
//!
//! Everything here is shared by the component modules; none of it steps the
//! simulation on its own.

pub mod action;
pub mod config;
pub mod error;
pub mod position;
pub mod rng;
pub mod state;
pub mod station_type;

pub use action::{Action, ActionEffect, ActionOutcome};
pub use config::{MetroConfig, Mode, RewardConfig};
pub use error::{ActionError, ConfigError, PlacementError};
pub use position::Position;
pub use rng::GameRng;
pub use state::{GameState, Termination};
pub use station_type::{PassengerCounts, StationType, TileKind};
