//! # minimetro-rl
//!
//! A deterministic, turn-based transit network simulation built as a
//! reinforcement learning environment.
//!
//! Stations appear on a square grid and accumulate passengers bound for other
//! station types. Each step the agent may build, extend, or remove a line;
//! every line runs one shuttling train that carries passengers to matching
//! stations. The episode ends when any station overflows or the step limit is
//! reached.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: All randomness flows through one seeded `GameRng`.
//!    The same seed and action sequence always produce the same episode.
//!
//! 2. **Illegal Is Not Fatal**: An illegal action is a no-op for the step,
//!    reported in `StepInfo` rather than returned as an error.
//!
//! 3. **Cheap Snapshots**: Track sequences and the station list use `im-rs`
//!    persistent vectors, so cloning or forking a state is cheap.
//!
//! ## Modules
//!
//! - `core`: Positions, station types, RNG, configuration, actions, state
//! - `grid`: Tile occupancy and adjacency
//! - `stations`: Station registry, passenger queues, spawn policy
//! - `lines`: Line ids and track sequences
//! - `trains`: Train movement, boarding, alighting
//! - `rules`: Action validation and legal action enumeration
//! - `engine`: The step loop and observations

pub mod core;
pub mod engine;
pub mod grid;
pub mod lines;
pub mod rules;
pub mod stations;
pub mod trains;

pub use crate::core::{
    Action, ActionEffect, ActionError, ActionOutcome, ConfigError, GameRng, GameState,
    MetroConfig, Mode, PassengerCounts, PlacementError, Position, RewardConfig, StationType,
    Termination, TileKind,
};

pub use crate::engine::{
    LineObservation, Observation, SimulationEngine, StationObservation, StepInfo, StepResult,
};

pub use crate::grid::GridIndex;
pub use crate::lines::{Line, LineEnd, LineId, LineManager};
pub use crate::rules::{ActionValidator, Validated};
pub use crate::stations::{PassengerSpawner, SpawnReport, Station, StationRegistry};
pub use crate::trains::{Direction, MovementReport, Train, TrainController};
