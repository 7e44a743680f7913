//! Error types.
//!
//! None of these are fatal to an episode: configuration errors stop an engine
//! from being built, action errors downgrade the action to a no-op, and
//! placement errors reject a scenario-setup call.

use thiserror::Error;

use super::position::Position;
use crate::lines::LineId;

/// Malformed construction parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be at least 1")]
    EmptyGrid,

    #[error("grid size {0} does not fit in tile coordinates")]
    GridTooLarge(usize),

    #[error("{0} must be at least 1")]
    ZeroRate(&'static str),

    #[error("station capacity must be at least 1")]
    ZeroStationCapacity,

    #[error("max timesteps must be at least 1")]
    ZeroTimesteps,
}

/// Reasons an agent action is rejected. A rejected action is applied as a no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("positions {0} and {1} are not adjacent")]
    NotAdjacent(Position, Position),

    #[error("maximum number of lines ({0}) reached")]
    LineLimitReached(usize),

    #[error("a line between {0} and {1} already exists")]
    DuplicateLine(Position, Position),

    #[error("line {0} does not exist")]
    UnknownLine(LineId),

    #[error("position {0} is not adjacent to either end of line {1}")]
    NotAtEndpoint(Position, LineId),

    #[error("line {1} already passes through {0}")]
    AlreadyOnLine(Position, LineId),
}

/// Reasons a scenario-setup placement is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("position {0} is outside the grid")]
    OutOfBounds(Position),

    #[error("tile {0} already holds a station")]
    Occupied(Position),

    #[error("station limit ({0}) reached")]
    StationLimit(usize),

    #[error("no station at {0}")]
    NoStation(Position),
}
