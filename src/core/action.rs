//! Agent actions and their per-step outcome.
//!
//! The agent submits exactly one `Action` per step. Each kind carries its
//! own typed fields, so a malformed action cannot be expressed; an action
//! can only be *illegal* for the current state, which the validator decides.

use serde::{Deserialize, Serialize};

use super::error::ActionError;
use super::position::Position;
use crate::lines::{LineEnd, LineId};

/// A single agent action.
///
/// ```
/// use minimetro_rl::core::{Action, Position};
/// use minimetro_rl::lines::LineId;
///
/// let create = Action::create_line((0, 0), (0, 1));
/// let extend = Action::extend_line(LineId::new(0), (0, 2));
///
/// assert_eq!(create, Action::CreateLine { from: Position::new(0, 0), to: Position::new(0, 1) });
/// assert!(matches!(extend, Action::ExtendLine { .. }));
/// assert!(Action::None.is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Build a new two-tile line between adjacent tiles.
    CreateLine { from: Position, to: Position },
    /// Grow a line by one tile at either end.
    ExtendLine { line: LineId, to: Position },
    /// Delete a line and its train. Passengers aboard are lost.
    RemoveLine { line: LineId },
    /// Do nothing this step.
    #[default]
    None,
}

impl Action {
    #[must_use]
    pub fn create_line(from: impl Into<Position>, to: impl Into<Position>) -> Self {
        Action::CreateLine {
            from: from.into(),
            to: to.into(),
        }
    }

    #[must_use]
    pub fn extend_line(line: LineId, to: impl Into<Position>) -> Self {
        Action::ExtendLine { line, to: to.into() }
    }

    #[must_use]
    pub fn remove_line(line: LineId) -> Self {
        Action::RemoveLine { line }
    }

    /// Check if this is the explicit no-op.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }
}

/// What a successfully applied action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ActionEffect {
    LineCreated { line: LineId },
    LineExtended { line: LineId, end: LineEnd },
    LineRemoved { line: LineId, dropped_passengers: u32 },
}

/// How the step's action was handled.
///
/// A rejected action leaves state exactly as `None` would, but stays
/// distinguishable here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The agent chose `Action::None`.
    Idle,
    /// The action was legal and applied.
    Applied(ActionEffect),
    /// The action was illegal and ignored.
    Rejected(ActionError),
    /// The episode had already ended; nothing was evaluated.
    Ignored,
}

impl ActionOutcome {
    /// Check if the action changed the network.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<&ActionError> {
        match self {
            ActionOutcome::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
