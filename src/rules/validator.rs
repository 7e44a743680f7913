//! Action validation and legal action enumeration.
//!
//! Validation never mutates state. A `Validated` action can only be produced
//! here, so the engine's apply path never has to re-check preconditions.

use crate::core::{Action, ActionError, GameState, Position};
use crate::lines::LineId;

/// An action that passed validation against a specific state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validated {
    action: Action,
}

impl Validated {
    /// The underlying action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }
}

/// Gatekeeper for the single per-step agent action.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActionValidator;

impl ActionValidator {
    /// Check an action against the current state.
    pub fn validate(&self, state: &GameState, action: &Action) -> Result<Validated, ActionError> {
        match *action {
            Action::CreateLine { from, to } => self.check_create(state, from, to)?,
            Action::ExtendLine { line, to } => self.check_extend(state, line, to)?,
            Action::RemoveLine { line } => {
                state.lines().get(line).ok_or(ActionError::UnknownLine(line))?;
            }
            Action::None => {}
        }

        Ok(Validated { action: *action })
    }

    /// Every action that would currently validate.
    ///
    /// Ordered: `None`, removals, creations (row-major origin, then
    /// neighbour order), extensions (by line, head side first).
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let grid = state.grid();
        let lines = state.lines();
        let mut actions = vec![Action::None];

        actions.extend(lines.iter().map(|line| Action::remove_line(line.id())));

        if !lines.is_full() {
            for (from, _) in grid.iter() {
                for to in grid.neighbors(from) {
                    if !lines.has_segment_line(from, to) {
                        actions.push(Action::CreateLine { from, to });
                    }
                }
            }
        }

        for line in lines.iter() {
            for endpoint in [line.head(), line.tail()] {
                for to in grid.neighbors(endpoint) {
                    let action = Action::ExtendLine { line: line.id(), to };
                    if line.extension_end(to).is_some() && !actions.contains(&action) {
                        actions.push(action);
                    }
                }
            }
        }

        actions
    }

    fn check_bounds(&self, state: &GameState, pos: Position) -> Result<(), ActionError> {
        if state.grid().contains(pos) {
            Ok(())
        } else {
            Err(ActionError::OutOfBounds(pos))
        }
    }

    fn check_create(&self, state: &GameState, from: Position, to: Position) -> Result<(), ActionError> {
        let lines = state.lines();
        if lines.is_full() {
            return Err(ActionError::LineLimitReached(lines.max_lines()));
        }
        self.check_bounds(state, from)?;
        self.check_bounds(state, to)?;
        if !state.grid().is_adjacent(from, to) {
            return Err(ActionError::NotAdjacent(from, to));
        }
        if lines.has_segment_line(from, to) {
            return Err(ActionError::DuplicateLine(from, to));
        }
        Ok(())
    }

    fn check_extend(&self, state: &GameState, id: LineId, to: Position) -> Result<(), ActionError> {
        let line = state.lines().get(id).ok_or(ActionError::UnknownLine(id))?;
        self.check_bounds(state, to)?;
        if line.contains(to) {
            return Err(ActionError::AlreadyOnLine(to, id));
        }
        line.extension_end(to)
            .map(|_| ())
            .ok_or(ActionError::NotAtEndpoint(to, id))
    }
}
