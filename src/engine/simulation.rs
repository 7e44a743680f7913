//! The step engine.
//!
//! One call to `step` advances the world by one timestep in a fixed order:
//!
//! 1. Increment the timestep.
//! 2. Spawn (station first, then passengers).
//! 3. Validate and apply the agent's action.
//! 4. Advance every train (move, alight, board).
//! 5. Compute the reward.
//! 6. Check termination: overflow first, then the timestep limit.
//!
//! Overflow is latched by the registry the moment an enqueue fills a queue,
//! so boarding later in the same step cannot undo it.
//!
//! Once the episode has ended, further steps are ignored until `reset`.

use tracing::{debug, info};

use crate::core::{
    Action, ActionEffect, ActionError, ActionOutcome, ConfigError, GameState, MetroConfig, Mode,
    PlacementError, Position, StationType, Termination,
};
use crate::rules::{ActionValidator, Validated};
use crate::stations::{PassengerSpawner, SpawnReport};
use crate::trains::MovementReport;

use super::observation::Observation;

/// Per-step diagnostics beyond the reward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepInfo {
    /// How the submitted action was handled.
    pub outcome: ActionOutcome,
    /// Passengers delivered this step.
    pub delivered: u32,
    /// Passengers picked up this step.
    pub boarded: u32,
    /// Station spawned this step, if any.
    pub spawned_station: Option<Position>,
    /// Passengers spawned this step.
    pub spawned_passengers: u32,
    /// Passengers lost to a line removal this step.
    pub dropped_passengers: u32,
    /// Set on the step that ended the episode, and on every ignored step after it.
    pub termination: Option<Termination>,
}

impl StepInfo {
    fn ignored(termination: Option<Termination>) -> Self {
        Self {
            outcome: ActionOutcome::Ignored,
            delivered: 0,
            boarded: 0,
            spawned_station: None,
            spawned_passengers: 0,
            dropped_passengers: 0,
            termination,
        }
    }
}

/// Result of one step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: i64,
    pub game_over: bool,
    pub info: StepInfo,
}

/// Owns the state and drives it one step at a time.
///
/// ```
/// use minimetro_rl::core::{Action, MetroConfig};
/// use minimetro_rl::engine::SimulationEngine;
///
/// let mut engine = SimulationEngine::new(MetroConfig::default(), 7).unwrap();
/// let result = engine.step(Action::None);
///
/// assert_eq!(result.reward, -1);
/// assert_eq!(result.observation.timestep, 1);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationEngine {
    config: MetroConfig,
    spawner: PassengerSpawner,
    validator: ActionValidator,
    seed: u64,
    state: GameState,
}

impl SimulationEngine {
    /// Create an engine in its initial state.
    pub fn new(config: MetroConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(&config, seed);
        Ok(Self {
            spawner: PassengerSpawner::from_config(&config),
            validator: ActionValidator,
            seed,
            state,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &MetroConfig {
        &self.config
    }

    /// Seed of the current episode.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Restart the episode with the same seed.
    pub fn reset(&mut self) -> Observation {
        self.reset_with_seed(self.seed)
    }

    /// Restart the episode with a new seed.
    pub fn reset_with_seed(&mut self, seed: u64) -> Observation {
        self.seed = seed;
        self.state = GameState::new(&self.config, seed);
        debug!(seed, "episode reset");
        self.observe()
    }

    #[must_use]
    pub fn observe(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    /// Every action that would be applied if submitted now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.validator.legal_actions(&self.state)
    }

    /// Check an action without applying it.
    pub fn validate(&self, action: &Action) -> Result<Validated, ActionError> {
        self.validator.validate(&self.state, action)
    }

    /// Advance the simulation by one timestep.
    pub fn step(&mut self, action: Action) -> StepResult {
        if let Some(termination) = self.state.termination {
            return StepResult {
                observation: self.observe(),
                reward: 0,
                game_over: true,
                info: StepInfo::ignored(Some(termination)),
            };
        }

        self.state.timestep += 1;
        let timestep = self.state.timestep;

        let spawn = self.spawn(timestep);
        let outcome = self.apply_action(action, timestep);
        let movement = self.state.trains.advance_all(
            timestep,
            &self.state.lines,
            &mut self.state.stations,
        );

        let (reward, termination) = self.score_step(&movement);
        self.state.score += reward;
        self.state.termination = termination;

        if let Some(reason) = termination {
            info!(
                ?reason,
                timestep,
                score = self.state.score,
                stations = self.state.stations.len(),
                "episode ended"
            );
        }

        let dropped_passengers = match outcome {
            ActionOutcome::Applied(ActionEffect::LineRemoved {
                dropped_passengers, ..
            }) => dropped_passengers,
            _ => 0,
        };

        StepResult {
            observation: self.observe(),
            reward,
            game_over: termination.is_some(),
            info: StepInfo {
                outcome,
                delivered: movement.delivered,
                boarded: movement.boarded,
                spawned_station: spawn.station,
                spawned_passengers: spawn.passengers,
                dropped_passengers,
                termination,
            },
        }
    }

    /// Text dump of the current observation in agent mode.
    ///
    /// Returns `None` in render mode, where an external renderer consumes
    /// observations instead.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        match self.config.mode {
            Mode::Agent => Some(self.render_text()),
            Mode::Render => None,
        }
    }

    /// Text dump of the current observation, regardless of mode.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.observe().to_string()
    }

    /// Copy the engine for lookahead with an independent random stream.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            config: self.config.clone(),
            spawner: self.spawner,
            validator: self.validator,
            seed: self.seed,
            state: self.state.fork(),
        }
    }

    /// Place a station directly, bypassing the spawner.
    ///
    /// Intended for scenario setup before the first step.
    pub fn place_station(&mut self, pos: Position, station_type: StationType) -> Result<(), PlacementError> {
        self.state
            .stations
            .place_station(&mut self.state.grid, pos, station_type)
    }

    /// Enqueue `count` passengers at a station, bypassing the spawner.
    ///
    /// Filling a queue latches overflow; the episode ends on the next `step`.
    pub fn seed_passengers(
        &mut self,
        pos: Position,
        destination: StationType,
        count: u32,
    ) -> Result<(), PlacementError> {
        for _ in 0..count {
            self.state.stations.enqueue_passenger(pos, destination)?;
        }
        Ok(())
    }

    fn spawn(&mut self, timestep: u64) -> SpawnReport {
        let state = &mut self.state;
        self.spawner
            .run(timestep, &mut state.stations, &mut state.grid, &mut state.rng)
    }

    fn apply_action(&mut self, action: Action, timestep: u64) -> ActionOutcome {
        let result = self
            .validator
            .validate(&self.state, &action)
            .and_then(|valid| self.apply(valid, timestep));

        match result {
            Ok(Some(effect)) => ActionOutcome::Applied(effect),
            Ok(None) => ActionOutcome::Idle,
            Err(err) => {
                debug!(?action, %err, timestep, "action rejected");
                ActionOutcome::Rejected(err)
            }
        }
    }

    fn apply(&mut self, valid: Validated, timestep: u64) -> Result<Option<ActionEffect>, ActionError> {
        let state = &mut self.state;

        let effect = match valid.action() {
            Action::CreateLine { from, to } => {
                let line = state
                    .lines
                    .create_line(from, to)
                    .ok_or(ActionError::LineLimitReached(state.lines.max_lines()))?;
                state.trains.spawn_train(line, timestep);
                ActionEffect::LineCreated { line }
            }
            Action::ExtendLine { line, to } => {
                let end = state
                    .lines
                    .extend_line(line, to)
                    .ok_or(ActionError::NotAtEndpoint(to, line))?;
                state.trains.on_line_extended(line, end);
                ActionEffect::LineExtended { line, end }
            }
            Action::RemoveLine { line } => {
                state
                    .lines
                    .remove_line(line)
                    .ok_or(ActionError::UnknownLine(line))?;
                let dropped_passengers = state.trains.remove_train(line);
                ActionEffect::LineRemoved {
                    line,
                    dropped_passengers,
                }
            }
            Action::None => return Ok(None),
        };

        Ok(Some(effect))
    }

    fn score_step(&self, movement: &MovementReport) -> (i64, Option<Termination>) {
        let rewards = &self.config.rewards;
        let mut reward = i64::from(movement.delivered) * rewards.passenger_delivered + rewards.time_penalty;

        let termination = if self.state.stations.overflowed() {
            reward += rewards.game_over_penalty;
            Some(Termination::Overflow)
        } else if self.state.timestep >= self.config.max_timesteps {
            Some(Termination::Timeout)
        } else {
            None
        };

        (reward, termination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::LineId;

    fn quiet_config() -> MetroConfig {
        MetroConfig::default()
            .with_grid_size(4)
            .with_station_spawn_rate(1000)
            .with_passenger_spawn_rate(1000)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = SimulationEngine::new(MetroConfig::default().with_grid_size(0), 1).unwrap_err();
        assert_eq!(err, ConfigError::EmptyGrid);
    }

    #[test]
    fn test_idle_step() {
        let mut engine = SimulationEngine::new(quiet_config(), 1).unwrap();
        let result = engine.step(Action::None);

        assert_eq!(result.reward, -1);
        assert!(!result.game_over);
        assert_eq!(result.info.outcome, ActionOutcome::Idle);
        assert_eq!(engine.state().timestep(), 1);
        assert_eq!(engine.state().score(), -1);
    }

    #[test]
    fn test_rejected_action_is_reported() {
        let mut engine = SimulationEngine::new(quiet_config(), 1).unwrap();
        let result = engine.step(Action::create_line((0, 0), (2, 0)));

        assert_eq!(
            result.info.outcome,
            ActionOutcome::Rejected(ActionError::NotAdjacent(Position::new(0, 0), Position::new(2, 0)))
        );
        assert_eq!(result.reward, -1);
        assert!(engine.state().lines().is_empty());
    }

    #[test]
    fn test_create_launches_train_that_waits() {
        let mut engine = SimulationEngine::new(quiet_config(), 1).unwrap();
        let result = engine.step(Action::create_line((0, 0), (1, 0)));

        let id = LineId::new(0);
        assert_eq!(
            result.info.outcome,
            ActionOutcome::Applied(ActionEffect::LineCreated { line: id })
        );
        let line = result.observation.line(id).unwrap();
        assert_eq!(line.train_index, 0);

        let result = engine.step(Action::None);
        assert_eq!(result.observation.line(id).unwrap().train_index, 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = SimulationEngine::new(quiet_config(), 5).unwrap();
        let initial = engine.observe();

        engine.step(Action::create_line((0, 0), (1, 0)));
        engine.step(Action::None);
        let obs = engine.reset();

        assert_eq!(obs, initial);
        assert_eq!(engine.seed(), 5);

        engine.reset_with_seed(9);
        assert_eq!(engine.seed(), 9);
        assert_eq!(engine.state().timestep(), 0);
    }

    #[test]
    fn test_render_depends_on_mode() {
        let engine = SimulationEngine::new(quiet_config(), 1).unwrap();
        assert!(engine.render().unwrap().starts_with("Timestep: 0"));

        let engine = SimulationEngine::new(quiet_config().with_mode(Mode::Render), 1).unwrap();
        assert!(engine.render().is_none());
        assert!(!engine.render_text().is_empty());
    }

    #[test]
    fn test_fork_does_not_touch_original() {
        let mut engine = SimulationEngine::new(quiet_config(), 1).unwrap();
        let mut fork = engine.fork();

        fork.step(Action::create_line((0, 0), (1, 0)));

        assert_eq!(engine.state().timestep(), 0);
        assert!(engine.state().lines().is_empty());
        assert_eq!(fork.state().lines().len(), 1);
    }

    #[test]
    fn test_seed_passengers_requires_station() {
        let mut engine = SimulationEngine::new(quiet_config(), 1).unwrap();
        let pos = Position::new(1, 1);

        assert_eq!(
            engine.seed_passengers(pos, StationType::Square, 1),
            Err(PlacementError::NoStation(pos))
        );

        engine.place_station(pos, StationType::Circle).unwrap();
        engine.seed_passengers(pos, StationType::Square, 3).unwrap();
        assert_eq!(engine.state().passengers_in_system(), 3);
    }
}
