//! Game state aggregate.
//!
//! `GameState` owns the five mutable collections (grid, stations, lines,
//! trains, and the random source) plus the episode counters. It is mutated
//! only inside `SimulationEngine::step`; everything public here is read-only.
//!
//! Track sequences and the station list are `im` persistent vectors, so
//! cloning a state for a snapshot or a lookahead fork is cheap.

use super::config::MetroConfig;
use super::rng::GameRng;
use crate::grid::GridIndex;
use crate::lines::LineManager;
use crate::stations::StationRegistry;
use crate::trains::TrainController;

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A station's queue reached capacity.
    Overflow,
    /// `max_timesteps` was reached.
    Timeout,
}

/// Complete simulation state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) grid: GridIndex,
    pub(crate) stations: StationRegistry,
    pub(crate) lines: LineManager,
    pub(crate) trains: TrainController,
    pub(crate) rng: GameRng,
    pub(crate) timestep: u64,
    pub(crate) score: i64,
    pub(crate) termination: Option<Termination>,
}

impl GameState {
    /// Create the initial state: empty grid, no stations, no lines.
    ///
    /// The config is assumed valid.
    #[must_use]
    pub fn new(config: &MetroConfig, seed: u64) -> Self {
        Self {
            grid: GridIndex::new(config.grid_size),
            stations: StationRegistry::new(config.max_stations, config.station_capacity),
            lines: LineManager::new(config.max_lines),
            trains: TrainController::new(config.max_lines, config.train_capacity),
            rng: GameRng::new(seed),
            timestep: 0,
            score: 0,
            termination: None,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    #[must_use]
    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    #[must_use]
    pub fn lines(&self) -> &LineManager {
        &self.lines
    }

    #[must_use]
    pub fn trains(&self) -> &TrainController {
        &self.trains
    }

    /// Completed steps.
    #[must_use]
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    /// Cumulative reward.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.termination.is_some()
    }

    /// Why the episode ended, if it has.
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Passengers waiting at stations plus passengers aboard trains.
    #[must_use]
    pub fn passengers_in_system(&self) -> u32 {
        self.stations.total_waiting() + self.trains.total_onboard()
    }

    /// Clone with an independent random stream.
    ///
    /// Takes `&mut self` because forking the RNG advances the fork counter.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            rng: self.rng.fork(),
            ..self.clone()
        }
    }
}
