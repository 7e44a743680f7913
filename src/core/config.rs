//! Environment configuration.
//!
//! - `MetroConfig`: board size, spawn cadence, capacities, episode length
//! - `RewardConfig`: reward shaping constants
//!
//! Both are validated once, when the engine is built. Nothing in the step
//! loop re-checks them.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How the environment is being consumed.
///
/// `Render` means an external renderer reads snapshots; the engine itself
/// behaves identically in both modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Agent,
    Render,
}

/// Reward shaping constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Reward per delivered passenger.
    pub passenger_delivered: i64,

    /// Flat reward added every step (negative = penalty).
    pub time_penalty: i64,

    /// Reward added on overflow (negative = penalty). Not applied on timeout.
    pub game_over_penalty: i64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            passenger_delivered: 10,
            time_penalty: -1,
            game_over_penalty: -100,
        }
    }
}

/// Complete environment configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetroConfig {
    /// Side length of the square grid.
    pub grid_size: usize,

    /// Maximum simultaneous lines. Line ids live in `0..max_lines`.
    pub max_lines: usize,

    /// A station spawns every `station_spawn_rate` timesteps.
    pub station_spawn_rate: u64,

    /// Station spawning stops once this many exist.
    pub max_stations: usize,

    /// Every station gains a passenger every `passenger_spawn_rate` timesteps.
    pub passenger_spawn_rate: u64,

    /// Maximum passengers aboard one train.
    pub train_capacity: usize,

    /// A station whose queue reaches this size overflows and ends the episode.
    pub station_capacity: u32,

    /// Episode length limit.
    pub max_timesteps: u64,

    pub mode: Mode,

    pub rewards: RewardConfig,
}

impl Default for MetroConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            max_lines: 3,
            station_spawn_rate: 50,
            max_stations: 10,
            passenger_spawn_rate: 10,
            train_capacity: 6,
            station_capacity: 10,
            max_timesteps: 1000,
            mode: Mode::Agent,
            rewards: RewardConfig::default(),
        }
    }
}

impl MetroConfig {
    /// Check every parameter. Called by `SimulationEngine::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if i32::try_from(self.grid_size).is_err() {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.station_spawn_rate == 0 {
            return Err(ConfigError::ZeroRate("station_spawn_rate"));
        }
        if self.passenger_spawn_rate == 0 {
            return Err(ConfigError::ZeroRate("passenger_spawn_rate"));
        }
        if self.station_capacity == 0 {
            return Err(ConfigError::ZeroStationCapacity);
        }
        if self.max_timesteps == 0 {
            return Err(ConfigError::ZeroTimesteps);
        }
        Ok(())
    }

    #[must_use]
    pub fn with_grid_size(mut self, size: usize) -> Self {
        self.grid_size = size;
        self
    }

    #[must_use]
    pub fn with_max_lines(mut self, max: usize) -> Self {
        self.max_lines = max;
        self
    }

    #[must_use]
    pub fn with_station_spawn_rate(mut self, rate: u64) -> Self {
        self.station_spawn_rate = rate;
        self
    }

    #[must_use]
    pub fn with_max_stations(mut self, max: usize) -> Self {
        self.max_stations = max;
        self
    }

    #[must_use]
    pub fn with_passenger_spawn_rate(mut self, rate: u64) -> Self {
        self.passenger_spawn_rate = rate;
        self
    }

    #[must_use]
    pub fn with_train_capacity(mut self, capacity: usize) -> Self {
        self.train_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_station_capacity(mut self, capacity: u32) -> Self {
        self.station_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_timesteps(mut self, max: u64) -> Self {
        self.max_timesteps = max;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }
}
