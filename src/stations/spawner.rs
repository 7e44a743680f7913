//! Periodic spawn policy.
//!
//! Two independent clocks, both keyed off the global timestep rather than
//! per-entity timers:
//! - every `station_spawn_rate` steps one station spawns
//! - every `passenger_spawn_rate` steps every station gains one passenger
//!
//! A passenger's destination is drawn uniformly from the station types on the
//! board other than its origin's type. Stations whose type is the only one
//! present are skipped.

use tracing::trace;

use crate::core::{GameRng, MetroConfig, Position, StationType};
use crate::grid::GridIndex;

use super::registry::StationRegistry;

/// What the spawner created during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    /// Position of the station spawned this step, if any.
    pub station: Option<Position>,
    /// Passengers enqueued this step.
    pub passengers: u32,
    /// Some enqueue this step filled a station to capacity.
    pub overflowed: bool,
}

/// Spawn cadence for stations and passengers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassengerSpawner {
    station_spawn_rate: u64,
    passenger_spawn_rate: u64,
}

impl PassengerSpawner {
    /// Create a spawner. Rates must be non-zero (checked by config validation).
    #[must_use]
    pub fn new(station_spawn_rate: u64, passenger_spawn_rate: u64) -> Self {
        Self {
            station_spawn_rate,
            passenger_spawn_rate,
        }
    }

    #[must_use]
    pub fn from_config(config: &MetroConfig) -> Self {
        Self::new(config.station_spawn_rate, config.passenger_spawn_rate)
    }

    /// Run both policies for `timestep`. Stations spawn before passengers.
    pub fn run(
        &self,
        timestep: u64,
        stations: &mut StationRegistry,
        grid: &mut GridIndex,
        rng: &mut GameRng,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();

        if timestep % self.station_spawn_rate == 0 {
            report.station = stations.spawn_station(grid, rng);
        }

        if timestep % self.passenger_spawn_rate == 0 {
            let (passengers, overflowed) = self.spawn_passengers(stations, rng);
            report.passengers = passengers;
            report.overflowed = overflowed;
        }

        report
    }

    /// Returns how many passengers spawned and whether any station filled up.
    fn spawn_passengers(&self, stations: &mut StationRegistry, rng: &mut GameRng) -> (u32, bool) {
        let present = stations.present_types();
        let origins: Vec<StationType> = stations.iter().map(|s| s.station_type).collect();
        let mut spawned = 0;
        let mut overflowed = false;

        for (index, origin) in origins.into_iter().enumerate() {
            let destinations: Vec<StationType> =
                present.iter().copied().filter(|&ty| ty != origin).collect();

            let Some(&destination) = rng.choose(&destinations) else {
                continue;
            };

            let full = stations.enqueue_at(index, destination);
            overflowed |= full;
            spawned += 1;
            trace!(%origin, %destination, full, "passenger spawned");
        }

        (spawned, overflowed)
    }
}
