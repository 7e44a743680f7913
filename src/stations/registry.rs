//! Station registry.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameRng, PassengerCounts, PlacementError, Position, StationType};
use crate::grid::GridIndex;

/// A station and its waiting passengers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub position: Position,
    pub station_type: StationType,
    /// Waiting passengers by destination type.
    pub queue: PassengerCounts,
}

impl Station {
    #[must_use]
    pub fn new(position: Position, station_type: StationType) -> Self {
        Self {
            position,
            station_type,
            queue: PassengerCounts::new(),
        }
    }

    /// Total waiting passengers.
    #[must_use]
    pub fn waiting(&self) -> u32 {
        self.queue.total()
    }
}

/// Owns every station, in spawn order, with O(1) lookup by tile.
///
/// ## Usage
///
/// ```
/// use minimetro_rl::core::{Position, StationType};
/// use minimetro_rl::grid::GridIndex;
/// use minimetro_rl::stations::StationRegistry;
///
/// let mut grid = GridIndex::new(3);
/// let mut stations = StationRegistry::new(10, 2);
///
/// stations.place_station(&mut grid, Position::new(0, 0), StationType::Circle).unwrap();
///
/// stations.enqueue_passenger(Position::new(0, 0), StationType::Square).unwrap();
/// assert!(!stations.overflowed());
///
/// let at_capacity = stations.enqueue_passenger(Position::new(0, 0), StationType::Square).unwrap();
/// assert!(at_capacity);
/// assert!(stations.overflowed());
/// ```
#[derive(Clone, Debug)]
pub struct StationRegistry {
    stations: Vector<Station>,
    by_position: FxHashMap<Position, usize>,
    max_stations: usize,
    capacity: u32,
    /// Latched by the first enqueue that fills a queue; never cleared.
    overflowed: bool,
}

impl StationRegistry {
    /// Create an empty registry.
    ///
    /// `capacity` is the queue size at which a station overflows.
    #[must_use]
    pub fn new(max_stations: usize, capacity: u32) -> Self {
        Self {
            stations: Vector::new(),
            by_position: FxHashMap::default(),
            max_stations,
            capacity,
            overflowed: false,
        }
    }

    /// Number of stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Queue size at which a station overflows.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Check if no more stations may spawn.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.stations.len() >= self.max_stations
    }

    /// Station at a tile.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&Station> {
        self.by_position.get(&pos).and_then(|&i| self.stations.get(i))
    }

    /// Iterate stations in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    /// Station types currently present on the board, ascending.
    #[must_use]
    pub fn present_types(&self) -> Vec<StationType> {
        StationType::ALL
            .into_iter()
            .filter(|&ty| self.stations.iter().any(|s| s.station_type == ty))
            .collect()
    }

    /// Total passengers waiting across all stations.
    #[must_use]
    pub fn total_waiting(&self) -> u32 {
        self.stations.iter().map(Station::waiting).sum()
    }

    /// Spawn a station on a uniformly chosen empty tile with a uniformly
    /// chosen type.
    ///
    /// Silently does nothing if the station limit is reached or the grid is
    /// full. Returns the new station's position.
    pub fn spawn_station(&mut self, grid: &mut GridIndex, rng: &mut GameRng) -> Option<Position> {
        if self.is_full() {
            return None;
        }

        let empty = grid.empty_tiles();
        let pos = *rng.choose(&empty)?;
        let station_type = StationType::ALL[rng.gen_index(StationType::COUNT)];

        self.insert(grid, Station::new(pos, station_type));
        debug!(%pos, %station_type, total = self.stations.len(), "station spawned");
        Some(pos)
    }

    /// Place a station at a chosen tile.
    ///
    /// Used to author scenarios; the spawn policy goes through `spawn_station`.
    pub fn place_station(
        &mut self,
        grid: &mut GridIndex,
        pos: Position,
        station_type: StationType,
    ) -> Result<(), PlacementError> {
        match grid.occupant_at(pos) {
            None => return Err(PlacementError::OutOfBounds(pos)),
            Some(tile) if !tile.is_empty() => return Err(PlacementError::Occupied(pos)),
            Some(_) => {}
        }
        if self.is_full() {
            return Err(PlacementError::StationLimit(self.max_stations));
        }

        self.insert(grid, Station::new(pos, station_type));
        Ok(())
    }

    /// Add a waiting passenger, then report whether the station is now at or
    /// over capacity.
    pub fn enqueue_passenger(
        &mut self,
        pos: Position,
        destination: StationType,
    ) -> Result<bool, PlacementError> {
        let index = *self
            .by_position
            .get(&pos)
            .ok_or(PlacementError::NoStation(pos))?;
        Ok(self.enqueue_at(index, destination))
    }

    /// Remove one waiting passenger bound for `destination`.
    ///
    /// Returns false if the tile has no station or no such passenger.
    pub fn take_passenger(&mut self, pos: Position, destination: StationType) -> bool {
        let Some(&index) = self.by_position.get(&pos) else {
            return false;
        };
        self.stations
            .get_mut(index)
            .is_some_and(|station| station.queue.take_one(destination))
    }

    /// Check if any enqueue so far filled a station to capacity.
    ///
    /// Sticky: boarding that later drains the queue does not clear it.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Enqueue at a spawn-order index and evaluate overflow for that station.
    pub(crate) fn enqueue_at(&mut self, index: usize, destination: StationType) -> bool {
        let capacity = self.capacity;
        let Some(station) = self.stations.get_mut(index) else {
            return false;
        };
        station.queue.add(destination, 1);
        let full = station.waiting() >= capacity;
        if full && !self.overflowed {
            debug!(pos = %station.position, waiting = station.waiting(), "station overflowed");
            self.overflowed = true;
        }
        full
    }

    fn insert(&mut self, grid: &mut GridIndex, station: Station) {
        grid.set_station(station.position, station.station_type);
        self.by_position.insert(station.position, self.stations.len());
        self.stations.push_back(station);
    }
}
