//! Train movement and the boarding/alighting protocol.
//!
//! Per step, per train, in ascending line order:
//! 1. Move one track along the current direction. A move that would run off
//!    either end reverses the direction and goes one track back instead, so
//!    a two-tile line bounces every step.
//! 2. If stopped at a station, every passenger bound for that station's type
//!    alights and counts as delivered.
//! 3. Board waiting passengers, sweeping destination types in ascending
//!    order and taking one of each per sweep, until the train is full or no
//!    waiting passenger is bound for a type served by this line.
//!
//! A train launched during the current step sits still until the next one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Position, StationType};
use crate::lines::{Line, LineEnd, LineId, LineManager};
use crate::stations::StationRegistry;

/// Travel direction along the track sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards higher track indices (+1).
    #[default]
    Forward,
    /// Towards lower track indices (-1).
    Backward,
}

impl Direction {
    /// `+1` or `-1`.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Passengers aboard a train, by destination. Sized for the default capacity.
pub type Onboard = SmallVec<[StationType; 6]>;

/// The single mobile unit bound to a line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Train {
    line: LineId,
    position: usize,
    direction: Direction,
    onboard: Onboard,
    launched_at: u64,
}

impl Train {
    fn new(line: LineId, launched_at: u64) -> Self {
        Self {
            line,
            position: 0,
            direction: Direction::Forward,
            onboard: SmallVec::new(),
            launched_at,
        }
    }

    #[must_use]
    pub fn line(&self) -> LineId {
        self.line
    }

    /// Index into the line's track sequence.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Destinations of the passengers aboard, in boarding order.
    #[must_use]
    pub fn onboard(&self) -> &[StationType] {
        &self.onboard
    }

    /// Timestep during which the train was launched.
    #[must_use]
    pub fn launched_at(&self) -> u64 {
        self.launched_at
    }

    /// Move one track along a line of `len` tracks, reflecting off the ends.
    fn advance(&mut self, len: usize) {
        let last = len.saturating_sub(1) as isize;
        let current = self.position as isize;
        let mut next = current + isize::from(self.direction.sign());

        if next < 0 || next > last {
            self.direction = self.direction.reversed();
            next = current + isize::from(self.direction.sign());
        }
        self.position = next.clamp(0, last) as usize;
    }

    /// Drop off every passenger bound for `station_type`.
    fn alight(&mut self, station_type: StationType) -> u32 {
        let before = self.onboard.len();
        self.onboard.retain(|dest| *dest != station_type);
        (before - self.onboard.len()) as u32
    }

    /// Pick up passengers at `tile` bound for any of `served`.
    fn board(
        &mut self,
        tile: Position,
        served: &[StationType],
        capacity: usize,
        stations: &mut StationRegistry,
    ) -> u32 {
        let mut boarded = 0;

        loop {
            let mut progressed = false;
            for &destination in served {
                if self.onboard.len() >= capacity {
                    return boarded;
                }
                if stations.take_passenger(tile, destination) {
                    self.onboard.push(destination);
                    boarded += 1;
                    progressed = true;
                }
            }
            if !progressed {
                return boarded;
            }
        }
    }
}

/// Result of advancing every train for one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementReport {
    /// Passengers delivered to a matching station.
    pub delivered: u32,
    /// Passengers picked up from station queues.
    pub boarded: u32,
}

/// Owns every train, one slot per line id.
#[derive(Clone, Debug, Default)]
pub struct TrainController {
    slots: Vec<Option<Train>>,
    capacity: usize,
}

impl TrainController {
    /// Create a controller for `max_lines` lines and trains holding `capacity` passengers.
    #[must_use]
    pub fn new(max_lines: usize, capacity: usize) -> Self {
        Self {
            slots: vec![None; max_lines],
            capacity,
        }
    }

    /// Passenger capacity of every train.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn get(&self, line: LineId) -> Option<&Train> {
        self.slots.get(line.index()).and_then(Option::as_ref)
    }

    /// Iterate trains in ascending line order.
    pub fn iter(&self) -> impl Iterator<Item = &Train> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of trains.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total passengers aboard all trains.
    #[must_use]
    pub fn total_onboard(&self) -> u32 {
        self.iter().map(|t| t.onboard.len() as u32).sum()
    }

    /// Launch a train at the head of a new line, heading forward.
    pub fn spawn_train(&mut self, line: LineId, timestep: u64) {
        if let Some(slot) = self.slots.get_mut(line.index()) {
            *slot = Some(Train::new(line, timestep));
        }
    }

    /// Destroy a line's train. Returns how many passengers were aboard; they are lost.
    pub fn remove_train(&mut self, line: LineId) -> u32 {
        let Some(train) = self.slots.get_mut(line.index()).and_then(Option::take) else {
            return 0;
        };
        let dropped = train.onboard.len() as u32;
        if dropped > 0 {
            debug!(%line, dropped, "passengers lost with removed train");
        }
        dropped
    }

    /// Keep a train on the same tile after its line grew.
    ///
    /// Prepending shifts every track index up by one.
    pub fn on_line_extended(&mut self, line: LineId, end: LineEnd) {
        if end != LineEnd::Head {
            return;
        }
        if let Some(train) = self.slots.get_mut(line.index()).and_then(Option::as_mut) {
            train.position += 1;
        }
    }

    /// Move every train one track and run alighting then boarding.
    ///
    /// Trains launched during `timestep` are skipped.
    pub fn advance_all(
        &mut self,
        timestep: u64,
        lines: &LineManager,
        stations: &mut StationRegistry,
    ) -> MovementReport {
        let mut report = MovementReport::default();
        let capacity = self.capacity;

        for train in self.slots.iter_mut().flatten() {
            if train.launched_at == timestep {
                continue;
            }
            let Some(line) = lines.get(train.line) else {
                continue;
            };
            let stop = Self::advance_one(train, line, capacity, stations);
            report.delivered += stop.delivered;
            report.boarded += stop.boarded;
        }

        report
    }

    fn advance_one(
        train: &mut Train,
        line: &Line,
        capacity: usize,
        stations: &mut StationRegistry,
    ) -> MovementReport {
        train.advance(line.len());

        let Some(tile) = line.track(train.position) else {
            return MovementReport::default();
        };
        trace!(line = %train.line, index = train.position, %tile, "train moved");

        let Some(station_type) = stations.get(tile).map(|s| s.station_type) else {
            return MovementReport::default();
        };

        let delivered = train.alight(station_type);
        let served = line.station_types(stations);
        let boarded = train.board(tile, &served, capacity, stations);

        if delivered > 0 || boarded > 0 {
            trace!(line = %train.line, %tile, delivered, boarded, "train stopped");
        }
        MovementReport { delivered, boarded }
    }
}
