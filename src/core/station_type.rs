//! Station types, tile kinds, and per-type passenger tallies.
//!
//! Passengers are fungible within a destination type, so they are never
//! tracked individually: a station's queue is a `PassengerCounts` and a
//! train's load is a multiset of `StationType`s.

use serde::{Deserialize, Serialize};

/// Station shape. Passengers travel to a station *type*, not a specific station.
///
/// The declaration order (Circle < Square < Triangle) is the tie-break order
/// used everywhere a deterministic sweep over types is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationType {
    Circle,
    Square,
    Triangle,
}

impl StationType {
    /// Number of station types.
    pub const COUNT: usize = 3;

    /// All station types in ascending order.
    pub const ALL: [StationType; Self::COUNT] =
        [StationType::Circle, StationType::Square, StationType::Triangle];

    /// Dense index in `0..COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            StationType::Circle => 0,
            StationType::Square => 1,
            StationType::Triangle => 2,
        }
    }

    /// Single-character glyph used by the text dump.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            StationType::Circle => 'O',
            StationType::Square => '#',
            StationType::Triangle => '^',
        }
    }
}

impl std::fmt::Display for StationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StationType::Circle => "circle",
            StationType::Square => "square",
            StationType::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// What occupies a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    #[default]
    Empty,
    Station(StationType),
}

impl TileKind {
    /// The station type, if this tile holds a station.
    #[must_use]
    pub const fn station_type(self) -> Option<StationType> {
        match self {
            TileKind::Empty => None,
            TileKind::Station(ty) => Some(ty),
        }
    }

    /// Check if the tile is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, TileKind::Empty)
    }
}

/// Waiting passengers, counted per destination type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PassengerCounts {
    counts: [u32; StationType::COUNT],
}

impl PassengerCounts {
    /// Create an empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: [0; StationType::COUNT],
        }
    }

    /// Passengers waiting for a destination type.
    #[must_use]
    pub const fn get(&self, destination: StationType) -> u32 {
        self.counts[destination.index()]
    }

    /// Total passengers across all destinations.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Check if no passengers are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Add passengers for a destination.
    pub fn add(&mut self, destination: StationType, count: u32) {
        self.counts[destination.index()] += count;
    }

    /// Remove one passenger for a destination.
    ///
    /// Returns false if none were waiting.
    pub fn take_one(&mut self, destination: StationType) -> bool {
        let slot = &mut self.counts[destination.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Iterate `(type, count)` pairs in ascending type order, including zeros.
    pub fn iter(&self) -> impl Iterator<Item = (StationType, u32)> + '_ {
        StationType::ALL.into_iter().map(|ty| (ty, self.get(ty)))
    }
}
