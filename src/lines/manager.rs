//! Line lifecycle and track bookkeeping.
//!
//! ## Invariants
//!
//! - Every line has at least two tracks.
//! - Consecutive tracks are orthogonally adjacent.
//! - No position appears twice within one line. Different lines may share tiles.
//! - Line ids are slots in `0..max_lines`; a removed line's id is reused by
//!   the next creation.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Position, StationType};
use crate::stations::StationRegistry;

/// Line identifier, a slot in `0..max_lines`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineId(pub u16);

impl LineId {
    /// Create a new line ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line({})", self.0)
    }
}

/// Which end of a line was extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEnd {
    /// `tracks[0]`; extending here prepends and shifts every index by one.
    Head,
    /// `tracks[len - 1]`; extending here appends.
    Tail,
}

/// An ordered run of adjacent tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    id: LineId,
    tracks: Vector<Position>,
}

impl Line {
    #[must_use]
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Track sequence, head first.
    #[must_use]
    pub fn tracks(&self) -> &Vector<Position> {
        &self.tracks
    }

    /// Number of tiles on the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Lines always have at least two tracks, so this is always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tile at a track index.
    #[must_use]
    pub fn track(&self, index: usize) -> Option<Position> {
        self.tracks.get(index).copied()
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.tracks[0]
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.tracks[self.tracks.len() - 1]
    }

    /// Check if the line passes through a tile.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.tracks.contains(&pos)
    }

    /// Check if the line is exactly the two-tile run `a`-`b`, either way round.
    #[must_use]
    pub fn is_segment(&self, a: Position, b: Position) -> bool {
        self.tracks.len() == 2
            && ((self.tracks[0] == a && self.tracks[1] == b)
                || (self.tracks[0] == b && self.tracks[1] == a))
    }

    /// Which end `to` would attach to, or `None` if it cannot extend the line.
    ///
    /// `to` must be adjacent to an endpoint and not already on the line
    /// (which also rules out closing a loop onto the other endpoint). The head
    /// wins when `to` touches both ends.
    #[must_use]
    pub fn extension_end(&self, to: Position) -> Option<LineEnd> {
        if self.contains(to) {
            None
        } else if self.head().is_adjacent(to) {
            Some(LineEnd::Head)
        } else if self.tail().is_adjacent(to) {
            Some(LineEnd::Tail)
        } else {
            None
        }
    }

    /// Station types served by this line, ascending.
    #[must_use]
    pub fn station_types(&self, stations: &StationRegistry) -> Vec<StationType> {
        let mut served = [false; StationType::COUNT];
        for &pos in &self.tracks {
            if let Some(station) = stations.get(pos) {
                served[station.station_type.index()] = true;
            }
        }
        StationType::ALL
            .into_iter()
            .filter(|ty| served[ty.index()])
            .collect()
    }
}

/// Owns every line, indexed by id.
///
/// Mutating operations assume their input was validated by the rules layer;
/// on bad input they return `None` and leave the lines untouched.
///
/// ## Usage
///
/// ```
/// use minimetro_rl::core::Position;
/// use minimetro_rl::lines::{LineEnd, LineManager};
///
/// let mut lines = LineManager::new(3);
/// let id = lines.create_line(Position::new(0, 0), Position::new(0, 1)).unwrap();
///
/// assert_eq!(lines.extend_line(id, Position::new(0, 2)), Some(LineEnd::Tail));
/// assert_eq!(lines.get(id).unwrap().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineManager {
    slots: Vec<Option<Line>>,
}

impl LineManager {
    /// Create a manager with `max_lines` id slots.
    #[must_use]
    pub fn new(max_lines: usize) -> Self {
        Self {
            slots: vec![None; max_lines],
        }
    }

    /// Maximum number of simultaneous lines.
    #[must_use]
    pub fn max_lines(&self) -> usize {
        self.slots.len()
    }

    /// Number of existing lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if no more lines can be created.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Iterate lines in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Line> + '_ {
        self.slots.iter().flatten()
    }

    /// Check if some line is exactly the two-tile run `a`-`b`.
    #[must_use]
    pub fn has_segment_line(&self, a: Position, b: Position) -> bool {
        self.iter().any(|line| line.is_segment(a, b))
    }

    /// Create a two-tile line in the lowest free slot.
    ///
    /// Returns `None` if every slot is taken or the tiles are not adjacent.
    pub fn create_line(&mut self, a: Position, b: Position) -> Option<LineId> {
        if !a.is_adjacent(b) {
            return None;
        }
        let index = self.slots.iter().position(Option::is_none)?;
        let id = LineId::new(u16::try_from(index).ok()?);

        self.slots[index] = Some(Line {
            id,
            tracks: Vector::from(vec![a, b]),
        });
        debug!(line = %id, from = %a, to = %b, "line created");
        Some(id)
    }

    /// Grow a line by one tile. Prepends at the head, appends at the tail.
    ///
    /// Returns the end that grew, or `None` if the line does not exist or
    /// `to` cannot attach.
    pub fn extend_line(&mut self, id: LineId, to: Position) -> Option<LineEnd> {
        let line = self.slots.get_mut(id.index())?.as_mut()?;
        let end = line.extension_end(to)?;

        match end {
            LineEnd::Head => line.tracks.push_front(to),
            LineEnd::Tail => line.tracks.push_back(to),
        }
        debug!(line = %id, %to, ?end, len = line.tracks.len(), "line extended");
        Some(end)
    }

    /// Delete a line, returning it.
    pub fn remove_line(&mut self, id: LineId) -> Option<Line> {
        let line = self.slots.get_mut(id.index())?.take()?;
        debug!(line = %id, len = line.tracks.len(), "line removed");
        Some(line)
    }
}
