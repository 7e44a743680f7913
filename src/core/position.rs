//! Grid coordinates.
//!
//! Every tile on the board is addressed by a `Position`. Coordinates are
//! signed so that agent-supplied actions can name off-board tiles; the
//! validator rejects those before they reach any mutating component.
//!
//! ## Usage
//!
//! ```
//! use minimetro_rl::core::Position;
//!
//! let a = Position::new(0, 0);
//! let b = Position::new(1, 0);
//! let c = Position::new(1, 1);
//!
//! assert!(a.is_adjacent(b));
//! assert!(!a.is_adjacent(c)); // no diagonals
//! assert_eq!(a.manhattan(c), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Tile coordinate on the square grid.
///
/// `x` is the column and `y` the row. Ordering is row-major (`y` first) so
/// sorted positions read like the grid does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub const fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Check orthogonal adjacency (Manhattan distance exactly 1).
    ///
    /// This does not check bounds; see `GridIndex::is_adjacent` for that.
    #[must_use]
    pub const fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// The four orthogonal neighbours, in a fixed order (up, down, right, left).
    ///
    /// Neighbours may lie outside the grid.
    #[must_use]
    pub const fn neighbors(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y + 1),
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x - 1, self.y),
        ]
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for (i32, i32) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacency() {
        let origin = Position::new(2, 2);

        for n in origin.neighbors() {
            assert!(origin.is_adjacent(n));
            assert!(n.is_adjacent(origin));
        }

        assert!(!origin.is_adjacent(origin));
        assert!(!origin.is_adjacent(Position::new(3, 3)));
        assert!(!origin.is_adjacent(Position::new(4, 2)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(0, 0).manhattan(Position::new(3, 4)), 7);
        assert_eq!(Position::new(-1, 0).manhattan(Position::new(1, 0)), 2);
    }

    #[test]
    fn test_row_major_ordering() {
        let mut positions = vec![
            Position::new(1, 1),
            Position::new(0, 1),
            Position::new(2, 0),
        ];
        positions.sort();

        assert_eq!(
            positions,
            vec![Position::new(2, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_tuple_conversion() {
        let pos: Position = (3, 4).into();
        assert_eq!(pos, Position::new(3, 4));

        let back: (i32, i32) = pos.into();
        assert_eq!(back, (3, 4));
        assert_eq!(format!("{}", pos), "(3, 4)");
    }
}
