//! Row-major tile storage.

use serde::{Deserialize, Serialize};

use crate::core::{Position, StationType, TileKind};

/// Occupancy of an `N x N` grid.
///
/// ## Usage
///
/// ```
/// use minimetro_rl::core::{Position, TileKind};
/// use minimetro_rl::grid::GridIndex;
///
/// let grid = GridIndex::new(3);
///
/// assert_eq!(grid.occupant_at(Position::new(1, 1)), Some(TileKind::Empty));
/// assert_eq!(grid.occupant_at(Position::new(3, 0)), None); // off the board
/// assert!(grid.is_adjacent(Position::new(0, 0), Position::new(0, 1)));
/// assert_eq!(grid.empty_tiles().len(), 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridIndex {
    size: usize,
    tiles: Vec<TileKind>,
}

impl GridIndex {
    /// Create an empty grid of `size x size` tiles.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            tiles: vec![TileKind::Empty; size * size],
        }
    }

    /// Side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if a position lies on the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.offset(pos).is_some()
    }

    /// What occupies a tile. `None` if the position is off the grid.
    #[must_use]
    pub fn occupant_at(&self, pos: Position) -> Option<TileKind> {
        self.offset(pos).map(|i| self.tiles[i])
    }

    /// Station type at a tile, if it holds a station.
    #[must_use]
    pub fn station_type_at(&self, pos: Position) -> Option<StationType> {
        self.occupant_at(pos).and_then(TileKind::station_type)
    }

    /// Both positions are on the grid and orthogonally adjacent.
    #[must_use]
    pub fn is_adjacent(&self, a: Position, b: Position) -> bool {
        self.contains(a) && self.contains(b) && a.is_adjacent(b)
    }

    /// On-grid orthogonal neighbours of a position.
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.neighbors().into_iter().filter(move |&n| self.contains(n))
    }

    /// All empty tiles in row-major order.
    #[must_use]
    pub fn empty_tiles(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, tile)| tile.is_empty())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Iterate every tile in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TileKind)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| (self.position_of(i), tile))
    }

    /// Rows of tile kinds, `rows[y][x]`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<TileKind>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.tiles.chunks(self.size).map(<[TileKind]>::to_vec).collect()
    }

    /// Mark a tile as a station. Only the station registry calls this.
    pub(crate) fn set_station(&mut self, pos: Position, station_type: StationType) {
        if let Some(i) = self.offset(pos) {
            self.tiles[i] = TileKind::Station(station_type);
        }
    }

    fn offset(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    fn position_of(&self, offset: usize) -> Position {
        // Config validation guarantees size fits in i32.
        Position::new((offset % self.size) as i32, (offset / self.size) as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = GridIndex::new(4);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(3, 3)));
        assert!(!grid.contains(Position::new(4, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
        assert_eq!(grid.occupant_at(Position::new(-1, 2)), None);
    }

    #[test]
    fn test_adjacency_requires_bounds() {
        let grid = GridIndex::new(2);

        assert!(grid.is_adjacent(Position::new(1, 0), Position::new(1, 1)));
        assert!(!grid.is_adjacent(Position::new(1, 0), Position::new(2, 0)));
        assert!(!grid.is_adjacent(Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_neighbors_clipped_at_edges() {
        let grid = GridIndex::new(3);

        let corner: Vec<_> = grid.neighbors(Position::new(0, 0)).collect();
        assert_eq!(corner.len(), 2);

        let centre: Vec<_> = grid.neighbors(Position::new(1, 1)).collect();
        assert_eq!(centre.len(), 4);
    }

    #[test]
    fn test_set_station_updates_queries() {
        let mut grid = GridIndex::new(3);
        let pos = Position::new(2, 1);

        grid.set_station(pos, StationType::Triangle);

        assert_eq!(grid.occupant_at(pos), Some(TileKind::Station(StationType::Triangle)));
        assert_eq!(grid.station_type_at(pos), Some(StationType::Triangle));
        assert_eq!(grid.empty_tiles().len(), 8);
        assert!(!grid.empty_tiles().contains(&pos));
    }

    #[test]
    fn test_rows_layout() {
        let mut grid = GridIndex::new(2);
        grid.set_station(Position::new(1, 0), StationType::Circle);

        let rows = grid.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], TileKind::Station(StationType::Circle));
        assert_eq!(rows[1][1], TileKind::Empty);
    }

    #[test]
    fn test_empty_tiles_row_major() {
        let grid = GridIndex::new(2);
        assert_eq!(
            grid.empty_tiles(),
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }
}
