//! Observable snapshot of the simulation.
//!
//! An `Observation` is an owned copy: holding one never borrows the engine,
//! so a renderer can keep it while the next step runs.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, PassengerCounts, Position, StationType, TileKind};
use crate::lines::LineId;

/// Waiting passengers at one station.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationObservation {
    pub position: Position,
    pub station_type: StationType,
    pub waiting: PassengerCounts,
}

/// One line and its train.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineObservation {
    pub id: LineId,
    pub tracks: Vec<Position>,
    /// Train position as an index into `tracks`.
    pub train_index: usize,
    /// Tile the train is on.
    pub train_tile: Position,
    /// `+1` or `-1`.
    pub train_direction: i8,
    /// Destinations of passengers aboard.
    pub onboard: Vec<StationType>,
}

/// Everything an agent or renderer may see after a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Tile kinds, `grid[y][x]`.
    pub grid: Vec<Vec<TileKind>>,
    /// Stations in spawn order.
    pub passengers: Vec<StationObservation>,
    /// Lines in ascending id order.
    pub lines: Vec<LineObservation>,
    pub timestep: u64,
    pub game_over: bool,
    pub score: i64,
}

impl Observation {
    /// Capture a snapshot of the state.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let passengers = state
            .stations()
            .iter()
            .map(|s| StationObservation {
                position: s.position,
                station_type: s.station_type,
                waiting: s.queue,
            })
            .collect();

        let lines = state
            .lines()
            .iter()
            .filter_map(|line| {
                let train = state.trains().get(line.id())?;
                Some(LineObservation {
                    id: line.id(),
                    tracks: line.tracks().iter().copied().collect(),
                    train_index: train.position(),
                    train_tile: line.track(train.position())?,
                    train_direction: train.direction().sign(),
                    onboard: train.onboard().to_vec(),
                })
            })
            .collect();

        Self {
            grid: state.grid().rows(),
            passengers,
            lines,
            timestep: state.timestep(),
            game_over: state.game_over(),
            score: state.score(),
        }
    }

    /// Waiting passengers at a tile, if it holds a station.
    #[must_use]
    pub fn passengers_at(&self, pos: Position) -> Option<&PassengerCounts> {
        self.passengers
            .iter()
            .find(|s| s.position == pos)
            .map(|s| &s.waiting)
    }

    #[must_use]
    pub fn line(&self, id: LineId) -> Option<&LineObservation> {
        self.lines.iter().find(|l| l.id == id)
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Timestep: {}, Score: {}", self.timestep, self.score)?;
        writeln!(f, "Game Over: {}", self.game_over)?;

        for row in &self.grid {
            let cells: Vec<String> = row
                .iter()
                .map(|tile| match tile {
                    TileKind::Empty => '.'.to_string(),
                    TileKind::Station(ty) => ty.glyph().to_string(),
                })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }

        for line in &self.lines {
            writeln!(f, "{}: {} tracks", line.id, line.tracks.len())?;
            writeln!(
                f,
                "  Train at {} with {} passengers",
                line.train_tile,
                line.onboard.len()
            )?;
        }

        let waiting: Vec<_> = self
            .passengers
            .iter()
            .filter(|s| !s.waiting.is_empty())
            .collect();
        if !waiting.is_empty() {
            writeln!(f, "Passengers waiting:")?;
            for station in waiting {
                writeln!(f, "  {}: {} passengers", station.position, station.waiting.total())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MetroConfig;

    fn small_state() -> GameState {
        let config = MetroConfig::default().with_grid_size(3);
        let mut state = GameState::new(&config, 1);
        state
            .stations
            .place_station(&mut state.grid, Position::new(0, 0), StationType::Circle)
            .unwrap();
        state
            .stations
            .enqueue_passenger(Position::new(0, 0), StationType::Square)
            .unwrap();
        let id = state
            .lines
            .create_line(Position::new(0, 0), Position::new(1, 0))
            .unwrap();
        state.trains.spawn_train(id, 0);
        state
    }

    #[test]
    fn test_snapshot_contents() {
        let obs = Observation::from_state(&small_state());

        assert_eq!(obs.grid.len(), 3);
        assert_eq!(obs.grid[0][0], TileKind::Station(StationType::Circle));
        assert_eq!(obs.grid[0][1], TileKind::Empty);

        let waiting = obs.passengers_at(Position::new(0, 0)).unwrap();
        assert_eq!(waiting.get(StationType::Square), 1);
        assert!(obs.passengers_at(Position::new(1, 1)).is_none());

        let line = obs.line(LineId::new(0)).unwrap();
        assert_eq!(line.tracks, vec![Position::new(0, 0), Position::new(1, 0)]);
        assert_eq!(line.train_index, 0);
        assert_eq!(line.train_tile, Position::new(0, 0));
        assert_eq!(line.train_direction, 1);
        assert!(line.onboard.is_empty());

        assert_eq!(obs.timestep, 0);
        assert!(!obs.game_over);
    }

    #[test]
    fn test_text_dump() {
        let text = Observation::from_state(&small_state()).to_string();

        assert!(text.starts_with("Timestep: 0, Score: 0\n"));
        assert!(text.contains("O . .\n"));
        assert!(text.contains("Line(0): 2 tracks"));
        assert!(text.contains("(0, 0): 1 passengers"));
    }

    #[test]
    fn test_serialization() {
        let obs = Observation::from_state(&small_state());
        let json = serde_json::to_string(&obs).unwrap();
        let deserialized: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, deserialized);
    }
}
