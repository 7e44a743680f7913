//! Property tests over random action sequences.
//!
//! Actions are drawn by index from the current legal action list, so every
//! generated sequence is meaningful for whatever state it meets.

use std::collections::HashSet;

use proptest::prelude::*;

use minimetro_rl::core::{Action, MetroConfig, Position};
use minimetro_rl::engine::SimulationEngine;
use minimetro_rl::lines::manager::LineManager;
use minimetro_rl::stations::StationRegistry;
use minimetro_rl::trains::controller::{Direction, TrainController};

fn busy_config() -> MetroConfig {
    MetroConfig::default()
        .with_grid_size(5)
        .with_station_spawn_rate(2)
        .with_passenger_spawn_rate(3)
        .with_station_capacity(12)
        .with_max_timesteps(80)
}

/// Pick the legal action at `choice` (mod the list length).
fn pick(engine: &SimulationEngine, choice: usize) -> Action {
    let actions = engine.legal_actions();
    actions[choice % actions.len()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Passengers in the system change only by spawns, deliveries and removals.
    #[test]
    fn passengers_are_conserved(seed in any::<u64>(), choices in prop::collection::vec(any::<usize>(), 1..80)) {
        let mut engine = SimulationEngine::new(busy_config(), seed).unwrap();

        for choice in choices {
            let before = engine.state().passengers_in_system();
            let result = engine.step(pick(&engine, choice));
            let after = engine.state().passengers_in_system();

            let info = &result.info;
            prop_assert_eq!(
                after + info.delivered + info.dropped_passengers,
                before + info.spawned_passengers
            );
            if result.game_over {
                break;
            }
        }
    }

    /// Track sequences never repeat a tile and always step between neighbours.
    #[test]
    fn tracks_stay_simple_paths(seed in any::<u64>(), choices in prop::collection::vec(any::<usize>(), 1..80)) {
        let mut engine = SimulationEngine::new(busy_config(), seed).unwrap();

        for choice in choices {
            let result = engine.step(pick(&engine, choice));

            for line in &result.observation.lines {
                let unique: HashSet<Position> = line.tracks.iter().copied().collect();
                prop_assert_eq!(unique.len(), line.tracks.len());
                for pair in line.tracks.windows(2) {
                    prop_assert!(pair[0].is_adjacent(pair[1]));
                }
                prop_assert!(line.train_index < line.tracks.len());
                prop_assert_eq!(line.tracks[line.train_index], line.train_tile);
            }
            if result.game_over {
                break;
            }
        }
    }

    /// The grid shows a station exactly where the registry holds one.
    #[test]
    fn grid_matches_registry(seed in any::<u64>(), steps in 1usize..60) {
        let mut engine = SimulationEngine::new(busy_config(), seed).unwrap();

        for step in 0..steps {
            if engine.step(pick(&engine, step)).game_over {
                break;
            }
        }

        let state = engine.state();
        for (pos, tile) in state.grid().iter() {
            let registered = state.stations().get(pos).map(|s| s.station_type);
            prop_assert_eq!(tile.station_type(), registered);
        }
        prop_assert!(state.stations().len() <= busy_config().max_stations);
    }

    /// A train moves one track per step and turns around only when the next
    /// move would run off an end.
    #[test]
    fn trains_turn_only_at_endpoints(len in 2usize..8, steps in 1u64..40) {
        let mut stations = StationRegistry::new(0, 10);
        let mut lines = LineManager::new(1);
        let mut trains = TrainController::new(1, 6);

        let id = lines.create_line(Position::new(0, 0), Position::new(1, 0)).unwrap();
        for x in 2..len {
            lines.extend_line(id, Position::new(x as i32, 0)).unwrap();
        }
        trains.spawn_train(id, 0);

        let last = len - 1;
        let mut previous = trains.get(id).unwrap().clone();
        let mut ends_visited = Vec::new();
        for t in 1..=steps {
            trains.advance_all(t, &lines, &mut stations);
            let train = trains.get(id).unwrap().clone();

            prop_assert_eq!(train.position().abs_diff(previous.position()), 1);

            let overshoot = match previous.direction() {
                Direction::Forward => previous.position() == last,
                Direction::Backward => previous.position() == 0,
            };
            prop_assert_eq!(train.direction() != previous.direction(), overshoot);

            if train.position() == 0 || train.position() == last {
                ends_visited.push(train.position());
            }
            previous = train;
        }

        for pair in ends_visited.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }
}
