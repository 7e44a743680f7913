//! Stations and the policies that populate them.
//!
//! - `StationRegistry`: station lifecycle, passenger queues, overflow check
//! - `PassengerSpawner`: periodic station and passenger generation
//!
//! Stations are never removed. The registry reports overflow but never ends
//! the episode itself; that decision belongs to the engine.

pub mod registry;
pub mod spawner;

pub use registry::{Station, StationRegistry};
pub use spawner::{PassengerSpawner, SpawnReport};
