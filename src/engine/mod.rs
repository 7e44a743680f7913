//! Step orchestration and observation.
//!
//! `SimulationEngine` is the only entry point that mutates a `GameState`.

pub mod observation;
pub mod simulation;

pub use observation::{LineObservation, Observation, StationObservation};
pub use simulation::{SimulationEngine, StepInfo, StepResult};
