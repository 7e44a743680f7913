//! Tile occupancy and adjacency queries.
//!
//! The grid is a derived index over the station registry: it is written only
//! when a station is added, so a tile is a station exactly when the registry
//! holds one there.

pub mod index;

pub use index::GridIndex;
