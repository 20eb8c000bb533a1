//! EmpireMUD world generation library
//!
//! Re-exports modules for use by the generator and the map tools.

pub mod audit;
pub mod classify;
pub mod config;
pub mod connectivity;
pub mod emit;
pub mod error;
pub mod features;
pub mod finalize;
pub mod grid;
pub mod islands;
pub mod loader;
pub mod rng;
pub mod terrain;
pub mod world;
pub mod wrap;

pub use config::MapConfig;
pub use error::{MapError, MapResult};
pub use grid::{IslandId, WorldGrid};
pub use terrain::Terrain;
pub use world::{generate_world, GeneratedWorld};
