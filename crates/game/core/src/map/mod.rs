//! Tile map: terrain grid, obstacle set, and the generator that fills them.
mod generator;
mod obstacles;
mod terrain;

pub use generator::{GeneratedMap, generate_map, scatter_coins};
pub use obstacles::{Obstacle, ObstacleKind, ObstacleSet};
pub use terrain::{TerrainGrid, TerrainKind};
