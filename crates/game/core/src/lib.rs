//! Deterministic rules of the quest game, shared by every host.
//!
//! `quest-core` owns two things: the procedural tile-map generator
//! ([`map::generate_map`]) and the tile-grid interaction model ([`World`]):
//! movement, NPC triggering, the dialogue state machine, lives, coins, and
//! tools. Everything here is synchronous and free of I/O; randomness enters
//! only through an injected [`env::RngSource`], so a fixed seed reproduces a
//! session exactly.
pub mod config;
pub mod env;
pub mod error;
pub mod map;
pub mod state;
pub mod world;

pub use config::{GameConfig, MapGenConfig, ObstacleClearPolicy, WorldConfig};
pub use env::{PcgRng, RngSource, mix_seed};
pub use error::{ErrorSeverity, GameError};
pub use map::{
    GeneratedMap, Obstacle, ObstacleKind, ObstacleSet, TerrainGrid, TerrainKind, generate_map,
    scatter_coins,
};
pub use state::{
    CardCollection, CardId, CardTone, CardinalDirection, CollectedCard, CompletedSet, Facing,
    MapDimensions, Outcome, PlayerState, Position, Reward, RewardError, RewardKind, Scenario,
    ScenarioOption, Skin,
};
pub use world::{
    FinishReport, InteractionError, InteractionPhase, MoveError, PendingResolution, ToolError,
    World, WorldEvent, WorldInput, nearest_scenario,
};
