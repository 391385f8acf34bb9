//! Tunable parameters for map generation and the interaction model.
//!
//! Every constant the rules depend on lives here with its reference value as
//! the default, so a host can load a partial TOML file and only override what
//! it cares about.

use crate::state::Position;

/// Top-level configuration bundle handed to the generator and the world.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub map: MapGenConfig,
    pub world: WorldConfig,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parameters of the procedural map generator.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapGenConfig {
    pub width: u32,
    pub height: u32,

    /// No obstacle is placed closer than this (in tiles) to any NPC anchor.
    pub npc_exclusion_radius: f64,

    /// Number of random-walk steps used to carve the trail.
    pub path_steps: u32,
    /// Where the trail walk starts. Should sit next to an edge.
    pub path_start: Position,
    /// Probability that a trail step goes +x; otherwise it goes ±y.
    pub path_forward_chance: f64,

    /// Column where the river enters at the top row.
    pub river_start_x: i32,
    /// Per-row probability that the river shifts one column sideways.
    pub river_meander_chance: f64,

    pub lake_center: Position,
    pub lake_radius: f64,

    pub building_chance: f64,
    /// Half-width of the window searched for a nearby path (2 => 5x5).
    pub building_path_reach: i32,

    pub forest_frequency: f64,
    pub forest_threshold: f64,
    pub rock_chance: f64,

    /// Random draws used to scatter collectible coins.
    pub coin_attempts: u32,
}

impl MapGenConfig {
    pub const DEFAULT_WIDTH: u32 = 50;
    pub const DEFAULT_HEIGHT: u32 = 30;
    pub const DEFAULT_EXCLUSION_RADIUS: f64 = 4.0;
    pub const DEFAULT_PATH_STEPS: u32 = 200;
    pub const DEFAULT_RIVER_MEANDER: f64 = 0.4;
    pub const DEFAULT_LAKE_RADIUS: f64 = 4.0;
    pub const DEFAULT_BUILDING_CHANCE: f64 = 0.02;
    pub const DEFAULT_FOREST_THRESHOLD: f64 = 1.0;
    pub const DEFAULT_ROCK_CHANCE: f64 = 0.05;
    pub const DEFAULT_COIN_ATTEMPTS: u32 = 30;

    /// Builds a config for a custom map size, keeping every other reference value.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for MapGenConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            npc_exclusion_radius: Self::DEFAULT_EXCLUSION_RADIUS,
            path_steps: Self::DEFAULT_PATH_STEPS,
            path_start: Position::new(1, 15),
            path_forward_chance: 0.6,
            river_start_x: 20,
            river_meander_chance: Self::DEFAULT_RIVER_MEANDER,
            lake_center: Position::new(37, 10),
            lake_radius: Self::DEFAULT_LAKE_RADIUS,
            building_chance: Self::DEFAULT_BUILDING_CHANCE,
            building_path_reach: 2,
            forest_frequency: 0.15,
            forest_threshold: Self::DEFAULT_FOREST_THRESHOLD,
            rock_chance: Self::DEFAULT_ROCK_CHANCE,
            coin_attempts: Self::DEFAULT_COIN_ATTEMPTS,
        }
    }
}

/// How a tool effect treats the obstacles it clears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ObstacleClearPolicy {
    /// Keep the obstacle and flag it cleared; it stays renderable but walkable.
    #[default]
    Mark,
    /// Delete the obstacle from the set.
    Remove,
}

/// Parameters of the movement and interaction model.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    /// Pixel size of one tile, used for trigger distances.
    pub tile_size: f64,
    /// Trigger radius in pixels for scenarios that leave it unset or non-positive.
    pub default_trigger_radius: f64,
    /// Anchor for scenarios without a position.
    pub default_anchor: Position,
    pub player_start: Position,

    pub initial_lives: u32,
    pub max_lives: u32,
    /// Every N-th collected coin grants a life.
    pub coin_bonus_threshold: u32,

    pub clear_policy: ObstacleClearPolicy,
    pub axe_radius: i32,
    pub magic_fire_radius: i32,
}

impl WorldConfig {
    pub const DEFAULT_TILE_SIZE: f64 = 48.0;
    pub const DEFAULT_TRIGGER_RADIUS: f64 = 100.0;
    pub const DEFAULT_INITIAL_LIVES: u32 = 2;
    pub const DEFAULT_MAX_LIVES: u32 = 5;
    pub const DEFAULT_COIN_BONUS_THRESHOLD: u32 = 5;
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: Self::DEFAULT_TILE_SIZE,
            default_trigger_radius: Self::DEFAULT_TRIGGER_RADIUS,
            default_anchor: Position::new(8, 6),
            player_start: Position::new(25, 15),
            initial_lives: Self::DEFAULT_INITIAL_LIVES,
            max_lives: Self::DEFAULT_MAX_LIVES,
            coin_bonus_threshold: Self::DEFAULT_COIN_BONUS_THRESHOLD,
            clear_policy: ObstacleClearPolicy::Mark,
            axe_radius: 1,
            magic_fire_radius: 2,
        }
    }
}
