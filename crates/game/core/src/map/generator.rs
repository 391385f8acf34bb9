//! Procedural terrain and obstacle generation.
//!
//! The generator runs once per session. It is a pure function of its
//! configuration, the NPC anchors it must keep clear, and the random source:
//!
//! 1. fill the grid with grass
//! 2. carve a two-wide trail with a biased random walk
//! 3. carve a river top to bottom, turning trail crossings into bridges
//! 4. stamp a round lake over whatever is underneath
//! 5. drop buildings near the trail
//! 6. grow forest from a smooth noise field, with scattered rocks elsewhere
//! 7. wall the border with trees
//!
//! Every obstacle insertion goes through the NPC exclusion check. Terrain does
//! not, so an NPC may stand on path or (unblocked) water terrain.

use std::collections::BTreeSet;

use crate::config::MapGenConfig;
use crate::env::RngSource;
use crate::state::{MapDimensions, Position};

use super::{Obstacle, ObstacleKind, ObstacleSet, TerrainGrid, TerrainKind};

/// Output of [`generate_map`]: immutable terrain plus the obstacle set.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedMap {
    pub terrain: TerrainGrid,
    pub obstacles: ObstacleSet,
}

impl GeneratedMap {
    pub fn dimensions(&self) -> MapDimensions {
        self.terrain.dimensions()
    }

    /// In bounds and free of uncleared obstacles.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.dimensions().contains(position) && !self.obstacles.blocks(position)
    }
}

/// Generates terrain and obstacles for one session.
pub fn generate_map<R>(config: &MapGenConfig, anchors: &[Position], rng: &mut R) -> GeneratedMap
where
    R: RngSource + ?Sized,
{
    let dimensions = MapDimensions::new(config.width, config.height);
    let mut builder = MapBuilder {
        config,
        anchors,
        dimensions,
        terrain: TerrainGrid::filled(dimensions, TerrainKind::Grass),
        obstacles: ObstacleSet::new(),
    };

    builder.carve_path(rng);
    builder.carve_river(rng);
    builder.stamp_lake();
    builder.place_buildings(rng);
    builder.place_forest(rng);
    builder.wall_borders();

    tracing::debug!(
        width = config.width,
        height = config.height,
        anchors = anchors.len(),
        obstacles = builder.obstacles.len(),
        bridges = builder.terrain.count(TerrainKind::Bridge),
        "generated map"
    );

    GeneratedMap {
        terrain: builder.terrain,
        obstacles: builder.obstacles,
    }
}

/// Scatters collectible coins on open grass.
///
/// Performs `attempts` random draws; a draw yields a coin only on a grass cell
/// without any obstacle that is not listed in `avoid`. Repeated draws collapse.
pub fn scatter_coins<R>(
    map: &GeneratedMap,
    attempts: u32,
    avoid: &[Position],
    rng: &mut R,
) -> BTreeSet<Position>
where
    R: RngSource + ?Sized,
{
    let dimensions = map.dimensions();
    let mut coins = BTreeSet::new();

    for _ in 0..attempts {
        let position = Position::new(
            rng.below(dimensions.width) as i32,
            rng.below(dimensions.height) as i32,
        );
        if map.terrain.is(position, TerrainKind::Grass)
            && map.obstacles.is_empty_at(position)
            && !avoid.contains(&position)
        {
            coins.insert(position);
        }
    }

    coins
}

struct MapBuilder<'a> {
    config: &'a MapGenConfig,
    anchors: &'a [Position],
    dimensions: MapDimensions,
    terrain: TerrainGrid,
    obstacles: ObstacleSet,
}

impl MapBuilder<'_> {
    fn clear_of_anchors(&self, position: Position) -> bool {
        self.anchors
            .iter()
            .all(|anchor| anchor.distance(position) >= self.config.npc_exclusion_radius)
    }

    fn place(&mut self, position: Position, kind: ObstacleKind) {
        if self.dimensions.contains(position) && self.clear_of_anchors(position) {
            self.obstacles.insert(Obstacle::new(position, kind));
        }
    }

    fn max_x(&self) -> i32 {
        self.dimensions.width as i32 - 1
    }

    fn max_y(&self) -> i32 {
        self.dimensions.height as i32 - 1
    }

    fn carve_path<R: RngSource + ?Sized>(&mut self, rng: &mut R) {
        // Keep the walk off the border ring so the trail stays reachable.
        let clamp = |value: i32, max: i32| value.clamp(1, (max - 1).max(1));
        let (max_x, max_y) = (self.max_x(), self.max_y());
        let mut cursor = Position::new(
            clamp(self.config.path_start.x, max_x),
            clamp(self.config.path_start.y, max_y),
        );

        for _ in 0..self.config.path_steps {
            self.terrain.set(cursor, TerrainKind::Path);
            self.terrain.set(cursor.offset(1, 0), TerrainKind::Path);
            self.terrain.set(cursor.offset(0, 1), TerrainKind::Path);

            let next = if rng.chance(self.config.path_forward_chance) {
                cursor.offset(1, 0)
            } else if rng.chance(0.5) {
                cursor.offset(0, 1)
            } else {
                cursor.offset(0, -1)
            };
            cursor = Position::new(clamp(next.x, max_x), clamp(next.y, max_y));
        }
    }

    fn carve_river<R: RngSource + ?Sized>(&mut self, rng: &mut R) {
        let max_x = (self.max_x() - 1).max(0);
        let mut x = self.config.river_start_x.clamp(0, max_x);

        for y in 0..=self.max_y() {
            for cell in [Position::new(x, y), Position::new(x + 1, y)] {
                match self.terrain.get(cell) {
                    Some(TerrainKind::Path | TerrainKind::Bridge) => {
                        self.terrain.set(cell, TerrainKind::Bridge);
                    }
                    Some(_) => {
                        self.terrain.set(cell, TerrainKind::Water);
                        self.place(cell, ObstacleKind::Water);
                    }
                    None => {}
                }
            }

            if rng.chance(self.config.river_meander_chance) {
                let shift = if rng.chance(0.5) { 1 } else { -1 };
                x = (x + shift).clamp(0, max_x);
            }
        }
    }

    fn stamp_lake(&mut self) {
        let center = self.config.lake_center;
        let radius = self.config.lake_radius;
        for position in self.dimensions.positions() {
            if position.distance(center) <= radius {
                self.terrain.set(position, TerrainKind::Water);
                self.place(position, ObstacleKind::Water);
            }
        }
    }

    fn near_path(&self, position: Position) -> bool {
        let reach = self.config.building_path_reach;
        (-reach..=reach).any(|dy| {
            (-reach..=reach).any(|dx| {
                matches!(
                    self.terrain.get(position.offset(dx, dy)),
                    Some(TerrainKind::Path | TerrainKind::Bridge)
                )
            })
        })
    }

    fn place_buildings<R: RngSource + ?Sized>(&mut self, rng: &mut R) {
        for position in self.dimensions.positions() {
            if self.terrain.is(position, TerrainKind::Grass)
                && rng.chance(self.config.building_chance)
                && self.near_path(position)
            {
                self.place(position, ObstacleKind::Building);
            }
        }
    }

    fn place_forest<R: RngSource + ?Sized>(&mut self, rng: &mut R) {
        let frequency = self.config.forest_frequency;
        for position in self.dimensions.positions() {
            if !self.terrain.is(position, TerrainKind::Grass)
                || self
                    .obstacles
                    .contains(&Obstacle::new(position, ObstacleKind::Building))
            {
                continue;
            }

            let noise = (f64::from(position.x) * frequency).sin()
                + (f64::from(position.y) * frequency).cos();
            if noise > self.config.forest_threshold {
                self.place(position, ObstacleKind::Tree);
            } else if rng.chance(self.config.rock_chance) {
                self.place(position, ObstacleKind::Rock);
            }
        }
    }

    fn wall_borders(&mut self) {
        for position in self.dimensions.positions() {
            if self.dimensions.is_border(position) {
                self.place(position, ObstacleKind::Tree);
            }
        }
    }
}
