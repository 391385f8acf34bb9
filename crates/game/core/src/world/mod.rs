//! Movement, NPC triggering, and the dialogue state machine.
//!
//! [`World`] is the single owner of per-session mutable state: the player,
//! the obstacle set (tools can clear entries), remaining coins, and the
//! completed-set. Every operation is synchronous and returns the
//! [`WorldEvent`]s it produced; the host forwards them to whatever UI or
//! reward pipeline it runs.
//!
//! The `Resolving -> Idle` delay is not modelled here. The host calls
//! [`World::finish_resolution`] when its timer fires.

mod errors;
mod events;
mod interaction;
mod movement;
mod tools;
mod trigger;

pub use errors::{InteractionError, MoveError, ToolError};
pub use events::{FinishReport, WorldEvent, WorldInput};
pub use interaction::{InteractionPhase, PendingResolution};
pub use trigger::nearest_scenario;

use std::collections::BTreeSet;

use crate::config::{GameConfig, WorldConfig};
use crate::env::{PcgRng, mix_seed};
use crate::error::GameError;
use crate::map::{GeneratedMap, generate_map, scatter_coins};
use crate::state::{CompletedSet, PlayerState, Position, Scenario};

/// RNG stream for terrain and obstacles.
pub const MAP_STREAM: u32 = 0x6d61_7020;
/// RNG stream for the coin scatter.
pub const COIN_STREAM: u32 = 0x636f_696e;

#[derive(Clone, Debug)]
pub struct World {
    config: WorldConfig,
    map: GeneratedMap,
    coins: BTreeSet<Position>,
    scenarios: Vec<Scenario>,
    completed: CompletedSet,
    player: PlayerState,
    phase: InteractionPhase,
    game_over: bool,
}

impl World {
    /// Assembles a world from an already generated map.
    ///
    /// The world starts in [`InteractionPhase::Idle`]; call [`World::refresh`]
    /// once to surface an NPC the player already stands next to.
    pub fn new(
        config: WorldConfig,
        map: GeneratedMap,
        coins: BTreeSet<Position>,
        scenarios: Vec<Scenario>,
    ) -> Self {
        let player = PlayerState::new(config.player_start, config.initial_lives, config.max_lives);
        Self {
            config,
            map,
            coins,
            scenarios,
            completed: CompletedSet::new(),
            player,
            phase: InteractionPhase::Idle,
            game_over: false,
        }
    }

    /// Generates the map and coins for `scenarios` and builds the world.
    ///
    /// Terrain and coins draw from separate streams of `seed`, so the coin
    /// budget never reshuffles the map and vice versa.
    pub fn generate(config: &GameConfig, scenarios: Vec<Scenario>, seed: u64) -> Self {
        let anchors: Vec<Position> = scenarios
            .iter()
            .map(|scenario| scenario.anchor(config.world.default_anchor))
            .collect();
        let mut map_rng = PcgRng::seeded(mix_seed(seed, MAP_STREAM));
        let map = generate_map(&config.map, &anchors, &mut map_rng);

        let mut avoid = anchors;
        avoid.push(config.world.player_start);
        let mut coin_rng = PcgRng::seeded(mix_seed(seed, COIN_STREAM));
        let coins = scatter_coins(&map, config.map.coin_attempts, &avoid, &mut coin_rng);

        Self::new(config.world.clone(), map, coins, scenarios)
    }

    /// Applies one input, discarding rejections.
    ///
    /// Blocked moves, interacting with nobody around, and similar rejections are
    /// silent no-ops from the player's point of view; they are only traced.
    pub fn handle(&mut self, input: WorldInput) -> Vec<WorldEvent> {
        let result = match input {
            WorldInput::Move(direction) => self.step(direction).map_err(Rejection::from),
            WorldInput::Interact => self.interact().map_err(Rejection::from),
            WorldInput::Cancel => self.cancel().map_err(Rejection::from),
            WorldInput::SelectOption(index) => self.select_option(index).map_err(Rejection::from),
            WorldInput::UseActiveTool => self.use_active_tool().map_err(Rejection::from),
            WorldInput::AcknowledgeEffect => Ok(self.acknowledge_effect()),
        };

        result.unwrap_or_else(|rejection| {
            tracing::trace!(?input, code = rejection.code(), "input rejected: {rejection}");
            Vec::new()
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn map(&self) -> &GeneratedMap {
        &self.map
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn coins(&self) -> &BTreeSet<Position> {
        &self.coins
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.id == id)
    }

    pub fn completed(&self) -> &CompletedSet {
        &self.completed
    }

    /// Scenarios still on the map (not yet resolved).
    pub fn open_scenarios(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios
            .iter()
            .filter(|scenario| !self.completed.contains(&scenario.id))
    }

    pub fn remaining(&self) -> usize {
        self.open_scenarios().count()
    }

    pub fn phase(&self) -> &InteractionPhase {
        &self.phase
    }

    /// Scenario whose NPC is currently in range, if any.
    pub fn candidate(&self) -> Option<&Scenario> {
        match self.phase {
            InteractionPhase::Prompt { scenario } | InteractionPhase::Dialogue { scenario } => {
                self.scenarios.get(scenario)
            }
            InteractionPhase::Resolving(ref pending) => self.scenarios.get(pending.scenario),
            InteractionPhase::Idle => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.map.is_walkable(position)
    }
}

/// Any rejection [`World::handle`] may swallow.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Interaction(#[from] InteractionError),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl Rejection {
    fn code(&self) -> &'static str {
        match self {
            Rejection::Move(err) => err.error_code(),
            Rejection::Interaction(err) => err.error_code(),
            Rejection::Tool(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::map::{ObstacleSet, TerrainGrid, TerrainKind};
    use crate::state::{MapDimensions, ScenarioOption, Skin};

    /// Open 50x30 grass field with no obstacles and no coins.
    pub fn open_map() -> GeneratedMap {
        let dimensions = MapDimensions::new(50, 30);
        GeneratedMap {
            terrain: TerrainGrid::filled(dimensions, TerrainKind::Grass),
            obstacles: ObstacleSet::new(),
        }
    }

    pub fn scenario(id: &str, at: Position) -> Scenario {
        Scenario {
            id: id.into(),
            name: format!("NPC {id}"),
            skin: Skin::Wizard,
            position: Some(at),
            trigger_radius_px: 100.0,
            question: "A strange dog approaches. What do you do?".into(),
            options: vec![
                ScenarioOption {
                    text: "Pet it right away".into(),
                    is_correct: false,
                    reward_card_prompt: "an angry dog".into(),
                },
                ScenarioOption {
                    text: "Stand still and ask the owner".into(),
                    is_correct: true,
                    reward_card_prompt: "a calm dog and owner".into(),
                },
            ],
            dialogue_success: "Well done!".into(),
            dialogue_fail: "Careful!".into(),
            selected_answer: None,
            reward: None,
        }
    }

    pub fn world_with(scenarios: Vec<Scenario>) -> World {
        World::new(
            WorldConfig::default(),
            open_map(),
            BTreeSet::new(),
            scenarios,
        )
    }
}
