//! Session data the interaction model reads and mutates.
//!
//! Scenarios arrive as input, the player and completed-set change with every
//! event, and cards accumulate as scenarios resolve. Nothing here outlives a
//! session.
pub mod types;

pub use types::{
    CardCollection, CardId, CardTone, CardinalDirection, CollectedCard, CompletedSet, Facing,
    MapDimensions, Outcome, PlayerState, Position, Reward, RewardError, RewardKind, Scenario,
    ScenarioOption, Skin,
};
