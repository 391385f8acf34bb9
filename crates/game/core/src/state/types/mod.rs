pub mod card;
pub mod common;
pub mod player;
pub mod scenario;

pub use card::{CardCollection, CardId, CardTone, CollectedCard, RewardError};
pub use common::{CardinalDirection, Facing, MapDimensions, Position};
pub use player::PlayerState;
pub use scenario::{
    CompletedSet, Outcome, Reward, RewardKind, Scenario, ScenarioOption, Skin,
};
