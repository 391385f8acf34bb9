//! Session-level state the runtime layers over the world model.
//!
//! A session is one campaign or one photo scenario: a [`World`], the card
//! album, and the app status that decides which commands are accepted.

mod reward;

pub use reward::{
    ANALYSIS_FAILED_MESSAGE, FAIL_MOOD, REWARD_FAILED_MESSAGE, STYLE_SUFFIX, SUCCESS_MOOD,
    compose_art_prompt,
};

use serde::{Deserialize, Serialize};

use quest_core::{CardCollection, World};

/// Which screen the session is on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// No session; waiting for a campaign start or a photo.
    #[default]
    Menu,
    /// A photo is with the analyzer.
    Analyzing,
    Playing,
    /// A scenario resolved and its card art is being generated.
    GeneratingReward,
    /// The new card is shown; the player collects it to continue.
    ShowingReward,
    /// A collaborator failed; see [`SessionSnapshot::error`].
    Error,
    GameOver,
}

impl SessionStatus {
    /// Statuses from which a new session may be started.
    pub fn can_start_session(self) -> bool {
        matches!(
            self,
            SessionStatus::Menu | SessionStatus::Error | SessionStatus::GameOver
        )
    }
}

/// Read-only copy of the session returned by
/// [`RuntimeHandle::snapshot`](crate::RuntimeHandle::snapshot).
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    /// Message shown in [`SessionStatus::Error`].
    pub error: Option<String>,
    /// Map seed of the running session.
    pub seed: Option<u64>,
    pub world: Option<World>,
    pub cards: CardCollection,
}

impl SessionSnapshot {
    pub fn score(&self) -> u32 {
        self.cards.score()
    }

    /// Scenarios not yet resolved in this session.
    pub fn remaining(&self) -> usize {
        self.world.as_ref().map_or(0, World::remaining)
    }
}
