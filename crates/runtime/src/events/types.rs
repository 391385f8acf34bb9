//! Session and reward event payloads.

use serde::{Deserialize, Serialize};

use quest_core::{CardId, CollectedCard, RewardKind};

use crate::session::SessionStatus;

/// Session lifecycle notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    StatusChanged {
        from: SessionStatus,
        to: SessionStatus,
    },
    /// A new world is ready.
    Started {
        scenario_ids: Vec<String>,
        seed: u64,
    },
    /// A collaborator failed; the session is now in [`SessionStatus::Error`].
    Failed { message: String },
    /// Everything was discarded and the session is back at the menu.
    Ended,
}

/// Reward card pipeline notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RewardEvent {
    /// Art generation started for a resolved scenario.
    Generating { scenario_id: String, prompt: String },
    CardCollected(CollectedCard),
    GenerationFailed { scenario_id: String },
    /// A card's reward was spent and applied to the player.
    Spent { card_id: CardId, kind: RewardKind },
}
