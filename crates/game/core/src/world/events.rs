//! Inbound inputs and outbound notifications of the interaction model.

use crate::map::Obstacle;
use crate::state::{CardinalDirection, Outcome, Position, RewardKind, Scenario};

/// Discrete input a host delivers to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldInput {
    Move(CardinalDirection),
    Interact,
    Cancel,
    SelectOption(usize),
    UseActiveTool,
    AcknowledgeEffect,
}

/// Everything the reward pipeline needs once a scenario resolves.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FinishReport {
    pub outcome: Outcome,
    /// Art prompt of the chosen option.
    pub art_prompt: String,
    /// The scenario with `selected_answer` filled in.
    pub scenario: Scenario,
}

/// Notification raised by the world in response to an input.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldEvent {
    PlayerMoved {
        from: Position,
        to: Position,
    },
    /// The "press interact" affordance appeared, moved to another NPC, or vanished.
    PromptVisibilityChanged {
        visible: bool,
        scenario_id: Option<String>,
    },
    DialogueOpened {
        scenario_id: String,
    },
    DialogueClosed,
    ResolutionStarted {
        scenario_id: String,
        outcome: Outcome,
        message: String,
    },
    Finish(FinishReport),
    LivesChanged(u32),
    GameOver,
    CoinCollected(u32),
    LifeBonusGranted,
    /// A tool cleared the listed obstacles. The tool stays armed until acknowledged.
    EffectApplied {
        tool: RewardKind,
        cleared: Vec<Obstacle>,
    },
    ToolArmed(RewardKind),
    ToolDisarmed,
}
