use std::collections::BTreeSet;

use super::Position;

/// One dilemma an NPC poses to the player.
///
/// Scenarios are immutable input to the world except for `selected_answer`,
/// which is filled in when the player picks an option.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    #[cfg_attr(feature = "serde", serde(rename = "scenario_id"))]
    pub id: String,
    /// Display name of the NPC, also used as the title of reward cards.
    #[cfg_attr(feature = "serde", serde(rename = "npc_type"))]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "Skin::deserialize_lenient")
    )]
    pub skin: Skin,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Option<Position>,
    /// Trigger radius in pixels. Zero or negative means "use the default".
    #[cfg_attr(feature = "serde", serde(rename = "trigger_area_px", default))]
    pub trigger_radius_px: f64,
    pub question: String,
    pub options: Vec<ScenarioOption>,
    pub dialogue_success: String,
    pub dialogue_fail: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub selected_answer: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward: Option<Reward>,
}

impl Scenario {
    /// Anchor cell of the NPC, falling back to `default` when unset.
    pub fn anchor(&self, default: Position) -> Position {
        self.position.unwrap_or(default)
    }

    /// Trigger radius in pixels, falling back to `default` when unset or non-positive.
    pub fn trigger_radius(&self, default: f64) -> f64 {
        if self.trigger_radius_px > 0.0 {
            self.trigger_radius_px
        } else {
            default
        }
    }

    pub fn option(&self, index: usize) -> Option<&ScenarioOption> {
        self.options.get(index)
    }

    /// Narrative line shown while a resolution is pending.
    pub fn outcome_message(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Success => &self.dialogue_success,
            Outcome::Fail => &self.dialogue_fail,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioOption {
    pub text: String,
    pub is_correct: bool,
    /// Free-text prompt handed to the art generator when this option is chosen.
    pub reward_card_prompt: String,
}

/// Result of answering a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Success,
    Fail,
}

impl Outcome {
    pub fn from_correctness(is_correct: bool) -> Self {
        if is_correct { Self::Success } else { Self::Fail }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Kinds of reward a scenario can grant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RewardKind {
    Ship,
    Axe,
    MagicFire,
    Coin,
    Heart,
}

impl RewardKind {
    /// Rewards that are armed and later spent through a "use" action.
    pub fn is_armable(self) -> bool {
        matches!(self, Self::Ship | Self::Axe | Self::MagicFire)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: RewardKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    /// Remaining uses; `None` means unlimited.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub used: bool,
}

impl Reward {
    pub fn new(kind: RewardKind) -> Self {
        Self {
            kind,
            description: None,
            uses: None,
            used: false,
        }
    }

    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses = Some(uses);
        self
    }

    pub fn is_spent(&self) -> bool {
        self.used || self.uses == Some(0)
    }

    /// Consumes one use. Returns false when nothing is left to spend.
    pub fn spend(&mut self) -> bool {
        if self.is_spent() {
            return false;
        }
        if let Some(uses) = self.uses.as_mut() {
            *uses -= 1;
            if *uses == 0 {
                self.used = true;
            }
        }
        true
    }
}

/// Visual kind of an NPC, resolved once when the scenario is loaded.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Skin {
    Witch,
    Fox,
    Cat,
    /// Fallback for unknown or missing skins.
    #[default]
    Wolf,
    Cottage,
    PineTree,
    Coin,
    Water,
    Rock,
    Wizard,
    Mech,
    Archer,
    Knight,
}

impl Skin {
    pub const FALLBACK: Skin = Skin::Wolf;

    /// Maps a raw skin tag onto a known skin, using [`Skin::FALLBACK`] for anything else.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(|tag| tag.trim().parse().ok())
            .unwrap_or(Self::FALLBACK)
    }

    #[cfg(feature = "serde")]
    fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::Deserialize;

        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::resolve(raw.as_deref()))
    }
}

/// Ids of scenarios resolved during the current session.
///
/// Only grows; a fresh session starts with a fresh set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletedSet {
    ids: BTreeSet<String>,
}

impl CompletedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a resolution. Returns false if the id was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
