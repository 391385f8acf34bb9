use std::fmt;

use super::{Outcome, Reward, RewardKind, Scenario};

/// Identifier of a collected card, unique within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Tone of a card, derived from the resolution outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum CardTone {
    Good,
    Bad,
}

impl From<Outcome> for CardTone {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => CardTone::Good,
            Outcome::Fail => CardTone::Bad,
        }
    }
}

/// Illustrated record of a resolved scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectedCard {
    pub id: CardId,
    pub scenario_id: String,
    pub title: String,
    /// Reference produced by the art generator; `None` while pending.
    pub image: Option<String>,
    /// Unix timestamp in milliseconds, supplied by the host.
    pub timestamp_ms: i64,
    pub tone: CardTone,
    pub selected_answer: Option<String>,
    /// Copy of the scenario's reward, present on good cards only.
    pub reward: Option<Reward>,
}

impl CollectedCard {
    /// Builds the card for a resolved scenario.
    pub fn from_resolution(
        id: CardId,
        scenario: &Scenario,
        outcome: Outcome,
        image: Option<String>,
        timestamp_ms: i64,
    ) -> Self {
        let reward = if outcome.is_success() {
            scenario.reward.clone()
        } else {
            None
        };

        Self {
            id,
            scenario_id: scenario.id.clone(),
            title: scenario.name.clone(),
            image,
            timestamp_ms,
            tone: outcome.into(),
            selected_answer: scenario.selected_answer.clone(),
            reward,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RewardError {
    #[error("card {0} not found")]
    CardNotFound(CardId),

    #[error("card {0} carries no reward")]
    NoReward(CardId),

    #[error("reward on card {0} is already used up")]
    AlreadyUsed(CardId),
}

impl crate::error::GameError for RewardError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            RewardError::CardNotFound(_) => "REWARD_CARD_NOT_FOUND",
            RewardError::NoReward(_) => "REWARD_NONE",
            RewardError::AlreadyUsed(_) => "REWARD_ALREADY_USED",
        }
    }
}

/// Append-only card album for a session, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardCollection {
    cards: Vec<CollectedCard>,
    next_id: u32,
}

impl CardCollection {
    /// Points awarded per collected card.
    pub const SCORE_PER_CARD: u32 = 5_000;

    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the id for the next card.
    pub fn allocate_id(&mut self) -> CardId {
        let id = CardId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn push(&mut self, card: CollectedCard) {
        self.cards.insert(0, card);
    }

    pub fn get(&self, id: CardId) -> Option<&CollectedCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectedCard> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.cards.len() as u32 * Self::SCORE_PER_CARD
    }

    /// Spends one use of the reward on `id` and returns its kind.
    ///
    /// This is the only mutation a stored card ever sees.
    pub fn spend_reward(&mut self, id: CardId) -> Result<RewardKind, RewardError> {
        let card = self
            .cards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or(RewardError::CardNotFound(id))?;
        let reward = card.reward.as_mut().ok_or(RewardError::NoReward(id))?;
        if !reward.spend() {
            return Err(RewardError::AlreadyUsed(id));
        }
        Ok(reward.kind)
    }
}
