//! Dialogue state machine: `Idle -> Prompt -> Dialogue -> Resolving -> Idle`.

use crate::state::Outcome;

use super::{FinishReport, InteractionError, World, WorldEvent};

/// Where the player is in the encounter flow.
///
/// Scenario references are indices into the world's scenario list, which
/// never changes length during a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    /// No NPC in range; free movement.
    Idle,
    /// An NPC is in range and the interact affordance is shown.
    Prompt { scenario: usize },
    /// Options are visible; movement is suspended.
    Dialogue { scenario: usize },
    /// An option was chosen; the narrative line is showing.
    Resolving(PendingResolution),
}

impl InteractionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionPhase::Idle => "idle",
            InteractionPhase::Prompt { .. } => "prompt",
            InteractionPhase::Dialogue { .. } => "dialogue",
            InteractionPhase::Resolving(_) => "resolving",
        }
    }

    pub fn allows_movement(&self) -> bool {
        matches!(
            self,
            InteractionPhase::Idle | InteractionPhase::Prompt { .. }
        )
    }
}

/// The choice awaiting [`World::finish_resolution`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingResolution {
    pub scenario: usize,
    pub option: usize,
    pub outcome: Outcome,
    pub message: String,
}

impl World {
    /// Opens the dialogue with the NPC currently in range.
    pub fn interact(&mut self) -> Result<Vec<WorldEvent>, InteractionError> {
        if self.game_over {
            return Err(InteractionError::GameOver);
        }

        match self.phase {
            InteractionPhase::Prompt { scenario } => {
                let scenario_id = self.scenarios[scenario].id.clone();
                tracing::debug!(%scenario_id, "dialogue opened");
                self.phase = InteractionPhase::Dialogue { scenario };
                Ok(vec![
                    WorldEvent::PromptVisibilityChanged {
                        visible: false,
                        scenario_id: None,
                    },
                    WorldEvent::DialogueOpened { scenario_id },
                ])
            }
            InteractionPhase::Dialogue { .. } => Ok(Vec::new()),
            InteractionPhase::Resolving(_) => Err(InteractionError::Resolving),
            InteractionPhase::Idle => Err(InteractionError::NoCandidate),
        }
    }

    /// Closes the dialogue without touching any scenario state.
    pub fn cancel(&mut self) -> Result<Vec<WorldEvent>, InteractionError> {
        let InteractionPhase::Dialogue { .. } = self.phase else {
            return Err(InteractionError::NotInDialogue);
        };

        self.phase = InteractionPhase::Idle;
        let mut events = vec![WorldEvent::DialogueClosed];
        events.extend(self.refresh());
        Ok(events)
    }

    /// Picks an option and starts the timed resolution.
    pub fn select_option(&mut self, index: usize) -> Result<Vec<WorldEvent>, InteractionError> {
        if self.game_over {
            return Err(InteractionError::GameOver);
        }
        let scenario_index = match self.phase {
            InteractionPhase::Dialogue { scenario } => scenario,
            InteractionPhase::Resolving(_) => return Err(InteractionError::Resolving),
            _ => return Err(InteractionError::NotInDialogue),
        };

        let scenario = &mut self.scenarios[scenario_index];
        let option = scenario
            .options
            .get(index)
            .ok_or(InteractionError::InvalidOption {
                index,
                available: scenario.options.len(),
            })?;
        let outcome = Outcome::from_correctness(option.is_correct);
        scenario.selected_answer = Some(option.text.clone());
        let message = scenario.outcome_message(outcome).to_owned();
        let scenario_id = scenario.id.clone();

        tracing::debug!(%scenario_id, option = index, %outcome, "resolution started");
        self.phase = InteractionPhase::Resolving(PendingResolution {
            scenario: scenario_index,
            option: index,
            outcome,
            message: message.clone(),
        });

        Ok(vec![WorldEvent::ResolutionStarted {
            scenario_id,
            outcome,
            message,
        }])
    }

    /// Completes the pending resolution once the host's delay has elapsed.
    ///
    /// Marks the scenario completed, takes a life on failure, and emits the
    /// [`WorldEvent::Finish`] report. Losing the last life ends the session.
    pub fn finish_resolution(&mut self) -> Result<Vec<WorldEvent>, InteractionError> {
        let InteractionPhase::Resolving(pending) = &self.phase else {
            return Err(InteractionError::NotResolving);
        };
        let pending = pending.clone();
        self.phase = InteractionPhase::Idle;

        let mut events = Vec::new();
        let scenario = self.scenarios[pending.scenario].clone();
        self.completed.insert(scenario.id.clone());

        if !pending.outcome.is_success() && self.player.hurt() {
            events.push(WorldEvent::LivesChanged(self.player.lives));
        }

        let art_prompt = scenario.options[pending.option].reward_card_prompt.clone();
        tracing::debug!(
            scenario_id = %scenario.id,
            outcome = %pending.outcome,
            lives = self.player.lives,
            "resolution finished"
        );
        events.push(WorldEvent::Finish(FinishReport {
            outcome: pending.outcome,
            art_prompt,
            scenario,
        }));

        if !pending.outcome.is_success() && !self.player.is_alive() && !self.game_over {
            tracing::info!("game over");
            self.game_over = true;
            events.push(WorldEvent::GameOver);
            return Ok(events);
        }

        events.extend(self.refresh());
        Ok(events)
    }
}
