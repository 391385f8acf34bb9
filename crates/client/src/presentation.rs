//! Text rendering of runtime events and session snapshots.
use quest_core::{CardTone, CollectedCard, InteractionPhase, WorldEvent};
use quest_runtime::{Event, RewardEvent, SessionEvent, SessionSnapshot, SessionStatus};

/// One transcript line for an event, or `None` for events not worth printing.
pub fn describe(event: &Event) -> Option<String> {
    match event {
        Event::Session(event) => describe_session(event),
        Event::World(event) => describe_world(event),
        Event::Reward(event) => Some(describe_reward(event)),
    }
}

fn describe_session(event: &SessionEvent) -> Option<String> {
    let line = match event {
        SessionEvent::StatusChanged { to, .. } => match to {
            SessionStatus::Analyzing => "Analyzing photo...".to_string(),
            SessionStatus::GameOver => "GAME OVER. Type 'start' to try again.".to_string(),
            _ => return None,
        },
        SessionEvent::Started { scenario_ids, seed } => format!(
            "A new map unfolds (seed {}). {} NPCs are waiting.",
            seed,
            scenario_ids.len()
        ),
        SessionEvent::Failed { message } => format!("Error: {}", message),
        SessionEvent::Ended => "Back at the menu.".to_string(),
    };
    Some(line)
}

fn describe_world(event: &WorldEvent) -> Option<String> {
    let line = match event {
        WorldEvent::PlayerMoved { .. } | WorldEvent::Finish(_) => return None,
        WorldEvent::PromptVisibilityChanged {
            visible: true,
            scenario_id: Some(id),
        } => format!("Someone is nearby ({}). Press 'e' to talk.", id),
        WorldEvent::PromptVisibilityChanged { .. } => return None,
        WorldEvent::DialogueOpened { .. } => return None,
        WorldEvent::DialogueClosed => "You step away.".to_string(),
        WorldEvent::ResolutionStarted { message, .. } => format!("\"{}\"", message),
        WorldEvent::LivesChanged(lives) => format!("Lives: {}", lives),
        WorldEvent::GameOver => "You have no lives left.".to_string(),
        WorldEvent::CoinCollected(total) => format!("Coin! ({} total)", total),
        WorldEvent::LifeBonusGranted => "Coin bonus: +1 life.".to_string(),
        WorldEvent::EffectApplied { tool, cleared } => {
            format!("Your {} clears {} obstacle(s).", tool, cleared.len())
        }
        WorldEvent::ToolArmed(tool) => format!("{} ready. Type 'use' to use it.", tool),
        WorldEvent::ToolDisarmed => "Tool put away.".to_string(),
    };
    Some(line)
}

fn describe_reward(event: &RewardEvent) -> String {
    match event {
        RewardEvent::Generating { scenario_id, .. } => {
            format!("Painting a card for {}...", scenario_id)
        }
        RewardEvent::CardCollected(card) => {
            format!("New card: {}. Type 'collect' to continue.", card_line(card))
        }
        RewardEvent::GenerationFailed { scenario_id } => {
            format!("No card could be painted for {}.", scenario_id)
        }
        RewardEvent::Spent { card_id, kind } => format!("Card {} spent: {}", card_id, kind),
    }
}

/// One-line summary of a collected card.
pub fn card_line(card: &CollectedCard) -> String {
    let tone = match card.tone {
        CardTone::Good => "good",
        CardTone::Bad => "bad",
    };
    let mut line = format!("{} {} [{}]", card.id, card.title, tone);
    if let Some(reward) = &card.reward {
        let state = match (reward.used, reward.uses) {
            (true, _) => "used".to_string(),
            (false, Some(uses)) => format!("{} left", uses),
            (false, None) => "ready".to_string(),
        };
        line.push_str(&format!(" reward: {} ({})", reward.kind, state));
    }
    line
}

/// Status line: app state, lives, coins, tool, and score.
pub fn hud(snapshot: &SessionSnapshot) -> String {
    let mut line = format!("[{}]", snapshot.status);
    if let Some(message) = &snapshot.error {
        line.push_str(&format!(" {}", message));
    }

    if let Some(world) = &snapshot.world {
        let player = world.player();
        line.push_str(&format!(
            " lives {}/{} coins {} at {}",
            player.lives, player.max_lives, player.coins, player.position
        ));
        if let Some(tool) = player.active_tool {
            line.push_str(&format!(" tool {}", tool));
        }
        line.push_str(&format!(" npcs left {}", snapshot.remaining()));
    }

    line.push_str(&format!(
        " cards {} score {}",
        snapshot.cards.len(),
        snapshot.score()
    ));
    line
}

/// Dialogue text for the open scenario, if any.
pub fn dialogue(snapshot: &SessionSnapshot) -> Option<String> {
    let world = snapshot.world.as_ref()?;
    let InteractionPhase::Dialogue { scenario } = world.phase() else {
        return None;
    };
    let scenario = world.scenarios().get(*scenario)?;

    let mut text = format!("{}: {}", scenario.name, scenario.question);
    for (index, option) in scenario.options.iter().enumerate() {
        text.push_str(&format!("\n  {}. {}", index + 1, option.text));
    }
    Some(text)
}

/// Explanation for a move that produced no events.
///
/// Only a free-roaming player hit a wall; during a dialogue or resolution the
/// move was ignored and there is nothing to say.
pub fn blocked_move(snapshot: &SessionSnapshot) -> Option<&'static str> {
    let world = snapshot.world.as_ref()?;
    (world.phase().allows_movement() && !world.is_game_over()).then_some("You can't go that way.")
}
