//! End-to-end session flows against fake collaborators.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;

use quest_core::{
    CardId, CardTone, GameConfig, InteractionPhase, MapGenConfig, Position, Reward, RewardError,
    RewardKind, Scenario, ScenarioOption, Skin, WorldEvent, WorldInput,
};
use quest_runtime::session::{ANALYSIS_FAILED_MESSAGE, REWARD_FAILED_MESSAGE};
use quest_runtime::{
    ArtGenerator, CollaboratorError, Event, Runtime, RuntimeConfig, RuntimeError, RuntimeHandle,
    ScenarioAnalyzer, SessionEvent, SessionStatus, ToolConsumption, Topic, compose_art_prompt,
};

// ----------------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------------

fn scenario(id: &str, at: Position) -> Scenario {
    Scenario {
        id: id.into(),
        name: format!("NPC {id}"),
        skin: Skin::Knight,
        position: Some(at),
        trigger_radius_px: 100.0,
        question: "A dog is eating. What do you do?".into(),
        options: vec![
            ScenarioOption {
                text: "Take its bowl".into(),
                is_correct: false,
                reward_card_prompt: "An angry dog".into(),
            },
            ScenarioOption {
                text: "Leave it alone".into(),
                is_correct: true,
                reward_card_prompt: "A happy dog".into(),
            },
        ],
        dialogue_success: "Good call.".into(),
        dialogue_fail: "Ouch.".into(),
        selected_answer: None,
        reward: None,
    }
}

/// Open map: no forest, rocks, or buildings.
fn config() -> RuntimeConfig {
    let map = MapGenConfig {
        forest_threshold: 10.0,
        rock_chance: 0.0,
        building_chance: 0.0,
        ..MapGenConfig::default()
    };
    RuntimeConfig {
        game_config: GameConfig {
            map,
            ..GameConfig::default()
        },
        seed: Some(7),
        ..RuntimeConfig::default()
    }
}

struct FixedAnalyzer(Result<Scenario, CollaboratorError>);

#[async_trait]
impl ScenarioAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _image: &[u8], _mime: &str) -> Result<Scenario, CollaboratorError> {
        self.0.clone()
    }
}

#[derive(Clone, Default)]
struct RecordingArt {
    prompts: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl ArtGenerator for RecordingArt {
    async fn generate(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        if self.fail {
            Err(CollaboratorError::Request("quota exceeded".into()))
        } else {
            Ok(format!("https://art.test/{}", self.prompts.lock().unwrap().len()))
        }
    }
}

async fn runtime(
    config: RuntimeConfig,
    campaign: Vec<Scenario>,
    art: RecordingArt,
) -> (Runtime, RuntimeHandle, broadcast::Receiver<Event>) {
    let runtime = Runtime::builder()
        .config(config)
        .campaign(campaign)
        .art_generator(art)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let session_rx = handle.subscribe(Topic::Session);
    (runtime, handle, session_rx)
}

async fn wait_for_status(rx: &mut broadcast::Receiver<Event>, status: SessionStatus) {
    let wait = async {
        loop {
            if let Event::Session(SessionEvent::StatusChanged { to, .. }) = rx.recv().await.unwrap()
                && to == status
            {
                return;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(30), wait)
        .await
        .unwrap_or_else(|_| panic!("status {status} never reached"));
}

/// Opens the dialogue with the NPC in range and picks `option`.
async fn answer(handle: &RuntimeHandle, option: usize) {
    let opened = handle.input(WorldInput::Interact).await.unwrap();
    assert!(opened.iter().any(|e| matches!(e, WorldEvent::DialogueOpened { .. })));
    let started = handle.input(WorldInput::SelectOption(option)).await.unwrap();
    assert!(matches!(started[..], [WorldEvent::ResolutionStarted { .. }]));
}

// ----------------------------------------------------------------------------
// Campaign
// ----------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn wrong_answer_yields_bad_card_and_costs_a_life() {
    let art = RecordingArt::default();
    let campaign = vec![
        scenario("near", Position::new(27, 15)),
        scenario("far", Position::new(10, 20)),
    ];
    let (_runtime, handle, mut session_rx) = runtime(config(), campaign, art.clone()).await;

    handle.start_campaign().await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Playing);
    assert_eq!(snapshot.seed, Some(7));
    let world = snapshot.world.unwrap();
    assert!(matches!(world.phase(), InteractionPhase::Prompt { .. }));
    assert_eq!(world.player().lives, 2);

    answer(&handle, 0).await;
    wait_for_status(&mut session_rx, SessionStatus::GeneratingReward).await;
    wait_for_status(&mut session_rx, SessionStatus::ShowingReward).await;

    let snapshot = handle.snapshot().await.unwrap();
    let world = snapshot.world.as_ref().unwrap();
    assert_eq!(world.player().lives, 1);
    assert!(world.completed().contains("near"));
    assert_eq!(snapshot.remaining(), 1);
    assert_eq!(snapshot.score(), 5000);

    let card = snapshot.cards.iter().next().unwrap();
    assert_eq!(card.tone, CardTone::Bad);
    assert_eq!(card.scenario_id, "near");
    assert_eq!(card.title, "NPC near");
    assert_eq!(card.selected_answer.as_deref(), Some("Take its bowl"));
    assert_eq!(card.image.as_deref(), Some("https://art.test/1"));

    assert_eq!(
        *art.prompts.lock().unwrap(),
        vec![compose_art_prompt("An angry dog", quest_core::Outcome::Fail)]
    );

    handle.collect_and_continue().await.unwrap();
    assert_eq!(
        handle.snapshot().await.unwrap().status,
        SessionStatus::Playing
    );
}

#[tokio::test(start_paused = true)]
async fn art_failure_moves_to_error_without_a_card() {
    let art = RecordingArt {
        fail: true,
        ..RecordingArt::default()
    };
    let campaign = vec![scenario("near", Position::new(27, 15))];
    let (_runtime, handle, mut session_rx) = runtime(config(), campaign, art).await;

    handle.start_campaign().await.unwrap();
    answer(&handle, 1).await;
    wait_for_status(&mut session_rx, SessionStatus::Error).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.error.as_deref(), Some(REWARD_FAILED_MESSAGE));
    assert!(snapshot.cards.is_empty());
    assert!(snapshot.world.unwrap().completed().contains("near"));

    // Only quitting or starting over is possible from here.
    assert!(matches!(
        handle.input(WorldInput::Interact).await,
        Err(RuntimeError::InvalidStatus { .. })
    ));
    handle.quit_to_menu().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().status, SessionStatus::Menu);
}

#[tokio::test(start_paused = true)]
async fn losing_the_last_life_ends_in_game_over() {
    let mut config = config();
    config.game_config.world.initial_lives = 1;
    let campaign = vec![
        scenario("near", Position::new(27, 15)),
        scenario("far", Position::new(10, 20)),
    ];
    let (_runtime, handle, mut session_rx) =
        runtime(config, campaign, RecordingArt::default()).await;
    let mut world_rx = handle.subscribe(Topic::World);

    handle.start_campaign().await.unwrap();
    answer(&handle, 0).await;
    wait_for_status(&mut session_rx, SessionStatus::GameOver).await;

    let mut game_overs = 0;
    while let Ok(event) = world_rx.try_recv() {
        if matches!(event, Event::World(WorldEvent::GameOver)) {
            game_overs += 1;
        }
    }
    assert_eq!(game_overs, 1);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.cards.len(), 1);
    assert!(snapshot.world.unwrap().is_game_over());
    assert!(matches!(
        handle.input(WorldInput::Move(quest_core::CardinalDirection::Up)).await,
        Err(RuntimeError::InvalidStatus {
            status: SessionStatus::GameOver,
            ..
        })
    ));

    // A new campaign starts from scratch.
    handle.start_campaign().await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.cards.is_empty());
    assert_eq!(snapshot.world.unwrap().player().lives, 1);
}

#[tokio::test(start_paused = true)]
async fn quitting_mid_resolution_drops_the_pending_finish() {
    let art = RecordingArt::default();
    let campaign = vec![scenario("near", Position::new(27, 15))];
    let (_runtime, handle, _session_rx) = runtime(config(), campaign, art.clone()).await;

    handle.start_campaign().await.unwrap();
    answer(&handle, 1).await;
    handle.quit_to_menu().await.unwrap();

    tokio::time::sleep(RuntimeConfig::DEFAULT_RESOLUTION_DELAY * 2).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.status, SessionStatus::Menu);
    assert!(snapshot.world.is_none());
    assert!(art.prompts.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn commands_outside_their_status_are_rejected() {
    let (_runtime, handle, _session_rx) = runtime(config(), vec![], RecordingArt::default()).await;

    assert!(matches!(
        handle.start_campaign().await,
        Err(RuntimeError::EmptyCampaign)
    ));
    assert!(matches!(
        handle.input(WorldInput::Interact).await,
        Err(RuntimeError::InvalidStatus {
            status: SessionStatus::Menu,
            ..
        })
    ));
    assert!(matches!(
        handle.collect_and_continue().await,
        Err(RuntimeError::InvalidStatus { .. })
    ));
    assert!(matches!(
        handle.arm_reward(CardId(0)).await,
        Err(RuntimeError::InvalidStatus { .. })
    ));
}

// ----------------------------------------------------------------------------
// Rewards
// ----------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn good_card_reward_can_be_spent_once() {
    let mut rewarded = scenario("near", Position::new(27, 15));
    rewarded.reward = Some(Reward::new(RewardKind::Axe).with_uses(1));
    let (_runtime, handle, mut session_rx) =
        runtime(config(), vec![rewarded], RecordingArt::default()).await;

    handle.start_campaign().await.unwrap();
    answer(&handle, 1).await;
    wait_for_status(&mut session_rx, SessionStatus::ShowingReward).await;

    let card_id = {
        let snapshot = handle.snapshot().await.unwrap();
        let card = snapshot.cards.iter().next().unwrap();
        assert_eq!(card.tone, CardTone::Good);
        card.id
    };

    // Not while the reward screen is up.
    assert!(handle.arm_reward(card_id).await.is_err());
    handle.collect_and_continue().await.unwrap();

    assert_eq!(handle.arm_reward(card_id).await.unwrap(), RewardKind::Axe);
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(
        snapshot.world.unwrap().player().active_tool,
        Some(RewardKind::Axe)
    );
    assert!(snapshot.cards.get(card_id).unwrap().reward.as_ref().unwrap().used);

    // Immediate consumption disarms right after the effect.
    let events = handle.input(WorldInput::UseActiveTool).await.unwrap();
    assert!(matches!(
        events[..],
        [WorldEvent::EffectApplied { tool: RewardKind::Axe, .. }, WorldEvent::ToolDisarmed]
    ));

    assert!(matches!(
        handle.arm_reward(card_id).await,
        Err(RuntimeError::Reward(RewardError::AlreadyUsed(_)))
    ));
}

/// Earns a one-use axe card from the NPC next to the start, collects it, and
/// arms it.
async fn armed_axe(config: RuntimeConfig) -> (Runtime, RuntimeHandle) {
    let mut rewarded = scenario("near", Position::new(27, 15));
    rewarded.reward = Some(Reward::new(RewardKind::Axe).with_uses(1));
    let (runtime, handle, mut session_rx) =
        runtime(config, vec![rewarded], RecordingArt::default()).await;

    handle.start_campaign().await.unwrap();
    answer(&handle, 1).await;
    wait_for_status(&mut session_rx, SessionStatus::ShowingReward).await;
    handle.collect_and_continue().await.unwrap();

    let card_id = handle.snapshot().await.unwrap().cards.iter().next().unwrap().id;
    assert_eq!(handle.arm_reward(card_id).await.unwrap(), RewardKind::Axe);
    (runtime, handle)
}

async fn active_tool(handle: &RuntimeHandle) -> Option<RewardKind> {
    let snapshot = handle.snapshot().await.unwrap();
    snapshot.world.unwrap().player().active_tool
}

#[tokio::test(start_paused = true)]
async fn immediate_consumption_clears_the_tool_after_use() {
    let (_runtime, handle) = armed_axe(config()).await;
    assert_eq!(active_tool(&handle).await, Some(RewardKind::Axe));

    let events = handle.input(WorldInput::UseActiveTool).await.unwrap();
    assert!(events.contains(&WorldEvent::ToolDisarmed));
    assert_eq!(active_tool(&handle).await, None);

    // Nothing left to use.
    assert!(handle.input(WorldInput::UseActiveTool).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn deferred_consumption_keeps_the_tool_until_acknowledged() {
    let config = RuntimeConfig {
        tool_consumption: ToolConsumption::OnAcknowledge,
        ..config()
    };
    let (_runtime, handle) = armed_axe(config).await;

    let events = handle.input(WorldInput::UseActiveTool).await.unwrap();
    assert!(matches!(
        events[..],
        [WorldEvent::EffectApplied { tool: RewardKind::Axe, .. }]
    ));
    assert_eq!(active_tool(&handle).await, Some(RewardKind::Axe));

    let events = handle.input(WorldInput::AcknowledgeEffect).await.unwrap();
    assert_eq!(events, vec![WorldEvent::ToolDisarmed]);
    assert_eq!(active_tool(&handle).await, None);
}

// ----------------------------------------------------------------------------
// Photo scan
// ----------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn scanned_photo_becomes_a_single_scenario_session() {
    let mut synthesized = scenario("photo", Position::new(3, 3));
    synthesized.skin = Skin::Cat;
    let runtime = Runtime::builder()
        .config(config())
        .analyzer(FixedAnalyzer(Ok(synthesized)))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);

    handle.scan_photo(vec![1, 2, 3], "image/png").await.unwrap();
    wait_for_status(&mut session_rx, SessionStatus::Analyzing).await;
    wait_for_status(&mut session_rx, SessionStatus::Playing).await;

    let world = handle.snapshot().await.unwrap().world.unwrap();
    assert_eq!(world.scenarios().len(), 1);
    let placed = &world.scenarios()[0];
    assert_eq!(placed.position, Some(Position::new(25, 15)));
    assert_eq!(placed.skin, Skin::Wolf);
    assert!(matches!(world.phase(), InteractionPhase::Prompt { scenario: 0 }));

    drop(session_rx);
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn failed_analysis_reports_error_and_keeps_state() {
    let runtime = Runtime::builder()
        .config(config())
        .analyzer(FixedAnalyzer(Err(CollaboratorError::Request(
            "timeout".into(),
        ))))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut session_rx = handle.subscribe(Topic::Session);

    handle.scan_photo(vec![0xff], "image/jpeg").await.unwrap();
    wait_for_status(&mut session_rx, SessionStatus::Error).await;

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
    assert!(snapshot.world.is_none());
    assert!(snapshot.cards.is_empty());

    // Retrying from the error screen is allowed.
    assert!(handle.scan_photo(vec![0xff], "image/jpeg").await.is_ok());
}
