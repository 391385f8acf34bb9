//! Session worker that owns the authoritative [`World`] and card album.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), drives the
//! world model, and publishes events to the [`EventBus`]. Slow work (photo
//! analysis, art generation, the resolution delay) runs in spawned tasks that
//! report back through the same command channel. Every report carries the
//! session epoch it was started under; reports from an abandoned session are
//! dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use quest_core::{
    CardCollection, CardId, CollectedCard, FinishReport, RewardKind, Scenario, Skin, World,
    WorldEvent, WorldInput,
};

use crate::api::{ArtGenerator, CollaboratorError, Result, RuntimeError, ScenarioAnalyzer};
use crate::events::{Event, EventBus, RewardEvent, SessionEvent};
use crate::runtime::{RuntimeConfig, ToolConsumption};
use crate::session::{
    ANALYSIS_FAILED_MESSAGE, REWARD_FAILED_MESSAGE, SessionSnapshot, SessionStatus,
    compose_art_prompt,
};

/// Commands that can be sent to the session worker
pub enum Command {
    /// Start the built-in campaign.
    StartCampaign { reply: oneshot::Sender<Result<()>> },
    /// Hand a photo to the analyzer. The reply only confirms the request was accepted.
    ScanPhoto {
        image: Vec<u8>,
        mime: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Deliver one input to the world.
    Input {
        input: WorldInput,
        reply: oneshot::Sender<Result<Vec<WorldEvent>>>,
    },
    /// Spend the reward on a collected card.
    ArmReward {
        card_id: CardId,
        reply: oneshot::Sender<Result<RewardKind>>,
    },
    CollectAndContinue { reply: oneshot::Sender<Result<()>> },
    QuitToMenu { reply: oneshot::Sender<()> },
    /// Query the current session (read-only).
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Completion report from a task the worker spawned.
    Report(Report),
}

/// Results of background tasks, tagged with the epoch they were started in.
pub enum Report {
    AnalysisFinished {
        epoch: u64,
        result: std::result::Result<Scenario, CollaboratorError>,
    },
    ResolutionDue {
        epoch: u64,
    },
    ArtFinished {
        epoch: u64,
        report: Box<FinishReport>,
        result: std::result::Result<String, CollaboratorError>,
    },
}

/// Background task that processes session commands.
pub struct SessionWorker {
    config: RuntimeConfig,
    campaign: Vec<Scenario>,
    analyzer: Arc<dyn ScenarioAnalyzer>,
    art: Arc<dyn ArtGenerator>,
    command_rx: mpsc::Receiver<Command>,
    report_tx: mpsc::WeakSender<Command>,
    event_bus: EventBus,

    status: SessionStatus,
    error: Option<String>,
    seed: Option<u64>,
    world: Option<World>,
    cards: CardCollection,
    epoch: u64,
}

impl SessionWorker {
    /// Creates a new session worker.
    ///
    /// `report_tx` must feed `command_rx`; it is held weakly so the worker
    /// stops once every handle is dropped.
    pub fn new(
        config: RuntimeConfig,
        campaign: Vec<Scenario>,
        analyzer: Arc<dyn ScenarioAnalyzer>,
        art: Arc<dyn ArtGenerator>,
        command_rx: mpsc::Receiver<Command>,
        report_tx: mpsc::WeakSender<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            config,
            campaign,
            analyzer,
            art,
            command_rx,
            report_tx,
            event_bus,
            status: SessionStatus::Menu,
            error: None,
            seed: None,
            world: None,
            cards: CardCollection::new(),
            epoch: 0,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        debug!("session worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartCampaign { reply } => {
                let result = self.start_campaign();
                let _ = reply.send(result);
            }
            Command::ScanPhoto { image, mime, reply } => {
                let result = self.scan_photo(image, mime);
                let _ = reply.send(result);
            }
            Command::Input { input, reply } => {
                let result = self.apply_input(input);
                let _ = reply.send(result);
            }
            Command::ArmReward { card_id, reply } => {
                let result = self.arm_reward(card_id);
                let _ = reply.send(result);
            }
            Command::CollectAndContinue { reply } => {
                let result = self.collect_and_continue();
                let _ = reply.send(result);
            }
            Command::QuitToMenu { reply } => {
                self.quit_to_menu();
                let _ = reply.send(());
            }
            Command::Snapshot { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Report(report) => self.handle_report(report),
        }
    }

    fn handle_report(&mut self, report: Report) {
        match report {
            Report::AnalysisFinished { epoch, result } => {
                if self.is_current(epoch, SessionStatus::Analyzing) {
                    self.finish_analysis(result);
                }
            }
            Report::ResolutionDue { epoch } => {
                if self.is_current(epoch, SessionStatus::Playing) {
                    self.finish_resolution();
                }
            }
            Report::ArtFinished {
                epoch,
                report,
                result,
            } => {
                if self.is_current(epoch, SessionStatus::GeneratingReward) {
                    self.finish_reward(*report, result);
                }
            }
        }
    }

    fn is_current(&self, epoch: u64, expected: SessionStatus) -> bool {
        let current = epoch == self.epoch && self.status == expected;
        if !current {
            debug!(epoch, current_epoch = self.epoch, status = %self.status, "stale report dropped");
        }
        current
    }

    // ------------------------------------------------------------------
    // Session lifecycle
    // ------------------------------------------------------------------

    fn start_campaign(&mut self) -> Result<()> {
        self.require_start("start_campaign")?;
        if self.campaign.is_empty() {
            return Err(RuntimeError::EmptyCampaign);
        }
        self.begin_session(self.campaign.clone());
        Ok(())
    }

    fn scan_photo(&mut self, image: Vec<u8>, mime: String) -> Result<()> {
        self.require_start("scan_photo")?;

        self.epoch += 1;
        self.error = None;
        self.set_status(SessionStatus::Analyzing);
        info!(bytes = image.len(), %mime, "analyzing photo");

        let epoch = self.epoch;
        let analyzer = Arc::clone(&self.analyzer);
        let report_tx = self.report_tx.clone();
        tokio::spawn(async move {
            let result = analyzer.analyze(&image, &mime).await;
            send_report(&report_tx, Report::AnalysisFinished { epoch, result }).await;
        });
        Ok(())
    }

    fn finish_analysis(&mut self, result: std::result::Result<Scenario, CollaboratorError>) {
        match result {
            Ok(mut scenario) => {
                scenario.position = Some(self.config.photo_anchor);
                scenario.skin = Skin::Wolf;
                self.begin_session(vec![scenario]);
            }
            Err(error) => {
                warn!(%error, "photo analysis failed");
                self.fail(ANALYSIS_FAILED_MESSAGE);
            }
        }
    }

    /// Replaces the world, cards, lives, and coins with a fresh session.
    fn begin_session(&mut self, scenarios: Vec<Scenario>) {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let world = World::generate(&self.config.game_config, scenarios, seed);

        let scenario_ids: Vec<String> = world.scenarios().iter().map(|s| s.id.clone()).collect();
        info!(seed, scenarios = scenario_ids.len(), "session started");

        self.epoch += 1;
        self.seed = Some(seed);
        self.error = None;
        self.cards = CardCollection::new();
        self.world = Some(world);

        self.event_bus
            .publish(Event::Session(SessionEvent::Started { scenario_ids, seed }));
        self.set_status(SessionStatus::Playing);

        let events = self.world.as_mut().map(World::refresh).unwrap_or_default();
        self.publish_world(&events);
    }

    fn quit_to_menu(&mut self) {
        info!(status = %self.status, "returning to menu");
        self.epoch += 1;
        self.world = None;
        self.cards = CardCollection::new();
        self.seed = None;
        self.error = None;
        self.event_bus.publish(Event::Session(SessionEvent::Ended));
        self.set_status(SessionStatus::Menu);
    }

    fn collect_and_continue(&mut self) -> Result<()> {
        self.require_status("collect_and_continue", SessionStatus::ShowingReward)?;
        self.set_status(SessionStatus::Playing);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Play
    // ------------------------------------------------------------------

    fn apply_input(&mut self, input: WorldInput) -> Result<Vec<WorldEvent>> {
        self.require_status("input", SessionStatus::Playing)?;
        let world = self.world.as_mut().ok_or(RuntimeError::NoSession)?;

        let mut events = world.handle(input);
        let effect_applied = events
            .iter()
            .any(|event| matches!(event, WorldEvent::EffectApplied { .. }));
        if effect_applied && self.config.tool_consumption == ToolConsumption::Immediate {
            events.extend(world.acknowledge_effect());
        }

        self.publish_world(&events);
        if events
            .iter()
            .any(|event| matches!(event, WorldEvent::ResolutionStarted { .. }))
        {
            self.schedule_resolution();
        }
        Ok(events)
    }

    fn arm_reward(&mut self, card_id: CardId) -> Result<RewardKind> {
        self.require_status("arm_reward", SessionStatus::Playing)?;
        let world = self.world.as_mut().ok_or(RuntimeError::NoSession)?;

        // Spend on a copy so a rejected arm leaves the album untouched.
        let mut cards = self.cards.clone();
        let kind = cards.spend_reward(card_id)?;
        let events = world.arm_reward(kind)?;
        self.cards = cards;

        debug!(%card_id, %kind, "reward spent");
        self.event_bus
            .publish(Event::Reward(RewardEvent::Spent { card_id, kind }));
        self.publish_world(&events);
        Ok(kind)
    }

    fn schedule_resolution(&self) {
        let epoch = self.epoch;
        let delay = self.config.resolution_delay;
        let report_tx = self.report_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            send_report(&report_tx, Report::ResolutionDue { epoch }).await;
        });
    }

    fn finish_resolution(&mut self) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        let events = match world.finish_resolution() {
            Ok(events) => events,
            Err(error) => {
                warn!(%error, "resolution timer fired without a pending resolution");
                return;
            }
        };
        self.publish_world(&events);

        let finish = events.into_iter().find_map(|event| match event {
            WorldEvent::Finish(report) => Some(report),
            _ => None,
        });
        if let Some(report) = finish {
            self.request_reward(report);
        }
    }

    // ------------------------------------------------------------------
    // Reward pipeline
    // ------------------------------------------------------------------

    fn request_reward(&mut self, report: FinishReport) {
        let prompt = compose_art_prompt(&report.art_prompt, report.outcome);
        self.set_status(SessionStatus::GeneratingReward);
        self.event_bus
            .publish(Event::Reward(RewardEvent::Generating {
                scenario_id: report.scenario.id.clone(),
                prompt: prompt.clone(),
            }));

        let epoch = self.epoch;
        let art = Arc::clone(&self.art);
        let report_tx = self.report_tx.clone();
        tokio::spawn(async move {
            let result = art.generate(&prompt).await;
            send_report(
                &report_tx,
                Report::ArtFinished {
                    epoch,
                    report: Box::new(report),
                    result,
                },
            )
            .await;
        });
    }

    fn finish_reward(
        &mut self,
        report: FinishReport,
        result: std::result::Result<String, CollaboratorError>,
    ) {
        let image = match result {
            Ok(image) => image,
            Err(error) => {
                warn!(%error, scenario_id = %report.scenario.id, "reward art generation failed");
                self.event_bus
                    .publish(Event::Reward(RewardEvent::GenerationFailed {
                        scenario_id: report.scenario.id,
                    }));
                self.fail(REWARD_FAILED_MESSAGE);
                return;
            }
        };

        let id = self.cards.allocate_id();
        let card = CollectedCard::from_resolution(
            id,
            &report.scenario,
            report.outcome,
            Some(image),
            chrono::Utc::now().timestamp_millis(),
        );
        debug!(card_id = %id, tone = %card.tone, "card collected");
        self.cards.push(card.clone());
        self.event_bus
            .publish(Event::Reward(RewardEvent::CardCollected(card)));

        let game_over = self.world.as_ref().is_some_and(World::is_game_over);
        if game_over {
            info!(score = self.cards.score(), "session over");
            self.set_status(SessionStatus::GameOver);
        } else {
            self.set_status(SessionStatus::ShowingReward);
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            error: self.error.clone(),
            seed: self.seed,
            world: self.world.clone(),
            cards: self.cards.clone(),
        }
    }

    fn require_status(&self, command: &'static str, expected: SessionStatus) -> Result<()> {
        if self.status != expected {
            return Err(RuntimeError::InvalidStatus {
                command,
                status: self.status,
            });
        }
        Ok(())
    }

    fn require_start(&self, command: &'static str) -> Result<()> {
        if !self.status.can_start_session() {
            return Err(RuntimeError::InvalidStatus {
                command,
                status: self.status,
            });
        }
        Ok(())
    }

    fn fail(&mut self, message: &str) {
        self.error = Some(message.to_owned());
        self.event_bus.publish(Event::Session(SessionEvent::Failed {
            message: message.to_owned(),
        }));
        self.set_status(SessionStatus::Error);
    }

    fn set_status(&mut self, to: SessionStatus) {
        let from = self.status;
        if from == to {
            return;
        }
        debug!(%from, %to, "session status changed");
        self.status = to;
        self.event_bus
            .publish(Event::Session(SessionEvent::StatusChanged { from, to }));
    }

    fn publish_world(&self, events: &[WorldEvent]) {
        for event in events {
            self.event_bus.publish(Event::World(event.clone()));
        }
    }
}

async fn send_report(report_tx: &mpsc::WeakSender<Command>, report: Report) {
    let Some(tx) = report_tx.upgrade() else {
        debug!("runtime shut down before a background task finished");
        return;
    };
    if tx.send(Command::Report(report)).await.is_err() {
        debug!("session worker gone before a background task finished");
    }
}
