//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving a session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use quest_core::{CardId, RewardKind, WorldEvent, WorldInput};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::SessionSnapshot;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Start the configured campaign with fresh lives, coins, and cards.
    pub async fn start_campaign(&self) -> Result<()> {
        self.request(|reply| Command::StartCampaign { reply }).await?
    }

    /// Send a photo to the analyzer.
    ///
    /// Returns once the request is accepted; the session moves to `Playing`
    /// or `Error` later, which is reported on [`Topic::Session`].
    pub async fn scan_photo(&self, image: Vec<u8>, mime: impl Into<String>) -> Result<()> {
        let mime = mime.into();
        self.request(|reply| Command::ScanPhoto { image, mime, reply })
            .await?
    }

    /// Deliver one input to the world and return the events it produced.
    ///
    /// Inputs the world rejects (a blocked move, interact with nobody around)
    /// yield an empty list rather than an error.
    pub async fn input(&self, input: WorldInput) -> Result<Vec<WorldEvent>> {
        self.request(|reply| Command::Input { input, reply }).await?
    }

    /// Spend the reward on `card_id` and apply it to the player.
    pub async fn arm_reward(&self, card_id: CardId) -> Result<RewardKind> {
        self.request(|reply| Command::ArmReward { card_id, reply })
            .await?
    }

    /// Dismiss the reward card and resume play.
    pub async fn collect_and_continue(&self) -> Result<()> {
        self.request(|reply| Command::CollectAndContinue { reply })
            .await?
    }

    /// Discard the session and return to the menu.
    pub async fn quit_to_menu(&self) -> Result<()> {
        self.request(|reply| Command::QuitToMenu { reply }).await
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - Status changes, session start and end, failures
    /// - `Topic::World` - Movement, dialogue, lives, coins, and tools
    /// - `Topic::Reward` - Card generation and reward spending
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use quest_runtime::Topic;
    ///
    /// let mut world_rx = handle.subscribe(Topic::World);
    /// while let Ok(event) = world_rx.recv().await {
    ///     // Render world events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
