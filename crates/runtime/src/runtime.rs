//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive sessions.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use quest_core::{GameConfig, Position, Scenario};

use crate::api::{
    ArtGenerator, JsonScenarioAnalyzer, PlaceholderArtGenerator, Result, RuntimeError,
    RuntimeHandle, ScenarioAnalyzer,
};
use crate::events::EventBus;
use crate::workers::{Command, SessionWorker};

/// When an armed tool is disarmed after its effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolConsumption {
    /// The runtime disarms the tool right after the effect is applied.
    #[default]
    Immediate,
    /// The tool stays armed until the client sends `AcknowledgeEffect`.
    OnAcknowledge,
}

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for map and coin generation; a random seed is drawn per session
    /// when unset.
    pub seed: Option<u64>,
    /// Time the resolution message stays up before the scenario completes.
    pub resolution_delay: Duration,
    /// Where a scenario synthesized from a photo is placed.
    pub photo_anchor: Position,
    pub tool_consumption: ToolConsumption,
}

impl RuntimeConfig {
    pub const DEFAULT_RESOLUTION_DELAY: Duration = Duration::from_millis(1500);
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            seed: None,
            resolution_delay: Self::DEFAULT_RESOLUTION_DELAY,
            photo_anchor: Position::new(25, 15),
            tool_consumption: ToolConsumption::default(),
        }
    }
}

/// Main runtime that orchestrates game sessions
///
/// Runtime owns the worker task; [`RuntimeHandle`] provides a cloneable
/// façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain; every cloned handle must be dropped first.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    campaign: Vec<Scenario>,
    analyzer: Option<Arc<dyn ScenarioAnalyzer>>,
    art: Option<Arc<dyn ArtGenerator>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            campaign: Vec::new(),
            analyzer: None,
            art: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Scenarios used by `start_campaign`
    pub fn campaign(mut self, scenarios: Vec<Scenario>) -> Self {
        self.campaign = scenarios;
        self
    }

    /// Set the photo analyzer (defaults to [`JsonScenarioAnalyzer`])
    pub fn analyzer(mut self, analyzer: impl ScenarioAnalyzer + 'static) -> Self {
        self.analyzer = Some(Arc::new(analyzer));
        self
    }

    /// Set the art generator (defaults to [`PlaceholderArtGenerator`])
    pub fn art_generator(mut self, art: impl ArtGenerator + 'static) -> Self {
        self.art = Some(Arc::new(art));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        if self.config.command_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig("command_buffer_size must be positive"));
        }
        if self.config.event_buffer_size == 0 {
            return Err(RuntimeError::InvalidConfig("event_buffer_size must be positive"));
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx.clone(), event_bus.clone());

        let analyzer = self
            .analyzer
            .unwrap_or_else(|| Arc::new(JsonScenarioAnalyzer));
        let art = self
            .art
            .unwrap_or_else(|| Arc::new(PlaceholderArtGenerator));

        tracing::info!(
            campaign = self.campaign.len(),
            seed = ?self.config.seed,
            "runtime starting"
        );
        let worker = SessionWorker::new(
            self.config,
            self.campaign,
            analyzer,
            art,
            command_rx,
            command_tx.downgrade(),
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
