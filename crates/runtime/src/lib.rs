//! Runtime orchestration for quest sessions.
//!
//! This crate wraps the synchronous world model in an async session: it owns
//! the app status (menu, analyzing, playing, reward screens), runs the
//! resolution timer, and calls out to the photo analyzer and art generator.
//! Consumers embed [`Runtime`] and interact with it through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`session`] holds status, snapshots, and reward prompt composition
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{
    ArtGenerator, CollaboratorError, JsonScenarioAnalyzer, PlaceholderArtGenerator, Result,
    RuntimeError, RuntimeHandle, ScenarioAnalyzer,
};
pub use events::{Event, EventBus, RewardEvent, SessionEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, ToolConsumption};
pub use session::{SessionSnapshot, SessionStatus, compose_art_prompt};
