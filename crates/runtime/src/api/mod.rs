//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and workers.

pub mod collaborators;
pub mod errors;
pub mod handle;

pub use collaborators::{
    ArtGenerator, CollaboratorError, JsonScenarioAnalyzer, PlaceholderArtGenerator,
    ScenarioAnalyzer,
};
pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
