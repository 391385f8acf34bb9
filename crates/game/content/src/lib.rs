//! Data-driven content definitions and loaders.
//!
//! This crate provides loaders for the game's data files:
//! - Scenario catalogs (data-driven via RON)
//! - Photo-analysis scenario payloads (JSON)
//! - Game configuration (data-driven via TOML)
//!
//! The reference campaign is compiled in, so a host can start without any
//! data directory at all.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioCatalog, ScenarioLoader};
