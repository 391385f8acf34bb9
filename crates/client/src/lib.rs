//! Headless terminal host for quest sessions.
//!
//! The binary is the composition root: it reads [`ClientConfig`], loads
//! content through `quest-content`, builds the runtime with offline
//! collaborators, and hands control to [`App`], which drives the session
//! from stdin and prints events to stdout.
pub mod app;
pub mod commands;
pub mod config;
pub mod logging;
pub mod presentation;

pub use app::App;
pub use commands::Command;
pub use config::ClientConfig;
