//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the world and card album and executes every
//! command; collaborator calls and timers run as short-lived tasks it spawns.

mod session;

pub use session::{Command, SessionWorker};
