//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use quest_runtime::ToolConsumption;

/// Settings the composition root needs before the runtime exists.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `scenarios.ron`.
    pub data_dir: Option<PathBuf>,
    /// Fixed map seed; random per session when unset.
    pub seed: Option<u64>,
    pub session_id: Option<String>,
    pub command_buffer: usize,
    pub tool_consumption: ToolConsumption,
    /// Print events as JSON lines instead of prose.
    pub json_events: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            seed: None,
            session_id: None,
            command_buffer: 32,
            tool_consumption: ToolConsumption::Immediate,
            json_events: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `QUEST_DATA_DIR` - Content directory (default: built-in campaign and defaults)
    /// - `QUEST_SEED` - Map seed (default: random per session)
    /// - `QUEST_SESSION_ID` - Log directory name (default: timestamp based)
    /// - `QUEST_COMMAND_BUFFER` - Runtime command queue size (default: 32)
    /// - `QUEST_MANUAL_ACK` - Keep tools armed until `ack` (default: false)
    /// - `QUEST_JSON_EVENTS` - Print events as JSON lines (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("QUEST_DATA_DIR").ok().map(PathBuf::from);
        config.seed = read_env::<u64>("QUEST_SEED");
        config.session_id = env::var("QUEST_SESSION_ID").ok();

        if let Some(capacity) = read_env::<usize>("QUEST_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }

        if read_env::<bool>("QUEST_MANUAL_ACK").unwrap_or(false) {
            config.tool_consumption = ToolConsumption::OnAcknowledge;
        }

        config.json_events = read_env::<bool>("QUEST_JSON_EVENTS").unwrap_or(false);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
