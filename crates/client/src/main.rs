//! Quest client binary.
//!
//! Main entry point for the headless quest client.
//!
//! # Examples
//!
//! ```bash
//! # Built-in campaign with a fixed map
//! QUEST_SEED=42 cargo run -p quest-client
//!
//! # Custom content directory (config.toml, scenarios.ron)
//! QUEST_DATA_DIR=./my-campaign cargo run -p quest-client
//! ```

use anyhow::Result;
use quest_content::ContentFactory;
use quest_runtime::{JsonScenarioAnalyzer, PlaceholderArtGenerator, Runtime, RuntimeConfig};

use quest_client::{App, ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let _guard = logging::setup_logging(config.session_id.as_deref())?;
    tracing::info!("Starting quest client");

    // 3. Load content
    let (game_config, campaign) = match &config.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            tracing::info!("Loading content from {}", factory.data_dir().display());
            (factory.load_config()?, factory.load_campaign()?)
        }
        None => (Default::default(), ContentFactory::builtin_campaign()?),
    };
    tracing::info!("Campaign loaded: {} scenarios", campaign.len());

    // 4. Build runtime
    let runtime_config = RuntimeConfig {
        game_config,
        command_buffer_size: config.command_buffer,
        seed: config.seed,
        tool_consumption: config.tool_consumption,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::builder()
        .config(runtime_config)
        .campaign(campaign)
        .analyzer(JsonScenarioAnalyzer)
        .art_generator(PlaceholderArtGenerator)
        .build()
        .await?;

    // 5. Run
    App::new(runtime)
        .json_events(config.json_events)
        .run()
        .await?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
