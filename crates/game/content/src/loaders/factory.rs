//! Content factory for building sessions from data files.

use std::path::{Path, PathBuf};

use quest_core::{GameConfig, Scenario};

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};

/// Reference campaign compiled into the binary.
const BUILTIN_CAMPAIGN: &str = include_str!("../../data/scenarios.ron");

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`, or defaults when absent.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the campaign from `scenarios.ron`, or the built-in one when absent.
    pub fn load_campaign(&self) -> LoadResult<Vec<Scenario>> {
        let path = self.data_dir.join("scenarios.ron");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no campaign file, using built-in");
            return Self::builtin_campaign();
        }
        ScenarioLoader::load(&path)
    }

    /// The three reference scenarios shipped with the game.
    pub fn builtin_campaign() -> LoadResult<Vec<Scenario>> {
        ScenarioLoader::parse(BUILTIN_CAMPAIGN)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::{Position, Skin};

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn builtin_campaign_has_reference_npcs() {
        let scenarios = ContentFactory::builtin_campaign().unwrap();
        let summary: Vec<_> = scenarios
            .iter()
            .map(|s| (s.name.as_str(), s.skin, s.position))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Wise Wizard", Skin::Wizard, Some(Position::new(35, 10))),
                ("City Bot", Skin::Mech, Some(Position::new(10, 15))),
                ("Forest Archer", Skin::Archer, Some(Position::new(42, 22))),
            ]
        );
        assert!(scenarios.iter().all(|s| s.trigger_radius_px == 100.0));
    }

    #[test]
    fn empty_directory_falls_back_to_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert_eq!(factory.load_campaign().unwrap().len(), 3);
    }

    #[test]
    fn files_in_directory_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "[world]\nmax_lives = 9\n").unwrap();
        std::fs::write(
            dir.path().join("scenarios.ron"),
            r#"(scenarios: [(
                scenario_id: "solo", npc_type: "Cat", question: "q",
                options: [
                    (text: "a", is_correct: true, reward_card_prompt: "pa"),
                    (text: "b", is_correct: false, reward_card_prompt: "pb"),
                ],
                dialogue_success: "s", dialogue_fail: "f",
            )])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().world.max_lives, 9);
        let campaign = factory.load_campaign().unwrap();
        assert_eq!(campaign.len(), 1);
        assert_eq!(campaign[0].skin, Skin::Wolf);
    }

    #[test]
    fn reference_config_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/config.toml");
        assert_eq!(ConfigLoader::load(&path).unwrap(), GameConfig::default());
    }
}
