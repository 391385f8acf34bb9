//! Game configuration loader.

use std::path::Path;

use quest_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file keep their [`GameConfig::default`] values.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::{ObstacleClearPolicy, Position};

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [world]
            initial_lives = 3
            clear_policy = "remove"
            "#,
        )
        .unwrap();

        assert_eq!(config.world.initial_lives, 3);
        assert_eq!(config.world.clear_policy, ObstacleClearPolicy::Remove);
        assert_eq!(config.world.player_start, Position::new(25, 15));
        assert_eq!(config.map, quest_core::MapGenConfig::default());
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/quest/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quest/config.toml"));
    }
}
