//! Scenario catalog loader.
//!
//! Campaign catalogs are RON files; scenarios synthesized by the photo
//! analyzer arrive as JSON. Both go through the same validation.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, ensure};
use quest_core::Scenario;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Scenario catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioCatalog {
    pub scenarios: Vec<Scenario>,
}

/// Loader for scenario catalogs and single scenario payloads.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Scenario>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario catalog {}: {}", path.display(), e))
    }

    /// Parse a scenario catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<Scenario>> {
        let catalog: ScenarioCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;

        let mut seen = HashSet::new();
        for scenario in &catalog.scenarios {
            validate(scenario)?;
            if !seen.insert(scenario.id.as_str()) {
                bail!("Duplicate scenario id '{}'", scenario.id);
            }
        }

        tracing::debug!(count = catalog.scenarios.len(), "scenario catalog parsed");
        Ok(catalog.scenarios)
    }

    /// Parse one scenario from a JSON payload.
    ///
    /// Missing `position`, `skin`, and `trigger_area_px` fall back to their
    /// defaults; a payload with fewer than two options is rejected.
    pub fn from_json(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario JSON: {}", e))?;
        validate(&scenario)?;
        Ok(scenario)
    }
}

fn validate(scenario: &Scenario) -> LoadResult<()> {
    ensure!(!scenario.id.trim().is_empty(), "Scenario id must not be empty");
    ensure!(
        scenario.options.len() >= 2,
        "Scenario '{}' needs at least 2 options, found {}",
        scenario.id,
        scenario.options.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quest_core::{Position, RewardKind, Skin};

    const PHOTO_PAYLOAD: &str = r#"{
        "scenario_id": "photo_dog",
        "npc_type": "Neighbour's Dog",
        "skin": "dragon",
        "question": "A dog runs towards you barking. What do you do?",
        "options": [
            {"text": "Run away screaming", "is_correct": false, "reward_card_prompt": "a chasing dog"},
            {"text": "Stand still like a tree", "is_correct": true, "reward_card_prompt": "a calm child and dog"}
        ],
        "dialogue_success": "Good, standing still calms the dog.",
        "dialogue_fail": "Running makes the dog chase you."
    }"#;

    #[test]
    fn json_payload_uses_defaults() {
        let scenario = ScenarioLoader::from_json(PHOTO_PAYLOAD).unwrap();
        assert_eq!(scenario.id, "photo_dog");
        assert_eq!(scenario.skin, Skin::Wolf);
        assert_eq!(scenario.position, None);
        assert_eq!(scenario.trigger_radius(100.0), 100.0);
        assert_eq!(scenario.anchor(Position::new(8, 6)), Position::new(8, 6));
        assert!(scenario.options[1].is_correct);
    }

    #[test]
    fn json_payload_needs_two_options() {
        let payload = r#"{
            "scenario_id": "lonely",
            "npc_type": "Cat",
            "question": "?",
            "options": [{"text": "only", "is_correct": true, "reward_card_prompt": "p"}],
            "dialogue_success": "ok",
            "dialogue_fail": "no"
        }"#;
        let err = ScenarioLoader::from_json(payload).unwrap_err();
        assert!(err.to_string().contains("at least 2 options"));
    }

    #[test]
    fn ron_catalog_parses_rewards_and_skins() {
        let catalog = r#"#![enable(implicit_some)]
            (scenarios: [(
                scenario_id: "a",
                npc_type: "Knight",
                skin: "knight",
                position: (x: 3, y: 4),
                question: "q",
                options: [
                    (text: "x", is_correct: false, reward_card_prompt: "px"),
                    (text: "y", is_correct: true, reward_card_prompt: "py"),
                ],
                dialogue_success: "s",
                dialogue_fail: "f",
                reward: (type: axe, uses: 2),
            )])
        "#;
        let scenarios = ScenarioLoader::parse(catalog).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].skin, Skin::Knight);
        assert_eq!(scenarios[0].position, Some(Position::new(3, 4)));
        let reward = scenarios[0].reward.as_ref().unwrap();
        assert_eq!(reward.kind, RewardKind::Axe);
        assert_eq!(reward.uses, Some(2));
        assert!(!reward.used);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let option = r#"(text: "x", is_correct: true, reward_card_prompt: "p")"#;
        let entry = format!(
            r#"(scenario_id: "dup", npc_type: "n", question: "q", options: [{option}, {option}], dialogue_success: "s", dialogue_fail: "f")"#
        );
        let catalog = format!("(scenarios: [{entry}, {entry}])");
        let err = ScenarioLoader::parse(&catalog).unwrap_err();
        assert!(err.to_string().contains("Duplicate scenario id"));
    }
}
