//! Nearest-NPC resolution.

use crate::config::WorldConfig;
use crate::state::{CompletedSet, Position, Scenario};

use super::{InteractionPhase, World, WorldEvent};

/// Index of the closest open scenario whose trigger radius contains `player`.
///
/// Distances are measured in pixels (grid delta times tile size). A scenario
/// qualifies when its distance is strictly below its trigger radius; ties go
/// to the earlier scenario in the list.
pub fn nearest_scenario(
    player: Position,
    scenarios: &[Scenario],
    completed: &CompletedSet,
    config: &WorldConfig,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, scenario) in scenarios.iter().enumerate() {
        if completed.contains(&scenario.id) {
            continue;
        }

        let anchor = scenario.anchor(config.default_anchor);
        let distance = player.pixel_distance(anchor, config.tile_size);
        let radius = scenario.trigger_radius(config.default_trigger_radius);
        if distance >= radius {
            continue;
        }

        match best {
            Some((_, closest)) if closest <= distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index)
}

impl World {
    /// Recomputes the NPC in range and moves between `Idle` and `Prompt`.
    ///
    /// Does nothing while a dialogue is open or resolving. Emits a
    /// [`WorldEvent::PromptVisibilityChanged`] only when the candidate changes.
    pub fn refresh(&mut self) -> Vec<WorldEvent> {
        let current = match self.phase {
            InteractionPhase::Idle => None,
            InteractionPhase::Prompt { scenario } => Some(scenario),
            InteractionPhase::Dialogue { .. } | InteractionPhase::Resolving(_) => {
                return Vec::new();
            }
        };
        if self.game_over {
            return Vec::new();
        }

        let candidate = nearest_scenario(
            self.player.position,
            &self.scenarios,
            &self.completed,
            &self.config,
        );
        if candidate == current {
            return Vec::new();
        }

        let scenario_id = candidate.map(|index| self.scenarios[index].id.clone());
        tracing::debug!(?scenario_id, "prompt candidate changed");
        self.phase = match candidate {
            Some(scenario) => InteractionPhase::Prompt { scenario },
            None => InteractionPhase::Idle,
        };

        vec![WorldEvent::PromptVisibilityChanged {
            visible: candidate.is_some(),
            scenario_id,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::state::CardinalDirection;

    fn config() -> WorldConfig {
        WorldConfig::default()
    }

    #[test]
    fn within_radius_is_strict() {
        let scenarios = vec![scenario("a", Position::new(30, 12))];
        let completed = CompletedSet::new();

        // 2 tiles = 96px < 100
        assert_eq!(
            nearest_scenario(Position::new(28, 12), &scenarios, &completed, &config()),
            Some(0)
        );
        // 3 tiles = 144px
        assert_eq!(
            nearest_scenario(Position::new(27, 12), &scenarios, &completed, &config()),
            None
        );

        let mut exact = scenarios.clone();
        exact[0].trigger_radius_px = 96.0;
        assert_eq!(
            nearest_scenario(Position::new(28, 12), &exact, &completed, &config()),
            None
        );
    }

    #[test]
    fn closest_wins_and_ties_go_to_first() {
        let scenarios = vec![
            scenario("far", Position::new(12, 10)),
            scenario("near", Position::new(11, 10)),
            scenario("near_twin", Position::new(9, 10)),
        ];
        let completed = CompletedSet::new();
        assert_eq!(
            nearest_scenario(Position::new(10, 10), &scenarios, &completed, &config()),
            Some(1)
        );
    }

    #[test]
    fn completed_scenarios_are_skipped() {
        let scenarios = vec![
            scenario("a", Position::new(11, 10)),
            scenario("b", Position::new(12, 10)),
        ];
        let mut completed = CompletedSet::new();
        completed.insert("a");
        assert_eq!(
            nearest_scenario(Position::new(10, 10), &scenarios, &completed, &config()),
            Some(1)
        );
    }

    #[test]
    fn defaults_apply_to_unset_anchor_and_radius() {
        let mut unset = scenario("unset", Position::ORIGIN);
        unset.position = None;
        unset.trigger_radius_px = 0.0;
        let scenarios = vec![unset];
        let completed = CompletedSet::new();

        // default anchor (8,6), default radius 100px
        assert_eq!(
            nearest_scenario(Position::new(9, 7), &scenarios, &completed, &config()),
            Some(0)
        );
        assert_eq!(
            nearest_scenario(Position::new(11, 6), &scenarios, &completed, &config()),
            None
        );
    }

    #[test]
    fn refresh_reports_only_changes() {
        let mut world = world_with(vec![scenario("a", Position::new(26, 15))]);
        let first = world.refresh();
        assert_eq!(
            first,
            vec![WorldEvent::PromptVisibilityChanged {
                visible: true,
                scenario_id: Some("a".into())
            }]
        );
        assert!(world.refresh().is_empty());
        assert_eq!(world.candidate().map(|s| s.id.as_str()), Some("a"));
    }

    #[test]
    fn moving_out_of_range_clears_the_prompt() {
        let mut world = world_with(vec![scenario("a", Position::new(27, 15))]);
        world.refresh();
        assert!(matches!(world.phase(), InteractionPhase::Prompt { .. }));

        // (24,15) is 3 tiles = 144px away
        let events = world.step(CardinalDirection::Left).unwrap();
        let hidden = events
            .iter()
            .filter(|event| {
                **event
                    == WorldEvent::PromptVisibilityChanged {
                        visible: false,
                        scenario_id: None,
                    }
            })
            .count();
        assert_eq!(hidden, 1);
        assert_eq!(world.phase(), &InteractionPhase::Idle);
        assert!(world.candidate().is_none());
    }
}
