//! Armed rewards and their area effects.

use crate::config::ObstacleClearPolicy;
use crate::map::Obstacle;
use crate::state::RewardKind;

use super::{ToolError, World, WorldEvent};

impl World {
    /// Applies a spent reward to the player.
    ///
    /// Hearts heal at once and coins count toward the life bonus. Armable
    /// rewards (ship, axe, magic fire) become the active tool, replacing any
    /// previously armed one.
    pub fn arm_reward(&mut self, kind: RewardKind) -> Result<Vec<WorldEvent>, ToolError> {
        if self.game_over {
            return Err(ToolError::GameOver);
        }

        let mut events = Vec::new();
        match kind {
            RewardKind::Heart => {
                if self.player.heal() {
                    events.push(WorldEvent::LivesChanged(self.player.lives));
                }
            }
            RewardKind::Coin => self.add_coin(&mut events),
            RewardKind::Ship | RewardKind::Axe | RewardKind::MagicFire => {
                tracing::debug!(tool = %kind, "tool armed");
                self.player.active_tool = Some(kind);
                events.push(WorldEvent::ToolArmed(kind));
            }
        }
        Ok(events)
    }

    /// Clears trees and rocks around the player with the armed tool.
    ///
    /// The tool stays armed; the host disarms it with
    /// [`World::acknowledge_effect`] once the effect has been shown.
    pub fn use_active_tool(&mut self) -> Result<Vec<WorldEvent>, ToolError> {
        if self.game_over {
            return Err(ToolError::GameOver);
        }
        if !self.phase.allows_movement() {
            return Err(ToolError::Suspended);
        }
        let tool = self.player.active_tool.ok_or(ToolError::NoActiveTool)?;
        let radius = match tool {
            RewardKind::Axe => self.config.axe_radius,
            RewardKind::MagicFire => self.config.magic_fire_radius,
            other => return Err(ToolError::NoEffect(other)),
        };

        let center = self.player.position;
        let mut targets: Vec<Obstacle> = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let cell = center.offset(dx, dy);
                targets.extend(self.map.obstacles.at(cell).copied().filter(|obstacle| {
                    obstacle.kind.is_clearable() && !self.map.obstacles.is_cleared(obstacle)
                }));
            }
        }

        for obstacle in &targets {
            match self.config.clear_policy {
                ObstacleClearPolicy::Mark => {
                    self.map.obstacles.mark_cleared(*obstacle);
                }
                ObstacleClearPolicy::Remove => {
                    self.map.obstacles.remove(obstacle);
                }
            }
        }

        tracing::debug!(%tool, %center, cleared = targets.len(), "tool effect applied");
        Ok(vec![WorldEvent::EffectApplied {
            tool,
            cleared: targets,
        }])
    }

    /// Disarms the active tool after its effect was shown.
    pub fn acknowledge_effect(&mut self) -> Vec<WorldEvent> {
        match self.player.active_tool.take() {
            Some(_) => vec![WorldEvent::ToolDisarmed],
            None => Vec::new(),
        }
    }
}
