//! Grid movement and coin pickup.

use crate::state::CardinalDirection;

use super::{MoveError, World, WorldEvent};

impl World {
    /// Moves the player one tile.
    ///
    /// Rejected while a dialogue is open or resolving, after game over, and
    /// when the destination is outside the grid or holds an uncleared obstacle.
    pub fn step(&mut self, direction: CardinalDirection) -> Result<Vec<WorldEvent>, MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if !self.phase.allows_movement() {
            return Err(MoveError::Suspended);
        }

        let from = self.player.position;
        let (dx, dy) = direction.delta();
        let destination = from.offset(dx, dy);
        if !self.map.dimensions().contains(destination) {
            return Err(MoveError::OutOfBounds { destination });
        }
        if self.map.obstacles.blocks(destination) {
            return Err(MoveError::Blocked { destination });
        }

        self.player.position = destination;
        if let Some(facing) = direction.facing() {
            self.player.facing = facing;
        }
        tracing::trace!(%from, to = %destination, "player moved");

        let mut events = vec![WorldEvent::PlayerMoved {
            from,
            to: destination,
        }];
        if self.coins.remove(&destination) {
            self.add_coin(&mut events);
        }
        events.extend(self.refresh());
        Ok(events)
    }

    /// Credits one coin and grants the life bonus on every threshold multiple.
    pub(super) fn add_coin(&mut self, events: &mut Vec<WorldEvent>) {
        self.player.coins += 1;
        let total = self.player.coins;
        events.push(WorldEvent::CoinCollected(total));

        let threshold = self.config.coin_bonus_threshold;
        if threshold == 0 || total % threshold != 0 {
            return;
        }

        tracing::debug!(coins = total, "coin bonus reached");
        events.push(WorldEvent::LifeBonusGranted);
        if self.player.heal() {
            events.push(WorldEvent::LivesChanged(self.player.lives));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::super::test_support::*;
    use super::*;
    use crate::config::WorldConfig;
    use crate::map::{Obstacle, ObstacleKind};
    use crate::state::{Facing, Position};

    fn world_with_coins(coins: impl IntoIterator<Item = Position>) -> World {
        World::new(
            WorldConfig::default(),
            open_map(),
            coins.into_iter().collect::<BTreeSet<_>>(),
            vec![],
        )
    }

    #[test]
    fn step_reports_origin_and_destination() {
        let mut world = world_with(vec![]);
        let events = world.step(CardinalDirection::Up).unwrap();
        assert_eq!(
            events,
            vec![WorldEvent::PlayerMoved {
                from: Position::new(25, 15),
                to: Position::new(25, 14),
            }]
        );
    }

    #[test]
    fn edges_of_the_grid_reject_moves() {
        let mut world = world_with(vec![]);
        for _ in 0..15 {
            world.step(CardinalDirection::Up).unwrap();
        }
        assert_eq!(world.player().position, Position::new(25, 0));
        assert_eq!(
            world.step(CardinalDirection::Up),
            Err(MoveError::OutOfBounds {
                destination: Position::new(25, -1)
            })
        );
    }

    #[test]
    fn obstacles_block_until_cleared() {
        let start = Position::new(25, 15);
        let mut map = open_map();
        for direction in CardinalDirection::ALL {
            let (dx, dy) = direction.delta();
            map.obstacles
                .insert(Obstacle::new(start.offset(dx, dy), ObstacleKind::Rock));
        }
        let mut world = World::new(WorldConfig::default(), map, BTreeSet::new(), vec![]);

        for direction in CardinalDirection::ALL {
            let (dx, dy) = direction.delta();
            assert_eq!(
                world.step(direction),
                Err(MoveError::Blocked {
                    destination: start.offset(dx, dy)
                }),
                "{direction} should be blocked"
            );
            assert_eq!(world.player().position, start);
        }

        let rock = Obstacle::new(Position::new(26, 15), ObstacleKind::Rock);
        world.map.obstacles.mark_cleared(rock);
        world.step(CardinalDirection::Right).unwrap();
        assert_eq!(world.player().position, Position::new(26, 15));
    }

    #[test]
    fn facing_follows_horizontal_moves_only() {
        let mut world = world_with(vec![]);
        world.step(CardinalDirection::Left).unwrap();
        assert_eq!(world.player().facing, Facing::Left);
        world.step(CardinalDirection::Down).unwrap();
        assert_eq!(world.player().facing, Facing::Left);
        world.step(CardinalDirection::Right).unwrap();
        assert_eq!(world.player().facing, Facing::Right);
    }

    #[test]
    fn fifth_coin_grants_one_life() {
        let coins = (26..=34).map(|x| Position::new(x, 15));
        let mut world = world_with_coins(coins);

        let mut bonuses = 0;
        let mut lives_changes = Vec::new();
        for _ in 0..9 {
            for event in world.step(CardinalDirection::Right).unwrap() {
                match event {
                    WorldEvent::LifeBonusGranted => bonuses += 1,
                    WorldEvent::LivesChanged(lives) => lives_changes.push(lives),
                    _ => {}
                }
            }
        }

        assert_eq!(world.player().coins, 9);
        assert_eq!(bonuses, 1);
        assert_eq!(lives_changes, vec![3]);
        assert_eq!(world.player().lives, 3);
        assert!(world.coins().is_empty());
    }

    #[test]
    fn coin_is_collected_once() {
        let mut world = world_with_coins([Position::new(26, 15)]);
        let first = world.step(CardinalDirection::Right).unwrap();
        assert!(first.contains(&WorldEvent::CoinCollected(1)));

        world.step(CardinalDirection::Left).unwrap();
        let again = world.step(CardinalDirection::Right).unwrap();
        assert!(!again.iter().any(|e| matches!(e, WorldEvent::CoinCollected(_))));
    }

    #[test]
    fn bonus_at_full_health_leaves_lives_unchanged() {
        let config = WorldConfig {
            initial_lives: 5,
            coin_bonus_threshold: 1,
            ..WorldConfig::default()
        };
        let coins = BTreeSet::from([Position::new(26, 15)]);
        let mut world = World::new(config, open_map(), coins, vec![]);

        let events = world.step(CardinalDirection::Right).unwrap();
        assert!(events.contains(&WorldEvent::LifeBonusGranted));
        assert!(!events.iter().any(|e| matches!(e, WorldEvent::LivesChanged(_))));
        assert_eq!(world.player().lives, 5);
    }
}
