use super::{Facing, Position, RewardKind};

/// Mutable per-session state of the player character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub position: Position,
    pub facing: Facing,
    pub lives: u32,
    pub max_lives: u32,
    pub coins: u32,
    /// Consumable armed for use but not yet acknowledged as spent.
    pub active_tool: Option<RewardKind>,
}

impl PlayerState {
    pub fn new(position: Position, lives: u32, max_lives: u32) -> Self {
        Self {
            position,
            facing: Facing::default(),
            lives: lives.min(max_lives),
            max_lives,
            coins: 0,
            active_tool: None,
        }
    }

    /// Adds one life up to the cap. Returns true if the value changed.
    pub fn heal(&mut self) -> bool {
        if self.lives >= self.max_lives {
            return false;
        }
        self.lives += 1;
        true
    }

    /// Removes one life, floored at zero. Returns true if the value changed.
    pub fn hurt(&mut self) -> bool {
        if self.lives == 0 {
            return false;
        }
        self.lives -= 1;
        true
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lives_are_clamped() {
        let mut player = PlayerState::new(Position::ORIGIN, 1, 2);
        assert!(player.heal());
        assert!(!player.heal());
        assert_eq!(player.lives, 2);

        assert!(player.hurt());
        assert!(player.hurt());
        assert!(!player.hurt());
        assert_eq!(player.lives, 0);
        assert!(!player.is_alive());
    }

    #[test]
    fn starting_lives_respect_cap() {
        let player = PlayerState::new(Position::ORIGIN, 9, 5);
        assert_eq!(player.lives, 5);
        assert_eq!(player.facing, Facing::Right);
    }
}
