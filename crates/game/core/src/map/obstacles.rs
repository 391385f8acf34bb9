use std::collections::BTreeSet;

use crate::state::Position;

/// Kinds of blocking objects that can sit on a cell.
///
/// Declaration order matters: [`ObstacleSet`] range queries rely on `Tree`
/// being the smallest and `Building` the largest variant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ObstacleKind {
    Tree,
    Water,
    Rock,
    Building,
}

impl ObstacleKind {
    /// Tools never clear buildings or water.
    pub fn is_clearable(self) -> bool {
        matches!(self, ObstacleKind::Tree | ObstacleKind::Rock)
    }
}

/// A single obstacle placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub position: Position,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub const fn new(position: Position, kind: ObstacleKind) -> Self {
        Self { position, kind }
    }
}

/// Obstacles keyed by `(position, kind)` with an optional "cleared" mark.
///
/// A cell is blocked while it holds at least one obstacle that has not been
/// cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleSet {
    placed: BTreeSet<Obstacle>,
    cleared: BTreeSet<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the same kind already sits on that cell.
    pub fn insert(&mut self, obstacle: Obstacle) -> bool {
        self.placed.insert(obstacle)
    }

    pub fn contains(&self, obstacle: &Obstacle) -> bool {
        self.placed.contains(obstacle)
    }

    /// Deletes an obstacle outright, including any cleared mark.
    pub fn remove(&mut self, obstacle: &Obstacle) -> bool {
        self.cleared.remove(obstacle);
        self.placed.remove(obstacle)
    }

    /// Flags an obstacle as cleared. Returns false if it is absent or already cleared.
    pub fn mark_cleared(&mut self, obstacle: Obstacle) -> bool {
        self.placed.contains(&obstacle) && self.cleared.insert(obstacle)
    }

    pub fn is_cleared(&self, obstacle: &Obstacle) -> bool {
        self.cleared.contains(obstacle)
    }

    /// All obstacles on a cell, cleared or not.
    pub fn at(&self, position: Position) -> impl Iterator<Item = &Obstacle> {
        let low = Obstacle::new(position, ObstacleKind::Tree);
        let high = Obstacle::new(position, ObstacleKind::Building);
        self.placed.range(low..=high)
    }

    /// True when the cell holds an obstacle that still blocks movement.
    pub fn blocks(&self, position: Position) -> bool {
        self.at(position)
            .any(|obstacle| !self.cleared.contains(obstacle))
    }

    pub fn is_empty_at(&self, position: Position) -> bool {
        self.at(position).next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.placed.iter()
    }

    pub fn cleared(&self) -> impl Iterator<Item = &Obstacle> {
        self.cleared.iter()
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    pub fn count(&self, kind: ObstacleKind) -> usize {
        self.placed.iter().filter(|obstacle| obstacle.kind == kind).count()
    }
}
