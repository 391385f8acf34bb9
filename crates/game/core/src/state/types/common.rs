use std::fmt;

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance in tiles.
    pub fn distance(self, other: Position) -> f64 {
        f64::from(self.x - other.x).hypot(f64::from(self.y - other.y))
    }

    /// Euclidean distance after scaling both axes by `tile_size`.
    pub fn pixel_distance(self, other: Position, tile_size: f64) -> f64 {
        (f64::from(self.x - other.x) * tile_size).hypot(f64::from(self.y - other.y) * tile_size)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// True for cells on the outer ring of the grid.
    pub fn is_border(&self, position: Position) -> bool {
        position.x == 0
            || position.y == 0
            || position.x == self.width as i32 - 1
            || position.y == self.height as i32 - 1
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterates every cell, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

/// One-step movement direction on the grid. `Up` decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CardinalDirection {
    Up,
    Down,
    Left,
    Right,
}

impl CardinalDirection {
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::Up,
        CardinalDirection::Down,
        CardinalDirection::Left,
        CardinalDirection::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::Up => (0, -1),
            CardinalDirection::Down => (0, 1),
            CardinalDirection::Left => (-1, 0),
            CardinalDirection::Right => (1, 0),
        }
    }

    /// Horizontal moves turn the player; vertical moves keep the current facing.
    pub fn facing(self) -> Option<Facing> {
        match self {
            CardinalDirection::Left => Some(Facing::Left),
            CardinalDirection::Right => Some(Facing::Right),
            CardinalDirection::Up | CardinalDirection::Down => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Left,
    #[default]
    Right,
}
