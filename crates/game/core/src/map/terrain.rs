use crate::state::{MapDimensions, Position};

/// Base terrain of a cell. Immutable once generation finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TerrainKind {
    #[default]
    Grass,
    Path,
    Water,
    /// A path cell crossing the river. Walkable, drawn differently.
    Bridge,
}

/// Dense row-major terrain grid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainGrid {
    dimensions: MapDimensions,
    cells: Vec<TerrainKind>,
}

impl TerrainGrid {
    /// Creates a grid with every cell set to `fill`.
    pub fn filled(dimensions: MapDimensions, fill: TerrainKind) -> Self {
        Self {
            dimensions,
            cells: vec![fill; dimensions.cell_count()],
        }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }

    pub fn get(&self, position: Position) -> Option<TerrainKind> {
        self.index(position).map(|index| self.cells[index])
    }

    /// Sets a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.index(position) {
            self.cells[index] = terrain;
        }
    }

    pub fn is(&self, position: Position, terrain: TerrainKind) -> bool {
        self.get(position) == Some(terrain)
    }

    pub fn count(&self, terrain: TerrainKind) -> usize {
        self.cells.iter().filter(|cell| **cell == terrain).count()
    }

    /// Iterates `(position, terrain)` pairs row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TerrainKind)> + '_ {
        self.dimensions.positions().zip(self.cells.iter().copied())
    }
}
