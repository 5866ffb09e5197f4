//! Dungeon grid: a rectangular field of [`CellKind`] cells.
//!
//! The [`DungeonMap`] is generated once at world creation and never mutated
//! afterwards. Generation is a single pass over the grid with a fixed
//! precedence chain per cell:
//!
//! 1. Border cells are [`CellKind::Wall`].
//! 2. `(1, 1)` is the [`CellKind::Entrance`].
//! 3. `(width - 2, height - 2)` is the [`CellKind::TreasureRoom`].
//! 4. Remaining cells roll [`CellKind::Wall`] at the configured density,
//!    except inside the 3x3 spawn region (`x <= 2 && y <= 2`), which stays
//!    clear so new players are never boxed in.
//! 5. Everything else is [`CellKind::Floor`].
//!
//! There is no connectivity guarantee; isolated pockets are accepted.

use rand::Rng;
use serde::Serialize;

use delve_types::{CellKind, Position};

use crate::error::MapError;

/// The generated dungeon grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonMap {
    /// Grid width in cells.
    width: i32,
    /// Grid height in cells.
    height: i32,
    /// Row-major cell storage, `cells[y * width + x]`.
    cells: Vec<CellKind>,
}

/// A read-only copy of the grid in wire shape, rows outermost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSnapshot {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// One inner vector per row, top to bottom.
    pub cells: Vec<Vec<CellKind>>,
}

impl DungeonMap {
    /// Default grid width.
    pub const DEFAULT_WIDTH: i32 = 20;
    /// Default grid height.
    pub const DEFAULT_HEIGHT: i32 = 20;
    /// Default probability that an interior cell rolls as a wall.
    pub const DEFAULT_WALL_DENSITY: f64 = 0.15;
    /// Smallest side length that can hold both landmarks.
    pub const MIN_DIMENSION: i32 = 4;
    /// The fixed player spawn cell.
    pub const ENTRANCE: Position = Position::new(1, 1);
    /// Rejection-sampling budget for [`DungeonMap::random_floor_position`].
    pub const PLACEMENT_ATTEMPTS: u32 = 50;

    /// Generate a new dungeon grid.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::TooSmall`] when either dimension is below
    /// [`DungeonMap::MIN_DIMENSION`], and [`MapError::InvalidWallDensity`]
    /// when `wall_density` is outside `[0, 1]`.
    pub fn generate(
        width: i32,
        height: i32,
        wall_density: f64,
        rng: &mut impl Rng,
    ) -> Result<Self, MapError> {
        if width < Self::MIN_DIMENSION || height < Self::MIN_DIMENSION {
            return Err(MapError::TooSmall { width, height });
        }
        if !(0.0..=1.0).contains(&wall_density) {
            return Err(MapError::InvalidWallDensity(wall_density));
        }

        let max_x = width.saturating_sub(1);
        let max_y = height.saturating_sub(1);
        let treasure = Position::new(width.saturating_sub(2), height.saturating_sub(2));
        let capacity = usize::try_from(width.saturating_mul(height)).unwrap_or(0);

        let mut cells = Vec::with_capacity(capacity);
        for y in 0..height {
            for x in 0..width {
                let kind = if x == 0 || y == 0 || x == max_x || y == max_y {
                    CellKind::Wall
                } else if x == Self::ENTRANCE.x && y == Self::ENTRANCE.y {
                    CellKind::Entrance
                } else if x == treasure.x && y == treasure.y {
                    CellKind::TreasureRoom
                } else if rng.random_bool(wall_density) && !(x <= 2 && y <= 2) {
                    CellKind::Wall
                } else {
                    CellKind::Floor
                };
                cells.push(kind);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Generate a grid with the default dimensions and wall density.
    pub fn generate_default(rng: &mut impl Rng) -> Result<Self, MapError> {
        Self::generate(
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_WALL_DENSITY,
            rng,
        )
    }

    /// Grid width in cells.
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// The fixed player spawn cell.
    pub const fn entrance(&self) -> Position {
        Self::ENTRANCE
    }

    /// The goal room cell at `(width - 2, height - 2)`.
    pub const fn treasure_room(&self) -> Position {
        Position::new(self.width.saturating_sub(2), self.height.saturating_sub(2))
    }

    /// The cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        self.index(pos).and_then(|i| self.cells.get(i).copied())
    }

    /// Whether an entity may stand on `pos`.
    ///
    /// False outside the grid and on walls; true for every other cell kind.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(CellKind::is_walkable)
    }

    /// Pick a uniformly random interior cell that is strictly
    /// [`CellKind::Floor`].
    ///
    /// Samples up to [`DungeonMap::PLACEMENT_ATTEMPTS`] candidate cells and
    /// returns `None` when every attempt lands on something else. Entrance
    /// and treasure room cells never qualify, so spawned monsters and loot
    /// keep off the landmarks.
    pub fn random_floor_position(&self, rng: &mut impl Rng) -> Option<Position> {
        for _ in 0..Self::PLACEMENT_ATTEMPTS {
            let x = rng.random_range(1..self.width.saturating_sub(1));
            let y = rng.random_range(1..self.height.saturating_sub(1));
            let pos = Position::new(x, y);
            if self.cell(pos) == Some(CellKind::Floor) {
                return Some(pos);
            }
        }
        None
    }

    /// A wire-shaped copy of the whole grid.
    pub fn snapshot(&self) -> MapSnapshot {
        MapSnapshot {
            width: self.width,
            height: self.height,
            cells: self.rows(),
        }
    }

    /// The grid as one vector per row, top to bottom.
    pub fn rows(&self) -> Vec<Vec<CellKind>> {
        let w = usize::try_from(self.width).unwrap_or(1).max(1);
        self.cells.chunks(w).map(<[CellKind]>::to_vec).collect()
    }

    /// Row-major index for `pos`, or `None` outside the grid.
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let w = usize::try_from(self.width).ok()?;
        y.checked_mul(w)?.checked_add(x)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn test_map(seed: u64) -> DungeonMap {
        let mut rng = SmallRng::seed_from_u64(seed);
        DungeonMap::generate_default(&mut rng).unwrap()
    }

    #[test]
    fn borders_are_walls() {
        let map = test_map(7);
        for x in 0..map.width() {
            assert_eq!(map.cell(Position::new(x, 0)), Some(CellKind::Wall));
            assert_eq!(
                map.cell(Position::new(x, map.height() - 1)),
                Some(CellKind::Wall)
            );
        }
        for y in 0..map.height() {
            assert_eq!(map.cell(Position::new(0, y)), Some(CellKind::Wall));
            assert_eq!(
                map.cell(Position::new(map.width() - 1, y)),
                Some(CellKind::Wall)
            );
        }
    }

    #[test]
    fn landmarks_are_placed() {
        let map = test_map(7);
        assert_eq!(map.cell(map.entrance()), Some(CellKind::Entrance));
        assert_eq!(map.cell(map.treasure_room()), Some(CellKind::TreasureRoom));
        assert_eq!(map.treasure_room(), Position::new(18, 18));
        assert!(map.is_walkable(map.entrance()));
        assert!(map.is_walkable(map.treasure_room()));
    }

    #[test]
    fn spawn_region_stays_clear() {
        // The non-landmark interior cells of the 3x3 corner region must be
        // floor for every seed, or fresh players could spawn boxed in.
        for seed in 0..32 {
            let map = test_map(seed);
            for pos in [
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(2, 2),
            ] {
                assert_eq!(map.cell(pos), Some(CellKind::Floor), "seed {seed} {pos}");
            }
        }
    }

    #[test]
    fn walkability_rejects_out_of_bounds() {
        let map = test_map(7);
        assert!(!map.is_walkable(Position::new(-1, 5)));
        assert!(!map.is_walkable(Position::new(5, -1)));
        assert!(!map.is_walkable(Position::new(map.width(), 5)));
        assert!(!map.is_walkable(Position::new(5, map.height())));
    }

    #[test]
    fn walkability_rejects_walls_only() {
        let map = test_map(7);
        for y in 0..map.height() {
            for x in 0..map.width() {
                let pos = Position::new(x, y);
                let expected = map.cell(pos).unwrap() != CellKind::Wall;
                assert_eq!(map.is_walkable(pos), expected);
            }
        }
    }

    #[test]
    fn same_seed_generates_identical_grids() {
        let a = test_map(42);
        let b = test_map(42);
        assert_eq!(a, b);
    }

    #[test]
    fn random_floor_position_lands_on_strict_floor() {
        let map = test_map(7);
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..100 {
            let pos = map.random_floor_position(&mut rng).unwrap();
            assert_eq!(map.cell(pos), Some(CellKind::Floor));
            assert!(pos.x >= 1 && pos.x <= map.width() - 2);
            assert!(pos.y >= 1 && pos.y <= map.height() - 2);
        }
    }

    #[test]
    fn full_density_walls_everything_outside_clear_region() {
        let mut rng = SmallRng::seed_from_u64(7);
        let map = DungeonMap::generate(20, 20, 1.0, &mut rng).unwrap();
        for y in 1..19 {
            for x in 1..19 {
                let pos = Position::new(x, y);
                let expected = if pos == map.entrance() {
                    CellKind::Entrance
                } else if pos == map.treasure_room() {
                    CellKind::TreasureRoom
                } else if x <= 2 && y <= 2 {
                    CellKind::Floor
                } else {
                    CellKind::Wall
                };
                assert_eq!(map.cell(pos), Some(expected), "{pos}");
            }
        }
    }

    #[test]
    fn zero_density_floors_the_interior() {
        let mut rng = SmallRng::seed_from_u64(7);
        let map = DungeonMap::generate(8, 8, 0.0, &mut rng).unwrap();
        for y in 1..7 {
            for x in 1..7 {
                let pos = Position::new(x, y);
                assert!(map.is_walkable(pos), "{pos}");
            }
        }
    }

    #[test]
    fn rejects_undersized_grids() {
        let mut rng = SmallRng::seed_from_u64(7);
        let err = DungeonMap::generate(3, 20, 0.15, &mut rng);
        assert_eq!(err, Err(MapError::TooSmall { width: 3, height: 20 }));
    }

    #[test]
    fn rejects_invalid_density() {
        let mut rng = SmallRng::seed_from_u64(7);
        let err = DungeonMap::generate(20, 20, 1.5, &mut rng);
        assert_eq!(err, Err(MapError::InvalidWallDensity(1.5)));
    }

    #[test]
    fn snapshot_matches_grid() {
        let map = test_map(7);
        let snapshot = map.snapshot();
        assert_eq!(snapshot.width, 20);
        assert_eq!(snapshot.height, 20);
        assert_eq!(snapshot.cells.len(), 20);
        for (y, row) in snapshot.cells.iter().enumerate() {
            assert_eq!(row.len(), 20);
            for (x, kind) in row.iter().enumerate() {
                let pos = Position::new(i32::try_from(x).unwrap(), i32::try_from(y).unwrap());
                assert_eq!(map.cell(pos), Some(*kind));
            }
        }
    }
}
