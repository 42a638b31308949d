//! Tile map generation and mutation for the arena grid.

use retro_bomber_core::{CellCoord, TileKind};

/// Probability that an eligible interior cell is seeded with a crate.
const CRATE_DENSITY: f32 = 0.28;

/// Interior cells force-cleared so the player spawn pocket stays walkable.
const SPAWN_POCKET: [CellCoord; 3] = [
    CellCoord::new(1, 1),
    CellCoord::new(2, 1),
    CellCoord::new(1, 2),
];

/// Dense row-major tile map owning every wall, crate and floor cell.
///
/// Walls are permanent; the only legal mutation is the crate-to-floor
/// transition performed by [`GridMap::destroy_crate_at`].
#[derive(Clone, Debug)]
pub(crate) struct GridMap {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
}

impl GridMap {
    /// Generates a fresh arena layout from the provided RNG stream.
    ///
    /// The border and every interior cell with both coordinates even become
    /// walls. Remaining interior cells draw a crate with fixed probability,
    /// gated so cells with either coordinate at most 1 are only eligible when
    /// the other coordinate exceeds 1. The spawn pocket is cleared last,
    /// regardless of the random draws.
    pub(crate) fn generate(columns: u32, rows: u32, rng_state: &mut u64) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut tiles = Vec::with_capacity(capacity);

        for row in 0..rows {
            for column in 0..columns {
                let border =
                    row == 0 || row == rows.saturating_sub(1) || column == 0 || column == columns.saturating_sub(1);
                let pillar = row % 2 == 0 && column % 2 == 0;
                let tile = if border || pillar {
                    TileKind::Wall
                } else if (row > 1 || column > 1) && crate::random_unit(rng_state) < CRATE_DENSITY {
                    TileKind::Crate
                } else {
                    TileKind::Empty
                };
                tiles.push(tile);
            }
        }

        let mut grid = Self {
            columns,
            rows,
            tiles,
        };
        for cell in SPAWN_POCKET {
            grid.clear(cell);
        }
        grid
    }

    /// Number of columns contained in the grid.
    pub(crate) const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    pub(crate) const fn rows(&self) -> u32 {
        self.rows
    }

    /// Classification of the provided cell, or `None` when out of bounds.
    pub(crate) fn kind_at(&self, cell: CellCoord) -> Option<TileKind> {
        self.index(cell).and_then(|index| self.tiles.get(index).copied())
    }

    /// Reports whether the cell lies in bounds and is walkable floor.
    pub(crate) fn is_open(&self, cell: CellCoord) -> bool {
        self.kind_at(cell) == Some(TileKind::Empty)
    }

    /// Converts a crate at the provided cell to floor.
    ///
    /// Returns `true` when a crate was destroyed, so callers can award
    /// points exactly once per converted cell.
    pub(crate) fn destroy_crate_at(&mut self, cell: CellCoord) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };
        match self.tiles.get_mut(index) {
            Some(slot) if *slot == TileKind::Crate => {
                *slot = TileKind::Empty;
                true
            }
            _ => false,
        }
    }

    /// Dense tile classifications stored in row-major order.
    pub(crate) fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    /// Places a crate on a floor cell so tests can script exact layouts.
    #[cfg(test)]
    pub(crate) fn place_crate_at(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                assert_eq!(*slot, TileKind::Empty, "crates only replace floor cells");
                *slot = TileKind::Crate;
            }
        }
    }

    fn clear(&mut self, cell: CellCoord) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.tiles.get_mut(index) {
                *slot = TileKind::Empty;
            }
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(seed: u64) -> GridMap {
        let mut rng_state = seed;
        GridMap::generate(13, 11, &mut rng_state)
    }

    #[test]
    fn border_cells_are_always_walls() {
        let grid = generated(0x1234);
        for column in 0..13 {
            assert_eq!(grid.kind_at(CellCoord::new(column, 0)), Some(TileKind::Wall));
            assert_eq!(
                grid.kind_at(CellCoord::new(column, 10)),
                Some(TileKind::Wall)
            );
        }
        for row in 0..11 {
            assert_eq!(grid.kind_at(CellCoord::new(0, row)), Some(TileKind::Wall));
            assert_eq!(grid.kind_at(CellCoord::new(12, row)), Some(TileKind::Wall));
        }
    }

    #[test]
    fn even_even_interior_cells_are_pillars() {
        let grid = generated(0xfeed);
        for row in (2..10).step_by(2) {
            for column in (2..12).step_by(2) {
                assert_eq!(
                    grid.kind_at(CellCoord::new(column, row)),
                    Some(TileKind::Wall),
                    "expected pillar at ({column}, {row})"
                );
            }
        }
    }

    #[test]
    fn spawn_pocket_is_always_clear() {
        for seed in [0x1, 0x2, 0x3, 0xdead_beef, 0xffff_ffff_ffff_ffff] {
            let grid = generated(seed);
            for cell in SPAWN_POCKET {
                assert_eq!(grid.kind_at(cell), Some(TileKind::Empty));
            }
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_fixed_seed() {
        let first = generated(0xabcd_ef01);
        let second = generated(0xabcd_ef01);
        assert_eq!(first.tiles(), second.tiles());
    }

    #[test]
    fn destroy_crate_reports_the_transition_once() {
        let mut grid = generated(0x77);
        let target = (0..11)
            .flat_map(|row| (0..13).map(move |column| CellCoord::new(column, row)))
            .find(|&cell| grid.kind_at(cell) == Some(TileKind::Crate))
            .expect("seed produces at least one crate");

        assert!(grid.destroy_crate_at(target));
        assert_eq!(grid.kind_at(target), Some(TileKind::Empty));
        assert!(!grid.destroy_crate_at(target));
    }

    #[test]
    fn walls_and_out_of_bounds_cells_never_destroy() {
        let mut grid = generated(0x99);
        assert!(!grid.destroy_crate_at(CellCoord::new(0, 0)));
        assert!(!grid.destroy_crate_at(CellCoord::new(40, 2)));
        assert_eq!(grid.kind_at(CellCoord::new(40, 2)), None);
    }
}
