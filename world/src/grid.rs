//! Static tile map owned by the world for the lifetime of a level.

use std::collections::BTreeSet;

use tots_core::{CellCoord, LevelError, TileKind, TileView};
use tracing::warn;

/// Dense row-major tile storage.
///
/// Dimensions never change once built. The only permitted mutation turns a
/// collectible into empty floor, see [`Grid::collect`].
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
    unrecognized: Vec<i64>,
}

impl Grid {
    /// Builds the grid from the level file's matrix of tile codes.
    ///
    /// Each distinct unrecognized code is reported once and kept so that
    /// adapters may surface it again.
    pub(crate) fn from_codes(level_map: &[Vec<i64>]) -> Result<Self, LevelError> {
        let expected = level_map.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LevelError::EmptyMap);
        }

        let oversized = || LevelError::Oversized {
            columns: expected,
            rows: level_map.len(),
        };
        let columns = u32::try_from(expected).map_err(|_| oversized())?;
        let rows = u32::try_from(level_map.len()).map_err(|_| oversized())?;
        let cell_count = expected.checked_mul(level_map.len()).ok_or_else(oversized)?;

        let mut tiles = Vec::with_capacity(cell_count);
        let mut unrecognized = BTreeSet::new();
        for (row, codes) in level_map.iter().enumerate() {
            if codes.len() != expected {
                return Err(LevelError::RaggedRow {
                    row,
                    expected,
                    found: codes.len(),
                });
            }

            for (column, &code) in codes.iter().enumerate() {
                let kind = TileKind::from_code(code);
                if let TileKind::Unrecognized(code) = kind {
                    if unrecognized.insert(code) {
                        warn!(
                            code,
                            column, row, "tile code not recognized, treating it as a wall"
                        );
                    }
                }
                tiles.push(kind);
            }
        }

        Ok(Self {
            columns,
            rows,
            tiles,
            unrecognized: unrecognized.into_iter().collect(),
        })
    }

    /// Dimensions of the grid as `(columns, rows)`.
    pub(crate) const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Tile stored at the provided cell, or `None` outside the grid.
    pub(crate) fn tile(&self, cell: CellCoord) -> Option<TileKind> {
        self.view().tile(cell)
    }

    /// Clears the collectible stored at `cell`.
    ///
    /// Returns `true` only when the cell held a collectible, so a star can be
    /// taken at most once.
    pub(crate) fn collect(&mut self, cell: CellCoord) -> bool {
        let Some(index) = self.index(cell) else {
            return false;
        };

        match self.tiles.get_mut(index) {
            Some(tile @ TileKind::Collectible) => {
                *tile = TileKind::Empty;
                true
            }
            _ => false,
        }
    }

    /// Distinct unrecognized codes found while loading, in ascending order.
    pub(crate) fn unrecognized_codes(&self) -> &[i64] {
        &self.unrecognized
    }

    /// Borrows the grid as a read-only view for queries.
    pub(crate) fn view(&self) -> TileView<'_> {
        TileView::new(&self.tiles, self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }

        let width = usize::try_from(self.columns).ok()?;
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        Some(row * width + column)
    }
}
