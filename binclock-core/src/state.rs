//! Grid state snapshot.

use crate::time::{Column, Unit};

/// Lit/unlit flags for all 18 blocks plus the full-repaint marker.
///
/// Owned by [`BlockGrid`](crate::BlockGrid); use
/// [`BlockGrid::state`](crate::BlockGrid::state) to obtain a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridState {
    /// Active flags indexed by `[row][column]`, rows ordered hour, minute, second.
    pub cells: [[bool; Column::COUNT]; Unit::COUNT],
    /// Whether the first full paint has happened since creation or the last reset.
    pub initialized: bool,
}

impl GridState {
    /// Whether the block at `row`/`column` is lit.
    pub fn is_lit(&self, row: Unit, column: Column) -> bool {
        self.cells[row.index()][column.index()]
    }

    /// Columns of `row` that are lit, in ascending bit order.
    pub fn lit_columns(&self, row: Unit) -> Vec<u8> {
        Column::ALL
            .iter()
            .filter(|column| self.is_lit(row, **column))
            .map(|column| column.get())
            .collect()
    }

    /// The value the lit blocks of `row` currently encode.
    pub fn value(&self, row: Unit) -> u8 {
        Column::ALL
            .iter()
            .filter(|column| self.is_lit(row, **column))
            .map(|column| column.weight())
            .sum()
    }

    pub(crate) fn set(&mut self, row: Unit, column: Column, active: bool) {
        self.cells[row.index()][column.index()] = active;
    }
}
