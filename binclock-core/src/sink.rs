//! Rendering sink interface.

use crate::time::{Column, Unit};

/// One block whose lit state must be (re)drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    /// Row of the block.
    pub row: Unit,
    /// Bit column of the block.
    pub column: Column,
    /// Whether the block is lit.
    pub active: bool,
    /// Number shown on the block when "numbers on blocks" is enabled (`2^column`).
    pub label: u8,
}

impl CellChange {
    pub(crate) fn new(row: Unit, column: Column, active: bool) -> Self {
        Self {
            row,
            column,
            active,
            label: column.weight(),
        }
    }
}

/// Receiver of block changes emitted by [`BlockGrid::tick`](crate::BlockGrid::tick).
///
/// The sink owns every visual concern (colors, fades, text) and must treat
/// each call as "redraw this block".
pub trait CellSink {
    /// Called once per changed block, or once for every block on a full repaint.
    fn on_cell_change(&mut self, change: CellChange);
}

impl<F: FnMut(CellChange)> CellSink for F {
    fn on_cell_change(&mut self, change: CellChange) {
        self(change)
    }
}

impl CellSink for Vec<CellChange> {
    fn on_cell_change(&mut self, change: CellChange) {
        self.push(change);
    }
}
