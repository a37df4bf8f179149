//! Bit-activation and redraw scheduling core for a binary clock.
//!
//! A binary clock shows hours, minutes and seconds as three rows of six
//! blocks; block `c` of a row is lit when bit `c` of that row's reading is
//! set. This crate decides which blocks change on every tick and hands those
//! changes to a rendering sink; drawing them is up to the caller.
//!
//! # Example
//!
//! ```
//! use binclock_core::{BlockGrid, CellChange, ManualClock, Unit};
//!
//! fn main() -> Result<(), binclock_core::ClockError> {
//!     let clock = ManualClock::at(14, 7, 59)?;
//!     let mut grid = BlockGrid::new(clock.clone());
//!
//!     // The first tick paints all 18 blocks.
//!     let mut changes: Vec<CellChange> = Vec::new();
//!     assert_eq!(grid.tick(&mut changes)?, 18);
//!
//!     // Later ticks only emit blocks that changed.
//!     clock.advance(1);
//!     changes.clear();
//!     grid.tick(&mut changes)?;
//!     assert!(changes.iter().all(|c| c.row != Unit::Hour));
//!     assert_eq!(grid.state().value(Unit::Minute), 8);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Driving the grid
//!
//! Any [`ClockDriver`] can call [`BlockGrid::tick`] once per second;
//! [`ThreadDriver`] does so from a background thread. [`start_grid`] resets
//! the grid before starting the driver, so every start, including a restart
//! after [`ClockDriver::stop`], opens with a full repaint against the current
//! wall clock.
//!
//! # Testing
//!
//! Use [`ManualClock`] to control time in tests:
//!
//! ```
//! use binclock_core::{BlockGrid, CellChange, ManualClock, Unit};
//!
//! let clock = ManualClock::at(0, 0, 5).unwrap();
//! let mut grid = BlockGrid::new(clock.clone());
//! grid.tick(&mut Vec::<CellChange>::new()).unwrap();
//! assert_eq!(grid.state().lit_columns(Unit::Second), vec![0, 2]);
//! ```

#![warn(missing_docs)]

mod driver;
mod error;
mod grid;
mod mock;
mod options;
mod sink;
mod state;
mod time;

// Re-export public API
pub use driver::{
    ClockDriver, TICK_INTERVAL, ThreadDriver, TickCallback, TimerHandle, start_grid,
};
pub use error::ClockError;
pub use grid::{BlockGrid, MAX_READING, is_active};
pub use mock::ManualClock;
pub use options::{ColorMode, DisplayOptions, Layout, PALETTES, Palette, Rgb};
pub use sink::{CellChange, CellSink};
pub use state::GridState;
pub use time::{Column, LocalClock, TimeReading, TimeSampler, Unit};
