//! Block grid: bit activation and cascading redraw.

use log::{debug, trace};

use crate::error::ClockError;
use crate::sink::{CellChange, CellSink};
use crate::state::GridState;
use crate::time::{Column, TimeReading, TimeSampler, Unit};

/// Largest reading a six-bit row can encode.
pub const MAX_READING: u8 = 63;

/// Whether bit `column` of `reading` is set, i.e. whether that block is lit.
///
/// # Errors
/// Returns [`ClockError::ReadingOutOfRange`] if `reading > 63` and
/// [`ClockError::ColumnOutOfRange`] if `column > 5`.
///
/// # Example
///
/// ```
/// use binclock_core::is_active;
///
/// // 42 = 0b101010
/// assert!(is_active(42, 5).unwrap());
/// assert!(!is_active(42, 4).unwrap());
/// assert!(is_active(99, 0).is_err());
/// ```
pub fn is_active(reading: u8, column: u8) -> Result<bool, ClockError> {
    if reading > MAX_READING {
        return Err(ClockError::ReadingOutOfRange {
            unit: "six-bit",
            value: reading,
            max: MAX_READING,
        });
    }
    let column = Column::new(column)?;
    Ok(bit_set(reading, column))
}

fn bit_set(reading: u8, column: Column) -> bool {
    (reading >> column.get()) & 1 == 1
}

/// The 3×6 grid of blocks for hours, minutes and seconds.
///
/// The grid owns its [`GridState`] and only re-reads minutes and hours when
/// the unit below rolls over, emitting a [`CellChange`] for each block whose
/// lit state changed. The first tick after creation or [`reset`](Self::reset)
/// is a full repaint that emits all 18 blocks.
///
/// # Example
///
/// ```
/// use binclock_core::{BlockGrid, CellChange, ManualClock, Unit};
///
/// let clock = ManualClock::at(14, 7, 42)?;
/// let mut grid = BlockGrid::new(clock.clone());
///
/// let mut changes: Vec<CellChange> = Vec::new();
/// grid.tick(&mut changes)?;
/// assert_eq!(changes.len(), 18);
/// assert_eq!(grid.state().lit_columns(Unit::Second), vec![1, 3, 5]);
/// # Ok::<(), binclock_core::ClockError>(())
/// ```
#[derive(Debug)]
pub struct BlockGrid<T> {
    sampler: T,
    state: GridState,
    reading: TimeReading,
}

impl<T: TimeSampler> BlockGrid<T> {
    /// Create an uninitialized grid reading time from `sampler`.
    pub fn new(sampler: T) -> Self {
        Self {
            sampler,
            state: GridState::default(),
            reading: TimeReading::default(),
        }
    }

    /// Snapshot of the lit flags.
    pub fn state(&self) -> GridState {
        self.state
    }

    /// The readings the grid currently displays.
    ///
    /// Returns `None` before the first tick.
    pub fn reading(&self) -> Option<TimeReading> {
        self.state.initialized.then_some(self.reading)
    }

    /// Whether the next tick will repaint every block.
    pub fn needs_full_repaint(&self) -> bool {
        !self.state.initialized
    }

    /// Force the next tick to be a full repaint.
    ///
    /// Call this whenever ticking resumes after a pause, or when the sink's
    /// presentation changed and every block must be redrawn.
    pub fn reset(&mut self) {
        debug!("grid reset, next tick repaints all blocks");
        self.state.initialized = false;
    }

    /// Borrow the sampler.
    pub fn sampler(&self) -> &T {
        &self.sampler
    }

    /// Advance the grid to the current time, emitting changed blocks to `sink`.
    ///
    /// Returns the number of emitted changes.
    ///
    /// # Errors
    /// Returns [`ClockError::ReadingOutOfRange`] if the sampler returns a
    /// value outside its unit's range. The grid is left untouched in that case.
    pub fn tick<K: CellSink + ?Sized>(&mut self, sink: &mut K) -> Result<usize, ClockError> {
        if !self.state.initialized {
            return self.full_repaint(sink);
        }

        let previous = self.reading;
        let second = self.sample(Unit::Second)?;
        let mut refresh = vec![(Unit::Second, second)];

        if rolled_over(second, previous.second()) {
            let minute = self.sample(Unit::Minute)?;
            refresh.push((Unit::Minute, minute));
            debug!("minute rollover: {} -> {}", previous.minute(), minute);

            if rolled_over(minute, previous.minute()) {
                let hour = self.sample(Unit::Hour)?;
                refresh.push((Unit::Hour, hour));
                debug!("hour rollover: {} -> {}", previous.hour(), hour);
            }
        }

        let mut emitted = 0;
        for (unit, value) in refresh {
            self.reading.set(unit, value);
            emitted += self.refresh_row(unit, false, sink);
        }

        trace!("tick at {}: {} block(s) changed", self.reading, emitted);
        Ok(emitted)
    }

    fn full_repaint<K: CellSink + ?Sized>(&mut self, sink: &mut K) -> Result<usize, ClockError> {
        self.reading = TimeReading::sample(&self.sampler)?;

        let mut emitted = 0;
        for unit in Unit::ALL {
            emitted += self.refresh_row(unit, true, sink);
        }
        self.state.initialized = true;

        debug!("full repaint at {}", self.reading);
        Ok(emitted)
    }

    fn sample(&self, unit: Unit) -> Result<u8, ClockError> {
        unit.check(self.sampler.sample(unit))
    }

    fn refresh_row<K: CellSink + ?Sized>(&mut self, row: Unit, force: bool, sink: &mut K) -> usize {
        let value = self.reading.get(row);
        let mut emitted = 0;

        for column in Column::ALL {
            let active = bit_set(value, column);
            if force || self.state.is_lit(row, column) != active {
                self.state.set(row, column, active);
                sink.on_cell_change(CellChange::new(row, column, active));
                emitted += 1;
            }
        }

        emitted
    }
}

/// A unit rolled over when it reads 0, or when it reads lower than before
/// because a tick landed late and skipped 0.
fn rolled_over(current: u8, previous: u8) -> bool {
    current == 0 || current < previous
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ManualClock;
    use std::cell::Cell;

    /// The modulo loop the widget historically used to decide activation.
    fn loop_rule(reading: u32, column: u32) -> bool {
        let exp = 2u32.pow(column);
        (0..exp).any(|inc| reading % (exp * 2) == inc + exp)
    }

    #[test]
    fn test_is_active_matches_bit_test_and_loop_rule() {
        for reading in 0..=MAX_READING {
            for column in 0..6u8 {
                let active = is_active(reading, column).unwrap();
                assert_eq!(active, (reading >> column) & 1 == 1);
                assert_eq!(active, loop_rule(u32::from(reading), u32::from(column)));
            }
        }
    }

    #[test]
    fn test_active_columns_reconstruct_reading() {
        for reading in 0..=MAX_READING {
            let sum: u32 = (0..6u8)
                .filter(|column| is_active(reading, *column).unwrap())
                .map(|column| 1u32 << column)
                .sum();
            assert_eq!(sum, u32::from(reading));
        }
    }

    #[test]
    fn test_is_active_rejects_out_of_range() {
        assert!(matches!(
            is_active(64, 0),
            Err(ClockError::ReadingOutOfRange { value: 64, .. })
        ));
        assert!(matches!(
            is_active(10, 6),
            Err(ClockError::ColumnOutOfRange(6))
        ));
    }

    #[test]
    fn test_reading_is_none_before_first_tick() {
        let mut grid = BlockGrid::new(ManualClock::at(1, 2, 3).unwrap());
        assert!(grid.reading().is_none());
        assert!(grid.needs_full_repaint());

        grid.tick(&mut Vec::<CellChange>::new()).unwrap();
        assert_eq!(grid.reading(), Some(TimeReading::new(1, 2, 3).unwrap()));
        assert!(!grid.needs_full_repaint());
    }

    #[test]
    fn test_emission_order_is_row_then_ascending_column() {
        let mut grid = BlockGrid::new(ManualClock::at(0, 0, 0).unwrap());
        let mut changes: Vec<CellChange> = Vec::new();
        grid.tick(&mut changes).unwrap();

        let order: Vec<(Unit, u8)> = changes.iter().map(|c| (c.row, c.column.get())).collect();
        let expected: Vec<(Unit, u8)> = Unit::ALL
            .iter()
            .flat_map(|unit| (0..6u8).map(move |column| (*unit, column)))
            .collect();
        assert_eq!(order, expected);
    }

    #[test]
    fn test_skipped_zero_second_still_cascades() {
        let clock = ManualClock::at(9, 15, 58).unwrap();
        let mut grid = BlockGrid::new(clock.clone());
        grid.tick(&mut Vec::<CellChange>::new()).unwrap();

        // Late tick: 58 -> 01 without ever observing second 0.
        clock.set(9, 16, 1).unwrap();
        grid.tick(&mut Vec::<CellChange>::new()).unwrap();

        assert_eq!(grid.state().value(Unit::Minute), 16);
        assert_eq!(grid.reading().unwrap().minute(), 16);
    }

    #[test]
    fn test_skipped_zero_second_cascades_into_hour_row() {
        let clock = ManualClock::at(13, 59, 58).unwrap();
        let mut grid = BlockGrid::new(clock.clone());
        grid.tick(&mut Vec::<CellChange>::new()).unwrap();
        clock.clear_samples();

        // Late tick: 13:59:58 -> 14:00:01, neither second 0 nor minute 0 seen.
        clock.set(14, 0, 1).unwrap();
        let mut changes: Vec<CellChange> = Vec::new();
        grid.tick(&mut changes).unwrap();

        assert_eq!(clock.samples(Unit::Hour), 1);
        assert_eq!(grid.state().value(Unit::Hour), 14);
        assert_eq!(grid.state().value(Unit::Minute), 0);
        assert_eq!(grid.reading().unwrap().to_string(), "14:00:01");
        // 13 = 0b001101 -> 14 = 0b001110.
        let hour: Vec<(u8, bool)> = changes
            .iter()
            .filter(|c| c.row == Unit::Hour)
            .map(|c| (c.column.get(), c.active))
            .collect();
        assert_eq!(hour, vec![(0, false), (1, true)]);
    }

    /// Moves its clock forward one second right after the first read.
    struct RollsOverWhileSampling {
        clock: ManualClock,
        rolled: Cell<bool>,
    }

    impl TimeSampler for RollsOverWhileSampling {
        fn sample(&self, unit: Unit) -> u8 {
            let value = self.clock.sample(unit);
            if !self.rolled.replace(true) {
                self.clock.advance(1);
            }
            value
        }
    }

    #[test]
    fn test_hour_rollover_during_full_repaint_self_corrects() {
        let clock = ManualClock::at(14, 59, 59).unwrap();
        let mut grid = BlockGrid::new(RollsOverWhileSampling {
            clock: clock.clone(),
            rolled: Cell::new(false),
        });
        grid.tick(&mut Vec::<CellChange>::new()).unwrap();

        // The straddled reads may leave a stale second, never a stale hour.
        assert_eq!(grid.state().value(Unit::Hour), 15);

        for _ in 0..120 {
            clock.advance(1);
            grid.tick(&mut Vec::<CellChange>::new()).unwrap();

            let now = clock.reading();
            let state = grid.state();
            for unit in Unit::ALL {
                assert_eq!(state.value(unit), now.get(unit), "at {}", now);
            }
        }
    }

    #[test]
    fn test_bad_sampler_leaves_grid_untouched() {
        struct Broken;
        impl TimeSampler for Broken {
            fn sample(&self, unit: Unit) -> u8 {
                match unit {
                    Unit::Second => 75,
                    _ => 1,
                }
            }
        }

        let mut grid = BlockGrid::new(Broken);
        let mut changes: Vec<CellChange> = Vec::new();
        assert!(grid.tick(&mut changes).is_err());
        assert!(changes.is_empty());
        assert!(grid.needs_full_repaint());
    }
}
