//! Manual clock for testing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ClockError;
use crate::time::{TimeReading, TimeSampler, Unit};

#[derive(Debug, Default)]
struct Inner {
    reading: TimeReading,
    samples: [usize; Unit::COUNT],
}

/// A settable clock for testing.
///
/// Clones share the same time, so a test can hand one clone to a
/// [`BlockGrid`](crate::BlockGrid) and move time forward through another.
/// Every [`sample`](TimeSampler::sample) call is counted per unit.
///
/// # Example
///
/// ```
/// use binclock_core::{ManualClock, TimeSampler, Unit};
///
/// let clock = ManualClock::at(23, 59, 59).unwrap();
/// clock.advance(1);
/// assert_eq!(clock.sample(Unit::Hour), 0);
/// assert_eq!(clock.samples(Unit::Hour), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<Inner>>,
}

impl ManualClock {
    /// Create a manual clock stopped at midnight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manual clock stopped at the given time.
    ///
    /// # Errors
    /// Returns [`ClockError::ReadingOutOfRange`] if any component is out of range.
    pub fn at(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        let clock = Self::new();
        clock.set(hour, minute, second)?;
        Ok(clock)
    }

    /// Move the clock to the given time.
    ///
    /// # Errors
    /// Returns [`ClockError::ReadingOutOfRange`] if any component is out of range.
    pub fn set(&self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError> {
        self.lock().reading = TimeReading::new(hour, minute, second)?;
        Ok(())
    }

    /// Move the clock forward by `seconds`, wrapping at midnight.
    pub fn advance(&self, seconds: u32) {
        let mut inner = self.lock();
        let now = inner.reading.seconds_of_day();
        inner.reading = TimeReading::from_seconds_of_day(now + seconds % 86_400);
    }

    /// The time the clock currently reads.
    pub fn reading(&self) -> TimeReading {
        self.lock().reading
    }

    /// How many times `unit` has been sampled.
    pub fn samples(&self, unit: Unit) -> usize {
        self.lock().samples[unit.index()]
    }

    /// Zero the sample counters.
    pub fn clear_samples(&self) {
        self.lock().samples = [0; Unit::COUNT];
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimeSampler for ManualClock {
    fn sample(&self, unit: Unit) -> u8 {
        let mut inner = self.lock();
        inner.samples[unit.index()] += 1;
        inner.reading.get(unit)
    }
}
