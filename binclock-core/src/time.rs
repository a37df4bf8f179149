//! Time units, bit columns, readings and wall-clock sampling.

use std::fmt;

use chrono::{Local, Timelike};

use crate::error::ClockError;

// =============================================================================
// Unit
// =============================================================================

/// A time unit, which is also a row of the block grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Hours (0-23), the top row.
    Hour,
    /// Minutes (0-59), the middle row.
    Minute,
    /// Seconds (0-59), the bottom row.
    Second,
}

impl Unit {
    /// Number of rows in the grid.
    pub const COUNT: usize = 3;

    /// All units in row order.
    pub const ALL: [Unit; Unit::COUNT] = [Unit::Hour, Unit::Minute, Unit::Second];

    /// Row index (hour = 0, second = 2).
    pub const fn index(self) -> usize {
        match self {
            Unit::Hour => 0,
            Unit::Minute => 1,
            Unit::Second => 2,
        }
    }

    /// Largest valid reading for this unit.
    pub const fn max(self) -> u8 {
        match self {
            Unit::Hour => 23,
            Unit::Minute | Unit::Second => 59,
        }
    }

    /// Short label used next to the digital readout.
    pub const fn label(self) -> &'static str {
        match self {
            Unit::Hour => "h",
            Unit::Minute => "m",
            Unit::Second => "s",
        }
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Hour => "hour",
            Unit::Minute => "minute",
            Unit::Second => "second",
        }
    }

    /// Validate `value` against this unit's range.
    ///
    /// # Errors
    /// Returns [`ClockError::ReadingOutOfRange`] if `value > self.max()`.
    pub fn check(self, value: u8) -> Result<u8, ClockError> {
        if value > self.max() {
            return Err(ClockError::ReadingOutOfRange {
                unit: self.name(),
                value,
                max: self.max(),
            });
        }
        Ok(value)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Column
// =============================================================================

/// A bit position within a row; column `c` stands for the value `2^c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u8);

impl Column {
    /// Number of columns per row.
    pub const COUNT: usize = 6;

    /// All columns in ascending bit order.
    pub const ALL: [Column; Column::COUNT] = [
        Column(0),
        Column(1),
        Column(2),
        Column(3),
        Column(4),
        Column(5),
    ];

    /// Create a column for bit position `bit`.
    ///
    /// # Errors
    /// Returns [`ClockError::ColumnOutOfRange`] if `bit > 5`.
    pub fn new(bit: u8) -> Result<Self, ClockError> {
        if usize::from(bit) >= Self::COUNT {
            return Err(ClockError::ColumnOutOfRange(bit));
        }
        Ok(Self(bit))
    }

    /// The bit position (0-5).
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The bit position as an array index.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The value this column contributes when lit (1, 2, 4, 8, 16 or 32).
    pub const fn weight(self) -> u8 {
        1 << self.0
    }
}

// =============================================================================
// TimeReading
// =============================================================================

/// Hour, minute and second captured for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeReading {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeReading {
    /// Create a reading.
    ///
    /// # Errors
    /// Returns [`ClockError::ReadingOutOfRange`] if any component is out of range.
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, ClockError> {
        Ok(Self {
            hour: Unit::Hour.check(hour)?,
            minute: Unit::Minute.check(minute)?,
            second: Unit::Second.check(second)?,
        })
    }

    /// Sample all three units from `sampler`, least significant first.
    ///
    /// A rollover landing between two reads leaves a second reading that is
    /// too high, never an hour that is too low; the next tick sees the second
    /// drop and re-reads the units above it.
    ///
    /// # Errors
    /// Returns [`ClockError::ReadingOutOfRange`] if the sampler misbehaves.
    pub fn sample<T: TimeSampler + ?Sized>(sampler: &T) -> Result<Self, ClockError> {
        let second = sampler.sample(Unit::Second);
        let minute = sampler.sample(Unit::Minute);
        let hour = sampler.sample(Unit::Hour);
        Self::new(hour, minute, second)
    }

    /// Hours (0-23).
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minutes (0-59).
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Seconds (0-59).
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// The component for `unit`.
    pub const fn get(&self, unit: Unit) -> u8 {
        match unit {
            Unit::Hour => self.hour,
            Unit::Minute => self.minute,
            Unit::Second => self.second,
        }
    }

    pub(crate) fn set(&mut self, unit: Unit, value: u8) {
        match unit {
            Unit::Hour => self.hour = value,
            Unit::Minute => self.minute = value,
            Unit::Second => self.second = value,
        }
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_of_day(&self) -> u32 {
        u32::from(self.hour) * 3600 + u32::from(self.minute) * 60 + u32::from(self.second)
    }

    /// Build a reading from seconds since midnight, wrapping past 24h.
    pub fn from_seconds_of_day(seconds: u32) -> Self {
        let seconds = seconds % 86_400;
        Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }
}

impl fmt::Display for TimeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

// =============================================================================
// TimeSampler
// =============================================================================

/// Source of wall-clock readings.
///
/// Implementations must return the current value on every call; the grid
/// decides which units to re-read on each tick.
pub trait TimeSampler {
    /// Read the current value of `unit`.
    fn sample(&self, unit: Unit) -> u8;
}

impl<T: TimeSampler + ?Sized> TimeSampler for &T {
    fn sample(&self, unit: Unit) -> u8 {
        (**self).sample(unit)
    }
}

impl<T: TimeSampler + ?Sized> TimeSampler for Box<T> {
    fn sample(&self, unit: Unit) -> u8 {
        (**self).sample(unit)
    }
}

/// Samples the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl LocalClock {
    /// Create a local clock sampler.
    pub fn new() -> Self {
        Self
    }
}

impl TimeSampler for LocalClock {
    fn sample(&self, unit: Unit) -> u8 {
        let now = Local::now();
        let value = match unit {
            Unit::Hour => now.hour(),
            Unit::Minute => now.minute(),
            Unit::Second => now.second(),
        };
        value as u8
    }
}
