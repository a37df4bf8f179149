//! Error types for the binary clock core.

/// Errors that can occur when driving the binary clock.
///
/// Apart from [`ClockError::Io`], every variant signals a caller handing the
/// core a value outside its documented range.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// A column index was outside the six bit positions of a row.
    #[error("Invalid column {0} (expected 0-5)")]
    ColumnOutOfRange(u8),

    /// A time reading was outside the valid range for its unit.
    #[error("Invalid {unit} reading {value} (expected 0-{max})")]
    ReadingOutOfRange {
        /// The unit name.
        unit: &'static str,
        /// The invalid value provided.
        value: u8,
        /// Maximum allowed value.
        max: u8,
    },

    /// A palette index did not name one of the built-in palettes.
    #[error("Invalid palette {index} (expected 0-{max})")]
    PaletteOutOfRange {
        /// The invalid index provided.
        index: usize,
        /// Highest valid palette index.
        max: usize,
    },

    /// An I/O error occurred (e.g., spawning the tick thread).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
