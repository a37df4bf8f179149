//! Display options and block palettes.

use crate::error::ClockError;
use crate::time::Unit;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// One block color per row, hour first.
pub type Palette = [Rgb; Unit::COUNT];

/// Built-in block palettes.
pub const PALETTES: [Palette; 7] = [
    // beige | orange | olive
    [Rgb::hex(0xe2ddb7), Rgb::hex(0xd97036), Rgb::hex(0xb8b690)],
    // turquoise | pink | yellow
    [Rgb::hex(0xaabebf), Rgb::hex(0xc79a95), Rgb::hex(0xd6c79e)],
    // red | charcoal | beige
    [Rgb::hex(0xac5251), Rgb::hex(0x6a6869), Rgb::hex(0xcba990)],
    // orange | beige | plum
    [Rgb::hex(0xed9c6f), Rgb::hex(0xeddbc3), Rgb::hex(0xc5b4aa)],
    // brown | orange | lime
    [Rgb::hex(0x7f695c), Rgb::hex(0xef9a25), Rgb::hex(0xbfbe62)],
    // light green | crimson | dark green
    [Rgb::hex(0xbbc183), Rgb::hex(0x9a3231), Rgb::hex(0x949460)],
    // dark green | green | light green
    [Rgb::hex(0x206536), Rgb::hex(0x76ad2e), Rgb::hex(0xbadc61)],
];

// =============================================================================
// Color Mode
// =============================================================================

/// Day or night color scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Light background.
    #[default]
    Day,
    /// Dark background.
    Night,
}

impl ColorMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Day => ColorMode::Night,
            ColorMode::Night => ColorMode::Day,
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Arrangement of the grid on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// One row per unit, most significant bit on the left.
    #[default]
    Horizontal,
    /// One column per unit, most significant bit on top.
    Vertical,
}

impl Layout {
    /// The other layout.
    pub fn toggled(self) -> Self {
        match self {
            Layout::Horizontal => Layout::Vertical,
            Layout::Vertical => Layout::Horizontal,
        }
    }
}

// =============================================================================
// Display Options
// =============================================================================

/// Viewer-selectable presentation settings.
///
/// The grid never reads these; they tell the rendering sink how to present
/// the changes it receives. Nothing here outlives the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Show the widget title.
    pub title_display: bool,
    /// Print each lit block's value on it.
    pub numbers_on_blocks: bool,
    /// Day or night colors.
    pub mode: ColorMode,
    /// Horizontal or vertical grid.
    pub layout: Layout,
    /// Show the `HH:MM:SS` readout next to the grid.
    pub time_digits: bool,
    palette: usize,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            title_display: true,
            numbers_on_blocks: false,
            mode: ColorMode::Day,
            layout: Layout::Horizontal,
            time_digits: false,
            palette: 0,
        }
    }
}

impl DisplayOptions {
    /// Index of the selected palette.
    pub fn palette_index(&self) -> usize {
        self.palette
    }

    /// The selected palette.
    pub fn palette(&self) -> &Palette {
        &PALETTES[self.palette]
    }

    /// Block color for `row` in the selected palette.
    pub fn row_color(&self, row: Unit) -> Rgb {
        self.palette()[row.index()]
    }

    /// Select palette `index`.
    ///
    /// # Errors
    /// Returns [`ClockError::PaletteOutOfRange`] if `index` names no palette.
    pub fn select_palette(&mut self, index: usize) -> Result<(), ClockError> {
        if index >= PALETTES.len() {
            return Err(ClockError::PaletteOutOfRange {
                index,
                max: PALETTES.len() - 1,
            });
        }
        self.palette = index;
        Ok(())
    }

    /// Advance to the next palette, wrapping after the last.
    pub fn next_palette(&mut self) -> usize {
        self.palette = (self.palette + 1) % PALETTES.len();
        self.palette
    }
}
