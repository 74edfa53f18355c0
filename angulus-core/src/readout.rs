//! Angle readout
//!
//! Formats the current angle for the console and the LCD, and drives both
//! once per frame. The text format is `"Angle: {:7.4}"`: seven characters of
//! label and up to nine of value, which fits a 16-column display for every
//! angle in `[-180, 180)`.

use core::fmt::Write;

use heapless::String;

use crate::angle::Angle;
use crate::config::EncoderResolution;
use crate::traits::{CharacterDisplay, Console, DisplayExt};

/// Characters in one readout line
pub const READOUT_WIDTH: usize = 16;

/// Label that starts every readout line
pub const LABEL: &str = "Angle:";

/// One formatted readout line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readout {
    text: String<READOUT_WIDTH>,
}

impl Readout {
    /// Format an angle
    pub fn from_angle(angle: Angle) -> Self {
        let mut text = String::new();
        // Cannot overflow for angles in [-180, 180)
        let _ = write!(text, "{} {:7.4}", LABEL, angle.degrees());
        Self { text }
    }

    /// Text of the line, without terminator
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Extract the angle from a console line
    ///
    /// Accepts any line that contains the label followed by a decimal value;
    /// surrounding text and trailing whitespace are ignored.
    pub fn parse(line: &str) -> Option<Angle> {
        let (_, rest) = line.split_once(LABEL)?;
        let value = rest.split_whitespace().next()?;
        let degrees: f32 = value.parse().ok()?;
        Some(Angle::from_degrees(degrees))
    }
}

/// Per-frame driver for the console and the display
///
/// Each [`render`](Presenter::render) takes one position snapshot, so the
/// console and the LCD always show the same value.
pub struct Presenter<D, C> {
    display: D,
    console: C,
    resolution: EncoderResolution,
}

impl<D: CharacterDisplay, C: Console> Presenter<D, C> {
    /// Create a presenter
    pub fn new(display: D, console: C, resolution: EncoderResolution) -> Self {
        Self {
            display,
            console,
            resolution,
        }
    }

    /// Render one frame for a position snapshot
    ///
    /// Writes the console line, then clears the display and prints the same
    /// text at row 0, column 0. Console failures are dropped.
    pub fn render(&mut self, position: i32) -> Readout {
        let readout = Readout::from_angle(Angle::from_position(position, self.resolution));

        if self.console.write_line(readout.as_str()).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Console write failed");
        }
        self.display.show_line(readout.as_str());

        readout
    }

    /// Split the presenter back into its parts
    pub fn into_parts(self) -> (D, C) {
        (self.display, self.console)
    }
}
