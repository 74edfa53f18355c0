//! LCD timing and geometry

use super::command::{DisplayControl, EntryMode, FunctionSet, Settle};

/// Bus and controller delays
///
/// Without busy-flag polling these are the only thing keeping the host from
/// writing faster than the controller can execute. Values are worst-case
/// datasheet figures rounded up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdTiming {
    /// Wait after power is applied before the first nibble (ms)
    pub power_on_ms: u32,
    /// Wait after each of the reset nibbles (ms)
    pub reset_nibble_ms: u32,
    /// RS/data setup before EN rises (µs)
    pub enable_setup_us: u32,
    /// EN high time (µs)
    pub enable_pulse_us: u32,
    /// Hold after EN falls before the next nibble (µs)
    pub nibble_settle_us: u32,
    /// Execution time of ordinary instructions and data writes (µs)
    pub short_settle_us: u32,
    /// Execution time of clear and return home (µs)
    pub long_settle_us: u32,
}

impl Default for LcdTiming {
    fn default() -> Self {
        Self {
            power_on_ms: 50,
            reset_nibble_ms: 5,
            enable_setup_us: 1,
            enable_pulse_us: 1,
            nibble_settle_us: 100,
            short_settle_us: 50,
            long_settle_us: 2000,
        }
    }
}

impl LcdTiming {
    /// Wait for a settle class (µs)
    pub fn settle_us(&self, settle: Settle) -> u32 {
        match settle {
            Settle::Short => self.short_settle_us,
            Settle::Long => self.long_settle_us,
        }
    }
}

/// Visible character grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdGeometry {
    pub columns: u8,
    pub rows: u8,
}

impl Default for LcdGeometry {
    fn default() -> Self {
        Self {
            columns: 16,
            rows: 2,
        }
    }
}

impl LcdGeometry {
    /// Highest addressable column of a DDRAM line
    pub const MAX_COLUMN: u8 = 39;

    /// DDRAM address of a cell
    ///
    /// Rows 0 and 1 start at `0x00` and `0x40`. Rows 2 and 3 continue those
    /// lines one display width further on, which is how 20x4 and 16x4 glass
    /// is wired. Out-of-range rows clamp to the last row, columns to 39.
    pub fn ddram_address(&self, column: u8, row: u8) -> u8 {
        let row = row.min(self.rows.saturating_sub(1)).min(3);
        let base = match row {
            0 => 0x00,
            1 => 0x40,
            2 => self.columns,
            _ => 0x40 + self.columns,
        };
        base.wrapping_add(column.min(Self::MAX_COLUMN)) & 0x7F
    }
}

/// Everything needed to bring up a display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdConfig {
    pub timing: LcdTiming,
    pub geometry: LcdGeometry,
    pub function: FunctionSet,
    pub control: DisplayControl,
    pub entry: EntryMode,
}
