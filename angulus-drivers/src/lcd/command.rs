//! HD44780 instruction set
//!
//! Each [`Command`] is one byte on the bus plus the register it targets and
//! how long the controller needs before it accepts the next byte.

/// Register selected by the RS line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// RS low: instruction register
    Instruction,
    /// RS high: data register (DDRAM/CGRAM)
    Data,
}

impl Register {
    /// RS line level for this register
    pub const fn rs_level(self) -> bool {
        matches!(self, Register::Data)
    }
}

/// Post-write settle class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Settle {
    /// Ordinary instructions and character writes (37 µs typ.)
    Short,
    /// Clear display and return home (1.52 ms typ.)
    Long,
}

/// Entry mode set (cursor/display movement after each write)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryMode {
    /// Cursor moves right (true) or left (false)
    pub increment: bool,
    /// Shift the whole display instead of the cursor
    pub shift: bool,
}

impl Default for EntryMode {
    fn default() -> Self {
        Self {
            increment: true,
            shift: false,
        }
    }
}

/// Display on/off control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl {
    /// Display on
    pub display: bool,
    /// Underline cursor visible
    pub cursor: bool,
    /// Blinking block cursor
    pub blink: bool,
}

impl Default for DisplayControl {
    fn default() -> Self {
        Self {
            display: true,
            cursor: false,
            blink: false,
        }
    }
}

/// Function set (bus width is always 4 bits here)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSet {
    /// Two-line addressing (also used by 4-line glass)
    pub two_lines: bool,
    /// 5x10 font (single-line displays only)
    pub large_font: bool,
}

impl Default for FunctionSet {
    fn default() -> Self {
        Self {
            two_lines: true,
            large_font: false,
        }
    }
}

/// One bus transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Clear DDRAM and home the cursor
    ClearDisplay,
    /// Home the cursor and undo display shift
    ReturnHome,
    /// Entry mode set
    EntryMode(EntryMode),
    /// Display on/off control
    DisplayControl(DisplayControl),
    /// Function set
    FunctionSet(FunctionSet),
    /// Set DDRAM address (7 bits)
    SetDdramAddress(u8),
    /// Write a character code to DDRAM
    Data(u8),
}

impl Command {
    /// Byte placed on the bus
    pub const fn byte(self) -> u8 {
        match self {
            Command::ClearDisplay => 0x01,
            Command::ReturnHome => 0x02,
            Command::EntryMode(mode) => 0x04 | bit(mode.increment, 1) | bit(mode.shift, 0),
            Command::DisplayControl(ctrl) => {
                0x08 | bit(ctrl.display, 2) | bit(ctrl.cursor, 1) | bit(ctrl.blink, 0)
            }
            Command::FunctionSet(func) => {
                0x20 | bit(func.two_lines, 3) | bit(func.large_font, 2)
            }
            Command::SetDdramAddress(address) => 0x80 | (address & 0x7F),
            Command::Data(byte) => byte,
        }
    }

    /// Register the byte is written to
    pub const fn register(self) -> Register {
        match self {
            Command::Data(_) => Register::Data,
            _ => Register::Instruction,
        }
    }

    /// Wait required after the transfer
    pub const fn settle(self) -> Settle {
        match self {
            Command::Data(_) => Settle::Short,
            _ => instruction_settle(self.byte()),
        }
    }
}

/// Settle class of a raw instruction byte
///
/// Only clear (`0x01`) and return home (`0x02`/`0x03`) take the long path.
pub const fn instruction_settle(byte: u8) -> Settle {
    if byte != 0 && byte & 0xFC == 0 {
        Settle::Long
    } else {
        Settle::Short
    }
}

const fn bit(set: bool, position: u8) -> u8 {
    (set as u8) << position
}
