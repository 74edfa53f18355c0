//! HD44780 character LCD
//!
//! The controller is driven over RS, EN and D4..D7 only. R/W is tied low, so
//! the busy flag cannot be read and every transfer is followed by a fixed
//! wait taken from [`LcdTiming`].

pub mod command;
pub mod config;
pub mod hd44780;

pub use command::{Command, DisplayControl, EntryMode, FunctionSet, Register, Settle};
pub use config::{LcdConfig, LcdGeometry, LcdTiming};
pub use hd44780::{Hd44780, LcdPins};
