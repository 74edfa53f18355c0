//! Hardware abstraction traits
//!
//! These traits define the interface between the readout logic and the
//! output devices implemented by drivers and chip HALs.

pub mod console;
pub mod display;

pub use console::Console;
pub use display::{CharacterDisplay, DisplayExt};
