//! Angulus Hardware Abstraction Layer
//!
//! This crate defines the capabilities the angle readout needs from a
//! platform. Chip-specific HALs (currently RP2040) implement them, and the
//! drivers crate is written only against these traits so the decode and
//! display logic can be exercised on the host with mock pins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  angulus-firmware / angulus-drivers     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  angulus-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ angulus-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`edge::EdgeInput`] - Edge-triggered input (the "register edge callback"
//!   capability, expressed as an awaitable edge)

#![no_std]
#![deny(unsafe_code)]

pub mod edge;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use edge::EdgeInput;
pub use gpio::{InputPin, OutputPin};
