//! Board-agnostic core logic for the angle readout firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Compile-time configuration (encoder resolution, pin map, cadence)
//! - Quadrature position tracker (4x decode, wrapped count)
//! - Angle mapping from the wrapped count
//! - Readout text formatting and the per-frame presenter
//! - Display and console traits implemented by drivers/HALs

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod angle;
pub mod config;
pub mod quadrature;
pub mod readout;
pub mod traits;

pub use angle::Angle;
pub use config::EncoderResolution;
pub use quadrature::{Channel, ChannelSample, Direction, QuadratureTracker};
pub use readout::{Presenter, Readout};
