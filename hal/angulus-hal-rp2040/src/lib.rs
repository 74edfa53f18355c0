//! RP2040-specific HAL for the angle readout firmware
//!
//! This crate provides RP2040 implementations of the `angulus-hal` pin
//! traits and the `angulus-core` console, on top of `embassy-rp`:
//!
//! - GPIO output/input wrappers, with edge waits for the encoder channels
//! - Blocking UART transmitter as the line console
//! - Pin map validation against the RP2040 pin mux

#![no_std]

pub mod gpio;
pub mod pins;
pub mod uart;

pub use gpio::{RpInput, RpOutput};
pub use uart::{ConsoleError, UartConsole};
