//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in angulus-core, written against the angulus-hal pin capabilities:
//!
//! - HD44780-compatible character LCD on a bit-banged 4-bit bus
//! - Quadrature encoder edge dispatch into the position tracker

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod encoder;
pub mod lcd;
