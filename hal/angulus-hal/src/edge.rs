//! Edge-triggered inputs
//!
//! The platform delivers encoder transitions through its GPIO interrupt
//! controller. Instead of registering a C-style callback, a pin exposes an
//! awaitable edge: the future completes once per transition, rising or
//! falling, and the caller decides what to do with it.

use crate::gpio::InputPin;

/// Which transition a pin went through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

impl Edge {
    /// Edge that produced the given post-transition level
    pub fn from_level(high: bool) -> Self {
        if high {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}

/// Input pin that can wait for transitions
///
/// Implementations arm the edge interrupt for both directions and complete
/// the future from interrupt context. Pins are expected to be configured
/// with a pull resistor so the idle level is defined.
#[allow(async_fn_in_trait)]
pub trait EdgeInput: InputPin {
    /// Wait until the pin changes level in either direction
    async fn wait_for_any_edge(&mut self);
}
