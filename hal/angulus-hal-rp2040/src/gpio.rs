//! GPIO wrappers
//!
//! `embassy-rp` pins implement the `embedded-hal` traits, not the
//! `angulus-hal` ones, so they are wrapped here. Outputs are push-pull and
//! inputs should be created with a pull resistor; both are configured by the
//! caller before wrapping.

use angulus_hal::{EdgeInput, InputPin, OutputPin};
use embassy_rp::gpio::{Input, Output};

/// Push-pull output pin
pub struct RpOutput<'d>(Output<'d>);

impl<'d> RpOutput<'d> {
    /// Wrap a configured output
    pub fn new(pin: Output<'d>) -> Self {
        Self(pin)
    }
}

impl OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Input pin with edge interrupts
///
/// Edge waits use the IO_BANK0 interrupt, which `embassy-rp` binds itself.
pub struct RpInput<'d>(Input<'d>);

impl<'d> RpInput<'d> {
    /// Wrap a configured input
    pub fn new(pin: Input<'d>) -> Self {
        Self(pin)
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

impl EdgeInput for RpInput<'_> {
    async fn wait_for_any_edge(&mut self) {
        self.0.wait_for_any_edge().await;
    }
}
