//! GPIO pin abstractions
//!
//! Infallible digital input and output traits. The LCD bus and the encoder
//! channels are plain push-pull / pulled-up pins with no error path, so the
//! traits carry none either.

/// Digital output pin
///
/// Implementations drive the physical pin immediately; there is no
/// buffering between a call and the level change.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// `is_high` must return the instantaneous level, not a latched or
/// debounced one.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}
