//! Pin map validation
//!
//! The firmware claims its pins through typed `embassy-rp` peripherals, and
//! the GPIO numbers in `angulus_core::config::pins` document that wiring.
//! [`PinMap::check`] is a `const fn` so the firmware can reject a conflicting
//! map at compile time.

use angulus_core::config::pins;

/// Number of user GPIOs on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Pins that can carry UART0 TX
pub const UART0_TX_PINS: [u8; 4] = [0, 12, 16, 28];

/// Why a pin map was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// GPIO number does not exist
    OutOfRange(u8),
    /// GPIO used for more than one signal
    Duplicate(u8),
    /// GPIO cannot be muxed to UART0 TX
    NotUartTx(u8),
}

/// Every GPIO the firmware drives or reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    pub encoder_a: u8,
    pub encoder_b: u8,
    pub lcd_rs: u8,
    pub lcd_en: u8,
    pub lcd_data: [u8; 4],
    pub console_tx: u8,
}

impl PinMap {
    /// Board wiring
    pub const BOARD: PinMap = PinMap {
        encoder_a: pins::ENCODER_A,
        encoder_b: pins::ENCODER_B,
        lcd_rs: pins::LCD_RS,
        lcd_en: pins::LCD_EN,
        lcd_data: pins::LCD_DATA,
        console_tx: pins::CONSOLE_TX,
    };

    /// All pins in a fixed order
    pub const fn to_array(&self) -> [u8; 9] {
        [
            self.encoder_a,
            self.encoder_b,
            self.lcd_rs,
            self.lcd_en,
            self.lcd_data[0],
            self.lcd_data[1],
            self.lcd_data[2],
            self.lcd_data[3],
            self.console_tx,
        ]
    }

    /// Check range, uniqueness and the UART mux
    pub const fn check(&self) -> Result<(), PinError> {
        let all = self.to_array();

        let mut i = 0;
        while i < all.len() {
            if all[i] >= GPIO_COUNT {
                return Err(PinError::OutOfRange(all[i]));
            }
            let mut j = i + 1;
            while j < all.len() {
                if all[i] == all[j] {
                    return Err(PinError::Duplicate(all[i]));
                }
                j += 1;
            }
            i += 1;
        }

        if !is_uart0_tx(self.console_tx) {
            return Err(PinError::NotUartTx(self.console_tx));
        }
        Ok(())
    }

    /// First signal wired to a different GPIO than in `expected`
    ///
    /// Returns `(self, expected)` GPIO numbers in [`to_array`](Self::to_array)
    /// order.
    pub fn first_difference(&self, expected: &PinMap) -> Option<(u8, u8)> {
        self.to_array()
            .into_iter()
            .zip(expected.to_array())
            .find(|(actual, wanted)| actual != wanted)
    }
}

/// Whether a GPIO can be muxed to UART0 TX
pub const fn is_uart0_tx(gpio: u8) -> bool {
    let mut i = 0;
    while i < UART0_TX_PINS.len() {
        if UART0_TX_PINS[i] == gpio {
            return true;
        }
        i += 1;
    }
    false
}
