//! Compile-time configuration
//!
//! The board has a single fixed wiring and a single encoder model, so all
//! configuration is constant. Pin numbers are RP2040 GPIO numbers.

/// Encoder lines per revolution (datasheet PPR)
pub const PULSES_PER_REV: u32 = 1024;

/// Counts per encoder line with both edges of both channels decoded
pub const QUADRATURE_FACTOR: u32 = 4;

/// Delay between rendered frames in the foreground loop
pub const REFRESH_INTERVAL_MS: u64 = 5;

/// Console UART baud rate
pub const CONSOLE_BAUDRATE: u32 = 115_200;

/// Default resolution of the fitted encoder
pub const RESOLUTION: EncoderResolution = EncoderResolution::new(PULSES_PER_REV);

/// GPIO pin assignments
pub mod pins {
    //! GPIO numbers matching the wiring of the readout board

    /// Encoder channel A (input, pull-up)
    pub const ENCODER_A: u8 = 2;

    /// Encoder channel B (input, pull-up)
    pub const ENCODER_B: u8 = 3;

    /// LCD register select
    pub const LCD_RS: u8 = 6;

    /// LCD enable strobe
    pub const LCD_EN: u8 = 7;

    /// LCD data lines D4..D7
    pub const LCD_DATA: [u8; 4] = [8, 9, 10, 11];

    /// Console UART0 TX
    pub const CONSOLE_TX: u8 = 0;
}

/// Encoder resolution
///
/// Determines the wrap period of the position count:
/// `counts_per_rev = pulses_per_rev * QUADRATURE_FACTOR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderResolution {
    /// Encoder lines per mechanical revolution
    pub pulses_per_rev: u32,
}

impl EncoderResolution {
    /// Create a resolution from the encoder's lines per revolution
    pub const fn new(pulses_per_rev: u32) -> Self {
        Self { pulses_per_rev }
    }

    /// Quadrature counts in one full revolution (`P`)
    pub const fn counts_per_rev(&self) -> i32 {
        (self.pulses_per_rev * QUADRATURE_FACTOR) as i32
    }
}

impl Default for EncoderResolution {
    fn default() -> Self {
        RESOLUTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let res = EncoderResolution::default();
        assert_eq!(res.pulses_per_rev, 1024);
        assert_eq!(res.counts_per_rev(), 4096);
    }

    #[test]
    fn test_pins_distinct() {
        let mut all = [0u8; 8];
        all[0] = pins::ENCODER_A;
        all[1] = pins::ENCODER_B;
        all[2] = pins::LCD_RS;
        all[3] = pins::LCD_EN;
        all[4..].copy_from_slice(&pins::LCD_DATA);

        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b, "pin {} assigned twice", a);
            }
            assert_ne!(*a, pins::CONSOLE_TX);
        }
    }
}
