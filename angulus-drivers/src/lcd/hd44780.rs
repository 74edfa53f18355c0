//! HD44780 driver on a 4-bit write-only bus
//!
//! Every byte goes out as two nibbles, high nibble first, each latched by a
//! falling edge on EN. The driver owns its pins and delay source for as long
//! as the display is in use; [`Hd44780::release`] hands them back.

use angulus_core::traits::CharacterDisplay;
use angulus_hal::OutputPin;
use embedded_hal::delay::DelayNs;

use super::command::{instruction_settle, Command, Register, Settle};
use super::config::LcdConfig;

/// Nibble written three times to force 8-bit mode from any state
const RESET_NIBBLE: u8 = 0x03;
/// Nibble that switches the controller to 4-bit mode
const FOUR_BIT_NIBBLE: u8 = 0x02;

/// Control and data lines of the bus
///
/// `data[0]` is wired to D4 and `data[3]` to D7.
pub struct LcdPins<P> {
    pub rs: P,
    pub en: P,
    pub data: [P; 4],
}

/// HD44780-compatible character display
///
/// A value of this type always refers to an initialized controller:
/// [`initialize`](Hd44780::initialize) is the only constructor.
pub struct Hd44780<P, D> {
    pins: LcdPins<P>,
    delay: D,
    config: LcdConfig,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Run the power-on sequence and return a ready display
    ///
    /// Blocks for the power-on delay plus the three reset nibbles, then
    /// configures function, display control and entry mode and clears
    /// the screen.
    pub fn initialize(pins: LcdPins<P>, delay: D, config: LcdConfig) -> Self {
        let mut lcd = Self {
            pins,
            delay,
            config,
        };

        lcd.pins.rs.set_low();
        lcd.pins.en.set_low();
        for pin in lcd.pins.data.iter_mut() {
            pin.set_low();
        }

        let timing = lcd.config.timing;
        lcd.delay.delay_ms(timing.power_on_ms);

        for _ in 0..3 {
            lcd.write_nibble(RESET_NIBBLE);
            lcd.delay.delay_ms(timing.reset_nibble_ms);
        }
        lcd.write_nibble(FOUR_BIT_NIBBLE);
        lcd.delay.delay_us(timing.short_settle_us);

        lcd.execute(Command::FunctionSet(config.function));
        lcd.execute(Command::DisplayControl(config.control));
        lcd.execute(Command::EntryMode(config.entry));
        lcd.execute(Command::ClearDisplay);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "HD44780 ready: {}x{}",
            config.geometry.columns,
            config.geometry.rows
        );

        lcd
    }

    /// Write a raw instruction byte
    pub fn send_command(&mut self, byte: u8) {
        self.write(Register::Instruction, byte, instruction_settle(byte));
    }

    /// Write a raw character code at the cursor
    pub fn send_data(&mut self, byte: u8) {
        self.write(Register::Data, byte, Settle::Short);
    }

    /// Issue a typed command
    pub fn execute(&mut self, command: Command) {
        self.write(command.register(), command.byte(), command.settle());
    }

    /// Clear the display and home the cursor
    pub fn clear(&mut self) {
        self.execute(Command::ClearDisplay);
    }

    /// Move the cursor; out-of-range positions are clamped
    pub fn set_cursor(&mut self, column: u8, row: u8) {
        let address = self.config.geometry.ddram_address(column, row);
        self.execute(Command::SetDdramAddress(address));
    }

    /// Write text at the cursor
    ///
    /// Characters outside ASCII have no fixed glyph in the character ROM and
    /// are shown as `?`.
    pub fn print(&mut self, text: &str) {
        for ch in text.chars() {
            let code = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.send_data(code);
        }
    }

    /// Give back the pins and delay source
    pub fn release(self) -> (LcdPins<P>, D) {
        (self.pins, self.delay)
    }

    fn write(&mut self, register: Register, byte: u8, settle: Settle) {
        self.pins.rs.set_state(register.rs_level());
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
        self.delay.delay_us(self.config.timing.settle_us(settle));
    }

    fn write_nibble(&mut self, nibble: u8) {
        for (bit, pin) in self.pins.data.iter_mut().enumerate() {
            pin.set_state(nibble & (1 << bit) != 0);
        }
        self.pulse_enable();
    }

    fn pulse_enable(&mut self) {
        let timing = self.config.timing;
        self.delay.delay_us(timing.enable_setup_us);
        self.pins.en.set_high();
        self.delay.delay_us(timing.enable_pulse_us);
        self.pins.en.set_low();
        self.delay.delay_us(timing.nibble_settle_us);
    }
}

impl<P: OutputPin, D: DelayNs> CharacterDisplay for Hd44780<P, D> {
    fn columns(&self) -> u8 {
        self.config.geometry.columns
    }

    fn rows(&self) -> u8 {
        self.config.geometry.rows
    }

    fn clear(&mut self) {
        Hd44780::clear(self);
    }

    fn set_cursor(&mut self, column: u8, row: u8) {
        Hd44780::set_cursor(self, column, row);
    }

    fn print(&mut self, text: &str) {
        Hd44780::print(self, text);
    }
}
