//! UART line console
//!
//! Transmit-only and blocking: a 16-character line at 115 200 baud fits in
//! the TX FIFO plus a few byte times, so the foreground loop never waits
//! long enough to matter.

use angulus_core::traits::Console;
use embassy_rp::uart::{self, Blocking, UartTx};

/// Line terminator expected by serial terminals and the host loggers
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Console write failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// Receive-side overrun reported by the peripheral
    Overrun,
    /// Break condition on the line
    Break,
    /// Parity mismatch
    Parity,
    /// Framing error
    Framing,
    /// Any other peripheral error
    Other,
}

impl From<uart::Error> for ConsoleError {
    fn from(e: uart::Error) -> Self {
        match e {
            uart::Error::Overrun => ConsoleError::Overrun,
            uart::Error::Break => ConsoleError::Break,
            uart::Error::Parity => ConsoleError::Parity,
            uart::Error::Framing => ConsoleError::Framing,
            _ => ConsoleError::Other,
        }
    }
}

/// Console on a blocking UART transmitter
pub struct UartConsole<'d> {
    tx: UartTx<'d, Blocking>,
}

impl<'d> UartConsole<'d> {
    /// Wrap a configured transmitter
    pub fn new(tx: UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }

    /// Write raw bytes without a terminator
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ConsoleError> {
        self.tx.blocking_write(bytes)?;
        Ok(())
    }
}

impl Console for UartConsole<'_> {
    type Error = ConsoleError;

    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.write_bytes(line.as_bytes())?;
        self.write_bytes(LINE_ENDING)
    }
}
