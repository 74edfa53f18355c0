//! Serial console trait

/// Line-oriented text output
///
/// The console is informational only; callers log and drop failures rather
/// than retrying.
pub trait Console {
    /// Error type for write operations
    type Error;

    /// Write one line of text followed by a line terminator
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error>;
}
