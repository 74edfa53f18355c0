//! Character display trait

/// Text-mode display with a cursor
///
/// Implementations are open loop: there is no status to report back, so
/// every operation is infallible. Timing requirements of the controller are
/// the implementation's concern.
pub trait CharacterDisplay {
    /// Visible characters per row
    fn columns(&self) -> u8;

    /// Visible rows
    fn rows(&self) -> u8;

    /// Clear the whole display and home the cursor
    fn clear(&mut self);

    /// Move the cursor
    ///
    /// - `column`: 0-based column
    /// - `row`: 0-based row
    fn set_cursor(&mut self, column: u8, row: u8);

    /// Write text at the cursor, advancing it
    fn print(&mut self, text: &str);
}

/// Helper operations built on [`CharacterDisplay`]
pub trait DisplayExt: CharacterDisplay {
    /// Write text at a position
    fn print_at(&mut self, column: u8, row: u8, text: &str) {
        self.set_cursor(column, row);
        self.print(text);
    }

    /// Clear the display and show one left-justified line at the top
    fn show_line(&mut self, text: &str) {
        self.clear();
        self.print_at(0, 0, text);
    }
}

// Blanket implementation for all CharacterDisplay types
impl<T: CharacterDisplay + ?Sized> DisplayExt for T {}
