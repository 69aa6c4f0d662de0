//! Rendering of text messages, with newline handling that follows the text direction and column
//! alignment settings.

use hal::blocking::delay::{DelayMs, DelayUs};

use crate::command::consts::ENTRY_LEFT;
use crate::display::Display;
use crate::error::Error;
use crate::interface::PinInterface;

impl<PI, D> Display<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    fn entry_left(&self) -> bool {
        self.display_mode & ENTRY_LEFT != 0
    }

    /// Write `text` starting at the tracked cursor position.
    ///
    /// In left-to-right mode the message starts at the tracked column; in right-to-left mode it
    /// starts at the mirrored column, counted from the right edge. Each `'\n'` moves down one
    /// line (clamped to the last) and restarts at the line's starting edge, or at the current
    /// column when column alignment is on. Every other character is written as its low byte, so
    /// `'\x00'` to `'\x07'` print the custom glyphs. Text is not wrapped at the right edge.
    ///
    /// Afterwards the tracked position is reset to `(0, 0)` rather than following the text.
    pub fn render_message(&mut self, text: &str) -> Result<(), Error<PI::Error>> {
        let mut line = self.row;

        for (i, character) in text.chars().enumerate() {
            if i == 0 {
                let column = if self.entry_left() {
                    self.column
                } else {
                    self.columns - 1 - self.column
                };
                self.set_cursor_position(column, line)?;
            }

            if character == '\n' {
                line = line.saturating_add(1);
                let column = match (self.entry_left(), self.column_align) {
                    (_, true) => self.column,
                    (true, false) => 0,
                    (false, false) => self.columns - 1,
                };
                self.set_cursor_position(column, line)?;
            } else {
                self.bus
                    .write_data(character as u8)
                    .map_err(Error::Transport)?;
            }
        }

        self.column = 0;
        self.row = 0;
        Ok(())
    }
}
