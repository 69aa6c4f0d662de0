//! The instruction set of the HD44780 and compatible controllers.
//!
//! Note 1: The display RAM (DDRAM) of the controller is addressed as one 80-byte line on 1-line
//! displays, or two 40-byte lines starting at 0x00 and 0x40 on 2-line displays. 4-line modules
//! split each of those two lines in half, so rows 2 and 3 continue rows 0 and 1 at offset 20.

use crate::bus::FourBitBus;
use crate::interface::PinInterface;
use hal::blocking::delay::{DelayMs, DelayUs};

pub mod consts {
    //! Instruction opcodes and their flag bits.

    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags.
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;
    pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

    // Display control flags.
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const CURSOR_OFF: u8 = 0x00;
    pub const BLINK_ON: u8 = 0x01;
    pub const BLINK_OFF: u8 = 0x00;

    // Cursor shift flags.
    pub const DISPLAY_MOVE: u8 = 0x08;
    pub const MOVE_RIGHT: u8 = 0x04;
    pub const MOVE_LEFT: u8 = 0x00;

    // Function set flags.
    pub const MODE_8BIT: u8 = 0x10;
    pub const MODE_4BIT: u8 = 0x00;
    pub const LINES_2: u8 = 0x08;
    pub const LINES_1: u8 = 0x00;
    pub const DOTS_5X8: u8 = 0x00;

    /// DDRAM address of the first cell of each row. (Note 1)
    pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

    /// Longest DDRAM line, in characters.
    pub const MAX_COLUMNS: u8 = 40;
    pub const MAX_LINES: u8 = ROW_OFFSETS.len() as u8;
    pub const NUM_GLYPH_SLOTS: u8 = 8;
    pub const GLYPH_ROWS: usize = 8;
}

use self::consts::*;

/// Direction of a display shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Move the displayed text one column to the left.
    Left,
    /// Move the displayed text one column to the right.
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write spaces to all of DDRAM and return the cursor home. Takes a long time to execute,
    /// with no completion signal on a write-only bus.
    ClearDisplay,
    /// Return the cursor to address 0 and undo any display shift. Also slow.
    ReturnHome,
    /// Set the cursor move direction and whether the display shifts on each write, from
    /// `ENTRY_*` flags.
    EntryModeSet(u8),
    /// Turn the display, cursor and cursor blink on or off, from `DISPLAY_ON`, `CURSOR_ON` and
    /// `BLINK_ON` flags.
    DisplayControl(u8),
    /// Shift the whole display one column without changing DDRAM contents.
    ShiftDisplay(ScrollDirection),
    /// Set bus width, line count and font, from `MODE_*`, `LINES_*` and `DOTS_*` flags.
    FunctionSet(u8),
    /// Set the character generator RAM address. Range is 0-63; subsequent data writes fill
    /// glyph rows and auto-increment.
    SetCgramAddress(u8),
    /// Set the display RAM address. Range is 0-127. (Note 1)
    SetDdramAddress(u8),
}

impl Command {
    /// The instruction byte for this command. Arguments are masked to the width of their field.
    pub fn encode(self) -> u8 {
        match self {
            Command::ClearDisplay => CLEAR_DISPLAY,
            Command::ReturnHome => RETURN_HOME,
            Command::EntryModeSet(flags) => ENTRY_MODE_SET | (flags & 0x03),
            Command::DisplayControl(flags) => DISPLAY_CONTROL | (flags & 0x07),
            Command::ShiftDisplay(direction) => {
                let dir = match direction {
                    ScrollDirection::Left => MOVE_LEFT,
                    ScrollDirection::Right => MOVE_RIGHT,
                };
                CURSOR_SHIFT | DISPLAY_MOVE | dir
            }
            Command::FunctionSet(flags) => FUNCTION_SET | (flags & 0x1F),
            Command::SetCgramAddress(addr) => SET_CGRAM_ADDR | (addr & 0x3F),
            Command::SetDdramAddress(addr) => SET_DDRAM_ADDR | (addr & 0x7F),
        }
    }

    pub fn send<PI, D>(self, bus: &mut FourBitBus<PI, D>) -> Result<(), PI::Error>
    where
        PI: PinInterface,
        D: DelayMs<u8> + DelayUs<u16>,
    {
        let cmd = self.encode();
        log::trace!("command {:#04x}", cmd);
        bus.write_command(cmd)
    }
}
