//! The main API to the display driver. `Display` keeps the authoritative copy of the controller's
//! settings, since the controller cannot be read back, and turns cursor, control and text
//! operations into instruction and data writes on the 4-bit bus.

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
pub mod testing {
    macro_rules! send {
        ([$d:expr]) => {
            Sent::Data($d)
        };
        ($c:expr) => {
            Sent::Cmd($c)
        };
    }
    macro_rules! sends {
        ($($e:tt),*) => {&[$(send!($e),)*]};
    }

    use super::Display;
    use crate::config::Config;
    use crate::interface::test_spy::TestSpyInterface;

    pub type SpyDisplay = Display<TestSpyInterface, TestSpyInterface>;

    /// A constructed display on a spy, with the construction traffic already cleared.
    pub fn display(columns: u8, lines: u8) -> (TestSpyInterface, SpyDisplay) {
        let di = TestSpyInterface::new();
        let disp = Display::new(di.split(), di.delay(), Config::new(columns, lines)).unwrap();
        di.clear();
        (di, disp)
    }
}

pub mod backlight;
pub mod button;
pub mod led;
pub mod message;

use core::fmt::Debug;

use hal::blocking::delay::{DelayMs, DelayUs};

use crate::bus::FourBitBus;
use crate::command::consts::*;
use crate::command::{Command, ScrollDirection};
use crate::config::Config;
use crate::error::Error;
use crate::interface::{PinInterface, PinMode};

use self::led::Color;

/// Clear and home have no completion signal; this covers their worst-case execution time.
const SLOW_COMMAND_MS: u8 = 3;

/// Direction the cursor advances after each character, and the side of the display messages
/// start from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    LeftToRight,
    RightToLeft,
}

impl<E: Debug> Error<E> {
    /// Reclassify a transport failure that happened before the display finished construction.
    fn during_construction(self) -> Self {
        match self {
            Error::Transport(e) => Error::Construction(e),
            other => other,
        }
    }
}

/// A driver for an HD44780-compatible character LCD, with the RGB LED, backlight and buttons
/// that share its expander.
pub struct Display<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    bus: FourBitBus<PI, D>,
    columns: u8,
    lines: u8,
    row: u8,
    column: u8,
    display_control: u8,
    display_mode: u8,
    display_function: u8,
    direction: Direction,
    column_align: bool,
    color: Color,
    backlight: bool,
}

impl<PI, D> Display<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    /// Construct a display driver on the expander pins behind `iface`, using `delay` for all bus
    /// timing, and run the controller's power-on initialization.
    ///
    /// The geometry in `config` must be addressable by the controller: 1 to 4 lines of 1 to 40
    /// columns. Any pin failure before the display is ready is reported as
    /// `Error::Construction`.
    pub fn new(iface: PI, delay: D, config: Config) -> Result<Self, Error<PI::Error>> {
        if false
            || config.columns == 0
            || config.columns > MAX_COLUMNS
            || config.lines == 0
            || config.lines > MAX_LINES
        {
            return Err(Error::UnsupportedGeometry {
                columns: config.columns,
                lines: config.lines,
            });
        }
        log::debug!(
            "character display {}x{}, {:?}",
            config.columns,
            config.lines,
            config.pins
        );

        let mut display = Display {
            bus: FourBitBus::new(iface, delay, config.pins),
            columns: config.columns,
            lines: config.lines,
            row: 0,
            column: 0,
            display_control: 0,
            display_mode: 0,
            display_function: 0,
            direction: Direction::LeftToRight,
            column_align: false,
            color: Color::default(),
            backlight: false,
        };
        display.setup_pins().map_err(Error::Construction)?;
        display.init().map_err(Error::during_construction)?;
        display
            .set_backlight(config.backlight)
            .map_err(Error::during_construction)?;
        Ok(display)
    }

    fn setup_pins(&mut self) -> Result<(), PI::Error> {
        let pins = *self.bus.pins();
        for &pin in pins.outputs().iter() {
            self.bus.configure(pin, PinMode::Output)?;
        }
        for &pin in pins.buttons().iter() {
            self.bus.configure(pin, PinMode::Input)?;
        }
        for &pin in pins.buttons().iter() {
            self.bus.configure(pin, PinMode::PullUp)?;
        }
        Ok(())
    }

    /// Bring the controller up in 4-bit mode and put the driver state in step with it.
    fn init(&mut self) -> Result<(), Error<PI::Error>> {
        log::debug!("initializing controller");
        self.bus.handshake().map_err(Error::Transport)?;

        self.display_control = DISPLAY_ON | CURSOR_OFF | BLINK_OFF;
        self.display_function = MODE_4BIT | LINES_1 | LINES_2 | DOTS_5X8;
        self.display_mode = ENTRY_LEFT | ENTRY_SHIFT_DECREMENT;
        self.command(Command::DisplayControl(self.display_control))?;
        self.command(Command::FunctionSet(self.display_function))?;
        self.command(Command::EntryModeSet(self.display_mode))?;
        self.clear()?;

        self.row = 0;
        self.column = 0;
        self.column_align = false;
        self.direction = Direction::LeftToRight;

        self.set_color(0, 0, 0)
    }

    fn command(&mut self, cmd: Command) -> Result<(), Error<PI::Error>> {
        cmd.send(&mut self.bus).map_err(Error::Transport)
    }

    /// Clear the display and return the controller's cursor home.
    pub fn clear(&mut self) -> Result<(), Error<PI::Error>> {
        self.command(Command::ClearDisplay)?;
        self.bus.delay_ms(SLOW_COMMAND_MS);
        Ok(())
    }

    /// Return the controller's cursor home and undo any scrolling.
    pub fn home(&mut self) -> Result<(), Error<PI::Error>> {
        self.command(Command::ReturnHome)?;
        self.bus.delay_ms(SLOW_COMMAND_MS);
        Ok(())
    }

    /// Move the cursor. Positions past the last column or line are clamped to it.
    pub fn set_cursor_position(&mut self, column: u8, row: u8) -> Result<(), Error<PI::Error>> {
        let row = row.min(self.lines - 1);
        let column = column.min(self.columns - 1);
        self.command(Command::SetDdramAddress(column + ROW_OFFSETS[row as usize]))?;
        self.row = row;
        self.column = column;
        Ok(())
    }

    fn update_control(&mut self, flag: u8, on: bool) -> Result<(), Error<PI::Error>> {
        if on {
            self.display_control |= flag;
        } else {
            self.display_control &= !flag;
        }
        self.command(Command::DisplayControl(self.display_control))
    }

    /// Show or hide the underline cursor.
    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<(), Error<PI::Error>> {
        self.update_control(CURSOR_ON, visible)
    }

    /// Enable or disable the blinking block cursor.
    pub fn set_blink(&mut self, blink: bool) -> Result<(), Error<PI::Error>> {
        self.update_control(BLINK_ON, blink)
    }

    /// Turn the display on or off. DDRAM contents are kept while it is off.
    pub fn set_display_enabled(&mut self, enabled: bool) -> Result<(), Error<PI::Error>> {
        self.update_control(DISPLAY_ON, enabled)
    }

    /// Shift the displayed text one column. The cursor tracking is unaffected since DDRAM
    /// addressing does not move with the display.
    pub fn scroll(&mut self, direction: ScrollDirection) -> Result<(), Error<PI::Error>> {
        self.command(Command::ShiftDisplay(direction))
    }

    pub fn scroll_left(&mut self) -> Result<(), Error<PI::Error>> {
        self.scroll(ScrollDirection::Left)
    }

    pub fn scroll_right(&mut self) -> Result<(), Error<PI::Error>> {
        self.scroll(ScrollDirection::Right)
    }

    /// Set which way the cursor advances after each character. This also decides which side of
    /// the display `render_message` starts lines from.
    pub fn set_text_direction(&mut self, direction: Direction) -> Result<(), Error<PI::Error>> {
        self.direction = direction;
        match direction {
            Direction::LeftToRight => self.display_mode |= ENTRY_LEFT,
            Direction::RightToLeft => self.display_mode &= !ENTRY_LEFT,
        }
        self.command(Command::EntryModeSet(self.display_mode))
    }

    /// When enabled, a newline in a rendered message continues at the current column instead of
    /// the start of the next line.
    pub fn set_column_alignment(&mut self, enabled: bool) {
        self.column_align = enabled;
    }

    /// Store an 8-row glyph bitmap in one of the eight CGRAM slots. Only the low 5 bits of each
    /// row are displayed. The glyph is then printed by rendering the character with code `slot`.
    pub fn define_custom_glyph(
        &mut self,
        slot: u8,
        pattern: &[u8; GLYPH_ROWS],
    ) -> Result<(), Error<PI::Error>> {
        let slot = slot & (NUM_GLYPH_SLOTS - 1);
        self.command(Command::SetCgramAddress(slot << 3))?;
        for &row in pattern.iter() {
            self.bus.write_data(row).map_err(Error::Transport)?;
        }
        Ok(())
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn lines(&self) -> u8 {
        self.lines
    }

    /// The tracked `(column, row)` the next message starts from.
    pub fn cursor_position(&self) -> (u8, u8) {
        (self.column, self.row)
    }

    pub fn text_direction(&self) -> Direction {
        self.direction
    }

    pub fn column_alignment(&self) -> bool {
        self.column_align
    }

    /// Destroy the driver and give back the pin interface and delay provider.
    pub fn release(self) -> (PI, D) {
        self.bus.release()
    }
}
