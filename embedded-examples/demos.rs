//! Demo routines for an RGB character LCD shield, for any expander driver implementing
//! `PinInterface` and any embedded-hal delay provider. Call them from a board's `main` after
//! constructing the display, e.g.
//!
//! ```ignore
//! let mut lcd = Display::new(expander, delay, Config::new(16, 2)).unwrap();
//! demos::message(&mut lcd, &mut timer).unwrap();
//! ```

#![no_std]

extern crate charlcd_rgb as lcd;
extern crate embedded_hal as hal_api;

use hal_api::blocking::delay::{DelayMs, DelayUs};
use lcd::{Display, Error, PinInterface};

type Result<PI> = core::result::Result<(), Error<<PI as PinInterface>::Error>>;

/// Plain text, two lines, an offset start and a scroll.
pub fn message<PI, D, T>(lcd: &mut Display<PI, D>, timer: &mut T) -> Result<PI>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
    T: DelayMs<u16>,
{
    lcd.render_message("Hello, World!")?;
    timer.delay_ms(2000);

    lcd.clear()?;
    lcd.render_message("Line 1\nLine 2")?;
    timer.delay_ms(2000);

    lcd.clear()?;
    lcd.set_cursor_position(5, 0)?;
    lcd.render_message("Position")?;
    timer.delay_ms(2000);

    lcd.clear()?;
    lcd.render_message("Scrolling text")?;
    timer.delay_ms(1000);
    for _ in 0..5 {
        lcd.scroll_left()?;
        timer.delay_ms(500);
    }
    lcd.clear()
}

/// A checkmark glyph in slot 0, printed on both sides of a word.
pub fn custom_glyph<PI, D>(lcd: &mut Display<PI, D>) -> Result<PI>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    let checkmark = [0x00, 0x00, 0x01, 0x03, 0x16, 0x1C, 0x08, 0x00];
    lcd.define_custom_glyph(0, &checkmark)?;
    lcd.clear()?;
    lcd.render_message("\x00 Success \x00")
}

/// Step the LED through its eight reachable colors.
pub fn colors<PI, D, T>(lcd: &mut Display<PI, D>, timer: &mut T) -> Result<PI>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
    T: DelayMs<u16>,
{
    let steps: [(u32, &str); 8] = [
        (0xFF0000, "Red"),
        (0x00FF00, "Green"),
        (0x0000FF, "Blue"),
        (0xFFFF00, "Yellow"),
        (0x00FFFF, "Cyan"),
        (0xFF00FF, "Magenta"),
        (0xFFFFFF, "White"),
        (0x000000, "Off"),
    ];
    for &(packed, name) in steps.iter() {
        lcd.clear()?;
        lcd.set_color_from_packed(packed)?;
        lcd.render_message(name)?;
        timer.delay_ms(1000);
    }
    Ok(())
}

/// Show the name of whichever button is held, with a crude debounce.
pub fn buttons<PI, D, T>(lcd: &mut Display<PI, D>, timer: &mut T) -> Result<PI>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
    T: DelayMs<u16>,
{
    loop {
        let name = if lcd.left_button() {
            "Left"
        } else if lcd.up_button() {
            "Up"
        } else if lcd.down_button() {
            "Down"
        } else if lcd.right_button() {
            "Right"
        } else if lcd.select_button() {
            "Select"
        } else {
            timer.delay_ms(10);
            continue;
        };
        lcd.clear()?;
        lcd.render_message(name)?;
        timer.delay_ms(200);
    }
}
