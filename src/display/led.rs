//! The RGB LED. Its channels are wired common-anode to plain expander outputs, so each channel is
//! either fully on (pin LOW) or off (pin HIGH); the 0-100 levels are kept for reference only.

use hal::blocking::delay::{DelayMs, DelayUs};

use crate::display::Display;
use crate::error::Error;
use crate::interface::{PinInterface, PinState};

/// An LED color, each channel on a 0-100 scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    /// Split a `0xRRGGBB` value into channels, rescaling each from 0-255 to 0-100 (truncating).
    /// Returns `None` if any bit above the low 24 is set.
    pub fn from_packed(value: u32) -> Option<Self> {
        if value >> 24 != 0 {
            return None;
        }
        let scale = |byte: u32| ((byte & 0xFF) * 100 / 255) as u8;
        Some(Color {
            red: scale(value >> 16),
            green: scale(value >> 8),
            blue: scale(value),
        })
    }
}

/// Pin level for a channel value: anything above 1 lights the channel.
fn channel_level(value: u8) -> PinState {
    if value > 1 {
        PinState::Low
    } else {
        PinState::High
    }
}

impl<PI, D> Display<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    /// Set the LED color, each channel 0-100. The hardware cannot dim: a channel is on for any
    /// value above 1 and off otherwise.
    pub fn set_color(&mut self, red: u8, green: u8, blue: u8) -> Result<(), Error<PI::Error>> {
        self.color = Color::new(red, green, blue);
        let pins = *self.bus.pins();
        for &(pin, value) in [(pins.red, red), (pins.green, green), (pins.blue, blue)].iter() {
            self.bus
                .set(pin, channel_level(value))
                .map_err(Error::Transport)?;
        }
        Ok(())
    }

    /// Set the LED color from a packed `0xRRGGBB` value. See `Color::from_packed`.
    pub fn set_color_from_packed(&mut self, value: u32) -> Result<(), Error<PI::Error>> {
        let color = Color::from_packed(value).ok_or(Error::InvalidColorValue(value))?;
        self.set_color(color.red, color.green, color.blue)
    }

    /// The last color set, on the 0-100 scale it was given in.
    pub fn color(&self) -> Color {
        self.color
    }
}
