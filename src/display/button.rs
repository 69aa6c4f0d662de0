//! The five momentary buttons. They pull their pins LOW against the expander's pull-ups, and are
//! polled on demand: there is no debouncing and no edge detection.

use hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::PinMap;
use crate::display::Display;
use crate::interface::{Pin, PinInterface, PinState};

/// The role of a button on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Left,
    Up,
    Down,
    Right,
    Select,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Left,
        Button::Up,
        Button::Down,
        Button::Right,
        Button::Select,
    ];

    /// The pin this button is wired to under `pins`.
    pub fn pin(self, pins: &PinMap) -> Pin {
        match self {
            Button::Left => pins.left,
            Button::Up => pins.up,
            Button::Down => pins.down,
            Button::Right => pins.right,
            Button::Select => pins.select,
        }
    }
}

impl<PI, D> Display<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    /// Whether the button on `pin` is held down. A failed read counts as not pressed.
    pub fn is_button_pressed(&mut self, pin: Pin) -> bool {
        match self.bus.iface().read_pin_level(pin) {
            Ok(level) => level == PinState::Low,
            Err(e) => {
                log::warn!("failed to read button pin {}: {:?}", pin, e);
                false
            }
        }
    }

    /// Like `is_button_pressed`, for a pin given by name such as `"A4"`. An unknown name counts
    /// as not pressed.
    pub fn is_button_pressed_by_name(&mut self, name: &str) -> bool {
        match name.parse::<Pin>() {
            Ok(pin) => self.is_button_pressed(pin),
            Err(_) => {
                log::warn!("button pin {} not found", name);
                false
            }
        }
    }

    pub fn button(&mut self, button: Button) -> bool {
        let pin = button.pin(self.bus.pins());
        self.is_button_pressed(pin)
    }

    pub fn left_button(&mut self) -> bool {
        self.button(Button::Left)
    }

    pub fn up_button(&mut self) -> bool {
        self.button(Button::Up)
    }

    pub fn down_button(&mut self) -> bool {
        self.button(Button::Down)
    }

    pub fn right_button(&mut self) -> bool {
        self.button(Button::Right)
    }

    pub fn select_button(&mut self) -> bool {
        self.button(Button::Select)
    }
}
