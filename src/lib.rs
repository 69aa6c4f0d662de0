//! Driver library for HD44780-compatible character LCDs wired to a GPIO expander, along with the
//! RGB LED, backlight and buttons that share the expander on RGB LCD shields.
//!
//! The driver does not talk to the expander's bus itself. It drives named expander pins through
//! a `PinInterface` supplied by an expander driver, and uses an embedded-hal delay provider for
//! all bus timing.
//!
//! ```ignore
//! let mut lcd = charlcd_rgb::Display::new(expander, delay, charlcd_rgb::Config::new(16, 2))?;
//! lcd.set_color_from_packed(0x00FF00)?;
//! lcd.render_message("Hello\nWorld")?;
//! if lcd.select_button() {
//!     lcd.clear()?;
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate core;

extern crate embedded_hal as hal;

pub mod bus;
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod interface;

// Re-exports for primary API.
pub use command::{consts, ScrollDirection};
pub use config::{Config, PinMap};
pub use display::button::Button;
pub use display::led::Color;
pub use display::{Direction, Display};
pub use error::Error;
pub use interface::{Pin, PinInterface, PinMode, PinState, UnknownPin};
