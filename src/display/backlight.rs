//! Backlight control. The backlight transistor is switched by the pin's direction, not its level:
//! as an output the pin drives the transistor on, as an input it floats and the backlight goes
//! dark.

use hal::blocking::delay::{DelayMs, DelayUs};

use crate::display::Display;
use crate::error::Error;
use crate::interface::{PinInterface, PinMode};

impl<PI, D> Display<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    /// Turn the backlight on or off.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), Error<PI::Error>> {
        let pin = self.bus.pins().backlight;
        let mode = if on { PinMode::Output } else { PinMode::Input };
        self.bus.configure(pin, mode).map_err(Error::Transport)?;
        self.backlight = on;
        log::info!("backlight {}", if on { "on" } else { "off" });
        Ok(())
    }

    /// Whether the backlight was last turned on.
    pub fn backlight(&self) -> bool {
        self.backlight
    }
}

#[cfg(test)]
mod tests {
    use crate::display::testing::display;
    use crate::error::Error;
    use crate::interface::test_spy::{Op, SpyError};
    use crate::interface::{Pin, PinMode};

    #[test]
    fn direction_flip() {
        let (di, mut disp) = display(16, 2);
        disp.set_backlight(false).unwrap();
        assert!(!disp.backlight());
        disp.set_backlight(true).unwrap();
        assert!(disp.backlight());
        assert_eq!(
            di.ops(),
            &[
                Op::Configure(Pin::A5, PinMode::Input),
                Op::Configure(Pin::A5, PinMode::Output),
            ]
        );
        assert_eq!(di.level(Pin::A5), None);
    }

    #[test]
    fn failure_keeps_state() {
        let (di, mut disp) = display(16, 2);
        di.fail_writes(true);
        assert_eq!(disp.set_backlight(false), Err(Error::Transport(SpyError)));
        assert!(disp.backlight());
    }
}
