//! The 4-bit parallel bus between the expander and the LCD controller. Each byte goes over the
//! D4-D7 lines as two nibbles, upper nibble first, each latched by a strobe of the enable line.
//! RW is held LOW: the controller is never read, so every wait is a fixed delay rather than a
//! busy-flag poll.

use hal::blocking::delay::{DelayMs, DelayUs};

use crate::config::PinMap;
use crate::interface::{Pin, PinInterface, PinMode, PinState};

/// Enable must be held at each level for at least this long.
const ENABLE_PULSE_US: u16 = 1;
/// Most instructions take >37us to execute after the falling enable edge.
const COMMAND_SETTLE_US: u16 = 100;
/// Settle time after power-up before the controller accepts anything.
const POWER_ON_MS: u8 = 50;
/// Waits after each of the three 8-bit function-set nibbles of the reset handshake.
const HANDSHAKE_MS: [u8; 3] = [5, 5, 1];
const FOUR_BIT_MODE_MS: u8 = 1;

/// Level of a data line for bit `mask` of `value`.
fn level(value: u8, mask: u8) -> PinState {
    if value & mask != 0 {
        PinState::High
    } else {
        PinState::Low
    }
}

/// The controller's side of the expander: the pin interface, the delay provider, and the pins the
/// LCD bus is wired to.
pub struct FourBitBus<PI, D> {
    iface: PI,
    delay: D,
    pins: PinMap,
}

impl<PI, D> FourBitBus<PI, D>
where
    PI: PinInterface,
    D: DelayMs<u8> + DelayUs<u16>,
{
    pub fn new(iface: PI, delay: D, pins: PinMap) -> Self {
        FourBitBus { iface, delay, pins }
    }

    pub fn pins(&self) -> &PinMap {
        &self.pins
    }

    pub fn iface(&mut self) -> &mut PI {
        &mut self.iface
    }

    pub fn delay_ms(&mut self, ms: u8) {
        self.delay.delay_ms(ms);
    }

    pub fn set(&mut self, pin: Pin, level: PinState) -> Result<(), PI::Error> {
        self.iface.set_pin_level(pin, level)
    }

    pub fn configure(&mut self, pin: Pin, mode: PinMode) -> Result<(), PI::Error> {
        self.iface.configure_pin(pin, mode)
    }

    /// Run the power-on handshake that leaves the controller in 4-bit mode, whatever state an
    /// earlier, possibly interrupted, reset left it in.
    pub fn handshake(&mut self) -> Result<(), PI::Error> {
        self.delay.delay_ms(POWER_ON_MS);

        self.set(self.pins.rs, PinState::Low)?;
        self.set(self.pins.enable, PinState::Low)?;
        self.set(self.pins.rw, PinState::Low)?;

        // Three 8-bit function sets resynchronize the nibble phase.
        for &wait in HANDSHAKE_MS.iter() {
            self.write_nibble(0x3)?;
            self.delay.delay_ms(wait);
        }

        self.write_nibble(0x2)?;
        self.delay.delay_ms(FOUR_BIT_MODE_MS);
        Ok(())
    }

    /// Drive D4-D7 from the low four bits of `value` and latch them.
    pub fn write_nibble(&mut self, value: u8) -> Result<(), PI::Error> {
        let PinMap { d4, d5, d6, d7, .. } = self.pins;
        self.set(d4, level(value, 0x1))?;
        self.set(d5, level(value, 0x2))?;
        self.set(d6, level(value, 0x4))?;
        self.set(d7, level(value, 0x8))?;
        self.pulse_enable()
    }

    /// Strobe the enable line LOW-HIGH-LOW, then give the controller time to execute.
    pub fn pulse_enable(&mut self) -> Result<(), PI::Error> {
        let enable = self.pins.enable;
        self.set(enable, PinState::Low)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.set(enable, PinState::High)?;
        self.delay.delay_us(ENABLE_PULSE_US);
        self.set(enable, PinState::Low)?;
        self.delay.delay_us(COMMAND_SETTLE_US);
        Ok(())
    }

    /// Send an instruction byte, with RS LOW.
    pub fn write_command(&mut self, value: u8) -> Result<(), PI::Error> {
        self.write_byte(value, PinState::Low)
    }

    /// Send a character or glyph-row byte, with RS HIGH.
    pub fn write_data(&mut self, value: u8) -> Result<(), PI::Error> {
        self.write_byte(value, PinState::High)
    }

    fn write_byte(&mut self, value: u8, rs: PinState) -> Result<(), PI::Error> {
        self.set(self.pins.rs, rs)?;
        self.write_nibble(value >> 4)?;
        self.write_nibble(value & 0x0F)
    }

    /// Give back the pin interface and delay provider.
    pub fn release(self) -> (PI, D) {
        (self.iface, self.delay)
    }
}
