//! The pin-level interface to the GPIO expander which the LCD, LED, backlight and buttons hang
//! off. The driver never talks to the expander's bus directly; it only configures, drives and
//! reads named pins through `PinInterface`, which a lower-level expander driver provides.

use core::fmt;
use core::str::FromStr;

pub use hal::digital::v2::PinState;

/// One of the sixteen I/O lines of a two-port expander, named by port and bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    B0,
    B1,
    B2,
    B3,
    B4,
    B5,
    B6,
    B7,
}

impl Pin {
    const ALL: [Pin; 16] = [
        Pin::A0,
        Pin::A1,
        Pin::A2,
        Pin::A3,
        Pin::A4,
        Pin::A5,
        Pin::A6,
        Pin::A7,
        Pin::B0,
        Pin::B1,
        Pin::B2,
        Pin::B3,
        Pin::B4,
        Pin::B5,
        Pin::B6,
        Pin::B7,
    ];

    /// Pin number across both ports: A0-A7 are 0-7, B0-B7 are 8-15.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// The pin with the given number across both ports, if any.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// The port letter, `'A'` or `'B'`.
    pub fn port(self) -> char {
        if self.index() < 8 {
            'A'
        } else {
            'B'
        }
    }

    /// The bit within the pin's port.
    pub fn bit(self) -> u8 {
        self.index() % 8
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.port(), self.bit())
    }
}

/// A pin name that does not match any expander pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("unknown expander pin name")]
pub struct UnknownPin;

impl FromStr for Pin {
    type Err = UnknownPin;

    /// Parse a pin name such as `"A4"` or `"b1"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(UnknownPin);
        }
        let base = match bytes[0] {
            b'A' | b'a' => 0,
            b'B' | b'b' => 8,
            _ => return Err(UnknownPin),
        };
        match bytes[1] {
            b'0'..=b'7' => Pin::from_index(base + (bytes[1] - b'0')).ok_or(UnknownPin),
            _ => Err(UnknownPin),
        }
    }
}

/// Electrical configuration of a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Push-pull output.
    Output,
    /// High-impedance input.
    Input,
    /// Enable the internal pull-up on an input.
    PullUp,
}

/// Access to the expander's pins. Implemented by whatever drives the expander chip over its bus;
/// a failed bus transaction is reported through `Error`.
pub trait PinInterface {
    type Error: fmt::Debug;

    fn configure_pin(&mut self, pin: Pin, mode: PinMode) -> Result<(), Self::Error>;
    fn set_pin_level(&mut self, pin: Pin, level: PinState) -> Result<(), Self::Error>;
    fn read_pin_level(&mut self, pin: Pin) -> Result<PinState, Self::Error>;
}

#[cfg(test)]
pub mod test_spy {
    //! A pin interface and delay provider for use in unit tests to spy on whatever was done to
    //! the pins. Nibbles latched by the enable strobe are decoded into the bytes the controller
    //! would have received.

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::vec::Vec;

    use hal::blocking::delay::{DelayMs, DelayUs};

    use super::{Pin, PinInterface, PinMode, PinState};
    use crate::config::PinMap;

    /// A single recorded operation.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Op {
        Configure(Pin, PinMode),
        Set(Pin, PinState),
        Read(Pin),
        DelayUs(u16),
        DelayMs(u8),
    }

    /// A byte as seen by the controller, reassembled from two latched nibbles.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Sent {
        Cmd(u8),
        Data(u8),
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct SpyError;

    #[derive(Default)]
    struct State {
        ops: Vec<Op>,
        latched: Vec<(bool, u8)>,
        levels: HashMap<Pin, PinState>,
        modes: HashMap<Pin, PinMode>,
        inputs: HashMap<Pin, PinState>,
        fail_reads: bool,
        fail_writes: bool,
    }

    /// Cloning a spy (or calling `split`) yields a handle onto the same recording, so a test can
    /// keep one handle while the driver owns another.
    #[derive(Clone)]
    pub struct TestSpyInterface {
        pins: PinMap,
        state: Rc<RefCell<State>>,
    }

    impl TestSpyInterface {
        pub fn new() -> Self {
            TestSpyInterface {
                pins: PinMap::default(),
                state: Rc::new(RefCell::new(State::default())),
            }
        }

        pub fn split(&self) -> Self {
            self.clone()
        }

        /// A delay provider recording into the same operation log.
        pub fn delay(&self) -> Self {
            self.clone()
        }

        pub fn ops(&self) -> Vec<Op> {
            self.state.borrow().ops.clone()
        }

        /// Nibbles latched by a falling enable edge, with the RS level at the time.
        pub fn nibbles(&self) -> Vec<(bool, u8)> {
            self.state.borrow().latched.clone()
        }

        /// Latched nibbles paired up, upper nibble first, into command and data bytes.
        pub fn sent(&self) -> Vec<Sent> {
            let latched = self.nibbles();
            assert_eq!(latched.len() % 2, 0, "odd number of nibbles latched");
            latched
                .chunks(2)
                .map(|pair| {
                    let byte = pair[0].1 << 4 | pair[1].1;
                    if pair[0].0 {
                        Sent::Data(byte)
                    } else {
                        Sent::Cmd(byte)
                    }
                })
                .collect()
        }

        pub fn check_multi(&self, expected: &[Sent]) {
            assert_eq!(&self.sent()[..], expected);
        }

        pub fn level(&self, pin: Pin) -> Option<PinState> {
            self.state.borrow().levels.get(&pin).copied()
        }

        pub fn mode(&self, pin: Pin) -> Option<PinMode> {
            self.state.borrow().modes.get(&pin).copied()
        }

        /// Level returned when the driver reads `pin`. Unset inputs read HIGH, as with a pull-up.
        pub fn set_input(&self, pin: Pin, level: PinState) {
            self.state.borrow_mut().inputs.insert(pin, level);
        }

        pub fn fail_reads(&self, fail: bool) {
            self.state.borrow_mut().fail_reads = fail;
        }

        pub fn fail_writes(&self, fail: bool) {
            self.state.borrow_mut().fail_writes = fail;
        }

        /// Forget recorded operations and latched nibbles, keeping pin levels.
        pub fn clear(&self) {
            let mut state = self.state.borrow_mut();
            state.ops.clear();
            state.latched.clear();
        }
    }

    impl PinInterface for TestSpyInterface {
        type Error = SpyError;

        fn configure_pin(&mut self, pin: Pin, mode: PinMode) -> Result<(), SpyError> {
            let mut state = self.state.borrow_mut();
            if state.fail_writes {
                return Err(SpyError);
            }
            state.ops.push(Op::Configure(pin, mode));
            state.modes.insert(pin, mode);
            Ok(())
        }

        fn set_pin_level(&mut self, pin: Pin, level: PinState) -> Result<(), SpyError> {
            let mut state = self.state.borrow_mut();
            if state.fail_writes {
                return Err(SpyError);
            }
            state.ops.push(Op::Set(pin, level));
            let previous = state.levels.insert(pin, level);
            if pin == self.pins.enable
                && previous == Some(PinState::High)
                && level == PinState::Low
            {
                let high = |pin: Pin| state.levels.get(&pin) == Some(&PinState::High);
                let mut nibble = 0u8;
                for (weight, pin) in [self.pins.d4, self.pins.d5, self.pins.d6, self.pins.d7]
                    .iter()
                    .enumerate()
                {
                    if high(*pin) {
                        nibble |= 1u8 << weight;
                    }
                }
                let rs = high(self.pins.rs);
                state.latched.push((rs, nibble));
            }
            Ok(())
        }

        fn read_pin_level(&mut self, pin: Pin) -> Result<PinState, SpyError> {
            let mut state = self.state.borrow_mut();
            state.ops.push(Op::Read(pin));
            if state.fail_reads {
                return Err(SpyError);
            }
            Ok(state.inputs.get(&pin).copied().unwrap_or(PinState::High))
        }
    }

    impl DelayUs<u16> for TestSpyInterface {
        fn delay_us(&mut self, us: u16) {
            self.state.borrow_mut().ops.push(Op::DelayUs(us));
        }
    }

    impl DelayMs<u8> for TestSpyInterface {
        fn delay_ms(&mut self, ms: u8) {
            self.state.borrow_mut().ops.push(Op::DelayMs(ms));
        }
    }
}
