//! Defines how the LCD, LED, backlight and buttons are wired to the expander, and the
//! construction-time configuration of a `Display`.

use crate::interface::Pin;

/// Which expander pin serves each role. `PinMap::default()` is the wiring of the RGB character
/// LCD shield: the LCD bus on port B, the LED split across both ports, buttons on A0-A4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// LCD register select (HIGH = character data, LOW = command).
    pub rs: Pin,
    /// LCD read/write select, held LOW since the driver only writes.
    pub rw: Pin,
    /// LCD enable strobe.
    pub enable: Pin,
    pub d4: Pin,
    pub d5: Pin,
    pub d6: Pin,
    pub d7: Pin,
    pub red: Pin,
    pub green: Pin,
    pub blue: Pin,
    pub backlight: Pin,
    pub left: Pin,
    pub up: Pin,
    pub down: Pin,
    pub right: Pin,
    pub select: Pin,
}

impl Default for PinMap {
    fn default() -> Self {
        PinMap {
            rs: Pin::B7,
            rw: Pin::B6,
            enable: Pin::B5,
            d4: Pin::B4,
            d5: Pin::B3,
            d6: Pin::B2,
            d7: Pin::B1,
            red: Pin::A6,
            green: Pin::A7,
            blue: Pin::B0,
            backlight: Pin::A5,
            left: Pin::A4,
            up: Pin::A3,
            down: Pin::A2,
            right: Pin::A1,
            select: Pin::A0,
        }
    }
}

impl PinMap {
    /// Pins driven as outputs: the LCD bus lines and the LED channels.
    pub(crate) fn outputs(&self) -> [Pin; 10] {
        [
            self.rs,
            self.enable,
            self.d4,
            self.d5,
            self.d6,
            self.d7,
            self.rw,
            self.red,
            self.green,
            self.blue,
        ]
    }

    /// Button pins, read as pulled-up inputs.
    pub(crate) fn buttons(&self) -> [Pin; 5] {
        [self.left, self.up, self.down, self.right, self.select]
    }
}

/// A configuration for the display. The geometry is mandatory and given to the constructor; the
/// wiring and initial backlight state can be changed with the builder methods.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    pub(crate) columns: u8,
    pub(crate) lines: u8,
    pub(crate) pins: PinMap,
    pub(crate) backlight: bool,
}

impl Config {
    /// Create a new configuration for a display of `columns` characters by `lines` rows, wired
    /// as `PinMap::default()` with the backlight on.
    pub fn new(columns: u8, lines: u8) -> Self {
        Config {
            columns: columns,
            lines: lines,
            pins: PinMap::default(),
            backlight: true,
        }
    }

    /// Extend this `Config` to use a different expander wiring.
    pub fn pins(self, pins: PinMap) -> Self {
        Self { pins, ..self }
    }

    /// Extend this `Config` to choose whether the backlight is on once construction finishes.
    pub fn backlight(self, on: bool) -> Self {
        Self {
            backlight: on,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wiring_has_no_shared_pins() {
        let map = PinMap::default();
        let mut all = std::vec::Vec::new();
        all.extend_from_slice(&map.outputs());
        all.extend_from_slice(&map.buttons());
        all.push(map.backlight);
        let mut indices: std::vec::Vec<u8> = all.iter().map(|p| p.index()).collect();
        indices.sort();
        indices.dedup();
        assert_eq!(indices.len(), 16);
    }

    #[test]
    fn builder() {
        let pins = PinMap {
            select: Pin::B0,
            blue: Pin::A0,
            ..PinMap::default()
        };
        let cfg = Config::new(20, 4).pins(pins).backlight(false);
        assert_eq!(cfg.columns, 20);
        assert_eq!(cfg.lines, 4);
        assert_eq!(cfg.pins.select, Pin::B0);
        assert!(!cfg.backlight);

        let cfg = Config::new(16, 2);
        assert_eq!(cfg.pins, PinMap::default());
        assert!(cfg.backlight);
    }
}
