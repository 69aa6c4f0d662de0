use core::fmt::Debug;

/// Errors reported by the display driver. `E` is the error type of the `PinInterface` the
/// display was built on.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E: Debug> {
    /// A pin operation failed while configuring the expander or initializing the controller.
    #[error("display construction failed: {0:?}")]
    Construction(E),
    /// A pin operation failed after construction.
    #[error("pin transport failed: {0:?}")]
    Transport(E),
    /// A packed color had bits set above the low 24.
    #[error("color value {0:#x} does not fit in 24 bits")]
    InvalidColorValue(u32),
    /// The geometry cannot be addressed by the controller.
    #[error("unsupported display geometry {columns}x{lines}")]
    UnsupportedGeometry { columns: u8, lines: u8 },
}
