use thiserror::Error;

/// Errors that can occur when driving the PC87366 GPIO block.
///
/// Each failure has its own variant; none of them doubles as a sentinel
/// for another condition.
#[derive(Error, Debug)]
pub enum Error {
    /// The identity register did not hold the expected signature.
    #[error("Super I/O chip not present: identity register reads 0x{found:02X}, expected 0x{expected:02X}")]
    ChipNotPresent {
        /// Value read from the identity register.
        found: u8,
        /// Signature the chip was expected to report.
        expected: u8,
    },
    /// A pin operation was attempted before the chip was initialized.
    #[error("GPIO block not initialized: run initialize() successfully first")]
    NotInitialized,
    /// The logical pin is not present in the pin map.
    #[error("Logical pin {0} is not mapped to a physical GPIO pin")]
    UnknownPin(u8),
    /// The underlying port primitive failed.
    #[error("I/O port access failed at 0x{port:04X}: {source}")]
    RegisterAccess {
        /// Port address being accessed.
        port: u16,
        /// Error reported by the platform.
        #[source]
        source: std::io::Error,
    },
    /// The GPIO block descriptor holds no usable base address.
    #[error("GPIO block base address 0x{0:04X} is unassigned or leaves no room for the data banks")]
    InvalidBaseAddress(u16),
    /// General I/O error, e.g. opening the port device.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Bit index outside the pin configuration fields (0-2).
    #[error("Configuration bit {0} out of range (0-2)")]
    InvalidConfigBit(u8),
    /// A textual command could not be parsed.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
}

/// Result type alias for PC87366 GPIO operations.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn invalid_command(input: &str, reason: &str) -> Error {
    Error::InvalidCommand(format!("'{}': {}", input.trim(), reason))
}
