//! # pc87366-gpio
//!
//! A Rust crate for configuring and driving the GPIO pins of a National
//! Semiconductor PC87366 Super I/O chip (as found on Soekris-class boards)
//! through the chip's x86 index/data port pair.
//!
//! Port access goes through the [`PortIo`] trait. On Linux, [`DevPort`]
//! uses `/dev/port`; [`sim::SimulatedChip`] stands in for the chip in tests.
//!
//! ## Features
//!
//! *   Chip probing and GPIO base-address resolution (`Pc87366::open`, `initialize`).
//! *   Fixed logical-to-physical pin map (`map_pin`, `LogicalPin`, `mapped_pins`).
//! *   Pin configuration, each a single-bit read-modify-write:
//!     *   Direction (`set_direction`).
//!     *   Output type, open-drain or push-pull (`set_drive`).
//!     *   Pull-up (`set_pull_up`).
//!     *   Read-back (`pin_config`).
//! *   Pin data: `read_pin` / `write_pin` across the three data banks.
//! *   Command front-end: `Command` parsed from `"i 6"`, `"o 6 1"`, `"c 6 p 1"`, ...
//!     and run with `execute`.
//! *   Opt-in safe state (`park_inputs`).
//!
//! ## Basic Usage
//!
//! ```no_run
//! use pc87366_gpio::{ChipConfig, DevPort, GpioDirection, GpioDrive, Pc87366, Result};
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     let mut chip = Pc87366::open(DevPort::open()?, ChipConfig::default())?;
//!     println!("GPIO base address: 0x{:04X}", chip.base_address().unwrap_or(0));
//!
//!     // Logical pin 4 is physical pin 33 (high bank)
//!     chip.set_direction(4, GpioDirection::Output)?;
//!     chip.set_drive(4, GpioDrive::PushPull)?;
//!     chip.write_pin(4, true)?;
//!     println!("Pin 4 reads {}", chip.read_pin(4)?);
//!
//!     chip.park_inputs()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pin Mapping
//!
//! | Logical | Physical | Bank |
//! |---------|----------|------|
//! | 3-10    | 32-39    | High |
//! | 12, 13  | 4, 5     | Low  |
//! | 15      | 19       | Mid  |
//! | 16      | 18       | Mid  |
//!
//! Any other logical pin fails with [`Error::UnknownPin`].
//!
//! ## Hardware Notes
//!
//! *   `/dev/port` needs `CAP_SYS_RAWIO` (run as root).
//! *   The write path's source byte is configurable ([`LatchSource`]): the
//!     default reads back the data-out latch; [`ChipConfig::observed`] reads
//!     the data-in register instead, which is what the reverse-engineered
//!     register layout was exercised with. Verify against your board.
//! *   Nothing is restored when a handle is dropped.
//!
//! ## Concurrency
//!
//! Every operation is a blocking sequence of port accesses. Methods take
//! `&mut self`; wrap the handle in a `Mutex` if several threads share the chip.

pub mod command;
pub mod config;
mod consts;
pub mod device;
mod error;
pub mod gpio;
pub mod port;
pub mod sim;
pub mod sio;

pub use command::{Action, Command, Outcome};
pub use config::{ChipConfig, LatchSource};
pub use device::{ChipState, Pc87366};
pub use error::{Error, Result};
pub use gpio::{
    map_pin, mapped_pins, ConfigField, DataBank, GpioDirection, GpioDrive, LogicalPin,
    PhysicalPin, PinConfig,
};
pub use port::{DevPort, PortIo};
// Re-export only essential public constants
pub use consts::{PC87366_SID, SIO_DATA_PORT, SIO_INDEX_PORT};
