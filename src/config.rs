//! Chip access configuration.

use crate::consts;

/// Where the pin write path reads the current bank byte from before
/// modifying one bit and writing it to the bank's data-out register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatchSource {
    /// Read the data-out latch and write it back to the same offset.
    #[default]
    OutputLatch,
    /// Read the data-in register (live pin levels) and write the result to
    /// data-out. Reproduces the register sequence of the reverse-engineered
    /// driver; unverified against hardware.
    InputRegister,
}

/// Configuration for accessing a PC87366 GPIO block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipConfig {
    /// Index port of the Super I/O configuration space.
    pub index_port: u16,
    /// Data port of the Super I/O configuration space.
    pub data_port: u16,
    /// Signature the identity register must report.
    pub expected_id: u8,
    /// Source byte for pin write read-modify-write.
    pub latch_source: LatchSource,
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            index_port: consts::SIO_INDEX_PORT,
            data_port: consts::SIO_DATA_PORT,
            expected_id: consts::PC87366_SID,
            latch_source: LatchSource::OutputLatch,
        }
    }
}

impl ChipConfig {
    /// Default ports and identity, with the observed write path that reads
    /// the data-in register before writing data-out.
    pub fn observed() -> Self {
        Self {
            latch_source: LatchSource::InputRegister,
            ..Self::default()
        }
    }

    /// Same chip behind an alternate index/data port pair (e.g. 0x4E/0x4F).
    pub fn with_ports(index_port: u16, data_port: u16) -> Self {
        Self {
            index_port,
            data_port,
            ..Self::default()
        }
    }
}
