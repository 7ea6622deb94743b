//! Index/data access to the Super I/O configuration space.

use crate::error::Result;
use crate::port::PortIo;
use log::trace;

/// Returns `value` with `bit` set or cleared and every other bit unchanged.
#[inline]
pub(crate) fn with_bit(value: u8, bit: u8, set: bool) -> u8 {
    if set {
        value | (1 << bit)
    } else {
        value & !(1 << bit)
    }
}

/// The two-register indirect addressing convention of the chip: a register
/// number is written to the index port, then its value is transferred
/// through the data port.
#[derive(Debug)]
pub struct SuperIo<P> {
    io: P,
    index_port: u16,
    data_port: u16,
}

impl<P: PortIo> SuperIo<P> {
    pub fn new(io: P, index_port: u16, data_port: u16) -> Self {
        Self {
            io,
            index_port,
            data_port,
        }
    }

    /// Reads configuration register `index`.
    pub fn read_register(&mut self, index: u8) -> Result<u8> {
        self.io.write_port(self.index_port, index)?;
        let value = self.io.read_port(self.data_port)?;
        trace!("SIO read reg 0x{:02X} = 0x{:02X}", index, value);
        Ok(value)
    }

    /// Writes `value` to configuration register `index`.
    pub fn write_register(&mut self, index: u8, value: u8) -> Result<()> {
        trace!("SIO write reg 0x{:02X} = 0x{:02X}", index, value);
        self.io.write_port(self.index_port, index)?;
        self.io.write_port(self.data_port, value)
    }

    /// Read-modify-write of a single bit of register `index`.
    /// Returns the byte that was written back.
    pub fn update_bit(&mut self, index: u8, bit: u8, set: bool) -> Result<u8> {
        let current = self.read_register(index)?;
        let new_val = with_bit(current, bit, set);
        self.write_register(index, new_val)?;
        Ok(new_val)
    }

    /// The index port this instance addresses.
    pub fn index_port(&self) -> u16 {
        self.index_port
    }

    /// Borrows the underlying port primitive.
    pub fn io(&self) -> &P {
        &self.io
    }

    /// Mutably borrows the underlying port primitive for direct port access.
    pub fn io_mut(&mut self) -> &mut P {
        &mut self.io
    }

    /// Consumes the protocol wrapper, returning the port primitive.
    pub fn into_inner(self) -> P {
        self.io
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_bit_sets_and_clears_only_target() {
        for value in 0..=u8::MAX {
            for bit in 0..8 {
                let set = with_bit(value, bit, true);
                let cleared = with_bit(value, bit, false);
                assert_eq!(set & !(1 << bit), value & !(1 << bit));
                assert_eq!(cleared & !(1 << bit), value & !(1 << bit));
                assert_ne!(set & (1 << bit), 0);
                assert_eq!(cleared & (1 << bit), 0);
            }
        }
    }
}
