//! A simulated PC87366 for exercising the driver without hardware.
//!
//! The simulation models the configuration space behind the index/data
//! pair, the per-pin configuration bytes behind the pin-select register,
//! and a 16-byte GPIO I/O block at the base address. Every port access is
//! recorded.

use crate::consts;
use crate::error::{Error, Result};
use crate::port::PortIo;
use log::trace;

const BLOCK_LEN: u16 = 16;
const PIN_SLOTS: usize = 64;
/// Value read from a port nothing decodes.
const FLOATING_BUS: u8 = 0xFF;

/// One recorded port access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortAccess {
    Read { port: u16, value: u8 },
    Write { port: u16, value: u8 },
}

/// Simulated Super I/O chip implementing [`PortIo`].
#[derive(Debug, Clone)]
pub struct SimulatedChip {
    index_port: u16,
    data_port: u16,
    index: u8,
    registers: [u8; 256],
    pin_config: [u8; PIN_SLOTS],
    base: u16,
    block: [u8; BLOCK_LEN as usize],
    loopback: bool,
    fail_port: Option<u16>,
    accesses: Vec<PortAccess>,
}

impl SimulatedChip {
    /// A chip at the default index/data ports reporting `id`, with its GPIO
    /// block descriptor pointing at `base`.
    pub fn new(id: u8, base: u16) -> Self {
        let mut registers = [0u8; 256];
        registers[consts::REG_SID as usize] = id;
        let [msb, lsb] = base.to_be_bytes();
        registers[consts::REG_BASE_MSB_0 as usize] = msb;
        registers[consts::REG_BASE_LSB_0 as usize] = lsb;
        Self {
            index_port: consts::SIO_INDEX_PORT,
            data_port: consts::SIO_DATA_PORT,
            index: 0,
            registers,
            pin_config: [0; PIN_SLOTS],
            base,
            block: [0; BLOCK_LEN as usize],
            loopback: true,
            fail_port: None,
            accesses: Vec::new(),
        }
    }

    /// A genuine PC87366 with its GPIO block at `base`.
    pub fn pc87366(base: u16) -> Self {
        Self::new(consts::PC87366_SID, base)
    }

    /// Moves the configuration space to another index/data pair.
    pub fn with_ports(mut self, index_port: u16, data_port: u16) -> Self {
        self.index_port = index_port;
        self.data_port = data_port;
        self
    }

    /// With loopback enabled (the default), every write to a bank's data-out
    /// byte is mirrored into its data-in byte, as if all pins were outputs.
    pub fn set_loopback(&mut self, enabled: bool) {
        self.loopback = enabled;
    }

    /// Makes every subsequent access to `port` fail.
    pub fn fail_on(&mut self, port: u16) {
        self.fail_port = Some(port);
    }

    pub fn accesses(&self) -> &[PortAccess] {
        &self.accesses
    }

    pub fn clear_accesses(&mut self) {
        self.accesses.clear();
    }

    /// Configuration register value.
    pub fn register(&self, index: u8) -> u8 {
        self.registers[index as usize]
    }

    pub fn set_register(&mut self, index: u8, value: u8) {
        self.registers[index as usize] = value;
    }

    /// Configuration byte of a physical pin.
    pub fn pin_config(&self, physical: u8) -> u8 {
        self.pin_config[physical as usize % PIN_SLOTS]
    }

    pub fn set_pin_config(&mut self, physical: u8, value: u8) {
        self.pin_config[physical as usize % PIN_SLOTS] = value;
    }

    /// GPIO I/O block byte at `offset` from the base address.
    pub fn block_byte(&self, offset: u16) -> u8 {
        self.block[offset as usize]
    }

    pub fn set_block_byte(&mut self, offset: u16, value: u8) {
        self.block[offset as usize] = value;
    }

    /// Whether the GPIO logical device is selected and activated.
    pub fn gpio_active(&self) -> bool {
        self.register(consts::REG_LDN) == consts::LDN_GPIO
            && self.register(consts::REG_ACTIVATE) & consts::ACTIVATE_ENABLE != 0
    }

    fn block_offset(&self, port: u16) -> Option<u16> {
        port.checked_sub(self.base).filter(|offset| *offset < BLOCK_LEN)
    }

    fn selected_pin(&self) -> usize {
        self.registers[consts::gpio::REG_PIN_SELECT as usize] as usize % PIN_SLOTS
    }

    fn check_fault(&self, port: u16) -> Result<()> {
        if self.fail_port == Some(port) {
            return Err(Error::RegisterAccess {
                port,
                source: std::io::Error::other("simulated port fault"),
            });
        }
        Ok(())
    }
}

impl PortIo for SimulatedChip {
    fn read_port(&mut self, port: u16) -> Result<u8> {
        self.check_fault(port)?;
        let value = if port == self.data_port {
            if self.index == consts::gpio::REG_PIN_CONFIG {
                self.pin_config[self.selected_pin()]
            } else {
                self.registers[self.index as usize]
            }
        } else if port == self.index_port {
            self.index
        } else if let Some(offset) = self.block_offset(port) {
            self.block[offset as usize]
        } else {
            FLOATING_BUS
        };
        trace!("sim inb(0x{:04X}) = 0x{:02X}", port, value);
        self.accesses.push(PortAccess::Read { port, value });
        Ok(value)
    }

    fn write_port(&mut self, port: u16, value: u8) -> Result<()> {
        self.check_fault(port)?;
        trace!("sim outb(0x{:04X}, 0x{:02X})", port, value);
        self.accesses.push(PortAccess::Write { port, value });
        if port == self.index_port {
            self.index = value;
        } else if port == self.data_port {
            if self.index == consts::gpio::REG_PIN_CONFIG {
                let pin = self.selected_pin();
                self.pin_config[pin] = value;
            } else {
                self.registers[self.index as usize] = value;
            }
        } else if let Some(offset) = self.block_offset(port) {
            self.block[offset as usize] = value;
            let is_data_out = matches!(
                offset,
                consts::gpio::BANK_LOW_DATA_OUT
                    | consts::gpio::BANK_MID_DATA_OUT
                    | consts::gpio::BANK_HIGH_DATA_OUT
            );
            if self.loopback && is_data_out {
                self.block[offset as usize + 1] = value;
            }
        }
        Ok(())
    }
}
