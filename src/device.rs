//! Chip handle, identity probing and GPIO base-address resolution.

use crate::config::ChipConfig;
use crate::consts;
use crate::error::{Error, Result};
use crate::port::{DevPort, PortIo};
use crate::sio::SuperIo;
use log::{debug, warn};

/// Initialization state of the GPIO block.
///
/// Starts uninitialized and becomes initialized exactly once, after the
/// identity check and base-address read succeed. It never goes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChipState {
    base_address: Option<u16>,
    initialized: bool,
}

impl ChipState {
    /// Base I/O address of the GPIO data registers, once resolved.
    pub fn base_address(&self) -> Option<u16> {
        self.base_address
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

/// A handle to a PC87366 GPIO block.
///
/// Owns the port primitive and the chip state. All pin operations go
/// through `&mut self`, so one handle serializes every read-modify-write
/// sequence. Callers sharing the chip across threads must wrap the handle
/// in a single lock.
#[derive(Debug)]
pub struct Pc87366<P> {
    pub(crate) sio: SuperIo<P>,
    pub(crate) config: ChipConfig,
    pub(crate) state: ChipState,
}

impl Pc87366<DevPort> {
    /// Opens `/dev/port` and initializes the chip with the default configuration.
    pub fn open_dev_port() -> Result<Self> {
        Self::open(DevPort::open()?, ChipConfig::default())
    }
}

impl<P: PortIo> Pc87366<P> {
    // --- Constructors and State ---

    /// Creates an uninitialized handle. No port is touched until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(io: P, config: ChipConfig) -> Self {
        Self {
            sio: SuperIo::new(io, config.index_port, config.data_port),
            config,
            state: ChipState::default(),
        }
    }

    /// Creates a handle and initializes it.
    pub fn open(io: P, config: ChipConfig) -> Result<Self> {
        let mut chip = Self::new(io, config);
        chip.initialize()?;
        Ok(chip)
    }

    /// Probes the chip identity, resolves the GPIO base address and activates
    /// the GPIO logical device.
    ///
    /// On identity mismatch, or when the descriptor holds an unassigned (zero)
    /// base or one too close to the top of the port space, the handle stays
    /// uninitialized, the device is not activated, and the call may be
    /// retried. Once initialized, further calls return `Ok` without touching
    /// the chip. The chip gives no feedback on activation, so a failed
    /// activation is not detected.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state.initialized {
            debug!("PC87366 GPIO already initialized, skipping");
            return Ok(());
        }

        let id = self.sio.read_register(consts::REG_SID)?;
        if id != self.config.expected_id {
            warn!(
                "Super I/O identity mismatch at index port 0x{:02X}: 0x{:02X} (expected 0x{:02X})",
                self.sio.index_port(),
                id,
                self.config.expected_id
            );
            return Err(Error::ChipNotPresent {
                found: id,
                expected: self.config.expected_id,
            });
        }

        let msb = self.sio.read_register(consts::REG_BASE_MSB_0)?;
        let lsb = self.sio.read_register(consts::REG_BASE_LSB_0)?;
        let base = u16::from_be_bytes([msb, lsb]);
        if base == 0 || base.checked_add(consts::gpio::BLOCK_LAST_OFFSET).is_none() {
            warn!("GPIO block descriptor holds unusable base 0x{:04X}", base);
            return Err(Error::InvalidBaseAddress(base));
        }

        self.sio.write_register(consts::REG_LDN, consts::LDN_GPIO)?;
        self.sio.write_register(consts::REG_ACTIVATE, consts::ACTIVATE_ENABLE)?;

        self.state = ChipState {
            base_address: Some(base),
            initialized: true,
        };
        debug!("PC87366 GPIO initialized, base address 0x{:04X}", base);
        Ok(())
    }

    /// Current chip state.
    pub fn state(&self) -> ChipState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    /// Base I/O address of the GPIO data registers, once resolved.
    pub fn base_address(&self) -> Option<u16> {
        self.state.base_address()
    }

    /// The configuration this handle was created with.
    pub fn config(&self) -> &ChipConfig {
        &self.config
    }

    /// Borrows the underlying port primitive.
    pub fn io(&self) -> &P {
        self.sio.io()
    }

    /// Mutably borrows the underlying port primitive. Accesses made through
    /// it bypass the driver.
    pub fn io_mut(&mut self) -> &mut P {
        self.sio.io_mut()
    }

    /// Releases the handle, returning the port primitive. Pin configuration
    /// is left as is; use [`park_inputs`](Self::park_inputs) first for a safe
    /// state.
    pub fn into_inner(self) -> P {
        self.sio.into_inner()
    }

    /// Fails with `NotInitialized` before any port access; returns the base
    /// address otherwise.
    pub(crate) fn require_initialized(&self) -> Result<u16> {
        match self.state.base_address {
            Some(base) if self.state.initialized => Ok(base),
            _ => Err(Error::NotInitialized),
        }
    }

    // --- Direct access to the GPIO I/O block ---
    fn block_port(base: u16, offset: u16) -> Result<u16> {
        base.checked_add(offset).ok_or(Error::InvalidBaseAddress(base))
    }

    pub(crate) fn read_block(&mut self, base: u16, offset: u16) -> Result<u8> {
        let port = Self::block_port(base, offset)?;
        self.sio.io_mut().read_port(port)
    }

    pub(crate) fn write_block(&mut self, base: u16, offset: u16, value: u8) -> Result<()> {
        let port = Self::block_port(base, offset)?;
        self.sio.io_mut().write_port(port, value)
    }
}
