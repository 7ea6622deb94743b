//! Internal constants, register addresses, and bit definitions.

// --- Super I/O configuration space (index/data port pair) ---
/// Default index port of the PC87366 configuration space.
pub const SIO_INDEX_PORT: u16 = 0x2E;
/// Default data port of the PC87366 configuration space.
pub const SIO_DATA_PORT: u16 = 0x2F;

/// Configuration register holding the chip identity (SID).
pub const REG_SID: u8 = 0x20;
/// Identity value reported by a PC87366.
pub const PC87366_SID: u8 = 0xE9;

/// Logical device number selector.
pub const REG_LDN: u8 = 0x07;
/// Logical device number of the GPIO function block.
pub const LDN_GPIO: u8 = 0x07;

// Shared (per logical device) registers
pub const REG_ACTIVATE: u8 = 0x30;
pub const ACTIVATE_ENABLE: u8 = 0x01;
/// I/O port base, descriptor 0, MSB.
pub const REG_BASE_MSB_0: u8 = 0x60;
/// I/O port base, descriptor 0, LSB.
pub const REG_BASE_LSB_0: u8 = 0x61;

// --- GPIO device-specific registers ---
pub mod gpio {
    pub const REG_PIN_SELECT: u8 = 0xF0;
    pub const REG_PIN_CONFIG: u8 = 0xF1;

    // Pin configuration byte fields
    /// 0 = input, 1 = output.
    pub const CFG_DIRECTION_BIT: u8 = 0;
    /// 0 = open-drain, 1 = push-pull.
    pub const CFG_DRIVE_BIT: u8 = 1;
    /// 0 = pull-up disabled, 1 = pull-up enabled.
    pub const CFG_PULL_UP_BIT: u8 = 2;
    pub const CFG_FIELD_MASK: u8 = 0b0000_0111;

    // Data bank selection thresholds (physical pin index)
    pub const BANK_HIGH_FIRST_PIN: u8 = 32;
    pub const BANK_MID_FIRST_PIN: u8 = 18;

    // Offsets relative to the GPIO base address.
    // Each bank has a data-out (latch) byte followed by a data-in byte.
    pub const BANK_LOW_DATA_OUT: u16 = 0x00;
    pub const BANK_LOW_DATA_IN: u16 = 0x01;
    pub const BANK_MID_DATA_OUT: u16 = 0x04;
    pub const BANK_MID_DATA_IN: u16 = 0x05;
    pub const BANK_HIGH_DATA_OUT: u16 = 0x08;
    pub const BANK_HIGH_DATA_IN: u16 = 0x09;

    /// Highest offset the driver addresses within the GPIO block.
    pub const BLOCK_LAST_OFFSET: u16 = BANK_HIGH_DATA_IN;

    /// Pin index within a bank byte.
    pub const BIT_IN_BANK_MASK: u8 = 0x07;
}

/// Path of the Linux character device exposing the I/O port space.
pub const DEV_PORT_PATH: &str = "/dev/port";
