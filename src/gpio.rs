//! Pin addressing, pin configuration and pin data access.

use crate::config::LatchSource;
use crate::consts::gpio as regs;
use crate::device::Pc87366;
use crate::error::{Error, Result};
use crate::port::PortIo;
use crate::sio::with_bit;
use log::{debug, trace};

/// Logical pin number -> chip-internal physical pin index.
static PIN_MAP: [(u8, u8); 12] = [
    (3, 32),
    (4, 33),
    (5, 34),
    (6, 35),
    (7, 36),
    (8, 37),
    (9, 38),
    (10, 39),
    (12, 4),
    (13, 5),
    (15, 19),
    (16, 18),
];

/// Translates a logical pin number to the chip's physical pin index.
pub fn map_pin(logical: u8) -> Result<PhysicalPin> {
    PIN_MAP
        .iter()
        .find(|(l, _)| *l == logical)
        .map(|&(_, physical)| PhysicalPin(physical))
        .ok_or(Error::UnknownPin(logical))
}

/// Iterates over every logical pin present in the pin map.
pub fn mapped_pins() -> impl Iterator<Item = LogicalPin> {
    PIN_MAP
        .iter()
        .map(|&(logical, physical)| LogicalPin {
            number: logical,
            physical: PhysicalPin(physical),
        })
}

/// A logical pin known to be present in the pin map.
/// Use `LogicalPin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LogicalPin {
    number: u8,
    physical: PhysicalPin,
}

impl LogicalPin {
    /// Creates a LogicalPin, returning `UnknownPin` if the number is not mapped.
    pub fn new(number: u8) -> Result<Self> {
        let physical = map_pin(number)?;
        Ok(Self { number, physical })
    }

    /// Returns the externally visible pin number.
    #[inline]
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Returns the physical pin this logical pin maps to.
    #[inline]
    pub fn physical(&self) -> PhysicalPin {
        self.physical
    }
}

/// Chip-internal pin index (0-39). Only obtained through the pin map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalPin(pub(crate) u8);

impl PhysicalPin {
    /// Returns the underlying physical pin index.
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the data bank holding this pin's value.
    #[inline]
    pub fn bank(&self) -> DataBank {
        DataBank::containing(*self)
    }

    /// Returns the bit index (0-7) within the bank byte.
    #[inline]
    pub fn bit_index(&self) -> u8 {
        self.0 & regs::BIT_IN_BANK_MASK
    }

    /// Returns the bit mask (1 << bit_index) for register operations.
    #[inline]
    pub fn mask(&self) -> u8 {
        1u8 << self.bit_index()
    }
}

/// One of the three data register banks of the GPIO I/O block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBank {
    /// Physical pins below 18.
    Low,
    /// Physical pins 18-31.
    Mid,
    /// Physical pins 32 and above.
    High,
}

impl DataBank {
    /// Selects the bank for a physical pin. Thresholds are chip specific.
    pub fn containing(pin: PhysicalPin) -> Self {
        if pin.0 >= regs::BANK_HIGH_FIRST_PIN {
            DataBank::High
        } else if pin.0 >= regs::BANK_MID_FIRST_PIN {
            DataBank::Mid
        } else {
            DataBank::Low
        }
    }

    /// Offset of the output latch byte, relative to the base address.
    pub fn data_out_offset(self) -> u16 {
        match self {
            DataBank::Low => regs::BANK_LOW_DATA_OUT,
            DataBank::Mid => regs::BANK_MID_DATA_OUT,
            DataBank::High => regs::BANK_HIGH_DATA_OUT,
        }
    }

    /// Offset of the live pin level byte, relative to the base address.
    pub fn data_in_offset(self) -> u16 {
        match self {
            DataBank::Low => regs::BANK_LOW_DATA_IN,
            DataBank::Mid => regs::BANK_MID_DATA_IN,
            DataBank::High => regs::BANK_HIGH_DATA_IN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioDirection {
    Input,
    Output,
}

/// Output driver type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioDrive {
    OpenDrain,
    PushPull,
}

/// A single-bit field of the pin configuration byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Direction,
    DriveType,
    PullUp,
}

impl ConfigField {
    /// Bit position of this field in the configuration byte.
    pub fn bit(self) -> u8 {
        match self {
            ConfigField::Direction => regs::CFG_DIRECTION_BIT,
            ConfigField::DriveType => regs::CFG_DRIVE_BIT,
            ConfigField::PullUp => regs::CFG_PULL_UP_BIT,
        }
    }
}

/// Decoded pin configuration byte. Reserved bits are kept in `raw`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConfig {
    raw: u8,
}

impl PinConfig {
    pub fn from_raw(raw: u8) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> u8 {
        self.raw
    }

    pub fn field(&self, field: ConfigField) -> bool {
        self.raw & (1 << field.bit()) != 0
    }

    pub fn direction(&self) -> GpioDirection {
        if self.field(ConfigField::Direction) {
            GpioDirection::Output
        } else {
            GpioDirection::Input
        }
    }

    pub fn drive(&self) -> GpioDrive {
        if self.field(ConfigField::DriveType) {
            GpioDrive::PushPull
        } else {
            GpioDrive::OpenDrain
        }
    }

    pub fn pull_up_enabled(&self) -> bool {
        self.field(ConfigField::PullUp)
    }
}

impl<P: PortIo> Pc87366<P> {
    // --- Pin Configuration ---

    /// Maps the pin and checks initialization, in that order. Neither step
    /// touches a port.
    fn resolve(&self, pin: u8) -> Result<(PhysicalPin, u16)> {
        let physical = map_pin(pin)?;
        let base = self.require_initialized()?;
        Ok((physical, base))
    }

    /// Selects the physical pin in the GPIO pin-select register.
    fn select_pin(&mut self, physical: PhysicalPin) -> Result<()> {
        self.sio.write_register(regs::REG_PIN_SELECT, physical.number())
    }

    /// Sets or clears bit `bit` (0-2) of a pin's configuration byte, leaving
    /// every other bit as read from the chip.
    pub fn set_config_bit(&mut self, pin: u8, bit: u8, value: bool) -> Result<()> {
        if bit >= 8 || (1u8 << bit) & regs::CFG_FIELD_MASK == 0 {
            return Err(Error::InvalidConfigBit(bit));
        }
        let (physical, _) = self.resolve(pin)?;
        self.select_pin(physical)?;
        let written = self.sio.update_bit(regs::REG_PIN_CONFIG, bit, value)?;
        debug!(
            "Pin {} (physical {}): config bit {} -> {}, config byte now 0x{:02X}",
            pin,
            physical.number(),
            bit,
            value,
            written
        );
        Ok(())
    }

    /// Sets or clears one configuration field of a pin.
    pub fn set_config_field(&mut self, pin: u8, field: ConfigField, value: bool) -> Result<()> {
        self.set_config_bit(pin, field.bit(), value)
    }

    /// Sets the direction (Input or Output) of a pin.
    pub fn set_direction(&mut self, pin: u8, direction: GpioDirection) -> Result<()> {
        self.set_config_field(
            pin,
            ConfigField::Direction,
            direction == GpioDirection::Output,
        )
    }

    /// Selects open-drain or push-pull output for a pin.
    pub fn set_drive(&mut self, pin: u8, drive: GpioDrive) -> Result<()> {
        self.set_config_field(pin, ConfigField::DriveType, drive == GpioDrive::PushPull)
    }

    /// Enables or disables the internal pull-up of a pin.
    pub fn set_pull_up(&mut self, pin: u8, enabled: bool) -> Result<()> {
        self.set_config_field(pin, ConfigField::PullUp, enabled)
    }

    /// Reads and decodes the configuration byte of a pin.
    pub fn pin_config(&mut self, pin: u8) -> Result<PinConfig> {
        let (physical, _) = self.resolve(pin)?;
        self.select_pin(physical)?;
        let raw = self.sio.read_register(regs::REG_PIN_CONFIG)?;
        trace!(
            "Pin {} (physical {}): config byte 0x{:02X}",
            pin,
            physical.number(),
            raw
        );
        Ok(PinConfig::from_raw(raw))
    }

    /// Configures every mapped pin as an input.
    pub fn park_inputs(&mut self) -> Result<()> {
        self.require_initialized()?;
        for pin in mapped_pins() {
            self.set_direction(pin.number(), GpioDirection::Input)?;
        }
        debug!("All mapped pins parked as inputs");
        Ok(())
    }

    // --- Pin Data ---

    /// Reads the live level of a pin.
    pub fn read_pin(&mut self, pin: u8) -> Result<bool> {
        let (physical, base) = self.resolve(pin)?;
        let bank = physical.bank();
        let value = self.read_block(base, bank.data_in_offset())?;
        trace!(
            "Read pin {} (physical {}, {:?} bank): byte=0x{:02X}, mask=0x{:02X}",
            pin,
            physical.number(),
            bank,
            value,
            physical.mask()
        );
        Ok((value >> physical.bit_index()) & 1 != 0)
    }

    /// Drives a pin high (`true`) or low (`false`) through its bank's
    /// data-out register, preserving the other pins of the bank.
    pub fn write_pin(&mut self, pin: u8, value: bool) -> Result<()> {
        let (physical, base) = self.resolve(pin)?;
        let bank = physical.bank();
        let source = match self.config.latch_source {
            LatchSource::OutputLatch => bank.data_out_offset(),
            LatchSource::InputRegister => bank.data_in_offset(),
        };
        let current = self.read_block(base, source)?;
        let new_val = with_bit(current, physical.bit_index(), value);
        debug!(
            "Write pin {} (physical {}, {:?} bank) = {}: 0x{:02X} -> 0x{:02X}",
            pin,
            physical.number(),
            bank,
            value,
            current,
            new_val
        );
        self.write_block(base, bank.data_out_offset(), new_val)
    }
}
