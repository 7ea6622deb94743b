//! Chip probing, base-address resolution and initialization state.

use pc87366_gpio::sim::{PortAccess, SimulatedChip};
use pc87366_gpio::{ChipConfig, Error, Pc87366};

#[test]
fn test_initialize_resolves_base_address() {
    let chip = Pc87366::open(SimulatedChip::pc87366(0x0600), ChipConfig::default()).unwrap();
    assert!(chip.is_initialized());
    assert_eq!(chip.base_address(), Some(0x0600));
    assert!(chip.io().gpio_active());
}

#[test]
fn test_initialize_combines_msb_and_lsb() {
    let chip = Pc87366::open(SimulatedChip::pc87366(0x6A1C), ChipConfig::default()).unwrap();
    assert_eq!(chip.base_address(), Some(0x6A1C));
    assert_eq!(chip.state().base_address(), Some(0x6A1C));
}

#[test]
fn test_initialize_register_sequence() {
    let chip = Pc87366::open(SimulatedChip::pc87366(0x0600), ChipConfig::default()).unwrap();
    let expected = [
        PortAccess::Write { port: 0x2E, value: 0x20 },
        PortAccess::Read { port: 0x2F, value: 0xE9 },
        PortAccess::Write { port: 0x2E, value: 0x60 },
        PortAccess::Read { port: 0x2F, value: 0x06 },
        PortAccess::Write { port: 0x2E, value: 0x61 },
        PortAccess::Read { port: 0x2F, value: 0x00 },
        PortAccess::Write { port: 0x2E, value: 0x07 },
        PortAccess::Write { port: 0x2F, value: 0x07 },
        PortAccess::Write { port: 0x2E, value: 0x30 },
        PortAccess::Write { port: 0x2F, value: 0x01 },
    ];
    assert_eq!(chip.io().accesses(), &expected[..]);
}

#[test]
fn test_identity_mismatch_leaves_chip_uninitialized() {
    let mut chip = Pc87366::new(SimulatedChip::new(0x00, 0x0600), ChipConfig::default());
    let err = chip.initialize().unwrap_err();
    assert!(matches!(
        err,
        Error::ChipNotPresent {
            found: 0x00,
            expected: 0xE9
        }
    ));
    assert!(!chip.is_initialized());
    assert_eq!(chip.base_address(), None);
    // Only the identity register was probed; the device was not activated
    assert_eq!(chip.io().accesses().len(), 2);
    assert!(!chip.io().gpio_active());
}

#[test]
fn test_initialize_can_be_retried_after_mismatch() {
    let mut chip = Pc87366::new(SimulatedChip::new(0xFF, 0x0600), ChipConfig::default());
    assert!(chip.initialize().is_err());

    chip.io_mut().set_register(0x20, 0xE9);
    chip.initialize().unwrap();
    assert_eq!(chip.base_address(), Some(0x0600));
}

#[test]
fn test_initialize_twice_is_noop() {
    let mut chip = Pc87366::open(SimulatedChip::pc87366(0x0600), ChipConfig::default()).unwrap();
    chip.io_mut().clear_accesses();
    chip.initialize().unwrap();
    assert!(chip.io().accesses().is_empty());
    assert_eq!(chip.base_address(), Some(0x0600));
}

#[test]
fn test_custom_expected_id_and_ports() {
    let sim = SimulatedChip::new(0xEA, 0x0800).with_ports(0x4E, 0x4F);
    let config = ChipConfig {
        expected_id: 0xEA,
        ..ChipConfig::with_ports(0x4E, 0x4F)
    };
    let chip = Pc87366::open(sim, config).unwrap();
    assert_eq!(chip.base_address(), Some(0x0800));
    assert!(matches!(
        chip.io().accesses()[0],
        PortAccess::Write { port: 0x4E, value: 0x20 }
    ));
}

#[test]
fn test_port_fault_propagates_from_initialize() {
    let mut sim = SimulatedChip::pc87366(0x0600);
    sim.fail_on(0x2F);
    let mut chip = Pc87366::new(sim, ChipConfig::default());
    assert!(matches!(
        chip.initialize(),
        Err(Error::RegisterAccess { port: 0x2F, .. })
    ));
    assert!(!chip.is_initialized());
}

#[test]
fn test_new_touches_no_port() {
    let chip = Pc87366::new(SimulatedChip::pc87366(0x0600), ChipConfig::default());
    assert!(!chip.is_initialized());
    assert!(chip.io().accesses().is_empty());
}

#[test]
fn test_unassigned_base_leaves_chip_uninitialized() {
    let mut chip = Pc87366::new(SimulatedChip::pc87366(0), ChipConfig::default());
    assert!(matches!(chip.initialize(), Err(Error::InvalidBaseAddress(0))));
    assert!(!chip.is_initialized());
    assert_eq!(chip.base_address(), None);
    assert!(!chip.io().gpio_active());

    chip.io_mut().clear_accesses();
    assert!(matches!(chip.write_pin(3, true), Err(Error::NotInitialized)));
    assert!(matches!(chip.read_pin(13), Err(Error::NotInitialized)));
    assert!(chip.io().accesses().is_empty());
}

#[test]
fn test_initialize_can_be_retried_after_unassigned_base() {
    let mut chip = Pc87366::new(SimulatedChip::pc87366(0), ChipConfig::default());
    assert!(chip.initialize().is_err());

    chip.io_mut().set_register(0x60, 0x06);
    chip.initialize().unwrap();
    assert_eq!(chip.base_address(), Some(0x0600));
    assert!(chip.io().gpio_active());
}

#[test]
fn test_base_near_top_of_port_space_is_rejected() {
    let mut chip = Pc87366::new(SimulatedChip::pc87366(0xFFF8), ChipConfig::default());
    assert!(matches!(chip.initialize(), Err(Error::InvalidBaseAddress(0xFFF8))));
    assert!(!chip.is_initialized());
    assert!(!chip.io().gpio_active());

    chip.io_mut().clear_accesses();
    assert!(matches!(chip.write_pin(3, true), Err(Error::NotInitialized)));
    assert!(chip.io().accesses().is_empty());
}

#[test]
fn test_highest_base_with_room_for_all_banks() {
    // 0xFFF6 + 0x09 is the last port of the address space
    let mut chip = Pc87366::open(SimulatedChip::pc87366(0xFFF6), ChipConfig::default()).unwrap();
    assert_eq!(chip.base_address(), Some(0xFFF6));
    chip.io_mut().clear_accesses();
    assert!(!chip.read_pin(3).unwrap());
    assert!(matches!(chip.io().accesses(), [PortAccess::Read { port: 0xFFFF, .. }]));
}
