use pc87366_gpio::{GpioDirection, GpioDrive, Pc87366, Result};
use std::{thread, time::Duration};

// Logical pin 4 (physical 33, high bank)
const BLINK_PIN_NUM: u8 = 4;

fn main() -> Result<()> {
    env_logger::init();
    println!("Probing PC87366 through /dev/port...");
    let mut chip = Pc87366::open_dev_port()?;
    println!(
        "Chip initialized, GPIO base 0x{:04X}.",
        chip.base_address().unwrap_or_default()
    );

    println!("Configuring pin {} for blinking...", BLINK_PIN_NUM);
    chip.set_direction(BLINK_PIN_NUM, GpioDirection::Output)?;
    chip.set_drive(BLINK_PIN_NUM, GpioDrive::PushPull)?;
    chip.set_pull_up(BLINK_PIN_NUM, false)?;

    println!("Blinking pin {} 10 times", BLINK_PIN_NUM);
    for _ in 0..10 {
        chip.write_pin(BLINK_PIN_NUM, true)?;
        thread::sleep(Duration::from_millis(250));
        chip.write_pin(BLINK_PIN_NUM, false)?;
        thread::sleep(Duration::from_millis(250));
    }

    chip.park_inputs()?;
    println!("Pins parked as inputs.");
    Ok(())
}
