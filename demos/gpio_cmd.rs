//! Runs one pin command against the chip, e.g.
//!
//! ```text
//! sudo gpio_cmd c 6 o
//! sudo gpio_cmd o 6 1
//! sudo gpio_cmd i 6
//! gpio_cmd --sim i 6      # against a simulated chip
//! ```

use pc87366_gpio::sim::SimulatedChip;
use pc87366_gpio::{ChipConfig, Command, DevPort, Outcome, Pc87366, PortIo, Result};
use std::env;

fn run<P: PortIo>(chip: &mut Pc87366<P>, command: Command) -> Result<()> {
    match chip.execute(command)? {
        Outcome::Level(level) => println!("Pin {} is set to {}", command.pin, u8::from(level)),
        Outcome::Applied => println!("'{}' applied", command),
        Outcome::Mapped(physical) => {
            println!("Pin {} maps to physical pin {}", command.pin, physical.number())
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let mut args: Vec<String> = env::args().skip(1).collect();
    let simulated = args.first().is_some_and(|a| a == "--sim");
    if simulated {
        args.remove(0);
    }
    let command: Command = args.join(" ").parse()?;

    if simulated {
        let mut chip = Pc87366::open(SimulatedChip::pc87366(0x6600), ChipConfig::default())?;
        run(&mut chip, command)
    } else {
        let mut chip = Pc87366::open(DevPort::open()?, ChipConfig::default())?;
        run(&mut chip, command)
    }
}
