//! Pin commands and their text form.
//!
//! Grammar, one command per line:
//!
//! | Text        | Meaning                              |
//! |-------------|--------------------------------------|
//! | `i 6`       | read pin 6                           |
//! | `o 6 1`     | drive pin 6 high (`0` drives low)    |
//! | `c 6 i`     | configure pin 6 as input             |
//! | `c 6 o`     | configure pin 6 as output            |
//! | `c 6 p 1`   | enable pull-up on pin 6 (`0` off)    |
//! | `c 6 t 1`   | push-pull output on pin 6 (`0` open-drain) |
//! | `t 6`       | report the physical pin for pin 6    |

use crate::device::Pc87366;
use crate::error::{invalid_command, Result};
use crate::gpio::{map_pin, ConfigField, PhysicalPin};
use crate::port::PortIo;
use log::debug;
use std::fmt;
use std::str::FromStr;

/// What to do with a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Read the live pin level.
    Read,
    /// Drive the pin high (`true`) or low (`false`).
    Write(bool),
    /// Set (`true`) or clear (`false`) one configuration field.
    Configure(ConfigField, bool),
    /// Look up the physical pin without touching the chip.
    Map,
}

/// A single operation on a logical pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub pin: u8,
    pub action: Action,
}

impl Command {
    pub fn new(pin: u8, action: Action) -> Self {
        Self { pin, action }
    }
}

/// Result of a successfully executed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pin level returned by [`Action::Read`].
    Level(bool),
    /// Write or configuration applied.
    Applied,
    /// Physical pin returned by [`Action::Map`].
    Mapped(PhysicalPin),
}

fn parse_flag(token: Option<&str>, input: &str, what: &str) -> Result<bool> {
    match token {
        Some("1") => Ok(true),
        Some("0") => Ok(false),
        Some(other) => Err(invalid_command(
            input,
            &format!("{} must be 0 or 1, got '{}'", what, other),
        )),
        None => Err(invalid_command(input, &format!("missing {}", what))),
    }
}

impl FromStr for Command {
    type Err = crate::Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace();
        let kind = tokens
            .next()
            .ok_or_else(|| invalid_command(input, "empty command"))?;
        let pin = tokens
            .next()
            .ok_or_else(|| invalid_command(input, "missing pin number"))?
            .parse::<u8>()
            .map_err(|e| invalid_command(input, &format!("bad pin number: {}", e)))?;

        let action = match kind {
            "i" => Action::Read,
            "t" => Action::Map,
            "o" => Action::Write(parse_flag(tokens.next(), input, "pin value")?),
            "c" => match tokens.next() {
                Some("i") => Action::Configure(ConfigField::Direction, false),
                Some("o") => Action::Configure(ConfigField::Direction, true),
                Some("p") => Action::Configure(
                    ConfigField::PullUp,
                    parse_flag(tokens.next(), input, "pull-up flag")?,
                ),
                Some("t") => Action::Configure(
                    ConfigField::DriveType,
                    parse_flag(tokens.next(), input, "output type flag")?,
                ),
                Some(other) => {
                    return Err(invalid_command(
                        input,
                        &format!("unknown configuration type '{}'", other),
                    ))
                }
                None => return Err(invalid_command(input, "missing configuration type")),
            },
            other => {
                return Err(invalid_command(
                    input,
                    &format!("unknown action '{}'", other),
                ))
            }
        };

        if let Some(extra) = tokens.next() {
            return Err(invalid_command(
                input,
                &format!("unexpected trailing token '{}'", extra),
            ));
        }
        Ok(Command { pin, action })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |b: bool| if b { 1 } else { 0 };
        match self.action {
            Action::Read => write!(f, "i {}", self.pin),
            Action::Map => write!(f, "t {}", self.pin),
            Action::Write(v) => write!(f, "o {} {}", self.pin, flag(v)),
            Action::Configure(ConfigField::Direction, out) => {
                write!(f, "c {} {}", self.pin, if out { 'o' } else { 'i' })
            }
            Action::Configure(ConfigField::PullUp, v) => write!(f, "c {} p {}", self.pin, flag(v)),
            Action::Configure(ConfigField::DriveType, v) => {
                write!(f, "c {} t {}", self.pin, flag(v))
            }
        }
    }
}

impl<P: PortIo> Pc87366<P> {
    /// Executes one command to completion.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        debug!("Executing '{}'", command);
        match command.action {
            Action::Read => self.read_pin(command.pin).map(Outcome::Level),
            Action::Write(value) => self
                .write_pin(command.pin, value)
                .map(|()| Outcome::Applied),
            Action::Configure(field, value) => self
                .set_config_field(command.pin, field, value)
                .map(|()| Outcome::Applied),
            Action::Map => map_pin(command.pin).map(Outcome::Mapped),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_parse_grammar() {
        for text in ["i 6", "t 16", "o 6 1", "o 3 0", "c 6 i", "c 6 o", "c 6 p 1", "c 9 t 0"] {
            let command: Command = text.parse().unwrap();
            assert_eq!(command.to_string(), text);
        }
    }
}
