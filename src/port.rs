//! Byte-granular access to the x86 I/O port space.

use crate::consts;
use crate::error::{Error, Result};
use log::trace;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Platform primitive for reading and writing single bytes at I/O port addresses.
///
/// The driver performs every chip access through this trait, so it can run
/// against real hardware ([`DevPort`]) or a simulated chip
/// ([`crate::sim::SimulatedChip`]).
pub trait PortIo {
    /// Reads one byte from `port`.
    fn read_port(&mut self, port: u16) -> Result<u8>;
    /// Writes one byte to `port`.
    fn write_port(&mut self, port: u16, value: u8) -> Result<()>;
}

/// Port access through the Linux `/dev/port` character device.
///
/// The file offset is the port address. Requires `CAP_SYS_RAWIO`
/// (usually root).
#[derive(Debug)]
pub struct DevPort {
    file: File,
}

impl DevPort {
    /// Opens `/dev/port` for reading and writing.
    pub fn open() -> Result<Self> {
        Self::open_path(consts::DEV_PORT_PATH)
    }

    /// Opens a port-space device at a custom path.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path.as_ref())?;
        trace!("Opened port device {:?}", path.as_ref());
        Ok(Self { file })
    }

    fn seek_to(&mut self, port: u16) -> Result<()> {
        self.file
            .seek(SeekFrom::Start(u64::from(port)))
            .map(|_| ())
            .map_err(|source| Error::RegisterAccess { port, source })
    }
}

impl PortIo for DevPort {
    fn read_port(&mut self, port: u16) -> Result<u8> {
        self.seek_to(port)?;
        let mut buf = [0u8; 1];
        self.file
            .read_exact(&mut buf)
            .map_err(|source| Error::RegisterAccess { port, source })?;
        trace!("inb(0x{:04X}) = 0x{:02X}", port, buf[0]);
        Ok(buf[0])
    }

    fn write_port(&mut self, port: u16, value: u8) -> Result<()> {
        self.seek_to(port)?;
        trace!("outb(0x{:04X}, 0x{:02X})", port, value);
        self.file
            .write_all(&[value])
            .map_err(|source| Error::RegisterAccess { port, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_device_reports_io_error() {
        let err = DevPort::open_path("/nonexistent/pc87366-port").unwrap_err();
        match err {
            Error::Io(source) => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
