//! I2C EEPROM backend.
//!
//! Talks to a 24Cxx-style EEPROM with two-byte memory addressing. Works with
//! any [`embedded_hal::i2c::I2c`] implementation; on Linux the binary uses
//! `linux_embedded_hal::I2cdev` on `/dev/i2c-1`.
//!
//! # Transfers
//!
//! | Operation | Bus traffic |
//! |-----------|-------------|
//! | write     | `[addr_hi, addr_lo, data...]` in one write transaction |
//! | read      | write `[addr_hi, addr_lo]`, then read `len` bytes |

use embedded_hal::i2c::{Error as _, I2c};

use crate::eeprom::{EepromImage, FieldDescriptor};
use crate::error::{Error, Result};

use super::Backend;

/// EEPROM on an I2C bus at a fixed 7-bit slave address.
#[derive(Debug)]
pub struct I2cBackend<I> {
    bus: I,
    address: u8,
}

impl<I: I2c> I2cBackend<I> {
    /// Wrap `bus`, addressing the EEPROM at `address`.
    pub fn new(bus: I, address: u8) -> Result<Self> {
        if address > 0x7F {
            return Err(Error::InvalidArgument(
                "I2C address must be 7-bit (0x00-0x7F)",
            ));
        }
        Ok(Self { bus, address })
    }

    /// Give back the underlying bus.
    pub fn release(self) -> I {
        self.bus
    }

    /// Write `data` starting at EEPROM memory address `mem_addr`.
    pub fn write_at(&mut self, mem_addr: usize, data: &[u8]) -> Result<()> {
        let header = address_header(mem_addr)?;
        let mut frame = Vec::with_capacity(header.len() + data.len());
        frame.extend_from_slice(&header);
        frame.extend_from_slice(data);

        log::trace!("i2c 0x{:02X} write @0x{mem_addr:04X}: {data:02X?}", self.address);
        self.bus
            .write(self.address, &frame)
            .map_err(|e| Error::I2c(e.kind()))
    }

    /// Fill `buf` from EEPROM memory starting at `mem_addr`.
    pub fn read_at(&mut self, mem_addr: usize, buf: &mut [u8]) -> Result<()> {
        let header = address_header(mem_addr)?;
        self.bus
            .write(self.address, &header)
            .map_err(|e| Error::I2c(e.kind()))?;
        self.bus
            .read(self.address, buf)
            .map_err(|e| Error::I2c(e.kind()))?;
        log::trace!("i2c 0x{:02X} read @0x{mem_addr:04X}: {buf:02X?}", self.address);
        Ok(())
    }
}

/// Big-endian two-byte memory address.
fn address_header(mem_addr: usize) -> Result<[u8; 2]> {
    u16::try_from(mem_addr)
        .map(u16::to_be_bytes)
        .map_err(|_| Error::AddressOutOfRange(mem_addr))
}

impl<I: I2c> Backend for I2cBackend<I> {
    const COMMIT_NOTICE: Option<&'static str> = Some("Data written to EEPROM.");

    /// Reads and writes go straight to the device, so nothing is preloaded.
    fn load(&mut self, _image: &mut EepromImage) -> Result<()> {
        log::debug!("using I2C EEPROM at 0x{:02X}", self.address);
        Ok(())
    }

    fn fetch(&mut self, image: &mut EepromImage, field: &FieldDescriptor) -> Result<()> {
        self.read_at(field.offset, image.field_mut(field))
    }

    fn commit(&mut self, image: &EepromImage, field: &FieldDescriptor) -> Result<()> {
        self.write_at(field.offset, image.field(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eeprom::{Field, I2C_LAYOUT};
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};

    /// 24C08-like EEPROM that records every write frame.
    struct SimEeprom {
        mem: Vec<u8>,
        pointer: usize,
        frames: Vec<Vec<u8>>,
        fail_reads: bool,
    }

    impl SimEeprom {
        fn new() -> Self {
            Self {
                mem: vec![0; 1024],
                pointer: 0,
                frames: Vec::new(),
                fail_reads: false,
            }
        }
    }

    impl ErrorType for SimEeprom {
        type Error = ErrorKind;
    }

    impl I2c for SimEeprom {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> core::result::Result<(), ErrorKind> {
            if address != 0x50 {
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            for op in operations.iter_mut() {
                match op {
                    Operation::Write(bytes) => {
                        self.frames.push(bytes.to_vec());
                        let (hdr, data) = bytes.split_at(2);
                        self.pointer = u16::from_be_bytes([hdr[0], hdr[1]]) as usize;
                        self.mem[self.pointer..self.pointer + data.len()].copy_from_slice(data);
                        self.pointer += data.len();
                    }
                    Operation::Read(buf) => {
                        if self.fail_reads {
                            return Err(ErrorKind::Other);
                        }
                        let n = buf.len();
                        buf.copy_from_slice(&self.mem[self.pointer..self.pointer + n]);
                        self.pointer += n;
                    }
                }
            }
            Ok(())
        }
    }

    #[test]
    fn commit_sends_address_header_and_field() {
        let mut backend = I2cBackend::new(SimEeprom::new(), 0x50).unwrap();
        let desc = I2C_LAYOUT.descriptor(Field::SerialNumber).unwrap();
        let mut image = EepromImage::default();
        image.write_field(desc, b"SN0123456789ABCDEF").unwrap();

        backend.commit(&image, desc).unwrap();

        let sim = backend.release();
        assert_eq!(sim.frames.len(), 1);
        assert_eq!(&sim.frames[0][..2], &[0x00, 0x64]);
        assert_eq!(&sim.frames[0][2..], b"SN0123456789ABCDEF");
        assert_eq!(&sim.mem[100..118], b"SN0123456789ABCDEF");
    }

    #[test]
    fn fetch_reads_back_committed_field() {
        let mut backend = I2cBackend::new(SimEeprom::new(), 0x50).unwrap();
        let desc = I2C_LAYOUT.descriptor(Field::MacIds).unwrap();
        let mut image = EepromImage::default();
        image.field_mut(desc).fill(0x5A);
        backend.commit(&image, desc).unwrap();

        let mut fresh = EepromImage::default();
        backend.fetch(&mut fresh, desc).unwrap();
        assert_eq!(fresh.field(desc), image.field(desc));

        let sim = backend.release();
        // Header-only write that positions the read
        assert_eq!(sim.frames.last().unwrap(), &vec![0x00, 136]);
    }

    #[test]
    fn bus_errors_are_reported() {
        let mut sim = SimEeprom::new();
        sim.fail_reads = true;
        let mut backend = I2cBackend::new(sim, 0x50).unwrap();
        let mut buf = [0u8; 4];
        assert!(matches!(
            backend.read_at(0, &mut buf),
            Err(Error::I2c(ErrorKind::Other))
        ));

        let mut backend = I2cBackend::new(SimEeprom::new(), 0x51).unwrap();
        assert!(matches!(
            backend.write_at(0, &[1]),
            Err(Error::I2c(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)))
        ));
    }

    #[test]
    fn rejects_bad_addresses() {
        assert!(matches!(
            I2cBackend::new(SimEeprom::new(), 0x80),
            Err(Error::InvalidArgument(_))
        ));
        let mut backend = I2cBackend::new(SimEeprom::new(), 0x50).unwrap();
        assert!(matches!(
            backend.write_at(0x1_0000, &[0]),
            Err(Error::AddressOutOfRange(0x1_0000))
        ));
    }
}
