//! The in-memory EEPROM image.

use crate::constants::EEPROM_SIZE;
use crate::error::{Error, Result};

use super::FieldDescriptor;

/// Raw EEPROM contents.
///
/// Fields are flat runs of bytes at the offsets given by a
/// [`Layout`](super::Layout). Nothing is NUL-terminated in storage; text
/// fields end at the first zero byte when rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EepromImage {
    buf: [u8; EEPROM_SIZE],
}

impl Default for EepromImage {
    fn default() -> Self {
        Self {
            buf: [0u8; EEPROM_SIZE],
        }
    }
}

impl EepromImage {
    /// Get the raw EEPROM buffer.
    pub fn raw_buf(&self) -> &[u8; EEPROM_SIZE] {
        &self.buf
    }

    /// Set the raw EEPROM buffer from a slice.
    ///
    /// Only copies up to `EEPROM_SIZE` bytes; anything beyond the end of
    /// `data` keeps its current value.
    pub fn set_raw_buf(&mut self, data: &[u8]) {
        let len = data.len().min(EEPROM_SIZE);
        self.buf[..len].copy_from_slice(&data[..len]);
    }

    /// Bytes of one field.
    pub fn field(&self, desc: &FieldDescriptor) -> &[u8] {
        &self.buf[desc.range()]
    }

    /// Mutable bytes of one field.
    pub fn field_mut(&mut self, desc: &FieldDescriptor) -> &mut [u8] {
        &mut self.buf[desc.range()]
    }

    /// Overwrite a field with `value`.
    ///
    /// `value` must be exactly as wide as the field; otherwise the image is
    /// left untouched.
    pub fn write_field(&mut self, desc: &FieldDescriptor, value: &[u8]) -> Result<()> {
        if value.len() != desc.len {
            return Err(Error::IncorrectLength {
                field: desc.field,
                expected: desc.len,
                actual: value.len(),
            });
        }
        self.field_mut(desc).copy_from_slice(value);
        Ok(())
    }

    /// Zero a field.
    pub fn clear_field(&mut self, desc: &FieldDescriptor) {
        self.field_mut(desc).fill(0);
    }

    /// Render a field as text, stopping at the first zero byte.
    pub fn text(&self, desc: &FieldDescriptor) -> String {
        let bytes = self.field(desc);
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        String::from_utf8_lossy(&bytes[..end]).into_owned()
    }
}
