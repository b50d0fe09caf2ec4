//! Persistence backends for the EEPROM image.
//!
//! A [`Backend`] moves field bytes between an [`EepromImage`] and the real
//! storage. Two implementations are provided:
//!
//! - [`FileBackend`] - A flat binary file standing in for the EEPROM; the
//!   whole image is rewritten on every commit.
//! - [`I2cBackend`] - A live I2C EEPROM; only the committed field is
//!   transferred.

mod file;
mod i2c;

pub use file::FileBackend;
pub use i2c::I2cBackend;

use crate::eeprom::{EepromImage, FieldDescriptor};
use crate::error::Result;

/// Storage that EEPROM fields are loaded from and committed to.
pub trait Backend {
    /// Message reported after a successful commit, if the backend has one.
    const COMMIT_NOTICE: Option<&'static str> = None;

    /// Populate `image` when the tool starts.
    fn load(&mut self, image: &mut EepromImage) -> Result<()>;

    /// Refresh one field of `image` from storage before it is read.
    fn fetch(&mut self, image: &mut EepromImage, field: &FieldDescriptor) -> Result<()>;

    /// Persist one field of `image`.
    fn commit(&mut self, image: &EepromImage, field: &FieldDescriptor) -> Result<()>;
}
