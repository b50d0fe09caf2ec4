//! Identification EEPROM model: field layout, in-memory image, and MAC IDs.
//!
//! - [`Layout`] / [`FieldDescriptor`] - The static `{field, offset, length}`
//!   table for each storage variant.
//! - [`EepromImage`] - The fixed-size byte image the fields live in.
//! - [`mac`] - MAC ID generation and rendering.

mod layout;
pub mod mac;
mod types;

pub use layout::{Field, FieldDescriptor, Layout, FILE_LAYOUT, I2C_LAYOUT};
pub use types::EepromImage;
