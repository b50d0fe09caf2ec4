//! Read, write, and clear board identification fields in an EEPROM.
//!
//! Boards carry their serial number, PCB serial number, product ID, and MAC
//! IDs in fixed-width fields at fixed offsets of a small EEPROM. This crate
//! models that layout and edits it either in a local image file (for
//! development without hardware) or on a live I2C EEPROM.
//!
//! # Quick Start
//!
//! ```no_run
//! use eeprom_id::{backend::FileBackend, EepromTool, Field, FILE_LAYOUT};
//!
//! let mut tool = EepromTool::new(FILE_LAYOUT, FileBackend::new("eeprom_data.bin"));
//! tool.load()?;
//! tool.update(Field::SerialNumber, "SRN000000000000001")?;
//! tool.commit(Field::SerialNumber)?;
//! println!("{}", eeprom_id::hex_dump(tool.image().raw_buf()));
//! # Ok::<(), eeprom_id::Error>(())
//! ```
//!
//! # Features
//!
//! - **Layouts**: [`FILE_LAYOUT`] for the simulator image, [`I2C_LAYOUT`] for
//!   the on-board EEPROM.
//! - **Backends**: [`backend::FileBackend`] and [`backend::I2cBackend`] (any
//!   `embedded-hal` 1.0 I2C bus).
//! - **Hex dump**: [`hex_dump`] renders offset/hex/ASCII rows.
//! - **CLI**: [`cli`] builds the `--updSRNUM`-style command line used by the
//!   `eeprom-tool` and `eeprom-i2c` binaries.

pub mod backend;
pub mod cli;
pub mod constants;
pub mod eeprom;
pub mod error;
mod hexdump;
pub mod tool;

// ---- Convenience re-exports ----

pub use eeprom::{EepromImage, Field, FieldDescriptor, Layout, FILE_LAYOUT, I2C_LAYOUT};
pub use error::{Error, Result};
pub use hexdump::{hex_dump, HexDump};
pub use tool::{EepromTool, FieldValue};
