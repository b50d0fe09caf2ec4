//! Static field layouts for the file-backed and I2C EEPROM variants.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::constants::*;
use crate::error::{Error, Result};

/// An identification field stored in the EEPROM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Product serial number (`SRNUM`).
    SerialNumber,
    /// PCB serial number (`BSRNUM`).
    BoardSerialNumber,
    /// Product ID (`PID`), file layout only.
    ProductId,
    /// Block of [`MAC_ID_COUNT`] MAC IDs (`MACID`).
    MacIds,
}

impl Field {
    /// All fields, in storage order.
    pub const ALL: [Field; 4] = [
        Self::SerialNumber,
        Self::BoardSerialNumber,
        Self::ProductId,
        Self::MacIds,
    ];

    /// Selector used on the command line (`--updRD SRNUM`).
    pub fn selector(self) -> &'static str {
        match self {
            Self::SerialNumber => "SRNUM",
            Self::BoardSerialNumber => "BSRNUM",
            Self::ProductId => "PID",
            Self::MacIds => "MACID",
        }
    }

    /// Human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::SerialNumber => "Serial Number",
            Self::BoardSerialNumber => "Board Serial Number",
            Self::ProductId => "Product ID",
            Self::MacIds => "MAC IDs",
        }
    }

    /// Long option that updates this field.
    pub fn update_flag(self) -> &'static str {
        match self {
            Self::SerialNumber => "updSRNUM",
            Self::BoardSerialNumber => "updBSRNUM",
            Self::ProductId => "updPID",
            Self::MacIds => "updMACID",
        }
    }

    /// Long option that clears this field.
    pub fn clear_flag(self) -> &'static str {
        match self {
            Self::SerialNumber => "clearSRNUM",
            Self::BoardSerialNumber => "clearBSRNUM",
            Self::ProductId => "clearPID",
            Self::MacIds => "clearMACID",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.selector() == s)
            .ok_or_else(|| Error::UnknownField(s.to_owned()))
    }
}

/// Location of one field inside the EEPROM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The field stored here.
    pub field: Field,
    /// Byte offset from the start of the image.
    pub offset: usize,
    /// Fixed width in bytes.
    pub len: usize,
}

impl FieldDescriptor {
    const fn new(field: Field, offset: usize, len: usize) -> Self {
        Self { field, offset, len }
    }

    /// Byte range covered by this field.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len
    }
}

/// A fixed table of field descriptors for one storage variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    name: &'static str,
    fields: &'static [FieldDescriptor],
}

/// Layout of the file-backed simulator image.
pub const FILE_LAYOUT: Layout = Layout {
    name: "file",
    fields: &[
        FieldDescriptor::new(Field::SerialNumber, FILE_SERIAL_NUMBER_OFFSET, SERIAL_NUMBER_LEN),
        FieldDescriptor::new(
            Field::BoardSerialNumber,
            FILE_BOARD_SERIAL_NUMBER_OFFSET,
            BOARD_SERIAL_NUMBER_LEN,
        ),
        FieldDescriptor::new(Field::ProductId, FILE_PRODUCT_ID_OFFSET, PRODUCT_ID_LEN),
        FieldDescriptor::new(Field::MacIds, FILE_MAC_ID_OFFSET, MAC_ID_BLOCK_LEN),
    ],
};

/// Layout of the I2C EEPROM.
pub const I2C_LAYOUT: Layout = Layout {
    name: "i2c",
    fields: &[
        FieldDescriptor::new(Field::SerialNumber, I2C_SERIAL_NUMBER_OFFSET, SERIAL_NUMBER_LEN),
        FieldDescriptor::new(
            Field::BoardSerialNumber,
            I2C_BOARD_SERIAL_NUMBER_OFFSET,
            BOARD_SERIAL_NUMBER_LEN,
        ),
        FieldDescriptor::new(Field::MacIds, I2C_MAC_ID_OFFSET, MAC_ID_BLOCK_LEN),
    ],
};

const _: () = assert!(FILE_MAC_ID_OFFSET + MAC_ID_BLOCK_LEN <= EEPROM_SIZE);
const _: () = assert!(I2C_MAC_ID_OFFSET + MAC_ID_BLOCK_LEN <= EEPROM_SIZE);

impl Layout {
    /// Short name of the variant, for logging.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Descriptors in storage order.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Whether `field` is stored in this layout.
    pub fn contains(&self, field: Field) -> bool {
        self.fields.iter().any(|d| d.field == field)
    }

    /// Descriptor for `field`.
    pub fn descriptor(&self, field: Field) -> Result<&'static FieldDescriptor> {
        self.fields
            .iter()
            .find(|d| d.field == field)
            .ok_or(Error::FieldNotPresent(field))
    }

    /// Resolve a command-line selector such as `BSRNUM`.
    ///
    /// Selectors naming a field this layout does not store are reported as
    /// unknown, the same as misspelled ones.
    pub fn lookup(&self, selector: &str) -> Result<&'static FieldDescriptor> {
        let field: Field = selector.parse()?;
        self.descriptor(field)
            .map_err(|_| Error::UnknownField(selector.to_owned()))
    }
}
