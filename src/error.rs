//! Error types for the eeprom-id crate.

use crate::eeprom::Field;

/// The error type for EEPROM field operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error from the file system or the I2C device node.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An I2C transfer failed or transferred fewer bytes than requested.
    #[error("I2C transfer failed: {0:?}")]
    I2c(embedded_hal::i2c::ErrorKind),

    /// The value written to a field does not match the field's fixed width.
    #[error("{} has an incorrect length.", .field.label())]
    IncorrectLength {
        /// The field being updated.
        field: Field,
        /// The field's fixed width in bytes.
        expected: usize,
        /// The length of the rejected value.
        actual: usize,
    },

    /// The MAC ID count is outside `1..=MAC_ID_COUNT`.
    #[error("Invalid number of MAC IDs. Must be between 1 and {max}.")]
    InvalidMacCount {
        /// The rejected count.
        count: u32,
        /// The number of MAC slots in the layout.
        max: usize,
    },

    /// The MAC ID count argument is not a number.
    #[error("Invalid argument for -updMACID.")]
    InvalidMacArgument(String),

    /// The read selector does not name a field of the active layout.
    #[error("Invalid argument for -updRD.")]
    UnknownField(String),

    /// The field exists but is not part of the active layout.
    #[error("{} is not stored in this EEPROM layout", .0.label())]
    FieldNotPresent(Field),

    /// Invalid argument(s) were provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The memory address does not fit in the two-byte address header.
    #[error("EEPROM address {0:#X} does not fit in a 16-bit address")]
    AddressOutOfRange(usize),
}

/// A specialized `Result` type for EEPROM field operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error came from rejecting user input rather than from
    /// the backing store.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::IncorrectLength { .. }
                | Error::InvalidMacCount { .. }
                | Error::InvalidMacArgument(_)
                | Error::UnknownField(_)
                | Error::FieldNotPresent(_)
        )
    }
}
