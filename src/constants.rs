//! Fixed sizes, offsets, and defaults for the identification EEPROM.
//!
//! The offsets here are the on-media format shared with already-programmed
//! boards. Changing any of them breaks compatibility with existing images.

// ---- Image ----

/// Size of the EEPROM image in bytes.
pub const EEPROM_SIZE: usize = 1024;

/// Number of bytes rendered per hex dump row.
pub const HEX_DUMP_ROW: usize = 16;

// ---- Field widths ----

/// Serial number width.
pub const SERIAL_NUMBER_LEN: usize = 18;
/// Board (PCB) serial number width.
pub const BOARD_SERIAL_NUMBER_LEN: usize = 18;
/// Product ID width.
pub const PRODUCT_ID_LEN: usize = 12;
/// Width of a single MAC ID slot.
pub const MAC_ID_LEN: usize = 6;
/// Number of MAC ID slots.
pub const MAC_ID_COUNT: usize = 3;
/// Width of the whole MAC ID block.
pub const MAC_ID_BLOCK_LEN: usize = MAC_ID_LEN * MAC_ID_COUNT;

// ---- File layout ----

/// Serial number offset in the file-backed image.
pub const FILE_SERIAL_NUMBER_OFFSET: usize = 0;
pub const FILE_BOARD_SERIAL_NUMBER_OFFSET: usize = FILE_SERIAL_NUMBER_OFFSET + SERIAL_NUMBER_LEN;
pub const FILE_PRODUCT_ID_OFFSET: usize = FILE_BOARD_SERIAL_NUMBER_OFFSET + BOARD_SERIAL_NUMBER_LEN;
pub const FILE_MAC_ID_OFFSET: usize = FILE_PRODUCT_ID_OFFSET + PRODUCT_ID_LEN;

// ---- I2C layout ----

/// Serial number offset on the I2C EEPROM.
pub const I2C_SERIAL_NUMBER_OFFSET: usize = 100;
pub const I2C_BOARD_SERIAL_NUMBER_OFFSET: usize = I2C_SERIAL_NUMBER_OFFSET + SERIAL_NUMBER_LEN;
/// The I2C layout carries no product ID; MAC IDs follow the board serial.
pub const I2C_MAC_ID_OFFSET: usize = I2C_BOARD_SERIAL_NUMBER_OFFSET + BOARD_SERIAL_NUMBER_LEN;

// ---- MAC IDs ----

/// Vendor prefix of generated MAC IDs (`A0:FC:72:00:53:xx`).
pub const MAC_ID_PREFIX: [u8; 5] = [0xA0, 0xFC, 0x72, 0x00, 0x53];

// ---- Backend defaults ----

/// Default path of the simulated EEPROM image.
pub const DEFAULT_IMAGE_PATH: &str = "eeprom_data.bin";

/// Default I2C bus device node.
pub const DEFAULT_I2C_BUS: &str = "/dev/i2c-1";

/// Default 7-bit slave address of the EEPROM.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x50;
