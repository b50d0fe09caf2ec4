//! Hex dump rendering of EEPROM contents.
//!
//! Each row covers 16 bytes: the row's starting offset, the bytes in hex,
//! then the printable ASCII rendering of the same bytes.
//!
//! ```
//! let dump = eeprom_id::hex_dump(b"SN01").to_string();
//! assert!(dump.starts_with("0x0000: 53 4E 30 31 "));
//! assert!(dump.ends_with("  SN01"));
//! ```

use std::fmt;

use crate::constants::HEX_DUMP_ROW;

/// Display adapter that renders a byte slice as hex dump rows.
///
/// Rows are separated by newlines; there is no trailing newline.
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a> {
    data: &'a [u8],
}

/// Wrap `data` for hex dump display.
pub fn hex_dump(data: &[u8]) -> HexDump<'_> {
    HexDump { data }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.data.chunks(HEX_DUMP_ROW).enumerate() {
            if row > 0 {
                f.write_str("\n")?;
            }
            write!(f, "0x{:04X}: ", row * HEX_DUMP_ROW)?;
            for b in chunk {
                write!(f, "{b:02X} ")?;
            }
            // Keep the sidebar aligned on a short last row
            for _ in chunk.len()..HEX_DUMP_ROW {
                f.write_str("   ")?;
            }
            f.write_str("  ")?;
            for &b in chunk {
                let c = if (32..=126).contains(&b) { b as char } else { '.' };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
