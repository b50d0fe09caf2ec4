//! MAC ID generation and rendering.
//!
//! Each slot of the MAC ID block holds one address as six raw octets. Slots
//! are numbered from 1; slot `n` is assigned `A0:FC:72:00:53:<n>`.

use mac_address::MacAddress;

use crate::constants::{MAC_ID_COUNT, MAC_ID_LEN, MAC_ID_PREFIX};
use crate::error::{Error, Result};

/// Parse the `--updMACID` argument into a slot count.
pub fn parse_count(arg: &str) -> Result<usize> {
    let count: u32 = arg
        .trim()
        .parse()
        .map_err(|_| Error::InvalidMacArgument(arg.to_owned()))?;
    if count == 0 || count as usize > MAC_ID_COUNT {
        return Err(Error::InvalidMacCount {
            count,
            max: MAC_ID_COUNT,
        });
    }
    Ok(count as usize)
}

/// MAC ID assigned to slot `index` (1-based).
pub fn mac_id(index: u8) -> MacAddress {
    let mut bytes = [0u8; MAC_ID_LEN];
    bytes[..MAC_ID_PREFIX.len()].copy_from_slice(&MAC_ID_PREFIX);
    bytes[MAC_ID_LEN - 1] = index;
    MacAddress::new(bytes)
}

/// MAC IDs for slots `1..=count`.
pub fn generate(count: usize) -> Result<Vec<MacAddress>> {
    if count == 0 || count > MAC_ID_COUNT {
        return Err(Error::InvalidMacCount {
            count: count as u32,
            max: MAC_ID_COUNT,
        });
    }
    Ok((1..=count as u8).map(mac_id).collect())
}

/// Render one slot of the MAC ID block.
///
/// A cleared (all-zero) slot renders as an empty string.
pub fn slot_text(slot: &[u8]) -> String {
    match <[u8; MAC_ID_LEN]>::try_from(slot) {
        Ok(bytes) if bytes.iter().any(|&b| b != 0) => MacAddress::new(bytes).to_string(),
        _ => String::new(),
    }
}
