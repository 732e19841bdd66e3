//! Device identity derived from the factory-programmed hardware address.
//!
//! The advertised name and the QR payload are both `"<tag>-<id>"`, where
//! `<id>` is a 24-bit fold of the 48-bit hardware id. No state is persisted:
//! the same chip always yields the same name.

use core::fmt::Write;

use heapless::String;

use crate::config::IDENTITY_CAPACITY;

/// Fold a 48-bit hardware id into the numeric device id.
///
/// Bytes `[47:40]`, `[39:32]` and `[31:24]` land at bit offsets 0, 8 and 16
/// of the result, so the top byte of the address becomes the least
/// significant byte of the id.
pub fn fold_hardware_id(hardware_id: u64) -> u32 {
    let mut id = 0u32;
    for shift in [0u32, 8, 16] {
        let byte = ((hardware_id >> (40 - shift)) & 0xFF) as u32;
        id |= byte << shift;
    }
    id
}

/// Immutable `"<tag>-<id>"` device name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceIdentity {
    name: String<IDENTITY_CAPACITY>,
}

impl DeviceIdentity {
    /// Build the identity for `hardware_id` under `type_tag`.
    ///
    /// Returns `None` if `"<tag>-<id>"` does not fit in
    /// [`IDENTITY_CAPACITY`] bytes; a truncated name is never produced.
    pub fn derive(type_tag: &str, hardware_id: u64) -> Option<Self> {
        let mut name = String::new();
        write!(&mut name, "{}-{}", type_tag, fold_hardware_id(hardware_id)).ok()?;
        Some(Self { name })
    }

    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }
}
