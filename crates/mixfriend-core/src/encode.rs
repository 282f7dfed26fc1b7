//! Device to preset record.

use crate::device::{BandTable, Device};
use crate::field_order::FieldOrder;
use crate::layout::{FOOTER, FOOTER_OFFSET, HEADER, HEADER_SIZE, RECORD_SIZE, band_offset};

/// Writes devices as 240-byte preset records.
///
/// Stateless apart from the band [`FieldOrder`]; one encoder can be shared
/// across threads and reused for any number of devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Encoder {
    field_order: FieldOrder,
}

impl Encoder {
    /// An encoder using [`FieldOrder::REVERSE_ENGINEERED`].
    pub const fn new() -> Self {
        Self {
            field_order: FieldOrder::REVERSE_ENGINEERED,
        }
    }

    /// An encoder writing band fields in `field_order`.
    pub const fn with_field_order(field_order: FieldOrder) -> Self {
        Self { field_order }
    }

    /// The band field order in use.
    pub const fn field_order(&self) -> FieldOrder {
        self.field_order
    }

    /// Encodes `device` into a complete record.
    pub fn encode(&self, device: &Device) -> [u8; RECORD_SIZE] {
        #[cfg(feature = "tracing")]
        tracing::trace!(device = device.name(), order = %self.field_order, "encoding preset");

        self.encode_bands(device.bands())
    }

    /// Encodes a band table into a complete record.
    ///
    /// Header and footer are the fixed constants; only bytes
    /// `24..152` depend on `bands`.
    pub fn encode_bands(&self, bands: &BandTable) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[..HEADER_SIZE].copy_from_slice(&HEADER);

        for (index, band) in bands.iter().enumerate() {
            let base = band_offset(index);
            for (offset, field) in self.field_order.slots() {
                let at = base + offset;
                out[at..at + 4].copy_from_slice(&field.read(band).to_le_bytes());
            }
        }

        out[FOOTER_OFFSET..].copy_from_slice(&FOOTER);
        out
    }
}

/// Encodes `device` with the default field order.
///
/// Total and pure: the result is always exactly [`RECORD_SIZE`] bytes.
pub fn encode(device: &Device) -> [u8; RECORD_SIZE] {
    Encoder::new().encode(device)
}
