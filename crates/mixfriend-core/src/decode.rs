//! Preset record back to band values.
//!
//! The decoder exists to verify encoder output against captured reference
//! files. It checks the record length and every constant header field, then
//! rebuilds the band table through [`Band::from_spec`], so the same
//! invariants hold for decoded bands as for loaded ones. The device name is
//! not stored in the record and cannot be recovered.

use crate::band::{Band, BandKind, BandSpec};
use crate::device::BandTable;
use crate::error::{Error, RecordDefect, Result};
use crate::field_order::{BandField, FieldOrder};
use crate::layout::{
    DATA_SIZE, FOOTER, FOOTER_OFFSET, FOOTER_SIZE, FORMAT_VERSION, MAGIC, RECORD_SIZE, RESERVED,
    band_offset, header,
};

/// A decoded record: the band table plus the raw footer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    /// The eight bands, in record order.
    pub bands: BandTable,
    /// The trailing settings block exactly as found.
    pub footer: [u8; FOOTER_SIZE],
}

impl DecodedRecord {
    /// Whether the footer equals the built-in [`FOOTER`] constant.
    pub fn footer_matches_reference(&self) -> bool {
        self.footer == FOOTER
    }

    /// Byte offsets, relative to the footer start, where the footer differs
    /// from the built-in constant.
    pub fn footer_drift(&self) -> Vec<usize> {
        self.footer
            .iter()
            .zip(FOOTER.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Reads preset records using a given band [`FieldOrder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    field_order: FieldOrder,
}

impl Decoder {
    /// A decoder using [`FieldOrder::REVERSE_ENGINEERED`].
    pub const fn new() -> Self {
        Self {
            field_order: FieldOrder::REVERSE_ENGINEERED,
        }
    }

    /// A decoder reading band fields in `field_order`.
    pub const fn with_field_order(field_order: FieldOrder) -> Self {
        Self { field_order }
    }

    /// Decodes the band table of `bytes`.
    pub fn decode(&self, bytes: &[u8]) -> Result<BandTable> {
        self.decode_record(bytes).map(|record| record.bands)
    }

    /// Decodes the band table and keeps the raw footer.
    ///
    /// Fails with [`Error::MalformedRecord`] when `bytes` is not exactly
    /// [`RECORD_SIZE`] long or a constant header field differs. The footer
    /// is returned as-is, never checked.
    pub fn decode_record(&self, bytes: &[u8]) -> Result<DecodedRecord> {
        let record: &[u8; RECORD_SIZE] = bytes.try_into().map_err(|_| {
            Error::MalformedRecord(RecordDefect::Length {
                expected: RECORD_SIZE,
                actual: bytes.len(),
            })
        })?;

        check_header(record)?;

        let mut bands = BandKind::ALL.map(|kind| Band::new(kind, 0.0));
        for (index, kind) in BandKind::ALL.into_iter().enumerate() {
            bands[index] = self.read_band(record, kind)?;
        }

        let mut footer = [0u8; FOOTER_SIZE];
        footer.copy_from_slice(&record[FOOTER_OFFSET..]);

        Ok(DecodedRecord {
            bands: BandTable::from_array(bands),
            footer,
        })
    }

    fn read_band(&self, record: &[u8; RECORD_SIZE], kind: BandKind) -> Result<Band> {
        let base = band_offset(kind.index());
        let mut spec = BandSpec::default();

        for (offset, field) in self.field_order.slots() {
            let value = read_f32(record, base + offset);
            match field {
                BandField::Q => spec.q = Some(value),
                BandField::Enabled => {
                    #[cfg(feature = "tracing")]
                    if value != 0.0 && value != 1.0 {
                        tracing::debug!(band = %kind, value, "unusual enabled flag, treating as on");
                    }
                    spec.enabled = Some(value != 0.0);
                }
                BandField::Frequency => spec.frequency = Some(value),
                BandField::Gain => spec.gain = Some(value),
            }
        }

        Band::from_spec(kind, &spec)
    }
}

fn check_header(record: &[u8; RECORD_SIZE]) -> Result<()> {
    let fields = [
        ("file size", header::FILE_SIZE, RECORD_SIZE as u32),
        ("format version", header::VERSION, FORMAT_VERSION),
        ("reserved", header::RESERVED, RESERVED),
        ("data size", header::DATA_SIZE, DATA_SIZE),
    ];
    for (field, offset, expected) in fields {
        let actual = read_u32(record, offset);
        if actual != expected {
            #[cfg(feature = "tracing")]
            tracing::debug!(field, expected, actual, "preset header mismatch");
            return Err(Error::MalformedRecord(RecordDefect::HeaderField {
                field,
                expected,
                actual,
            }));
        }
    }

    let mut magic = [0u8; 8];
    magic.copy_from_slice(&record[header::MAGIC..header::MAGIC + 8]);
    if magic != MAGIC {
        return Err(Error::MalformedRecord(RecordDefect::Magic {
            expected: MAGIC,
            actual: magic,
        }));
    }
    Ok(())
}

fn read_u32(record: &[u8; RECORD_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
}

fn read_f32(record: &[u8; RECORD_SIZE], at: usize) -> f32 {
    f32::from_le_bytes([record[at], record[at + 1], record[at + 2], record[at + 3]])
}

/// Decodes the band table of `bytes` with the default field order.
pub fn decode(bytes: &[u8]) -> Result<BandTable> {
    Decoder::new().decode(bytes)
}

/// Decodes `bytes` with the default field order, keeping the raw footer.
pub fn decode_record(bytes: &[u8]) -> Result<DecodedRecord> {
    Decoder::new().decode_record(bytes)
}
