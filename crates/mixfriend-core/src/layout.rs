//! Fixed layout of the 240-byte Channel EQ preset record.
//!
//! The header values, magic tag and footer were taken from a known-good
//! preset captured from the target application. They are opaque constants:
//! if a newer capture differs, replace the constant wholesale and let
//! [`DecodedRecord::footer_matches_reference`](crate::DecodedRecord::footer_matches_reference)
//! flag the drift against the old one.

/// Total record length in bytes.
pub const RECORD_SIZE: usize = 240;

/// Length of the header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Number of band records in the band table.
pub const BAND_COUNT: usize = 8;

/// Length of one band record: four `f32` fields.
pub const BAND_RECORD_SIZE: usize = 16;

/// Length of the band table in bytes.
pub const BAND_TABLE_SIZE: usize = BAND_COUNT * BAND_RECORD_SIZE;

/// Offset of the first band record.
pub const BAND_TABLE_OFFSET: usize = HEADER_SIZE;

/// Offset of the footer.
pub const FOOTER_OFFSET: usize = BAND_TABLE_OFFSET + BAND_TABLE_SIZE;

/// Length of the footer in bytes.
pub const FOOTER_SIZE: usize = RECORD_SIZE - FOOTER_OFFSET;

/// Header field: format version.
pub const FORMAT_VERSION: u32 = 1;

/// Header field: reserved, meaning unknown, always 52 in captured presets.
pub const RESERVED: u32 = 52;

/// Header field: magic tag, 8 raw ASCII bytes with no terminator.
pub const MAGIC: [u8; 8] = *b"GAMETSPP";

/// Header field: size of everything after the first `u32`.
pub const DATA_SIZE: u32 = 236;

/// Byte offsets of the header fields.
pub(crate) mod header {
    pub const FILE_SIZE: usize = 0;
    pub const VERSION: usize = 4;
    pub const RESERVED: usize = 8;
    pub const MAGIC: usize = 12;
    pub const DATA_SIZE: usize = 20;
}

/// The complete 24-byte header. Identical for every device.
pub const HEADER: [u8; HEADER_SIZE] = build_header();

const fn build_header() -> [u8; HEADER_SIZE] {
    let mut out = [0u8; HEADER_SIZE];
    put_u32(&mut out, header::FILE_SIZE, RECORD_SIZE as u32);
    put_u32(&mut out, header::VERSION, FORMAT_VERSION);
    put_u32(&mut out, header::RESERVED, RESERVED);
    let mut i = 0;
    while i < MAGIC.len() {
        out[header::MAGIC + i] = MAGIC[i];
        i += 1;
    }
    put_u32(&mut out, header::DATA_SIZE, DATA_SIZE);
    out
}

const fn put_u32(out: &mut [u8; HEADER_SIZE], offset: usize, value: u32) {
    let bytes = value.to_le_bytes();
    let mut i = 0;
    while i < 4 {
        out[offset + i] = bytes[i];
        i += 1;
    }
}

/// Trailing settings block (analyzer settings, output gain and similar).
///
/// Identical across every captured preset and unrelated to the EQ bands.
#[rustfmt::skip]
pub const FOOTER: [u8; FOOTER_SIZE] = [
    0x8f, 0xc2, 0x35, 0x3f, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x33, 0x33, 0x43, 0x41,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x41,
    0x00, 0x00, 0x80, 0x3f, 0x00, 0x00, 0x00, 0xbf,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3f,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x3f,
    0x00, 0x00, 0x70, 0x42, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x70, 0x42, 0x00, 0x00, 0x80, 0x3f,
    0x78, 0x38, 0x50, 0x4c, 0x08, 0x00, 0x00, 0x00,
];

/// Offset of band `index`'s 16-byte record within the full record.
pub const fn band_offset(index: usize) -> usize {
    BAND_TABLE_OFFSET + index * BAND_RECORD_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_add_up() {
        assert_eq!(HEADER_SIZE + BAND_TABLE_SIZE + FOOTER_SIZE, RECORD_SIZE);
        assert_eq!(BAND_TABLE_SIZE, 128);
        assert_eq!(FOOTER_OFFSET, 152);
        assert_eq!(FOOTER_SIZE, 88);
        assert_eq!(DATA_SIZE as usize, RECORD_SIZE - 4);
    }

    #[test]
    fn header_bytes() {
        let expected: [u8; 24] = [
            0xf0, 0x00, 0x00, 0x00, // 240
            0x01, 0x00, 0x00, 0x00, // 1
            0x34, 0x00, 0x00, 0x00, // 52
            b'G', b'A', b'M', b'E', b'T', b'S', b'P', b'P', //
            0xec, 0x00, 0x00, 0x00, // 236
        ];
        assert_eq!(HEADER, expected);
    }

    #[test]
    fn band_offsets() {
        assert_eq!(band_offset(0), 24);
        assert_eq!(band_offset(7), 136);
        assert_eq!(band_offset(BAND_COUNT), FOOTER_OFFSET);
    }

    #[test]
    fn footer_starts_with_known_float() {
        let first = f32::from_le_bytes([FOOTER[0], FOOTER[1], FOOTER[2], FOOTER[3]]);
        assert!((first - 0.71).abs() < 1e-6);
    }
}
