//! Mixfriend Core - device EQ profiles and the Channel EQ preset record
//!
//! This crate holds the in-memory model for a playback-device EQ profile and
//! the byte-exact codec for the fixed 240-byte preset record that the target
//! application's Channel EQ preset loader accepts.
//!
//! # Core Abstractions
//!
//! ## Model
//!
//! - [`BandKind`] - The eight filter stages, in on-disk order
//! - [`BandSpec`] - Raw band fields as supplied by a profile source
//! - [`Band`] - One validated filter stage with defaults resolved
//! - [`BandTable`] - Exactly eight bands, one per [`BandKind`]
//! - [`Device`] - A named profile owning a [`BandTable`]
//!
//! ## Record Codec
//!
//! - [`encode`] / [`Encoder`] - `Device` to 240 bytes, total and pure
//! - [`decode`] / [`Decoder`] - 240 bytes back to a [`BandTable`]
//! - [`decode_record`] - Band table plus the raw footer, for drift checks
//! - [`FieldOrder`] - The per-band float ordering policy shared by both
//!
//! # Record Layout
//!
//! ```text
//! offset  size  field
//!      0     4  total file size   u32 LE = 240
//!      4     4  format version    u32 LE = 1
//!      8     4  reserved          u32 LE = 52
//!     12     8  magic tag         b"GAMETSPP"
//!     20     4  data size         u32 LE = 236
//!     24   128  band table        8 x [f32 LE; 4], in FieldOrder
//!    152    88  footer            constant bytes
//! ```
//!
//! # Example
//!
//! ```rust
//! use mixfriend_core::{BandKind, BandSpec, Device, decode, encode};
//!
//! let device = Device::new(
//!     "Phone Speaker",
//!     [
//!         (BandKind::HighPassFilter, BandSpec::at(250.0)),
//!         (BandKind::LowShelf, BandSpec::at(100.0).gain(-8.0)),
//!         (BandKind::Parametric1, BandSpec::at(500.0)),
//!         (BandKind::Parametric2, BandSpec::at(1500.0)),
//!         (BandKind::Parametric3, BandSpec::at(3000.0)),
//!         (BandKind::Parametric4, BandSpec::at(6000.0)),
//!         (BandKind::HighShelf, BandSpec::at(8000.0)),
//!         (BandKind::LowPassFilter, BandSpec::at(11000.0)),
//!     ],
//! )?;
//!
//! let bytes = encode(&device);
//! assert_eq!(bytes.len(), 240);
//! assert_eq!(decode(&bytes)?, *device.bands());
//! # Ok::<(), mixfriend_core::Error>(())
//! ```
//!
//! # Design Principles
//!
//! - **Validate once**: every invariant is checked when a [`Band`] or
//!   [`Device`] is built, so encoding cannot fail
//! - **No I/O**: bytes in, bytes out; files belong to the caller
//! - **Lossless**: band values are `f32` end to end, never widened or rounded

pub mod band;
pub mod decode;
pub mod device;
pub mod encode;
pub mod error;
pub mod field_order;
pub mod layout;

pub use band::{Band, BandKind, BandSpec, DEFAULT_GAIN, DEFAULT_Q, ParseBandKindError};
pub use decode::{DecodedRecord, Decoder, decode, decode_record};
pub use device::{BandTable, Device};
pub use encode::{Encoder, encode};
pub use error::{CoverageProblem, Error, RecordDefect, Result};
pub use field_order::{BandField, FieldOrder};
pub use layout::{
    BAND_COUNT, BAND_RECORD_SIZE, BAND_TABLE_OFFSET, BAND_TABLE_SIZE, DATA_SIZE, FOOTER,
    FOOTER_OFFSET, FOOTER_SIZE, FORMAT_VERSION, HEADER, HEADER_SIZE, MAGIC, RECORD_SIZE,
    RESERVED,
};
