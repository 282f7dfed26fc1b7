//! Error types for model construction and record decoding.

use thiserror::Error;

use crate::band::BandKind;
use crate::field_order::BandField;

/// Result type for mixfriend-core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while building the model or decoding a record.
///
/// Encoding has no error path: a [`Device`](crate::Device) that exists is
/// already valid.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A band's raw fields cannot form a valid [`Band`](crate::Band).
    #[error("invalid {kind} band: {reason}")]
    InvalidBandConfiguration {
        /// The band stage being built.
        kind: BandKind,
        /// What was wrong with the supplied fields.
        reason: String,
    },

    /// A device's band list does not cover every [`BandKind`] exactly once.
    #[error("incomplete device profile: {kind} is {problem}")]
    IncompleteDeviceProfile {
        /// The first band kind found missing or repeated.
        kind: BandKind,
        /// Whether the kind was missing or supplied more than once.
        problem: CoverageProblem,
    },

    /// Bytes handed to the decoder are not a well-formed preset record.
    #[error("malformed preset record: {0}")]
    MalformedRecord(RecordDefect),

    /// A field ordering is not a permutation of the four band fields.
    #[error("invalid band field order: {field} appears {count} times")]
    InvalidFieldOrder {
        /// A field that does not appear exactly once.
        field: BandField,
        /// How often it appears.
        count: usize,
    },
}

impl Error {
    /// Create an invalid band configuration error.
    pub fn invalid_band(kind: BandKind, reason: impl Into<String>) -> Self {
        Error::InvalidBandConfiguration {
            kind,
            reason: reason.into(),
        }
    }

    /// Create an incomplete profile error for a kind with no entry.
    pub fn missing_band(kind: BandKind) -> Self {
        Error::IncompleteDeviceProfile {
            kind,
            problem: CoverageProblem::Missing,
        }
    }

    /// Create an incomplete profile error for a kind with several entries.
    pub fn duplicated_band(kind: BandKind) -> Self {
        Error::IncompleteDeviceProfile {
            kind,
            problem: CoverageProblem::Duplicated,
        }
    }

    /// The band kind this error is about, if any.
    pub fn band_kind(&self) -> Option<BandKind> {
        match self {
            Error::InvalidBandConfiguration { kind, .. }
            | Error::IncompleteDeviceProfile { kind, .. } => Some(*kind),
            Error::MalformedRecord(_) | Error::InvalidFieldOrder { .. } => None,
        }
    }
}

/// How a band kind fails to be covered exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageProblem {
    /// No entry for the kind.
    Missing,
    /// More than one entry for the kind.
    Duplicated,
}

impl core::fmt::Display for CoverageProblem {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CoverageProblem::Missing => f.write_str("missing"),
            CoverageProblem::Duplicated => f.write_str("duplicated"),
        }
    }
}

/// The specific way a byte sequence fails to be a preset record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordDefect {
    /// Input is not exactly one record long.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Required record length.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },

    /// A constant `u32` header field has an unexpected value.
    #[error("header field '{field}' is {actual}, expected {expected}")]
    HeaderField {
        /// Name of the header field.
        field: &'static str,
        /// The constant the format requires.
        expected: u32,
        /// The value found in the input.
        actual: u32,
    },

    /// The magic tag differs from the known tag.
    #[error("magic tag is {actual:02x?}, expected {expected:02x?}")]
    Magic {
        /// The known magic tag.
        expected: [u8; 8],
        /// The tag found in the input.
        actual: [u8; 8],
    },
}
