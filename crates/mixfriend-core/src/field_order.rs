//! Ordering of the four `f32` fields inside a 16-byte band record.
//!
//! The order `[Q, enabled, frequency, gain]` was reverse-engineered from a
//! single captured preset and has not been confirmed against the target
//! application. It lives here, and only here, so a different capture can
//! correct it in one declaration ([`FieldOrder::REVERSE_ENGINEERED`]) or at
//! runtime via [`FieldOrder::new`] / [`str::parse`].
//!
//! Both [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder) read the
//! band layout exclusively through [`FieldOrder::slots`].

use core::fmt;
use core::str::FromStr;

use crate::band::Band;
use crate::error::{Error, Result};

/// One of the four values stored per band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandField {
    /// Quality factor.
    Q,
    /// Enabled flag, stored as `1.0` or `0.0`.
    Enabled,
    /// Frequency in Hz.
    Frequency,
    /// Gain in dB.
    Gain,
}

impl BandField {
    /// All fields, in declaration order.
    pub const ALL: [BandField; 4] = [
        BandField::Q,
        BandField::Enabled,
        BandField::Frequency,
        BandField::Gain,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            BandField::Q => "q",
            BandField::Enabled => "enabled",
            BandField::Frequency => "frequency",
            BandField::Gain => "gain",
        }
    }

    /// The on-disk `f32` for this field of `band`.
    pub fn read(self, band: &Band) -> f32 {
        match self {
            BandField::Q => band.q(),
            BandField::Enabled => {
                if band.enabled() {
                    1.0
                } else {
                    0.0
                }
            }
            BandField::Frequency => band.frequency(),
            BandField::Gain => band.gain(),
        }
    }
}

impl fmt::Display for BandField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandField {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "q" => Ok(BandField::Q),
            "enabled" | "enable" | "on" => Ok(BandField::Enabled),
            "frequency" | "freq" | "f" => Ok(BandField::Frequency),
            "gain" | "g" => Ok(BandField::Gain),
            other => Err(format!("unknown band field: {other}")),
        }
    }
}

/// Byte size of one field.
const FIELD_SIZE: usize = 4;

/// The sequence in which a band's four fields are written.
///
/// Always a permutation of [`BandField::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldOrder([BandField; 4]);

impl FieldOrder {
    /// The order observed in the captured reference preset.
    pub const REVERSE_ENGINEERED: FieldOrder = FieldOrder([
        BandField::Q,
        BandField::Enabled,
        BandField::Frequency,
        BandField::Gain,
    ]);

    /// Creates an order, rejecting anything that is not a permutation.
    pub fn new(fields: [BandField; 4]) -> Result<Self> {
        for field in BandField::ALL {
            let count = fields.iter().filter(|&&f| f == field).count();
            if count != 1 {
                return Err(Error::InvalidFieldOrder { field, count });
            }
        }
        Ok(Self(fields))
    }

    /// Fields in write order.
    pub const fn fields(&self) -> [BandField; 4] {
        self.0
    }

    /// `(byte offset within the band record, field)` pairs in write order.
    pub fn slots(&self) -> impl Iterator<Item = (usize, BandField)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &field)| (i * FIELD_SIZE, field))
    }

    /// Byte offset of `field` within a band record.
    pub fn offset_of(&self, field: BandField) -> usize {
        self.slots()
            .find(|&(_, f)| f == field)
            .map(|(offset, _)| offset)
            .unwrap_or_default()
    }
}

impl Default for FieldOrder {
    fn default() -> Self {
        Self::REVERSE_ENGINEERED
    }
}

impl fmt::Display for FieldOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a},{b},{c},{d}")
    }
}

impl FromStr for FieldOrder {
    type Err = String;

    /// Parses a comma-separated list such as `"q,enabled,frequency,gain"`.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let fields = s
            .split(',')
            .map(str::parse::<BandField>)
            .collect::<core::result::Result<Vec<_>, _>>()?;
        let fields: [BandField; 4] = fields
            .try_into()
            .map_err(|v: Vec<BandField>| format!("expected 4 fields, got {}", v.len()))?;
        FieldOrder::new(fields).map_err(|e| e.to_string())
    }
}
