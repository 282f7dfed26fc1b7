//! EQ band model.
//!
//! A device profile is eight cascaded filter stages. Each stage is a
//! [`BandKind`] (which fixes its position in the record) plus four values:
//! frequency, gain, Q, and an enabled flag.
//!
//! [`BandSpec`] carries the fields exactly as a profile source supplied them,
//! with omissions left as `None`. [`Band::from_spec`] resolves defaults and
//! enforces the invariants, so every [`Band`] in existence is valid.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::error::{Error, Result};

/// Default Q when a band does not specify one (Butterworth, maximally flat).
pub const DEFAULT_Q: f32 = 0.71;

/// Default gain in dB when a band does not specify one.
pub const DEFAULT_GAIN: f32 = 0.0;

/// The eight filter stages of the Channel EQ, in record order.
///
/// The declaration order is the on-disk order of the band table and must not
/// change. [`BandKind::ALL`] and [`BandKind::index`] both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BandKind {
    /// Low cut; gain is fixed at 0 dB.
    HighPassFilter,
    /// Low shelf.
    LowShelf,
    /// First parametric peak/dip.
    Parametric1,
    /// Second parametric peak/dip.
    Parametric2,
    /// Third parametric peak/dip.
    Parametric3,
    /// Fourth parametric peak/dip.
    Parametric4,
    /// High shelf.
    HighShelf,
    /// High cut; gain is fixed at 0 dB.
    LowPassFilter,
}

impl BandKind {
    /// Every kind, in record order.
    pub const ALL: [BandKind; 8] = [
        BandKind::HighPassFilter,
        BandKind::LowShelf,
        BandKind::Parametric1,
        BandKind::Parametric2,
        BandKind::Parametric3,
        BandKind::Parametric4,
        BandKind::HighShelf,
        BandKind::LowPassFilter,
    ];

    /// Position of this kind in the band table (0..8).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The kind stored at `index` in the band table.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Enumeration name, e.g. `"Parametric3"`.
    pub const fn name(self) -> &'static str {
        match self {
            BandKind::HighPassFilter => "HighPassFilter",
            BandKind::LowShelf => "LowShelf",
            BandKind::Parametric1 => "Parametric1",
            BandKind::Parametric2 => "Parametric2",
            BandKind::Parametric3 => "Parametric3",
            BandKind::Parametric4 => "Parametric4",
            BandKind::HighShelf => "HighShelf",
            BandKind::LowPassFilter => "LowPassFilter",
        }
    }

    /// Key used in profile files, e.g. `"parametric_3"`.
    pub const fn key(self) -> &'static str {
        match self {
            BandKind::HighPassFilter => "high_pass",
            BandKind::LowShelf => "low_shelf",
            BandKind::Parametric1 => "parametric_1",
            BandKind::Parametric2 => "parametric_2",
            BandKind::Parametric3 => "parametric_3",
            BandKind::Parametric4 => "parametric_4",
            BandKind::HighShelf => "high_shelf",
            BandKind::LowPassFilter => "low_pass",
        }
    }

    /// Whether this is one of the cut filters whose gain must stay at 0 dB.
    pub const fn is_pass_filter(self) -> bool {
        matches!(self, BandKind::HighPassFilter | BandKind::LowPassFilter)
    }
}

impl fmt::Display for BandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A band name that matches no [`BandKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown band kind: {0}")]
pub struct ParseBandKindError(pub String);

impl FromStr for BandKind {
    type Err = ParseBandKindError;

    /// Accepts the enumeration name, the profile key, or a short alias
    /// (`hpf`, `hp`, `lpf`, `lp`, `ls`, `hs`, `p1`..`p4`). Matching ignores
    /// ASCII case, `_`, `-` and spaces.
    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match normalized.as_str() {
            "highpassfilter" | "highpass" | "hpf" | "hp" | "lowcut" => BandKind::HighPassFilter,
            "lowshelf" | "ls" => BandKind::LowShelf,
            "parametric1" | "p1" => BandKind::Parametric1,
            "parametric2" | "p2" => BandKind::Parametric2,
            "parametric3" | "p3" => BandKind::Parametric3,
            "parametric4" | "p4" => BandKind::Parametric4,
            "highshelf" | "hs" => BandKind::HighShelf,
            "lowpassfilter" | "lowpass" | "lpf" | "lp" | "highcut" => BandKind::LowPassFilter,
            _ => return Err(ParseBandKindError(s.to_string())),
        };
        Ok(kind)
    }
}

/// Raw band fields as supplied by a profile source.
///
/// `None` means "not supplied". Defaults are applied by [`Band::from_spec`],
/// which is also where the supplied values are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandSpec {
    /// Center or corner frequency in Hz. Required.
    pub frequency: Option<f32>,
    /// Gain in dB. Defaults to [`DEFAULT_GAIN`].
    pub gain: Option<f32>,
    /// Quality factor. Defaults to [`DEFAULT_Q`].
    pub q: Option<f32>,
    /// Whether the stage is active. Defaults to `true`.
    pub enabled: Option<bool>,
}

impl BandSpec {
    /// A spec with only the frequency supplied.
    pub const fn at(frequency: f32) -> Self {
        Self {
            frequency: Some(frequency),
            gain: None,
            q: None,
            enabled: None,
        }
    }

    /// Supply a gain in dB.
    pub const fn gain(mut self, gain: f32) -> Self {
        self.gain = Some(gain);
        self
    }

    /// Supply a Q.
    pub const fn q(mut self, q: f32) -> Self {
        self.q = Some(q);
        self
    }

    /// Supply the enabled flag.
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Shorthand for `enabled(false)`.
    pub const fn disabled(self) -> Self {
        self.enabled(false)
    }
}

/// One validated filter stage.
///
/// Values are written to the record unchanged; no range checking or clamping
/// happens here, the consuming application does its own. A disabled band keeps
/// its frequency, gain and Q.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    kind: BandKind,
    frequency: f32,
    gain: f32,
    q: f32,
    enabled: bool,
}

impl Band {
    /// Creates an enabled band at `frequency` with default gain and Q.
    pub const fn new(kind: BandKind, frequency: f32) -> Self {
        Self {
            kind,
            frequency,
            gain: DEFAULT_GAIN,
            q: DEFAULT_Q,
            enabled: true,
        }
    }

    /// Builds a band from raw fields, resolving defaults.
    ///
    /// Fails with [`Error::InvalidBandConfiguration`] when the frequency is
    /// absent, or when a cut filter ([`BandKind::is_pass_filter`]) is given a
    /// gain other than zero.
    pub fn from_spec(kind: BandKind, spec: &BandSpec) -> Result<Self> {
        let frequency = spec
            .frequency
            .ok_or_else(|| Error::invalid_band(kind, "frequency is required"))?;

        let gain = spec.gain.unwrap_or(DEFAULT_GAIN);
        // NaN also fails this comparison
        if kind.is_pass_filter() && gain != 0.0 {
            return Err(Error::invalid_band(
                kind,
                format!("gain must be 0 dB on a cut filter, got {gain}"),
            ));
        }

        Ok(Self {
            kind,
            frequency,
            gain,
            q: spec.q.unwrap_or(DEFAULT_Q),
            enabled: spec.enabled.unwrap_or(true),
        })
    }

    /// The stage this band occupies.
    pub const fn kind(&self) -> BandKind {
        self.kind
    }

    /// Frequency in Hz.
    pub const fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Gain in dB.
    pub const fn gain(&self) -> f32 {
        self.gain
    }

    /// Quality factor.
    pub const fn q(&self) -> f32 {
        self.q
    }

    /// Whether the stage is active.
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// The spec that rebuilds this band, with every field supplied.
    pub const fn to_spec(&self) -> BandSpec {
        BandSpec {
            frequency: Some(self.frequency),
            gain: Some(self.gain),
            q: Some(self.q),
            enabled: Some(self.enabled),
        }
    }

    /// Bitwise comparison of all fields.
    ///
    /// Unlike `==`, this treats two NaNs with the same payload as equal and
    /// distinguishes `0.0` from `-0.0`, which is what record fidelity needs.
    pub fn bit_eq(&self, other: &Band) -> bool {
        self.kind == other.kind
            && self.enabled == other.enabled
            && self.frequency.to_bits() == other.frequency.to_bits()
            && self.gain.to_bits() == other.gain.to_bits()
            && self.q.to_bits() == other.q.to_bits()
    }
}
