//! Device profiles: a name plus exactly eight bands.

use core::ops::Index;

use crate::band::{Band, BandKind, BandSpec};
use crate::error::{Error, Result};
use crate::layout::BAND_COUNT;

/// Exactly one [`Band`] per [`BandKind`], stored in record order.
///
/// The array length and the placement by [`BandKind::index`] make a missing,
/// extra or misplaced band unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandTable([Band; BAND_COUNT]);

impl BandTable {
    /// Builds a table from one entry per kind, in any order.
    ///
    /// Each spec is validated with [`Band::from_spec`]. A kind supplied twice
    /// or not at all fails with [`Error::IncompleteDeviceProfile`] naming
    /// the first offending kind; duplicates are reported before gaps.
    pub fn from_specs<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BandKind, BandSpec)>,
    {
        let mut filled = [false; BAND_COUNT];
        let mut bands = BandKind::ALL.map(|kind| Band::new(kind, 0.0));

        for (kind, spec) in entries {
            let slot = kind.index();
            if filled[slot] {
                return Err(Error::duplicated_band(kind));
            }
            bands[slot] = Band::from_spec(kind, &spec)?;
            filled[slot] = true;
        }

        if let Some(slot) = filled.iter().position(|&f| !f) {
            return Err(Error::missing_band(BandKind::ALL[slot]));
        }

        Ok(Self(bands))
    }

    /// Builds a table from already-validated bands, in any order.
    pub fn from_bands<I>(bands: I) -> Result<Self>
    where
        I: IntoIterator<Item = Band>,
    {
        Self::from_specs(bands.into_iter().map(|b| (b.kind(), b.to_spec())))
    }

    /// The band for `kind`.
    pub fn get(&self, kind: BandKind) -> &Band {
        &self.0[kind.index()]
    }

    /// Bands in record order.
    pub fn iter(&self) -> core::slice::Iter<'_, Band> {
        self.0.iter()
    }

    /// Bands in record order, as an array.
    pub fn as_array(&self) -> &[Band; BAND_COUNT] {
        &self.0
    }

    /// Number of enabled bands.
    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|b| b.enabled()).count()
    }

    /// Whether every band matches `other` bit for bit.
    pub fn bit_eq(&self, other: &BandTable) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(a, b)| a.bit_eq(b))
    }

    /// The first band, in record order, that differs bitwise from `other`.
    pub fn first_difference(&self, other: &BandTable) -> Option<BandKind> {
        self.0
            .iter()
            .zip(other.0.iter())
            .find(|(a, b)| !a.bit_eq(b))
            .map(|(a, _)| a.kind())
    }

    pub(crate) fn from_array(bands: [Band; BAND_COUNT]) -> Self {
        Self(bands)
    }
}

impl Index<BandKind> for BandTable {
    type Output = Band;

    fn index(&self, kind: BandKind) -> &Band {
        self.get(kind)
    }
}

impl<'a> IntoIterator for &'a BandTable {
    type Item = &'a Band;
    type IntoIter = core::slice::Iter<'a, Band>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A named playback-device profile.
///
/// Immutable once built. The name identifies the profile within a loaded set
/// and is not part of the encoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    name: String,
    bands: BandTable,
}

impl Device {
    /// Builds a device from one `(kind, spec)` entry per band, in any order.
    ///
    /// See [`BandTable::from_specs`] for the failure cases.
    pub fn new<I>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (BandKind, BandSpec)>,
    {
        let name = name.into();
        let bands = BandTable::from_specs(entries)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            device = %name,
            active = bands.active_count(),
            "device profile built"
        );

        Ok(Self { name, bands })
    }

    /// Wraps an existing band table.
    pub fn from_table(name: impl Into<String>, bands: BandTable) -> Self {
        Self {
            name: name.into(),
            bands,
        }
    }

    /// Profile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All eight bands, in record order.
    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    /// The band for `kind`.
    pub fn band(&self, kind: BandKind) -> &Band {
        self.bands.get(kind)
    }
}
