//! Device profile file format and operations.

use mixfriend_core::{BandKind, BandSpec, Device};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

/// One band entry in a profile file.
///
/// Everything except the frequency may be omitted; defaults are resolved by
/// [`mixfriend_core::Band::from_spec`]. When `band` is omitted the entry's
/// position in the list decides its kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BandProfile {
    /// Band kind name, e.g. `"high_pass"` or `"Parametric3"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<String>,

    /// Frequency in Hz.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f32>,

    /// Gain in dB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gain: Option<f32>,

    /// Quality factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<f32>,

    /// Whether the band is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl BandProfile {
    /// An entry for `kind` at `frequency`.
    pub fn new(kind: BandKind, frequency: f32) -> Self {
        Self {
            band: Some(kind.key().to_string()),
            frequency: Some(frequency),
            ..Self::default()
        }
    }

    /// Set the gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = Some(gain);
        self
    }

    /// Set the Q.
    pub fn with_q(mut self, q: f32) -> Self {
        self.q = Some(q);
        self
    }

    /// Set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// The raw fields, for [`mixfriend_core::Band::from_spec`].
    pub fn spec(&self) -> BandSpec {
        BandSpec {
            frequency: self.frequency,
            gain: self.gain,
            q: self.q,
            enabled: self.enabled,
        }
    }

    /// Whether this entry counts as active (anything but an explicit `false`).
    pub fn is_active(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// A named device profile as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeviceProfile {
    /// Name of the device. Unique within a [`ProfileSet`].
    pub name: String,

    /// Output filename; derived from the name when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Optional description of the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The band entries. Must cover all eight kinds exactly once.
    #[serde(default)]
    pub bands: Vec<BandProfile>,
}

impl DeviceProfile {
    /// Create a profile with no bands.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            description: None,
            bands: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the output filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Add a band entry.
    pub fn with_band(mut self, band: BandProfile) -> Self {
        self.bands.push(band);
        self
    }

    /// Add several band entries.
    pub fn with_bands(mut self, bands: impl IntoIterator<Item = BandProfile>) -> Self {
        self.bands.extend(bands);
        self
    }

    /// The `.pst` filename this profile is written to.
    ///
    /// The explicit `filename` if set, otherwise the name with spaces
    /// replaced by underscores plus `.pst`.
    pub fn output_filename(&self) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| format!("{}.pst", self.name.replace(' ', "_")))
    }

    /// Number of entries that are not explicitly disabled.
    pub fn active_band_count(&self) -> usize {
        self.bands.iter().filter(|b| b.is_active()).count()
    }

    /// Resolve each entry to its band kind.
    fn resolved_entries(&self) -> Result<Vec<(BandKind, BandSpec)>, ConfigError> {
        self.bands
            .iter()
            .enumerate()
            .map(|(position, entry)| -> Result<(BandKind, BandSpec), ConfigError> {
                let kind = match &entry.band {
                    Some(name) => {
                        name.parse::<BandKind>()
                            .map_err(|_| ConfigError::UnknownBandKind {
                                device: self.name.clone(),
                                band: name.clone(),
                            })?
                    }
                    None => BandKind::from_index(position).ok_or_else(|| {
                        ConfigError::ExtraBand {
                            device: self.name.clone(),
                            position: position + 1,
                        }
                    })?,
                };
                Ok((kind, entry.spec()))
            })
            .collect()
    }

    /// Build the validated [`Device`].
    pub fn to_device(&self) -> Result<Device, ConfigError> {
        let entries = self.resolved_entries()?;
        Device::new(self.name.clone(), entries)
            .map_err(|e| ConfigError::invalid_device(&self.name, e))
    }

    /// Build a profile that reproduces `device`, with every field explicit.
    pub fn from_device(device: &Device) -> Self {
        Self::new(device.name()).with_bands(device.bands().iter().map(|band| {
            BandProfile::new(band.kind(), band.frequency())
                .with_gain(band.gain())
                .with_q(band.q())
                .with_enabled(band.enabled())
        }))
    }
}

/// A set of device profiles, the top level of a profile file.
///
/// # JSON Format
///
/// ```json
/// {
///   "devices": [
///     {
///       "name": "Phone Speaker",
///       "filename": "Phone_Speaker.pst",
///       "bands": [
///         { "band": "high_pass", "frequency": 250 },
///         { "band": "low_shelf", "frequency": 100, "gain": -8.0 },
///         { "band": "parametric_1", "frequency": 500, "gain": -2.0, "q": 1.0 }
///       ]
///     }
///   ]
/// }
/// ```
///
/// TOML files use the same structure with `[[devices]]` and
/// `[[devices.bands]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProfileSet {
    /// Device profiles, in file order.
    #[serde(default)]
    pub devices: Vec<DeviceProfile>,
}

impl ProfileSet {
    /// Create a set from profiles.
    pub fn new(devices: Vec<DeviceProfile>) -> Self {
        Self { devices }
    }

    /// Load a set from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ProfileFormat::from_path(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let set = match format {
            ProfileFormat::Json => Self::from_json(&content)?,
            ProfileFormat::Toml => Self::from_toml(&content)?,
        };
        tracing::debug!(path = %path.display(), devices = set.len(), "loaded device profiles");
        Ok(set)
    }

    /// Parse a set from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a set from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a `.json` or `.toml` file, creating the parent directory.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = match ProfileFormat::from_path(path)? {
            ProfileFormat::Json => self.to_json()?,
            ProfileFormat::Toml => self.to_toml()?,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterate over profiles.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceProfile> {
        self.devices.iter()
    }

    /// Look up a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&DeviceProfile> {
        self.devices.iter().find(|d| d.name == name)
    }

    /// Profiles whose name contains `query`, ignoring case.
    pub fn find(&self, query: &str) -> Vec<&DeviceProfile> {
        let query = query.to_lowercase();
        self.devices
            .iter()
            .filter(|d| d.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Like [`find`](Self::find), but an empty result is an error.
    pub fn matching(&self, query: &str) -> Result<Vec<&DeviceProfile>, ConfigError> {
        let found = self.find(query);
        if found.is_empty() {
            return Err(ConfigError::NoMatchingDevice(query.to_string()));
        }
        Ok(found)
    }

    /// Check name uniqueness and build every device.
    ///
    /// Fails on the first invalid profile; nothing is partially accepted.
    pub fn validate(&self) -> Result<Vec<Device>, ConfigError> {
        let mut seen = HashSet::new();
        for profile in &self.devices {
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::DuplicateDevice(profile.name.clone()));
            }
        }
        self.devices.iter().map(DeviceProfile::to_device).collect()
    }
}

/// On-disk encodings accepted for profile sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ProfileFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(ProfileFormat::Json),
            Some("toml") => Ok(ProfileFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE_JSON: &str = r#"
{
  "devices": [
    {
      "name": "Phone Speaker",
      "bands": [
        { "band": "high_pass", "frequency": 250 },
        { "band": "low_shelf", "frequency": 100, "gain": -8.0 },
        { "band": "parametric_1", "frequency": 500 },
        { "band": "parametric_2", "frequency": 1500 },
        { "band": "parametric_3", "frequency": 3000 },
        { "band": "parametric_4", "frequency": 6000 },
        { "band": "high_shelf", "frequency": 8000 },
        { "band": "low_pass", "frequency": 11000 }
      ]
    }
  ]
}
"#;

    fn eight_bands() -> Vec<BandProfile> {
        BandKind::ALL
            .iter()
            .map(|&k| BandProfile::new(k, 1000.0))
            .collect()
    }

    #[test]
    fn parse_json_and_build_device() {
        let set = ProfileSet::from_json(PHONE_JSON).unwrap();
        assert_eq!(set.len(), 1);
        let profile = &set.devices[0];
        assert_eq!(profile.output_filename(), "Phone_Speaker.pst");
        assert_eq!(profile.active_band_count(), 8);

        let device = profile.to_device().unwrap();
        assert_eq!(device.name(), "Phone Speaker");
        let hp = device.band(BandKind::HighPassFilter);
        assert_eq!(hp.frequency(), 250.0);
        assert_eq!(hp.q(), 0.71);
        assert_eq!(device.band(BandKind::LowShelf).gain(), -8.0);
    }

    #[test]
    fn parse_toml() {
        let toml = r#"
[[devices]]
name = "Earbuds"
filename = "buds/Earbuds.pst"

[[devices.bands]]
band = "hpf"
frequency = 40

[[devices.bands]]
band = "low_shelf"
frequency = 80
gain = 2.0

[[devices.bands]]
band = "p1"
frequency = 300

[[devices.bands]]
band = "p2"
frequency = 1000
enabled = false

[[devices.bands]]
band = "p3"
frequency = 3500

[[devices.bands]]
band = "p4"
frequency = 7000
q = 3.0

[[devices.bands]]
band = "high_shelf"
frequency = 10000

[[devices.bands]]
band = "lpf"
frequency = 16000
"#;
        let set = ProfileSet::from_toml(toml).unwrap();
        let profile = &set.devices[0];
        assert_eq!(profile.output_filename(), "buds/Earbuds.pst");
        assert_eq!(profile.active_band_count(), 7);
        let device = profile.to_device().unwrap();
        assert!(!device.band(BandKind::Parametric2).enabled());
        assert_eq!(device.band(BandKind::Parametric4).q(), 3.0);
    }

    #[test]
    fn positional_bands_follow_record_order() {
        let mut profile = DeviceProfile::new("Positional");
        for (i, _) in BandKind::ALL.iter().enumerate() {
            profile.bands.push(BandProfile {
                frequency: Some(100.0 * (i + 1) as f32),
                ..BandProfile::default()
            });
        }
        let device = profile.to_device().unwrap();
        assert_eq!(device.band(BandKind::LowPassFilter).frequency(), 800.0);
    }

    #[test]
    fn ninth_positional_band_is_rejected() {
        let mut profile = DeviceProfile::new("Nine");
        for _ in 0..9 {
            profile.bands.push(BandProfile {
                frequency: Some(100.0),
                ..BandProfile::default()
            });
        }
        assert!(matches!(
            profile.to_device(),
            Err(ConfigError::ExtraBand { position: 9, .. })
        ));
    }

    #[test]
    fn missing_band_fails_with_its_kind() {
        let profile = DeviceProfile::new("Seven").with_bands(
            eight_bands()
                .into_iter()
                .filter(|b| b.band.as_deref() != Some("parametric_3")),
        );
        let err = profile.to_device().unwrap_err();
        match err {
            ConfigError::InvalidDevice { device, source } => {
                assert_eq!(device, "Seven");
                assert_eq!(source, mixfriend_core::Error::missing_band(BandKind::Parametric3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_band_name_is_reported() {
        let mut bands = eight_bands();
        bands[3].band = Some("mid".to_string());
        let profile = DeviceProfile::new("Odd").with_bands(bands);
        assert!(matches!(
            profile.to_device(),
            Err(ConfigError::UnknownBandKind { ref band, .. }) if band == "mid"
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let json = r#"{ "devices": [ { "name": "X", "bands": [ { "frequency": 1, "width": 2 } ] } ] }"#;
        assert!(matches!(
            ProfileSet::from_json(json),
            Err(ConfigError::JsonParse(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let profile = DeviceProfile::new("Twin").with_bands(eight_bands());
        let set = ProfileSet::new(vec![profile.clone(), profile]);
        assert!(matches!(
            set.validate(),
            Err(ConfigError::DuplicateDevice(ref name)) if name == "Twin"
        ));
    }

    #[test]
    fn find_is_case_insensitive_substring() {
        let set = ProfileSet::new(vec![
            DeviceProfile::new("Phone Speaker"),
            DeviceProfile::new("Laptop Speaker"),
            DeviceProfile::new("Earbuds"),
        ]);
        assert_eq!(set.find("speaker").len(), 2);
        assert_eq!(set.find("BUDS")[0].name, "Earbuds");
        assert!(set.find("car").is_empty());
        assert!(matches!(
            set.matching("car"),
            Err(ConfigError::NoMatchingDevice(_))
        ));
        assert!(set.get("Earbuds").is_some());
    }

    #[test]
    fn from_device_round_trips_through_json() {
        let device = ProfileSet::from_json(PHONE_JSON).unwrap().devices[0]
            .to_device()
            .unwrap();
        let set = ProfileSet::new(vec![DeviceProfile::from_device(&device)]);
        let json = set.to_json().unwrap();
        let reparsed = ProfileSet::from_json(&json).unwrap().devices[0]
            .to_device()
            .unwrap();
        assert!(reparsed.bands().bit_eq(device.bands()));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ProfileFormat::from_path(Path::new("a/devices.JSON")).unwrap(),
            ProfileFormat::Json
        );
        assert_eq!(
            ProfileFormat::from_path(Path::new("devices.toml")).unwrap(),
            ProfileFormat::Toml
        );
        assert!(matches!(
            ProfileFormat::from_path(Path::new("devices.yaml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
