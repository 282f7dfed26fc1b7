//! Writing encoded presets to disk.

use std::path::{Path, PathBuf};

use mixfriend_core::{Device, Encoder};

use crate::{ConfigError, DeviceProfile, ProfileSet};

/// Result of writing one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPreset {
    /// Device name.
    pub name: String,
    /// Where the record was written.
    pub path: PathBuf,
    /// Number of enabled bands.
    pub active_bands: usize,
    /// High-pass cutoff in Hz.
    pub high_pass: f32,
    /// Low-pass cutoff in Hz.
    pub low_pass: f32,
}

/// Encodes devices and writes them into an output directory.
#[derive(Debug, Clone)]
pub struct PresetWriter {
    dir: PathBuf,
    encoder: Encoder,
}

impl PresetWriter {
    /// Writer targeting `dir` with the default field order.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            encoder: Encoder::new(),
        }
    }

    /// Use a specific encoder.
    pub fn with_encoder(mut self, encoder: Encoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encode `device` and write it to `filename` under the output directory.
    ///
    /// Missing directories, including any in `filename`, are created.
    pub fn write(&self, device: &Device, filename: &str) -> Result<PathBuf, ConfigError> {
        let path = self.dir.join(filename);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let bytes = self.encoder.encode(device);
        std::fs::write(&path, bytes).map_err(|e| ConfigError::write_file(&path, e))?;
        tracing::info!(device = device.name(), path = %path.display(), "wrote preset");
        Ok(path)
    }

    /// Validate and write one profile.
    pub fn write_profile(&self, profile: &DeviceProfile) -> Result<WrittenPreset, ConfigError> {
        let device = profile.to_device()?;
        let path = self.write(&device, &profile.output_filename())?;
        let bands = device.bands();
        Ok(WrittenPreset {
            name: device.name().to_string(),
            path,
            active_bands: bands.active_count(),
            high_pass: bands[mixfriend_core::BandKind::HighPassFilter].frequency(),
            low_pass: bands[mixfriend_core::BandKind::LowPassFilter].frequency(),
        })
    }

    /// Write every profile in order, stopping at the first error.
    ///
    /// Files written before the failure are left in place.
    pub fn write_all<'a, I>(&self, profiles: I) -> Result<Vec<WrittenPreset>, ConfigError>
    where
        I: IntoIterator<Item = &'a DeviceProfile>,
    {
        profiles
            .into_iter()
            .map(|profile| self.write_profile(profile))
            .collect()
    }

    /// Write every profile in `set` after checking device names are unique.
    pub fn write_set(&self, set: &ProfileSet) -> Result<Vec<WrittenPreset>, ConfigError> {
        set.validate()?;
        self.write_all(set.iter())
    }
}

/// Encode `device` with the default field order and write it to
/// `output_dir/filename`.
pub fn write_preset(
    device: &Device,
    output_dir: impl Into<PathBuf>,
    filename: &str,
) -> Result<PathBuf, ConfigError> {
    PresetWriter::new(output_dir).write(device, filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BandProfile;
    use mixfriend_core::{BandKind, FieldOrder, RECORD_SIZE, decode};
    use tempfile::TempDir;

    fn profile(name: &str) -> DeviceProfile {
        DeviceProfile::new(name).with_bands(
            BandKind::ALL
                .iter()
                .enumerate()
                .map(|(i, &k)| BandProfile::new(k, 100.0 * (i + 1) as f32)),
        )
    }

    #[test]
    fn writes_record_with_derived_name() {
        let dir = TempDir::new().unwrap();
        let writer = PresetWriter::new(dir.path());
        let written = writer.write_profile(&profile("Car Stereo")).unwrap();

        assert_eq!(written.path, dir.path().join("Car_Stereo.pst"));
        assert_eq!(written.active_bands, 8);
        assert_eq!(written.high_pass, 100.0);
        assert_eq!(written.low_pass, 800.0);

        let bytes = std::fs::read(&written.path).unwrap();
        assert_eq!(bytes.len(), RECORD_SIZE);
        let table = decode(&bytes).unwrap();
        assert_eq!(table[BandKind::HighShelf].frequency(), 700.0);
    }

    #[test]
    fn write_preset_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Old.pst");
        std::fs::write(&path, b"stale").unwrap();
        let device = profile("Old").to_device().unwrap();

        let written = write_preset(&device, dir.path(), "Old.pst").unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read(&path).unwrap().len(), RECORD_SIZE);
    }

    #[test]
    fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("a/b");
        let writer = PresetWriter::new(&out);
        let p = profile("Nested").with_filename("sub/Nested.pst");
        let written = writer.write_profile(&p).unwrap();
        assert_eq!(written.path, out.join("sub/Nested.pst"));
        assert!(written.path.is_file());
    }

    #[test]
    fn custom_encoder_is_used() {
        let dir = TempDir::new().unwrap();
        let order: FieldOrder = "frequency,gain,q,enabled".parse().unwrap();
        let writer =
            PresetWriter::new(dir.path()).with_encoder(Encoder::with_field_order(order));
        let written = writer.write_profile(&profile("Swapped")).unwrap();
        let bytes = std::fs::read(&written.path).unwrap();
        let first = f32::from_le_bytes(bytes[24..28].try_into().unwrap());
        assert_eq!(first, 100.0);
    }

    #[test]
    fn write_all_stops_at_first_invalid_profile() {
        let dir = TempDir::new().unwrap();
        let writer = PresetWriter::new(dir.path());
        let mut broken = profile("Broken");
        broken.bands.pop();
        let profiles = [profile("First"), broken, profile("Third")];

        let err = writer.write_all(&profiles).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDevice { ref device, .. } if device == "Broken"));
        assert!(dir.path().join("First.pst").is_file());
        assert!(!dir.path().join("Third.pst").exists());
    }

    #[test]
    fn write_set_rejects_duplicates_before_writing() {
        let dir = TempDir::new().unwrap();
        let writer = PresetWriter::new(dir.path());
        let set = ProfileSet::new(vec![profile("Twin"), profile("Twin")]);
        assert!(matches!(
            writer.write_set(&set),
            Err(ConfigError::DuplicateDevice(_))
        ));
        assert!(!dir.path().join("Twin.pst").exists());
    }
}
