//! Integration tests for mixfriend-config.
//!
//! These tests run profile files through validation, encoding and output.

use mixfriend_config::{
    ConfigError, DeviceProfile, PresetWriter, ProfileSet, ProfileSource, factory_profiles,
    get_factory_profile,
};
use mixfriend_core::{BandKind, Error, decode_record, encode};
use tempfile::TempDir;

const PHONE_FIXTURE: &[u8] = include_bytes!("../../mixfriend-core/tests/fixtures/phone_speaker.pst");
const FLAT_FIXTURE: &[u8] = include_bytes!("../../mixfriend-core/tests/fixtures/flat_reference.pst");

/// Factory profiles encode to the reference records byte for byte.
#[test]
fn test_factory_profiles_match_reference_records() {
    let phone = get_factory_profile("Phone Speaker").unwrap().to_device().unwrap();
    assert_eq!(&encode(&phone)[..], PHONE_FIXTURE);

    let flat = get_factory_profile("Flat Reference").unwrap().to_device().unwrap();
    assert_eq!(&encode(&flat)[..], FLAT_FIXTURE);
}

/// Generating the whole factory set writes one decodable record per device.
#[test]
fn test_generate_all_factory_profiles() {
    let dir = TempDir::new().unwrap();
    let set = factory_profiles();
    let written = PresetWriter::new(dir.path()).write_set(&set).unwrap();

    assert_eq!(written.len(), set.len());
    for (preset, profile) in written.iter().zip(set.iter()) {
        assert_eq!(preset.name, profile.name);
        assert_eq!(preset.path, dir.path().join(profile.output_filename()));

        let bytes = std::fs::read(&preset.path).unwrap();
        let record = decode_record(&bytes).unwrap();
        assert!(record.footer_matches_reference());
        assert!(record.bands.bit_eq(profile.to_device().unwrap().bands()));
    }
}

/// A JSON set saved as TOML loads back to the same devices.
#[test]
fn test_json_to_toml_conversion() {
    let dir = TempDir::new().unwrap();
    let json_path = dir.path().join("devices.json");
    let toml_path = dir.path().join("conf/devices.toml");

    factory_profiles().save(&json_path).unwrap();
    let from_json = ProfileSet::load(&json_path).unwrap();
    from_json.save(&toml_path).unwrap();
    let from_toml = ProfileSet::load(&toml_path).unwrap();

    assert_eq!(from_json, from_toml);
    let a = from_json.validate().unwrap();
    let b = from_toml.validate().unwrap();
    for (x, y) in a.iter().zip(&b) {
        assert!(x.bands().bit_eq(y.bands()));
    }
}

/// A profile file missing one band is rejected with that band named.
#[test]
fn test_missing_band_in_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("devices.json");
    std::fs::write(
        &path,
        r#"{
  "devices": [
    {
      "name": "Broken",
      "bands": [
        { "band": "HighPassFilter", "frequency": 80 },
        { "band": "LowShelf", "frequency": 100 },
        { "band": "Parametric1", "frequency": 300 },
        { "band": "Parametric2", "frequency": 900 },
        { "band": "Parametric4", "frequency": 5000 },
        { "band": "HighShelf", "frequency": 9000 },
        { "band": "LowPassFilter", "frequency": 18000 }
      ]
    }
  ]
}"#,
    )
    .unwrap();

    let set = ProfileSource::File(path).load().unwrap();
    match set.validate() {
        Err(ConfigError::InvalidDevice { device, source }) => {
            assert_eq!(device, "Broken");
            assert_eq!(source.band_kind(), Some(BandKind::Parametric3));
            assert!(source.to_string().contains("Parametric3"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

/// Gain on a pass filter is a configuration error, not silently dropped.
#[test]
fn test_pass_filter_gain_rejected() {
    let mut profile = DeviceProfile::from_device(
        &get_factory_profile("Car Stereo").unwrap().to_device().unwrap(),
    );
    profile.bands[7].gain = Some(3.0);
    assert!(matches!(
        profile.to_device(),
        Err(ConfigError::InvalidDevice {
            source: Error::InvalidBandConfiguration {
                kind: BandKind::LowPassFilter,
                ..
            },
            ..
        })
    ));
}

/// Unreadable and unsupported files surface as distinct errors.
#[test]
fn test_load_errors() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        ProfileSet::load(dir.path().join("absent.json")),
        Err(ConfigError::ReadFile { .. })
    ));

    let yaml = dir.path().join("devices.yaml");
    std::fs::write(&yaml, "devices: []").unwrap();
    assert!(matches!(
        ProfileSet::load(&yaml),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{ not json").unwrap();
    assert!(matches!(
        ProfileSet::load(&bad),
        Err(ConfigError::JsonParse(_))
    ));
}
