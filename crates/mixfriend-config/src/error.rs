//! Error types for profile loading and preset output.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading profiles or writing presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON
    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Profile file extension is neither `.json` nor `.toml`
    #[error("unsupported profile format: '{0}' (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    /// A band entry names no known band kind
    #[error("unknown band '{band}' in device '{device}'")]
    UnknownBandKind {
        /// Name of the device containing the entry.
        device: String,
        /// The unrecognized band name.
        band: String,
    },

    /// A positional band entry falls past the eighth band
    #[error("device '{device}' has an extra band at position {position}")]
    ExtraBand {
        /// Name of the device containing the entry.
        device: String,
        /// One-based position of the entry.
        position: usize,
    },

    /// Two devices in one set share a name
    #[error("duplicate device name: {0}")]
    DuplicateDevice(String),

    /// No device name contains the query
    #[error("no device matching '{0}'")]
    NoMatchingDevice(String),

    /// A device profile failed model validation
    #[error("invalid device '{device}': {source}")]
    InvalidDevice {
        /// Name of the offending device.
        device: String,
        /// The model error.
        #[source]
        source: mixfriend_core::Error,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid device error.
    pub fn invalid_device(device: impl Into<String>, source: mixfriend_core::Error) -> Self {
        ConfigError::InvalidDevice {
            device: device.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixfriend_core::BandKind;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn read_file_factory_produces_correct_variant() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
    }

    #[test]
    fn write_file_display() {
        let err = ConfigError::write_file("/out/Phone.pst", mock_io_err());
        let msg = err.to_string();
        assert!(msg.contains("failed to write file"), "got: {msg}");
        assert!(msg.contains("/out/Phone.pst"), "got: {msg}");
        assert!(err.source().is_some(), "WriteFile must expose I/O source");
    }

    #[test]
    fn create_dir_source_is_some() {
        let err = ConfigError::create_dir("/x", mock_io_err());
        assert!(err.source().is_some());
    }

    #[test]
    fn invalid_device_names_device_and_band() {
        let err = ConfigError::invalid_device(
            "Phone Speaker",
            mixfriend_core::Error::missing_band(BandKind::Parametric3),
        );
        assert_eq!(
            err.to_string(),
            "invalid device 'Phone Speaker': incomplete device profile: Parametric3 is missing"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn no_matching_device_display() {
        let err = ConfigError::NoMatchingDevice("toaster".to_string());
        assert_eq!(err.to_string(), "no device matching 'toaster'");
        assert!(err.source().is_none());
    }

    #[test]
    fn unknown_band_display() {
        let err = ConfigError::UnknownBandKind {
            device: "Car".to_string(),
            band: "parametric_9".to_string(),
        };
        assert_eq!(err.to_string(), "unknown band 'parametric_9' in device 'Car'");
    }
}
