//! Device profiles and preset output for mixfriend.
//!
//! This crate turns human-edited profile files into validated
//! [`mixfriend_core::Device`] values and writes their encoded records to disk.
//!
//! # Features
//!
//! - **Profiles**: Load and save device profile sets as JSON or TOML
//! - **Factory Profiles**: Built-in devices used when no profile file exists
//! - **Paths**: Profile file discovery and the user config directory
//! - **Output**: Encode devices and write `.pst` files
//!
//! # Example
//!
//! ```rust,no_run
//! use mixfriend_config::{PresetWriter, ProfileSet};
//!
//! let set = ProfileSet::load("devices.json").unwrap();
//! let written = PresetWriter::new("out").write_set(&set).unwrap();
//! for preset in &written {
//!     println!("{} -> {}", preset.name, preset.path.display());
//! }
//! ```

mod error;
mod output;
mod profile;

/// Profile file discovery.
pub mod paths;

/// Factory profiles bundled with the library.
pub mod factory_profiles;

pub use error::ConfigError;
pub use factory_profiles::{
    FACTORY_PROFILE_NAMES, FACTORY_PROFILES_JSON, factory_profiles, get_factory_profile,
    is_factory_profile,
};
pub use output::{PresetWriter, WrittenPreset, write_preset};
pub use paths::{
    PROFILES_FILE, ProfileSource, ensure_user_config_dir, load_profiles, user_config_dir,
    user_profiles_path,
};
pub use profile::{BandProfile, DeviceProfile, ProfileFormat, ProfileSet};
