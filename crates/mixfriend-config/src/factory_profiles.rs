//! Factory device profiles bundled with mixfriend.
//!
//! These are embedded at compile time and used whenever no profile file is
//! found on disk.

use crate::{DeviceProfile, ProfileSet};

/// Names of the factory profiles, in file order.
pub static FACTORY_PROFILE_NAMES: &[&str] = &[
    "Phone Speaker",
    "Laptop Speaker",
    "Earbuds",
    "Car Stereo",
    "Television",
    "Bluetooth Speaker",
    "Club PA",
    "Flat Reference",
];

/// JSON source of the factory profiles.
pub const FACTORY_PROFILES_JSON: &str = include_str!("../profiles/devices.json");

/// Get all factory profiles.
///
/// # Example
///
/// ```rust
/// use mixfriend_config::factory_profiles;
///
/// for profile in factory_profiles().iter() {
///     println!("{}: {}", profile.name, profile.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_profiles() -> ProfileSet {
    ProfileSet::from_json(FACTORY_PROFILES_JSON).unwrap_or_default()
}

/// Get a factory profile by name, ignoring case.
pub fn get_factory_profile(name: &str) -> Option<DeviceProfile> {
    let name_lower = name.to_lowercase();
    factory_profiles()
        .devices
        .into_iter()
        .find(|p| p.name.to_lowercase() == name_lower)
}

/// Check whether a name refers to a factory profile.
pub fn is_factory_profile(name: &str) -> bool {
    FACTORY_PROFILE_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}
