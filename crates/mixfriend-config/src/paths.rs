//! Profile file discovery.
//!
//! # Search Order
//!
//! 1. An explicit path given by the caller
//! 2. `devices.json` in the current directory
//! 3. `devices.json` in the user config directory:
//!    `~/.config/mixfriend/` (Linux), `~/Library/Application Support/mixfriend/` (macOS),
//!    `%APPDATA%\mixfriend\` (Windows)
//! 4. The bundled factory profiles
//!
//! An explicit path that does not exist is an error rather than a fallthrough.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{ConfigError, ProfileSet, factory_profiles};

/// Application name used for directory paths.
const APP_NAME: &str = "mixfriend";

/// Default profile file name.
pub const PROFILES_FILE: &str = "devices.json";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user's profile file, whether or not it exists.
pub fn user_profiles_path() -> PathBuf {
    user_config_dir().join(PROFILES_FILE)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Where a profile set came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSource {
    /// A profile file on disk.
    File(PathBuf),
    /// The bundled factory profiles.
    Factory,
}

impl ProfileSource {
    /// Resolve the source using the search order described in the module docs.
    pub fn discover(explicit: Option<&Path>) -> Self {
        Self::discover_in(explicit, Path::new("."), Some(&user_profiles_path()))
    }

    /// Like [`discover`](Self::discover) with the working directory and user
    /// profile path given explicitly.
    pub fn discover_in(explicit: Option<&Path>, cwd: &Path, user: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            return ProfileSource::File(path.to_path_buf());
        }

        let local = cwd.join(PROFILES_FILE);
        if local.is_file() {
            return ProfileSource::File(local);
        }

        if let Some(user) = user
            && user.is_file()
        {
            return ProfileSource::File(user.to_path_buf());
        }

        ProfileSource::Factory
    }

    /// Load the profile set from this source.
    pub fn load(&self) -> Result<ProfileSet, ConfigError> {
        match self {
            ProfileSource::File(path) => ProfileSet::load(path),
            ProfileSource::Factory => Ok(factory_profiles()),
        }
    }
}

impl fmt::Display for ProfileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileSource::File(path) => write!(f, "{}", path.display()),
            ProfileSource::Factory => f.write_str("factory profiles"),
        }
    }
}

/// Discover and load profiles in one step.
pub fn load_profiles(explicit: Option<&Path>) -> Result<(ProfileSource, ProfileSet), ConfigError> {
    let source = ProfileSource::discover(explicit);
    tracing::debug!(%source, "resolved profile source");
    let set = source.load()?;
    Ok((source, set))
}
