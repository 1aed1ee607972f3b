//! Credential profiles
//!
//! Profiles live in a TOML file, by default at
//! `~/.config/s3shell/profiles.toml`:
//!
//! ```toml
//! schema_version = 1
//! default_profile = "default"
//!
//! [profiles.default]
//! access_key = "AKIA..."
//! secret_key = "..."
//! region = "us-east-1"
//! # session_token = "..."
//! # endpoint = "http://localhost:9000"
//! ```
//!
//! The file is read on every `login` so edits take effect without a restart.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Current profile file schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Profile used when neither the caller nor the file names one
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "S3SHELL_CONFIG_DIR";

const PROFILES_FILE: &str = "profiles.toml";

/// On-disk layout of the profile file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileFile {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Profile picked by a bare `login`
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Raw profile tables, validated lazily so one broken entry
    /// does not lock every other profile out
    #[serde(default)]
    pub profiles: BTreeMap<String, toml::Value>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Credentials and addressing for one identity
#[derive(Clone, Deserialize)]
pub struct Profile {
    /// Profile name (the table name in the file)
    #[serde(skip)]
    pub name: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Region
    pub region: String,

    /// Temporary session token
    #[serde(default)]
    pub session_token: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Profile {
    /// Create a new profile with required fields
    pub fn new(
        name: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            session_token: None,
            endpoint: None,
        }
    }

    fn check(&self) -> Result<()> {
        if self.access_key.is_empty() || self.secret_key.is_empty() || self.region.is_empty() {
            return Err(Error::Config("empty access_key, secret_key or region".into()));
        }
        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint)?;
        }
        Ok(())
    }
}

// Keep secrets out of debug logs.
impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("access_key", &self.access_key)
            .field("region", &self.region)
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Reads profiles from disk
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    /// Create a ProfileStore at the default location
    ///
    /// Honors `S3SHELL_CONFIG_DIR`, falling back to the platform config dir.
    pub fn new() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("s3shell"),
        };
        Ok(Self {
            path: dir.join(PROFILES_FILE),
        })
    }

    /// Create a ProfileStore reading a specific file
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the whole file; a missing file reads as empty
    pub fn load(&self) -> Result<ProfileFile> {
        if !self.path.exists() {
            return Ok(ProfileFile::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let file: ProfileFile = toml::from_str(&content)?;

        if file.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Profile file version {} is newer than supported version {}. Please upgrade s3shell.",
                file.schema_version, SCHEMA_VERSION
            )));
        }

        Ok(file)
    }

    /// Look up a profile, or the default one when `name` is None
    ///
    /// Missing and malformed profiles are both reported as authentication
    /// failures, with distinct messages.
    pub fn get(&self, name: Option<&str>) -> Result<Profile> {
        let file = self
            .load()
            .map_err(|e| Error::Auth(format!("Login failed - could not read profiles: {e}")))?;

        let name = name
            .map(str::to_string)
            .or(file.default_profile)
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let Some(raw) = file.profiles.get(&name) else {
            return Err(Error::Auth(format!(
                "Login failed - profile '{name}' does not exist in {}",
                self.path.display()
            )));
        };

        let mut profile: Profile = raw
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| invalid_profile(&name, e.message()))?;
        profile.name = name.clone();
        profile
            .check()
            .map_err(|e| invalid_profile(&name, &e.to_string()))?;

        tracing::debug!(profile = %name, path = %self.path.display(), "loaded profile");
        Ok(profile)
    }
}

fn invalid_profile(name: &str, reason: &str) -> Error {
    Error::Auth(format!(
        "Login failed - profile '{name}' configuration is invalid: {reason}"
    ))
}
