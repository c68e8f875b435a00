//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Base-URL resolution is a typed mapping: production builds always talk to
//! the production address, development builds pick an address per platform
//! (emulators and simulators reach the host machine through different
//! addresses). Every value can be overridden from the environment.

use std::path::PathBuf;

pub const DEFAULT_PRODUCTION_URL: &str = "https://your-production-api.com";
pub const DEFAULT_DEV_URL_ANDROID: &str = "http://10.0.2.2:8000";
pub const DEFAULT_DEV_URL_IOS: &str = "http://localhost:8000";
pub const DEFAULT_DEV_URL_WEB: &str = "http://localhost:8000";
pub const DEFAULT_DEV_URL_DEVICE: &str = "http://192.168.0.110:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_STORAGE_PATH: &str = ".quiz-client/storage.json";

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: String, value: String },
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildProfile {
    Development,
    Production,
}

/// Platform the client runs on. Only consulted in development builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Web,
    /// Physical device or any other host.
    Device,
}

/// Session strategy selected at wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Identity established against the remote backend.
    Live,
    /// Identity synthesized from input; no network, no storage.
    Local,
}

/// Development base URL per platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevUrls {
    pub android: String,
    pub ios: String,
    pub web: String,
    pub device: String,
}

impl DevUrls {
    #[must_use]
    pub fn for_platform(&self, platform: Platform) -> &str {
        match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
            Platform::Web => &self.web,
            Platform::Device => &self.device,
        }
    }
}

impl Default for DevUrls {
    fn default() -> Self {
        Self {
            android: DEFAULT_DEV_URL_ANDROID.into(),
            ios: DEFAULT_DEV_URL_IOS.into(),
            web: DEFAULT_DEV_URL_WEB.into(),
            device: DEFAULT_DEV_URL_DEVICE.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub profile: BuildProfile,
    pub platform: Platform,
    pub production_url: String,
    pub dev_urls: DevUrls,
    /// Explicit override; wins over profile/platform resolution.
    pub base_url_override: Option<String>,
    pub timeout_secs: u64,
    pub auth_mode: AuthMode,
    pub storage_path: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            platform: host_platform(),
            production_url: DEFAULT_PRODUCTION_URL.into(),
            dev_urls: DevUrls::default(),
            base_url_override: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auth_mode: AuthMode::Live,
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `QUIZ_ENV`: `development` or `production` (default follows the build)
    /// - `QUIZ_PLATFORM`: `android`, `ios`, `web` or `device` (default follows the host OS)
    /// - `QUIZ_PRODUCTION_URL`
    /// - `QUIZ_DEV_URL_ANDROID`, `QUIZ_DEV_URL_IOS`, `QUIZ_DEV_URL_WEB`, `QUIZ_DEV_URL_DEVICE`
    /// - `QUIZ_BASE_URL`: bypasses resolution entirely
    /// - `QUIZ_TIMEOUT_SECS`: default 10
    /// - `QUIZ_AUTH_MODE`: `live` (default) or `local`
    /// - `QUIZ_STORAGE_PATH`: default `.quiz-client/storage.json`
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an unrecognized value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds an unrecognized value.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let profile = match lookup("QUIZ_ENV") {
            Some(raw) => parse_profile(&raw)?,
            None => defaults.profile,
        };
        let platform = match lookup("QUIZ_PLATFORM") {
            Some(raw) => parse_platform(&raw)?,
            None => defaults.platform,
        };
        let auth_mode = match lookup("QUIZ_AUTH_MODE") {
            Some(raw) => parse_auth_mode(&raw)?,
            None => defaults.auth_mode,
        };
        let timeout_secs = match lookup("QUIZ_TIMEOUT_SECS") {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.timeout_secs,
        };

        let url = |key: &str, default: String| lookup(key).map_or(default, |v| trim_url(&v));
        let dev_urls = DevUrls {
            android: url("QUIZ_DEV_URL_ANDROID", defaults.dev_urls.android),
            ios: url("QUIZ_DEV_URL_IOS", defaults.dev_urls.ios),
            web: url("QUIZ_DEV_URL_WEB", defaults.dev_urls.web),
            device: url("QUIZ_DEV_URL_DEVICE", defaults.dev_urls.device),
        };
        let production_url = url("QUIZ_PRODUCTION_URL", defaults.production_url);
        let base_url_override = lookup("QUIZ_BASE_URL").map(|v| trim_url(&v));
        let storage_path = lookup("QUIZ_STORAGE_PATH").map_or(defaults.storage_path, PathBuf::from);

        Ok(Self {
            profile,
            platform,
            production_url,
            dev_urls,
            base_url_override,
            timeout_secs,
            auth_mode,
            storage_path,
        })
    }

    /// Resolve the backend base URL for this profile and platform.
    #[must_use]
    pub fn base_url(&self) -> &str {
        if let Some(url) = &self.base_url_override {
            return url;
        }
        match self.profile {
            BuildProfile::Production => &self.production_url,
            BuildProfile::Development => self.dev_urls.for_platform(self.platform),
        }
    }
}

fn trim_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn invalid(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue { var: var.into(), value: value.into() }
}

fn default_profile() -> BuildProfile {
    if cfg!(debug_assertions) { BuildProfile::Development } else { BuildProfile::Production }
}

fn host_platform() -> Platform {
    match std::env::consts::OS {
        "android" => Platform::Android,
        "ios" => Platform::Ios,
        _ => Platform::Device,
    }
}

fn parse_profile(raw: &str) -> Result<BuildProfile, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "development" | "dev" => Ok(BuildProfile::Development),
        "production" | "prod" => Ok(BuildProfile::Production),
        _ => Err(invalid("QUIZ_ENV", raw)),
    }
}

fn parse_platform(raw: &str) -> Result<Platform, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "android" => Ok(Platform::Android),
        "ios" => Ok(Platform::Ios),
        "web" => Ok(Platform::Web),
        "device" | "other" => Ok(Platform::Device),
        _ => Err(invalid("QUIZ_PLATFORM", raw)),
    }
}

fn parse_auth_mode(raw: &str) -> Result<AuthMode, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "live" => Ok(AuthMode::Live),
        "local" | "dummy" => Ok(AuthMode::Local),
        _ => Err(invalid("QUIZ_AUTH_MODE", raw)),
    }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(invalid("QUIZ_TIMEOUT_SECS", raw)),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
