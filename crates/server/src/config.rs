//! Server configuration
//!
//! Values come from three layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. an optional TOML file named by `HOMESTRETCH_CONFIG`
//! 3. `HOMESTRETCH_*` environment variables (a `.env` file is loaded into
//!    the environment by the binary before this runs)

use homestretch_core::{SiteError, SiteResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the optional TOML file
pub const CONFIG_FILE_VAR: &str = "HOMESTRETCH_CONFIG";

/// Default upload size limit (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

// ============================================================================
// ServerConfig
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON file the section store persists to
    pub data_file: PathBuf,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// URL prefix uploaded images are served under
    pub public_upload_path: String,
    /// Bearer tokens accepted for admin calls; empty rejects every admin call
    pub admin_tokens: Vec<String>,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
    /// Seed an empty store with the default homepage
    pub seed_defaults: bool,
    /// Shown in the navbar and the page title
    pub site_name: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_file: PathBuf::from("data/homepage-sections.json"),
            upload_dir: PathBuf::from("data/uploads"),
            public_upload_path: "/uploads".to_string(),
            admin_tokens: Vec::new(),
            request_timeout_secs: 30,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            seed_defaults: true,
            site_name: None,
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn load() -> SiteResult<Self> {
        let base = match std::env::var(CONFIG_FILE_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim())?,
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| SiteError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> SiteResult<Self> {
        toml::from_str(contents).map_err(|e| SiteError::InvalidConfig(e.to_string()))
    }

    /// Apply `HOMESTRETCH_*` overrides read through `lookup`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> SiteResult<Self> {
        let var = |name: &str| {
            lookup(&format!("HOMESTRETCH_{name}"))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = parse_var("HOMESTRETCH_PORT", &port)?;
        }
        if let Some(path) = var("DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(path) = var("UPLOAD_DIR") {
            self.upload_dir = PathBuf::from(path);
        }
        if let Some(prefix) = var("PUBLIC_UPLOAD_PATH") {
            self.public_upload_path = prefix;
        }
        if let Some(tokens) = var("ADMIN_TOKENS") {
            self.admin_tokens = tokens
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(secs) = var("REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_var("HOMESTRETCH_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(bytes) = var("MAX_UPLOAD_BYTES") {
            self.max_upload_bytes = parse_var("HOMESTRETCH_MAX_UPLOAD_BYTES", &bytes)?;
        }
        if let Some(seed) = var("SEED_DEFAULTS") {
            self.seed_defaults = parse_bool("HOMESTRETCH_SEED_DEFAULTS", &seed)?;
        }
        if let Some(name) = var("SITE_NAME") {
            self.site_name = Some(name);
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> SiteResult<()> {
        if !self.public_upload_path.starts_with('/') || self.public_upload_path.len() < 2 {
            return Err(SiteError::InvalidConfig(format!(
                "public_upload_path must be an absolute URL path, got '{}'",
                self.public_upload_path
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(SiteError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(SiteError::InvalidConfig(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Public URL of an uploaded file
    pub fn upload_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_upload_path.trim_end_matches('/'), file_name)
    }

    /// Whether a bearer token is one of the admin tokens
    ///
    /// Plain string equality, not a constant-time comparison.
    pub fn accepts_token(&self, token: &str) -> bool {
        !token.is_empty() && self.admin_tokens.iter().any(|admin| admin == token)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> SiteResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| SiteError::InvalidConfig(format!("{name}: {e}")))
}

fn parse_bool(name: &str, value: &str) -> SiteResult<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SiteError::InvalidConfig(format!(
            "{name}: expected a boolean, got '{other}'"
        ))),
    }
}

// ============================================================================
// Tests
// ============================================================================
