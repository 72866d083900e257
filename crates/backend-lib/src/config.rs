// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "chirpy.toml";

/// Environment tag that unlocks the admin reset endpoint
pub const DEV_PLATFORM: &str = "dev";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Environment tag, e.g. `dev`
    pub platform: String,
    /// HMAC secret for access tokens
    pub jwt_secret: String,
    /// Pre-shared key of the payment webhook
    pub polka_key: String,
    /// PostgreSQL connection string; the in-memory store is used when absent
    pub db_url: Option<String>,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// `text` or `json`
    pub log_format: String,
    /// Directory served under `/app`
    pub filepath_root: PathBuf,
    /// Upper bound on the time spent on a single request
    pub request_timeout_secs: u64,
    /// Password hashing cost
    pub hasher: HasherSettings,
}

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct HasherSettings {
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            platform: "prod".to_string(),
            jwt_secret: String::new(),
            polka_key: String::new(),
            db_url: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            filepath_root: PathBuf::from("."),
            request_timeout_secs: 30,
            hasher: HasherSettings::default(),
        }
    }
}

impl Default for HasherSettings {
    fn default() -> Self {
        // scrypt's recommended parameters
        Self {
            log_n: 17,
            r: 8,
            p: 1,
        }
    }
}

impl Settings {
    /// Load settings from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings with `path` as the config file
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        tolerate_missing_dotenv(dotenvy::dotenv())?;
        let settings: Settings = figment(path.as_ref()).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings before anything is started with them
    pub fn validate(&self) -> Result<()> {
        if self.platform.trim().is_empty() {
            bail!("PLATFORM must be set");
        }
        if self.jwt_secret.is_empty() {
            bail!("JWT_SECRET must be set");
        }
        if self.polka_key.is_empty() {
            bail!("POLKA_KEY must be set");
        }
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            bail!("invalid log level: {}", self.log_level);
        }
        if self.log_format != "text" && self.log_format != "json" {
            bail!("invalid log format: {}", self.log_format);
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be positive");
        }
        Ok(())
    }

    /// Whether destructive admin operations are allowed
    pub fn is_dev(&self) -> bool {
        self.platform == DEV_PLATFORM
    }
}

/// A missing `.env` is fine; an unreadable or malformed one is not
fn tolerate_missing_dotenv<T>(loaded: dotenvy::Result<T>) -> Result<()> {
    match loaded {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => bail!("failed to load .env: {e}"),
    }
}

/// Defaults, then the config file, then `CHIRPY_*` variables, then the bare
/// variable names the service has always read.
fn figment(path: &Path) -> Figment {
    Figment::from(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CHIRPY_").split("__"))
        .merge(Env::raw().only(&["PLATFORM", "JWT_SECRET", "POLKA_KEY", "DB_URL"]))
}
