use std::net::IpAddr;
use std::time::Duration;

use reqwest::Url;

/// Host suffix every backend project URL must carry.
pub const STORE_DOMAIN_SUFFIX: &str = ".supabase.co";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub store_timeout: Duration,
    pub store: Result<StoreSettings, ConfigError>,
}

/// Validated connection parameters for the remote project store.
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub url: Url,
    pub anon_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingUrl,
    MissingKey,
    InvalidUrl(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingUrl => write!(f, "Missing SUPABASE_URL environment variable"),
            ConfigError::MissingKey => {
                write!(f, "Missing SUPABASE_ANON_KEY environment variable")
            }
            ConfigError::InvalidUrl(msg) => write!(
                f,
                "Invalid SUPABASE_URL ({msg}). Should be https://your-project{STORE_DOMAIN_SUFFIX}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("SHOWCASE_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid SHOWCASE_HOST: {e}"))?;

        let port: u16 = env_or("SHOWCASE_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SHOWCASE_PORT: {e}"))?;

        let log_level = env_or("SHOWCASE_LOG_LEVEL", "info");

        let timeout_secs: u64 = env_or("SHOWCASE_STORE_TIMEOUT_SECS", "10")
            .parse()
            .map_err(|e| format!("Invalid SHOWCASE_STORE_TIMEOUT_SECS: {e}"))?;

        // A missing or malformed backend is not fatal: the site serves fallback data.
        let store = StoreSettings::validate(
            std::env::var("SUPABASE_URL").ok().as_deref(),
            std::env::var("SUPABASE_ANON_KEY").ok().as_deref(),
        );

        Ok(Config {
            host,
            port,
            log_level,
            store_timeout: Duration::from_secs(timeout_secs),
            store,
        })
    }
}

impl StoreSettings {
    /// Check presence of both values and the shape of the URL. Reachability is
    /// not checked here.
    pub fn validate(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingUrl)?;
        let anon_key = anon_key
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingKey)?;

        let parsed = Url::parse(url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;

        if parsed.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "scheme must be https, got {}",
                parsed.scheme()
            )));
        }

        let host = parsed.host_str().unwrap_or_default();
        if !host.ends_with(STORE_DOMAIN_SUFFIX) || host.len() == STORE_DOMAIN_SUFFIX.len() {
            return Err(ConfigError::InvalidUrl(format!(
                "host {host:?} is not a {STORE_DOMAIN_SUFFIX} project"
            )));
        }

        Ok(StoreSettings {
            url: parsed,
            anon_key: anon_key.to_string(),
        })
    }

    /// First few characters of the key, for start-up logging.
    pub fn key_preview(&self) -> String {
        let head: String = self.anon_key.chars().take(8).collect();
        format!("{head}...")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
