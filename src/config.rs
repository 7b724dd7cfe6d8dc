use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FORM_ID: u64 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

/// Process settings, read once at startup from the environment (and `.env`).
#[derive(Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub givewp_url: Option<String>,
    pub givewp_api_key: Option<String>,
    pub givewp_api_token: Option<String>,
    #[serde(default)]
    pub public_stripe_publishable_key: String,
    #[serde(default = "default_form_id")]
    pub donation_form_id: u64,
    pub upstream_timeout_secs: Option<u64>,
    pub allowed_origins: Option<String>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_form_id() -> u64 {
    DEFAULT_FORM_ID
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("givewp_url", &self.givewp_url)
            .field("givewp_api_key", &self.givewp_api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "givewp_api_token",
                &self.givewp_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("public_stripe_publishable_key", &self.public_stripe_publishable_key)
            .field("donation_form_id", &self.donation_form_id)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(::config::Environment::default())
    }

    pub fn from_source(source: ::config::Environment) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(source.ignore_empty(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Credentials for the GiveWP donations API.
#[derive(Clone)]
pub struct GiveWpConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_token: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GiveWpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiveWpConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("api_token", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GiveWpConfig {
    pub fn from_settings(settings: &AppConfig) -> Result<Self, ConfigError> {
        let base_url = required(&settings.givewp_url, "GIVEWP_URL")?;
        let api_key = required(&settings.givewp_api_key, "GIVEWP_API_KEY")?;
        let api_token = required(&settings.givewp_api_token, "GIVEWP_API_TOKEN")?;

        let parsed = Url::parse(&base_url).map_err(|_| ConfigError::InvalidUrl(base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(base_url));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_token,
            timeout: settings.upstream_timeout(),
        })
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::MissingRequired(name))
}
