//! Application configuration

use std::collections::HashMap;
use std::fmt;

use application::IngestSettings;
use integration_openmeteo::OpenMeteoConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Environment variable naming the destination bucket
pub const RAW_BUCKET_ENV: &str = "RAW_BUCKET";

/// Environment variable naming the upstream URL
pub const SOURCE_URL_ENV: &str = "SOURCE_URL";

/// Port variable set by container hosts such as Cloud Run
pub const PORT_ENV: &str = "PORT";

/// Prefix for all other environment overrides, e.g. `INGEST_SERVER__HOST`
pub const ENV_PREFIX: &str = "INGEST";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// Structured JSON lines
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {s}. Use 'text' or 'json'")),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Destination bucket for raw CSV objects
    #[serde(default)]
    pub raw_bucket: Option<String>,

    /// Upstream Open-Meteo URL
    #[serde(default)]
    pub source_url: Option<String>,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream client configuration
    #[serde(default)]
    pub source: OpenMeteoConfig,

    /// Object storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            shutdown_timeout_secs: Some(30),
            log_format: LogFormat::default(),
        }
    }
}

/// S3-compatible object storage configuration
///
/// Defaults target the Google Cloud Storage interoperability endpoint,
/// which accepts HMAC keys in place of AWS credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Region name (e.g. "auto", "us-east-1")
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint; empty means the AWS endpoint for `region`
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Access key (falls back to the AWS environment if unset)
    #[serde(default)]
    pub access_key: Option<String>,

    /// Secret key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub secret_key: Option<SecretString>,

    /// Address buckets by path instead of virtual host
    #[serde(default = "default_true")]
    pub path_style: bool,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_endpoint() -> String {
    "https://storage.googleapis.com".to_string()
}

const fn default_true() -> bool {
    true
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("path_style", &self.path_style)
            .finish()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: default_endpoint(),
            access_key: None,
            secret_key: None,
            path_style: true,
        }
    }
}

impl StorageConfig {
    /// Get the secret key as a string reference (for request signing)
    #[must_use]
    pub fn secret_key_str(&self) -> Option<&str> {
        self.secret_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Whether both halves of an explicit key pair are present
    #[must_use]
    pub fn has_explicit_credentials(&self) -> bool {
        self.access_key.as_deref().is_some_and(|k| !k.is_empty())
            && self.secret_key_str().is_some_and(|k| !k.is_empty())
    }
}

impl AppConfig {
    /// Load configuration from an explicit variable map and optional file
    ///
    /// Precedence, lowest first: defaults, `config.{toml,yaml,json}`,
    /// `INGEST_`-prefixed variables (`__` separates nested keys), then
    /// `RAW_BUCKET`, `SOURCE_URL` and `PORT`.
    pub fn load_from_env(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let raw_bucket = vars.get(RAW_BUCKET_ENV).cloned();
        let source_url = vars.get(SOURCE_URL_ENV).cloned();
        let port = vars.get(PORT_ENV).cloned();

        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., INGEST_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(vars.into_iter().collect())),
            )
            .set_override_option("raw_bucket", raw_bucket)?
            .set_override_option("source_url", source_url)?
            .set_override_option("server.port", port)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load from the process environment, falling back on failure
    ///
    /// See [`AppConfig::load_or_fallback`].
    pub fn load_with_fallback() -> (Self, Option<config::ConfigError>) {
        Self::load_or_fallback(std::env::vars().collect())
    }

    /// Load configuration, keeping the required settings if anything else fails
    ///
    /// When a value such as `PORT` or a config file entry cannot be parsed,
    /// the result holds defaults plus `RAW_BUCKET` and `SOURCE_URL` taken
    /// verbatim from `vars`, together with the load error.
    pub fn load_or_fallback(vars: HashMap<String, String>) -> (Self, Option<config::ConfigError>) {
        let raw_bucket = vars.get(RAW_BUCKET_ENV).cloned();
        let source_url = vars.get(SOURCE_URL_ENV).cloned();

        match Self::load_from_env(vars) {
            Ok(config) => (config, None),
            Err(e) => (
                Self {
                    raw_bucket,
                    source_url,
                    ..Self::default()
                },
                Some(e),
            ),
        }
    }

    /// Settings handed to the ingest service
    ///
    /// Unset values become empty strings; the service reports them as
    /// missing when triggered.
    #[must_use]
    pub fn ingest_settings(&self) -> IngestSettings {
        IngestSettings::new(
            self.raw_bucket.clone().unwrap_or_default(),
            self.source_url.clone().unwrap_or_default(),
        )
    }
}
