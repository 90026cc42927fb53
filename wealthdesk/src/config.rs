//! Runtime settings loaded via OrthoConfig.
//!
//! Values layer defaults, an optional config file, `WEALTHDESK_*` environment
//! variables, and command-line flags. Every field is optional; accessors
//! supply the defaults.

use std::ffi::OsString;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_LATENCY_MS: u64 = 300;
const DEFAULT_SEED_NAME: &str = "ledger-lark";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Invalid setting values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The layered sources could not be merged.
    #[error("failed to load settings: {0}")]
    Load(String),
    /// `backend` named neither adapter set.
    #[error("unknown backend `{0}`; expected `memory` or `http`")]
    UnknownBackend(String),
    /// `api_base_url` is not an absolute URL.
    #[error("invalid api_base_url `{value}`: {message}")]
    BaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind_addr `{0}`")]
    BindAddr(String),
    /// `session_file` is not valid UTF-8.
    #[error("session_file must be valid UTF-8: {0}")]
    SessionFile(String),
}

/// Which adapter set answers the service ports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Seeded in-memory services.
    #[default]
    Memory,
    /// REST services at `api_base_url`.
    Http,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "http" => Ok(Self::Http),
            other => Err(ConfigError::UnknownBackend(other.to_owned())),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Http => "http",
        })
    }
}

/// Settings shared by the mock server and the CLI.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WEALTHDESK")]
pub struct AppSettings {
    /// `memory` or `http`.
    pub backend: Option<String>,
    /// Base URL of the REST backend, including the `/api` prefix.
    pub api_base_url: Option<String>,
    /// HTTP client timeout in milliseconds.
    pub request_timeout_ms: Option<u64>,
    /// Fixed simulated latency of in-memory calls, in milliseconds.
    pub latency_ms: Option<u64>,
    /// Extra random latency of up to this many milliseconds.
    pub latency_jitter_ms: Option<u64>,
    /// Seed to generate mock data from.
    pub seed_name: Option<String>,
    /// Seed registry override; the built-in registry is used otherwise.
    pub registry_path: Option<PathBuf>,
    /// JSON file holding the persisted session; in memory when absent.
    pub session_file: Option<PathBuf>,
    /// Address the mock server listens on.
    pub bind_addr: Option<String>,
}

impl AppSettings {
    /// Load from the environment, config file, and `args`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a source cannot be parsed.
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::load_from_iter(args).map_err(|err| ConfigError::Load(err.to_string()))
    }

    /// Selected adapter set.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnknownBackend`] for anything but `memory` or
    /// `http`.
    pub fn backend(&self) -> Result<BackendKind, ConfigError> {
        self.backend
            .as_deref()
            .map_or(Ok(BackendKind::default()), str::parse)
    }

    /// REST base URL, with a trailing slash so endpoints join beneath it.
    ///
    /// # Errors
    /// Returns [`ConfigError::BaseUrl`] when the value does not parse.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let normalised = if raw.ends_with('/') {
            raw.to_owned()
        } else {
            format!("{raw}/")
        };
        Url::parse(&normalised).map_err(|err| ConfigError::BaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// HTTP client timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS))
    }

    /// Fixed simulated latency.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms.unwrap_or(DEFAULT_LATENCY_MS))
    }

    /// Random latency ceiling.
    pub fn latency_jitter(&self) -> Duration {
        Duration::from_millis(self.latency_jitter_ms.unwrap_or_default())
    }

    /// Seed name, falling back to the default.
    pub fn seed_name(&self) -> &str {
        self.seed_name.as_deref().unwrap_or(DEFAULT_SEED_NAME)
    }

    /// Registry override, if any.
    pub fn registry_path(&self) -> Option<&PathBuf> {
        self.registry_path.as_ref()
    }

    /// Session file, if one is configured.
    ///
    /// # Errors
    /// Returns [`ConfigError::SessionFile`] for non-UTF-8 paths.
    pub fn session_file(&self) -> Result<Option<Utf8PathBuf>, ConfigError> {
        self.session_file
            .clone()
            .map(|path| {
                Utf8PathBuf::from_path_buf(path)
                    .map_err(|raw| ConfigError::SessionFile(raw.display().to_string()))
            })
            .transpose()
    }

    /// Listen address for the mock server.
    ///
    /// # Errors
    /// Returns [`ConfigError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|_| ConfigError::BindAddr(raw.to_owned()))
    }
}
