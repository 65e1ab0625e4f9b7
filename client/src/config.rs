//! Client configuration loaded via OrthoConfig.
//!
//! Values layer defaults, a configuration file, `BARFINDER_*` environment
//! variables and command-line arguments. Accessors apply fallbacks and
//! validate what the raw fields cannot express.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TOKEN_DIR: &str = "./.barfinder";

/// Host shell the client runs inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// iOS or Android shell with system alerts.
    #[default]
    Native,
    /// Browser shell rendering in-app modals.
    Web,
}

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API base URL does not parse.
    #[error("api_base_url {value:?} is not a valid URL: {source}")]
    InvalidBaseUrl {
        /// Offending value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The API base URL is not an `http(s)` URL with a path.
    #[error("api_base_url {value:?} must be an http(s) URL")]
    UnsupportedBaseUrl {
        /// Offending value.
        value: String,
    },
    /// The timeout was zero.
    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
    /// The platform name is unknown.
    #[error("platform {value:?} is not one of native, web")]
    UnknownPlatform {
        /// Offending value.
        value: String,
    },
}

/// Settings for the Barfinder client core.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BARFINDER")]
pub struct ClientSettings {
    /// Base URL of the REST API.
    pub api_base_url: Option<String>,
    /// Request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Directory holding the persisted token.
    pub token_dir: Option<String>,
    /// Host shell: `native` or `web`.
    pub platform: Option<String>,
    /// Emit JSON formatted logs.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl ClientSettings {
    /// Validated API base URL, falling back to the local development server.
    ///
    /// A missing trailing slash is added so relative paths resolve below the
    /// configured prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the value is not an absolute `http(s)`
    /// URL.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self
            .api_base_url
            .as_deref()
            .map_or(DEFAULT_API_BASE_URL, str::trim);
        let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(ConfigError::UnsupportedBaseUrl {
                value: raw.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Request timeout, defaulting to ten seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        match self
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
        {
            0 => Err(ConfigError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Token directory, defaulting to `./.barfinder`.
    pub fn token_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.token_dir.as_deref().unwrap_or(DEFAULT_TOKEN_DIR))
    }

    /// Host shell, defaulting to [`Platform::Native`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownPlatform`] for any other name.
    pub fn platform(&self) -> Result<Platform, ConfigError> {
        match self.platform.as_deref().map(str::trim) {
            None => Ok(Platform::default()),
            Some(name) if name.eq_ignore_ascii_case("native") => Ok(Platform::Native),
            Some(name) if name.eq_ignore_ascii_case("web") => Ok(Platform::Web),
            Some(name) => Err(ConfigError::UnknownPlatform {
                value: name.to_owned(),
            }),
        }
    }
}
