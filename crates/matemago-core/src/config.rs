use std::sync::OnceLock;
use url::Url;

use crate::ConfigError;

/// Base address of the tutor API when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/v1/tutor";

/// Environment variable that overrides [`DEFAULT_API_BASE`].
pub const API_BASE_ENV: &str = "MATEMAGO_API_BASE";

const EXPLAIN_ENDPOINT: &str = "explain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    explain_url: Url,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE).expect("default base address is valid")
    }
}

impl ClientConfig {
    pub fn from_base(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        let mut base_url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            value: raw.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                value: raw.to_string(),
            });
        }

        // `Url::join` replaces the last path segment unless the base ends with `/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let explain_url =
            base_url
                .join(EXPLAIN_ENDPOINT)
                .map_err(|source| ConfigError::InvalidBaseUrl {
                    value: raw.to_string(),
                    source,
                })?;

        Ok(Self {
            base_url,
            explain_url,
        })
    }

    /// Uses `MATEMAGO_API_BASE` when set, the built-in default otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env_api_base() {
            Some(raw) => Self::from_base(raw),
            None => Ok(Self::default()),
        }
    }

    /// Resolution order: explicit override, then environment, then default.
    pub fn resolve(override_base: Option<&str>) -> Result<Self, ConfigError> {
        match override_base.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Self::from_base(raw),
            None => Self::from_env(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn explain_url(&self) -> &Url {
        &self.explain_url
    }
}

fn env_api_base() -> Option<&'static str> {
    static VALUE: OnceLock<Option<String>> = OnceLock::new();
    VALUE
        .get_or_init(|| {
            std::env::var(API_BASE_ENV)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        })
        .as_deref()
}
