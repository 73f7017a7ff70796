//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_SOURCE_URL};
use crate::{DirectoryError, DirectoryResult};
use std::time::Duration;
use url::Url;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    source_url: Url,
    fetch_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::InvalidInput`] if the source URL is not `http` or `https`, or if
    /// the timeout is zero.
    pub fn new(source_url: Url, fetch_timeout: Duration) -> DirectoryResult<Self> {
        if !matches!(source_url.scheme(), "http" | "https") {
            return Err(DirectoryError::InvalidInput(format!(
                "source URL must use http or https, got {}",
                source_url.scheme()
            )));
        }

        if fetch_timeout.is_zero() {
            return Err(DirectoryError::InvalidInput(
                "fetch timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            source_url,
            fetch_timeout,
        })
    }

    /// Build a configuration from raw (typically environment) values.
    ///
    /// Missing or blank values fall back to [`DEFAULT_SOURCE_URL`] and
    /// [`DEFAULT_FETCH_TIMEOUT_SECS`].
    pub fn from_env_values(
        source_url: Option<String>,
        fetch_timeout_secs: Option<String>,
    ) -> DirectoryResult<Self> {
        Self::new(
            source_url_from_env_value(source_url)?,
            fetch_timeout_from_env_value(fetch_timeout_secs)?,
        )
    }

    pub fn source_url(&self) -> &Url {
        &self.source_url
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }
}

/// Parse the directory source URL from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_SOURCE_URL`].
pub fn source_url_from_env_value(value: Option<String>) -> DirectoryResult<Url> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());

    Url::parse(&value)
        .map_err(|e| DirectoryError::InvalidInput(format!("invalid source URL {value:?}: {e}")))
}

/// Parse the fetch timeout (whole seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_FETCH_TIMEOUT_SECS`].
pub fn fetch_timeout_from_env_value(value: Option<String>) -> DirectoryResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v.parse::<u64>().map_err(|_| {
            DirectoryError::InvalidInput(format!("invalid fetch timeout seconds: {v:?}"))
        })?,
        None => DEFAULT_FETCH_TIMEOUT_SECS,
    };

    Ok(Duration::from_secs(secs))
}
