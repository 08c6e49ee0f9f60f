use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_QUALITY, DEFAULT_TIMEOUT_SECS, MAX_QUALITY, MIN_QUALITY,
};
use crate::error::{OptimizerError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Caller-supplied options. Anything left as `None` falls back to the defaults.
///
/// Deserializable so an options map (JSON, TOML, ...) converts directly:
///
/// ```
/// use img_optimizer::OptimizerOptions;
///
/// let options: OptimizerOptions = serde_json::from_str(r#"{"quality": 70}"#).unwrap();
/// assert_eq!(options.quality, Some(70));
/// assert_eq!(options.timeout, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerOptions {
    pub quality: Option<u8>,
    pub timeout: Option<u64>,
    pub endpoint: Option<String>,
}

impl OptimizerOptions {
    pub fn new(quality: Option<u8>, timeout: Option<u64>) -> Self {
        Self {
            quality,
            timeout,
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}

/// Validated, immutable configuration shared by every call on a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    quality: u8,
    timeout: Duration,
    endpoint: String,
}

impl OptimizerConfig {
    pub fn new(options: OptimizerOptions) -> Result<Self> {
        let quality = options.quality.unwrap_or(DEFAULT_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(OptimizerError::InvalidQuality(quality));
        }

        let timeout = options.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout == 0 {
            return Err(OptimizerError::InvalidTimeout(timeout));
        }

        let endpoint = options
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        validate_endpoint(&endpoint)?;

        Ok(Self {
            quality,
            timeout: Duration::from_secs(timeout),
            endpoint,
        })
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let rest = endpoint
        .strip_prefix("https://")
        .or_else(|| endpoint.strip_prefix("http://"));

    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(OptimizerError::InvalidEndpoint(endpoint.to_string())),
    }
}
