use crate::error::ConfigError;
use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 120;
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;
/// Browser timers take a signed 32-bit millisecond delay.
pub const MAX_REQUEST_TIMEOUT_SECS: u32 = i32::MAX as u32 / 1000;

/// Runtime settings of the analyzer UI.
///
/// `api_base_url` is empty for a same-origin backend; otherwise it is an
/// absolute http(s) URL without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u32,
    pub max_upload_bytes: u64,
    pub default_locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_locale: Locale::default(),
        }
    }
}

/// Values that may replace the defaults, typically read from the page
/// query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub locale: Option<String>,
    pub timeout_secs: Option<String>,
}

impl AppConfig {
    /// Defaults plus the base URL baked in at build time, if any.
    pub fn from_build_env(build_base_url: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(base) = build_base_url {
            config.api_base_url = normalize_base_url(base)?;
        }
        Ok(config)
    }

    /// Applies each override independently. Rejected overrides keep the
    /// current value and are returned for logging.
    pub fn apply(&mut self, overrides: ConfigOverrides) -> Vec<ConfigError> {
        let mut rejected = Vec::new();

        if let Some(base) = overrides.api_base_url {
            match normalize_base_url(&base) {
                Ok(url) => self.api_base_url = url,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(code) = overrides.locale {
            match code.parse() {
                Ok(locale) => self.default_locale = locale,
                Err(e) => rejected.push(e),
            }
        }
        if let Some(raw) = overrides.timeout_secs {
            match parse_timeout(&raw) {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(e) => rejected.push(e),
            }
        }

        rejected
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    pub fn request_timeout_millis(&self) -> u32 {
        self.request_timeout_secs.saturating_mul(1000)
    }
}

fn parse_timeout(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|secs| (1..=MAX_REQUEST_TIMEOUT_SECS).contains(secs))
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}
