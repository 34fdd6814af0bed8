//! Runtime settings read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

/// Site URL that triggers the production warning unless overridden.
pub const DEFAULT_PRODUCTION_SITE_URL: &str = "https://data.coat.no";
/// Log file written next to the working directory unless overridden.
pub const DEFAULT_LOG_FILE: &str = "fix_resources.log";

const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// CKAN base URL, without trailing slash.
    pub site_url: String,
    /// API key sent in the `Authorization` header.
    pub api_key: String,
    /// Host used when building corrected download URLs.
    pub download_host: String,
    /// Site URL considered production.
    pub production_site_url: String,
    /// Log file destination; `None` disables file logging.
    pub log_file: Option<PathBuf>,
    /// `tracing` filter directive.
    pub log_level: String,
    /// Timeout for each outbound probe.
    pub probe_timeout: Duration,
    /// Directory to record cassettes into, if recording.
    pub record_dir: Option<PathBuf>,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the site URL
    /// is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns a variable's value.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the site URL
    /// is invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let site_url = non_empty("CKAN_SITE_URL").ok_or(ConfigError::Missing("CKAN_SITE_URL"))?;
        let api_key = non_empty("CKAN_USER_API_KEY")
            .or_else(|| non_empty("CKAN_USER_API_TOKEN"))
            .ok_or(ConfigError::Missing("CKAN_USER_API_KEY"))?;

        let mut settings = Self::for_site(&site_url, api_key);
        settings.download_host = match non_empty("CKAN_DOWNLOAD_HOST") {
            Some(host) => host,
            None => site_host(&site_url)?,
        };
        if let Some(url) = non_empty("CKAN_PRODUCTION_SITE_URL") {
            settings.production_site_url = url.trim_end_matches('/').to_string();
        }
        settings.log_file = match lookup("LOG_FILE_PATH") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };
        if let Some(level) = non_empty("LOG_LEVEL") {
            settings.log_level = level.to_lowercase();
        }
        if let Some(secs) = non_empty("CKAN_PROBE_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            settings.probe_timeout = Duration::from_secs(secs);
        }
        settings.record_dir = non_empty("CKAN_REPAIR_RECORD").map(PathBuf::from);

        Ok(settings)
    }

    /// Settings for `site_url` with every optional value at its default.
    ///
    /// The download host is taken from `site_url`, falling back to the
    /// whole string when it does not parse.
    #[must_use]
    pub fn for_site(site_url: &str, api_key: impl Into<String>) -> Self {
        let site_url = site_url.trim_end_matches('/').to_string();
        Self {
            download_host: site_host(&site_url).unwrap_or_else(|_| site_url.clone()),
            site_url,
            api_key: api_key.into(),
            production_site_url: DEFAULT_PRODUCTION_SITE_URL.to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log_level: "info".to_string(),
            probe_timeout: Duration::from_secs(DEFAULT_PROBE_TIMEOUT_SECS),
            record_dir: None,
        }
    }

    /// Whether the configured site is the production portal.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.site_url == self.production_site_url
    }
}

fn site_host(site_url: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidSiteUrl { url: site_url.to_string(), reason };
    let url = Url::parse(site_url).map_err(|e| invalid(e.to_string()))?;
    let host = url.host_str().ok_or_else(|| invalid("no host".to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
