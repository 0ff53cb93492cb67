//! Centralized configuration management for complaint-desk

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:5000/";
const DEFAULT_USER_AGENT: &str = "complaint-desk/0.1.0";
const DEFAULT_LOG_FILE: &str = "./complaint_desk.log";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote complaint service
    pub api: ApiConfig,
    /// HTTP client configuration
    pub http: HttpConfig,
    /// Terminal UI configuration
    pub ui: UiConfig,
    /// Log file written by every mode
    pub log_file: PathBuf,
}

/// Remote service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL the `TestApi/...` endpoints are appended to
    pub base_url: String,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Complaints shown per list page
    pub page_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            http: HttpConfig::default(),
            ui: UiConfig::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api = ApiConfig {
            base_url: lookup("COMPLAINT_DESK_BASE_URL").unwrap_or(defaults.api.base_url),
        };

        let http = HttpConfig {
            timeout_seconds: parse_var(&lookup, "COMPLAINT_DESK_HTTP_TIMEOUT_SECONDS")?
                .unwrap_or(defaults.http.timeout_seconds),
            user_agent: lookup("COMPLAINT_DESK_USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        let ui = UiConfig {
            page_size: parse_var(&lookup, "COMPLAINT_DESK_PAGE_SIZE")?
                .unwrap_or(defaults.ui.page_size),
        };

        let log_file = lookup("COMPLAINT_DESK_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        Ok(Config {
            api,
            http,
            ui,
            log_file,
        })
    }

    /// Replace the base URL, e.g. from a command line flag
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.api.base_url = url;
        }
        self
    }

    /// Base URL guaranteed to end with `/`
    pub fn base_url(&self) -> String {
        let trimmed = self.api.base_url.trim();
        if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        }
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url())
            .with_context(|| format!("Invalid base URL: {}", self.api.base_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("Base URL must use http or https: {}", self.api.base_url);
        }

        if self.http.timeout_seconds == 0 {
            anyhow::bail!("HTTP timeout must be at least one second");
        }

        if self.ui.page_size == 0 {
            anyhow::bail!("Page size must be at least 1");
        }

        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse a variable as a specific type
fn parse_var<T, F>(lookup: &F, var_name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match lookup(var_name) {
        Some(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        None => Ok(None),
    }
}
