use std::path::PathBuf;
use std::time::Duration;

pub const ENV_API_KEY: &str = "RESCUETIME_API_KEY";
pub const ANALYTIC_DATA_URL: &str = "https://www.rescuetime.com/anapi/data";
pub const DAILY_SUMMARY_URL: &str = "https://www.rescuetime.com/anapi/daily_summary_feed";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub analytic_data_url: String,
    pub daily_summary_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            analytic_data_url: ANALYTIC_DATA_URL.to_string(),
            daily_summary_url: DAILY_SUMMARY_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Defaults plus the key from `RESCUETIME_API_KEY`.
    pub fn from_env() -> Self {
        Self::default().or_env_key()
    }

    /// Trims the configured key, falling back to `RESCUETIME_API_KEY` when
    /// it is blank.
    pub fn or_env_key(mut self) -> Self {
        self.api_key = match self.api_key.trim() {
            "" => std::env::var(ENV_API_KEY)
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
            key => key.to_string(),
        };
        self
    }

    pub fn with_base_urls(
        mut self,
        analytic_data_url: impl Into<String>,
        daily_summary_url: impl Into<String>,
    ) -> Self {
        self.analytic_data_url = analytic_data_url.into();
        self.daily_summary_url = daily_summary_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Loads `.env` from the working directory or its parents, if there is one.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}
