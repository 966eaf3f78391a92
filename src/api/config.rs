use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://learn.smktelkom-mlg.sch.id/kos/api";
pub const DEFAULT_STORAGE_URL: &str = "https://learn.smktelkom-mlg.sch.id/kos/storage/";
pub const DEFAULT_MAKER_ID: &str = "1";

/// Where the backend lives and how this app identifies itself to it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// API root, endpoints are appended verbatim
    pub base_url: String,
    /// Sent as the `MakerID` header on every request
    pub maker_id: String,
    /// Prefix for stored image file names
    pub storage_url: String,
    /// Request timeout. The backend contract has none, so neither do we by default.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            maker_id: DEFAULT_MAKER_ID.to_string(),
            storage_url: DEFAULT_STORAGE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// Defaults overridden by `KOS_API_BASE_URL`, `KOS_MAKER_ID`,
    /// `KOS_STORAGE_URL` and `KOS_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = env::var("KOS_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(maker_id) = env::var("KOS_MAKER_ID") {
            config.maker_id = maker_id;
        }
        if let Ok(storage_url) = env::var("KOS_STORAGE_URL") {
            config.storage_url = storage_url;
        }
        if let Ok(raw) = env::var("KOS_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) => config.timeout = Some(Duration::from_secs(secs)),
                Err(_) => warn!("Ignoring non-numeric KOS_TIMEOUT_SECS={}", raw),
            }
        }
        config.normalized()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self.normalized()
    }

    pub fn with_maker_id(mut self, maker_id: impl Into<String>) -> Self {
        self.maker_id = maker_id.into();
        self
    }

    pub fn with_storage_url(mut self, storage_url: impl Into<String>) -> Self {
        self.storage_url = storage_url.into();
        self.normalized()
    }

    /// Base URL without a trailing slash, storage URL with one
    fn normalized(mut self) -> Self {
        while self.base_url.ends_with('/') {
            self.base_url.pop();
        }
        if !self.storage_url.is_empty() && !self.storage_url.ends_with('/') {
            self.storage_url.push('/');
        }
        self
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
