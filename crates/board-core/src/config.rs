//! Client Configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    /// API origin, without trailing slash
    pub api_base_url: String,
    /// Posts requested per feed page
    pub page_size: u32,
    /// Transport timeout (native targets only; browsers use fetch defaults)
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Override the API base URL when one is given (e.g. from a build-time env var)
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(url) = base_url.map(str::trim).filter(|url| !url.is_empty()) {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.max(1)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Server-relative asset paths (leading `/`) are served from the API origin
    pub fn resolve_asset_url(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.api_base_url.trim_end_matches('/'), url)
        } else {
            url.to_string()
        }
    }
}
