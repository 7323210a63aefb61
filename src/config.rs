//! Application Configuration
//!
//! Defaults are baked in at build time (`FINTRACK_*` env vars) and can be
//! overridden per browser through `localStorage`.

use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TOAST_MS: u64 = 4000;

const KEY_API_URL: &str = "fintrack.api_url";
const KEY_TOKEN: &str = "fintrack.token";
const KEY_LOG: &str = "fintrack.log";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL without trailing slash
    pub api_base_url: String,
    /// Bearer token of the signed-in session
    pub api_token: Option<String>,
    /// How long a toast stays on screen
    pub toast_duration: Duration,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_parts(
            option_env!("FINTRACK_API_URL").unwrap_or(DEFAULT_API_URL),
            None,
            option_env!("FINTRACK_TOAST_MS")
                .and_then(|ms| ms.parse().ok())
                .unwrap_or(DEFAULT_TOAST_MS),
            option_env!("FINTRACK_LOG").unwrap_or("info"),
        )
    }
}

impl AppConfig {
    pub fn from_parts(api_base_url: &str, api_token: Option<&str>, toast_ms: u64, log_level: &str) -> Self {
        Self {
            api_base_url: normalize_url(api_base_url),
            api_token: api_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
            toast_duration: Duration::from_millis(toast_ms),
            log_level: LevelFilter::from_str(log_level.trim()).unwrap_or(LevelFilter::Info),
        }
    }

    /// Apply per-browser overrides looked up through `get`
    pub fn with_overrides(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = get(KEY_API_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = normalize_url(&url);
        }
        if let Some(token) = get(KEY_TOKEN) {
            let token = token.trim();
            self.api_token = (!token.is_empty()).then(|| token.to_string());
        }
        if let Some(level) = get(KEY_LOG).and_then(|l| LevelFilter::from_str(l.trim()).ok()) {
            self.log_level = level;
        }
        self
    }

    /// Build-time defaults plus `localStorage` overrides
    pub fn load() -> Self {
        Self::default().with_overrides(read_local_storage)
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn read_local_storage(key: &str) -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(key).ok()?
}
