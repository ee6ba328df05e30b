use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub mutation: MutationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    // ログインセッションがあれば Bearer を、なければゲスト ID を送る
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub guest_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub max_keys: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    pub reorder_settle_ms: u64,
    pub invalidate_related: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:3000/api".to_string(),
                request_timeout_secs: 15,
                session_token: None,
                guest_id: None,
            },
            cache: CacheConfig { max_keys: 256 },
            mutation: MutationConfig::default(),
        }
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            reorder_settle_ms: 500,
            invalidate_related: true,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl MutationConfig {
    pub fn reorder_settle(&self) -> Duration {
        Duration::from_millis(self.reorder_settle_ms)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        // 既定値
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("KANRI_API_BASE_URL") {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                cfg.api.base_url = trimmed.to_string();
            }
        }
        if let Ok(v) = std::env::var("KANRI_API_TIMEOUT_SECS")
            && let Some(value) = parse_u64(&v)
        {
            cfg.api.request_timeout_secs = value.max(1);
        }
        cfg.api.session_token = std::env::var("KANRI_SESSION_TOKEN")
            .ok()
            .and_then(non_empty);
        cfg.api.guest_id = std::env::var("KANRI_GUEST_ID").ok().and_then(non_empty);

        if let Ok(v) = std::env::var("KANRI_CACHE_MAX_KEYS")
            && let Some(value) = parse_u64(&v)
        {
            cfg.cache.max_keys = (value as usize).max(1);
        }

        // 並べ替え後の再取得までの待ち時間
        if let Ok(v) = std::env::var("KANRI_REORDER_SETTLE_MS")
            && let Some(value) = parse_u64(&v)
        {
            cfg.mutation.reorder_settle_ms = value;
        }
        if let Ok(v) = std::env::var("KANRI_INVALIDATE_RELATED") {
            cfg.mutation.invalidate_related = parse_bool(&v, cfg.mutation.invalidate_related);
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("API base_url must not be empty".to_string());
        }
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(format!(
                "API base_url must be an http(s) URL: {}",
                self.api.base_url
            ));
        }
        if self.api.request_timeout_secs == 0 {
            return Err("API request_timeout_secs must be greater than 0".to_string());
        }
        if self.cache.max_keys == 0 {
            return Err("Cache max_keys must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
