use serde::{Deserialize, Serialize};

pub const DEFAULT_BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 30;

/// HTTP host configuration, read from `modules.api_ingress`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ApiIngressConfig {
    /// Serve `/openapi.json`.
    pub enable_docs: bool,
    pub cors_enabled: bool,
    pub body_limit_bytes: usize,
    /// Per-request handler timeout; `0` falls back to the default.
    pub request_timeout_sec: u64,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            enable_docs: true,
            cors_enabled: false,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            request_timeout_sec: DEFAULT_REQUEST_TIMEOUT_SEC,
        }
    }
}

impl ApiIngressConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        let secs = if self.request_timeout_sec == 0 {
            DEFAULT_REQUEST_TIMEOUT_SEC
        } else {
            self.request_timeout_sec
        };
        std::time::Duration::from_secs(secs)
    }
}
