use serde::{Deserialize, Serialize};

/// Configuration for the `directory` module
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryConfig {
    /// Value of the `X-API-Version` header on every response
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Upper bound for every key field (group, service, action, user, target, type)
    #[serde(default = "default_max_field_length")]
    pub max_field_length: usize,

    /// Request body size limit in bytes
    #[serde(default = "default_body_limit_bytes")]
    pub body_limit_bytes: usize,

    /// Per-request timeout; expiry answers 504
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            max_field_length: default_max_field_length(),
            body_limit_bytes: default_body_limit_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
            cors: CorsConfig::default(),
        }
    }
}

fn default_api_version() -> String {
    "1.0.0".to_owned()
}

fn default_max_field_length() -> usize {
    256
}

fn default_body_limit_bytes() -> usize {
    1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct CorsConfig {
    /// Allowed origins: `["*"]` means any
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods, e.g. `["GET","POST","OPTIONS"]`
    pub allowed_methods: Vec<String>,
    /// Allowed request headers; `["*"]` means any
    pub allowed_headers: Vec<String>,
    /// Max age for preflight caching in seconds
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: vec![
                "GET".to_owned(),
                "POST".to_owned(),
                "PUT".to_owned(),
                "DELETE".to_owned(),
                "OPTIONS".to_owned(),
            ],
            allowed_headers: vec!["Content-Type".to_owned(), "X-Api-Key".to_owned()],
            max_age_seconds: 600,
        }
    }
}
