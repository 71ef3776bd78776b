/// User-Agent sent when `SHOPCART_USER_AGENT` is unset. Storefronts serve the
/// `.json` product endpoint to browser-like agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default `tracing` filter when neither `RUST_LOG` nor `SHOPCART_LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub user_agent: String,
    /// Whole-request timeout. `None` keeps the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
