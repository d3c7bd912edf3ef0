use std::net::SocketAddr;
use std::path::PathBuf;

use crate::places::RankStrategy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Per-client fixed-window request limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Overrides the built-in classifier lists when set.
    pub lists_path: Option<PathBuf>,
    /// JSON snapshot of places served by the snapshot place source.
    pub places_path: PathBuf,
    pub default_radius_m: u32,
    pub max_results: usize,
    pub default_strategy: RankStrategy,
    pub require_coffee_hint: bool,
    /// `None` disables rate limiting entirely.
    pub rate_limit: Option<RateLimitConfig>,
}
