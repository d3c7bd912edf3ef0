pub mod app_config;
pub mod config;
pub mod lists;
pub mod normalize;
pub mod places;

pub use app_config::{AppConfig, Environment, RateLimitConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use lists::{load_lists, AmbiguousBrand, ClassifierLists};
pub use normalize::normalize;
pub use places::{
    clamp_radius_m, Coordinates, DisplayOrder, RankStrategy, RankedResult, RawPlace,
    DEFAULT_RADIUS_M, MAX_RADIUS_M, MAX_RESULTS, MIN_RADIUS_M,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read classifier lists file {path}: {source}")]
    ListsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse classifier lists file: {0}")]
    ListsFileParse(#[source] serde_yaml::Error),

    #[error("classifier lists validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown ranking strategy: {0}")]
    UnknownStrategy(String),

    #[error("unknown display order: {0}")]
    UnknownDisplayOrder(String),
}
