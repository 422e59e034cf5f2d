//! Shared domain types and configuration for the Regia storefront.

pub mod app_config;
pub mod catalogs;
pub mod colors;
pub mod config;
pub mod money;
pub mod slug;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalogs::{load_catalogs, CatalogConfig, CatalogsFile, CollapseRule, GroupOverride};
pub use colors::{normalize_color_key, swatch_from_name, Swatch, FALLBACK_HEX};
pub use config::{load_app_config, load_app_config_from_env};
pub use money::{price_label, Money, PRICE_ON_REQUEST};
pub use slug::{fold_text, slugify};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalogs file {path}: {source}")]
    CatalogsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalogs file: {0}")]
    CatalogsFileParse(#[from] serde_yaml::Error),

    #[error("catalog config validation failed: {0}")]
    Validation(String),
}
