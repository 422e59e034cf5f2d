use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let whatsapp_number = require("REGIA_WHATSAPP_NUMBER")?;
    if !whatsapp_number.chars().any(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "REGIA_WHATSAPP_NUMBER".to_string(),
            reason: "must contain at least one digit".to_string(),
        });
    }

    let env = parse_environment(&or_default("REGIA_ENV", "development"))?;
    let log_level = or_default("REGIA_LOG_LEVEL", "info");

    let catalogs_path = PathBuf::from(or_default("REGIA_CATALOGS_PATH", "./config/catalogs.yaml"));
    let assets_root = PathBuf::from(or_default("REGIA_ASSETS_ROOT", "./assets"));
    let assets_base_url = or_default("REGIA_ASSETS_BASE_URL", "/images");

    let cart_dir = PathBuf::from(or_default("REGIA_CART_DIR", "./.regia"));
    let cart_storage_key = or_default("REGIA_CART_STORAGE_KEY", "cart");
    if cart_storage_key.is_empty()
        || !cart_storage_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "REGIA_CART_STORAGE_KEY".to_string(),
            reason: "must be non-empty and contain only [A-Za-z0-9_-]".to_string(),
        });
    }

    let max_line_quantity = parse_u32("REGIA_MAX_LINE_QUANTITY", "10")?;
    if max_line_quantity == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "REGIA_MAX_LINE_QUANTITY".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let image_load_concurrency = parse_usize("REGIA_IMAGE_LOAD_CONCURRENCY", "4")?;

    Ok(AppConfig {
        env,
        log_level,
        whatsapp_number,
        catalogs_path,
        assets_root,
        assets_base_url,
        cart_dir,
        cart_storage_key,
        max_line_quantity,
        image_load_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        "test" => Ok(Environment::Test),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REGIA_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
