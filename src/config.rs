use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::preferences::Theme;

const DEFAULT_DB_POOL_SIZE: NonZeroU32 = match NonZeroU32::new(10) {
    Some(size) => size,
    None => unreachable!(),
};
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Upper bound on open database connections, at least 1.
    pub db_pool_size: NonZeroU32,
    pub host: String,
    pub port: u16,
    /// Directory holding the object storage buckets.
    pub storage_root: PathBuf,
    pub preferences_path: PathBuf,
    /// Theme used until the user picks one.
    pub default_theme: Theme,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let db_pool_size = parse_or(&lookup, "DB_POOL_SIZE", DEFAULT_DB_POOL_SIZE)?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8080)?;
        let storage_root = lookup("STORAGE_ROOT").unwrap_or_else(|| "./storage".to_string());
        let preferences_path =
            lookup("PREFERENCES_PATH").unwrap_or_else(|| "./preferences.json".to_string());
        let default_theme = match lookup("APP_THEME") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "APP_THEME",
                value,
            })?,
            None => Theme::default(),
        };
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;

        Ok(Self {
            database_url,
            db_pool_size,
            host,
            port,
            storage_root: storage_root.into(),
            preferences_path: preferences_path.into(),
            default_theme,
            max_upload_bytes,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/orders")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_pool_size.get(), 10);
        assert_eq!(config.storage_root, PathBuf::from("./storage"));
        assert_eq!(config.default_theme, Theme::Default);
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
    }

    #[test]
    fn database_url_is_required() {
        assert!(matches!(config(&[]), Err(ConfigError::Missing("DATABASE_URL"))));
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config(&[("DATABASE_URL", "x"), ("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "PORT has an invalid value 'eighty'");

        let err = config(&[("DATABASE_URL", "x"), ("APP_THEME", "neon")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "APP_THEME", .. }));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = config(&[("DATABASE_URL", "x"), ("DB_POOL_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "DB_POOL_SIZE", .. }));

        let config = config(&[("DATABASE_URL", "x"), ("DB_POOL_SIZE", "3")]).unwrap();
        assert_eq!(config.db_pool_size.get(), 3);
    }

    #[test]
    fn theme_override() {
        let config = config(&[("DATABASE_URL", "x"), ("APP_THEME", "steel")]).unwrap();
        assert_eq!(config.default_theme, Theme::Steel);
    }
}
