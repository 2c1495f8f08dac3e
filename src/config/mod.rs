#[cfg(feature = "cli")]
pub mod cli;
pub mod loader;

use crate::utils::error::Result;
use crate::utils::validation::{validate_cors_origin, validate_path, Validate};
use std::path::PathBuf;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use loader::FileConfigLoader;

pub const DEFAULT_CONFIG_PATH: &str = "/opt/.config/config.json";

pub const CORS_ORIGIN_VAR: &str = "CORS_ORIGIN";
pub const CONFIG_PATH_VAR: &str = "DOCGEN_CONFIG_PATH";

/// Settings the request handler needs, passed explicitly instead of read ad hoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    /// Echoed as `Access-Control-Allow-Origin` on every response.
    pub cors_origin: Option<String>,
    pub config_path: PathBuf,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            cors_origin: None,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }
}

impl HandlerConfig {
    pub fn new(cors_origin: Option<String>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            cors_origin: cors_origin.filter(|origin| !origin.is_empty()),
            config_path: config_path.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup(CONFIG_PATH_VAR)
            .filter(|path| !path.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        Self::new(lookup(CORS_ORIGIN_VAR), config_path)
    }
}

impl Validate for HandlerConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config_path", &self.config_path.to_string_lossy())?;

        // Any non-empty origin is echoed as-is; unusual values only warrant a warning.
        if let Some(origin) = &self.cors_origin {
            if let Err(e) = validate_cors_origin("cors_origin", origin) {
                tracing::warn!(error = %e, "CORS origin will be echoed but browsers may not match it");
            }
        }

        tracing::debug!("Handler configuration validation passed");
        Ok(())
    }
}
