//! # shop-config
//!
//! Layered configuration loading for the SmartShop console using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SMARTSHOP_*` prefix, `__` as separator)
//! 2. An explicit file passed by the caller (e.g. `--config`)
//! 3. Project-level `.smartshop/config.toml`
//! 4. User-level `~/.config/smartshop/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `SMARTSHOP_BACKEND__BASE_URL` -> `backend.base_url`,
//! `SMARTSHOP_SYNC__DEFAULT_ROW_LIMIT` -> `sync.default_row_limit`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use shop_config::ShopConfig;
//!
//! let config = ShopConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.backend.normalized_base_url());
//! ```

mod backend;
mod endpoints;
mod error;
mod sync;
mod view;

pub use backend::BackendConfig;
pub use endpoints::EndpointConfig;
pub use error::ConfigError;
pub use sync::SyncConfig;
pub use view::ViewConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub view: ViewConfig,
}

impl ShopConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an extra TOML file layered above the
    /// project config and below the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `path` does not exist, or any
    /// extraction/validation error.
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::InvalidValue {
                field: "config".into(),
                reason: format!("file '{}' does not exist", path.display()),
            });
        }
        Self::extract(Self::figment_with_file(Some(path)))
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with_file(None)
    }

    fn figment_with_file(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".smartshop/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed("SMARTSHOP_").split("__"))
    }

    /// Extract and validate a config from any figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()?;
        self.endpoints.validate()?;
        if let Some(empty) = self.view.excluded_features.iter().find(|f| f.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "view.excluded_features".into(),
                reason: format!("feature name '{empty}' is blank"),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("smartshop").join("config.toml"))
    }
}
