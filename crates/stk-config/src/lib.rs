//! # stk-config
//!
//! Layered configuration loading for stocktake using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STOCKTAKE_*` prefix, `__` as separator)
//! 2. Project-level `.stocktake/config.toml`
//! 3. User-level `~/.config/stocktake/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STOCKTAKE_GITHUB__TOKEN` -> `github.token`,
//! `STOCKTAKE_SHEETS__ENDPOINT` -> `sheets.endpoint`, etc. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use stk_config::StocktakeConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = StocktakeConfig::load_with_dotenv().expect("config");
//!
//! if config.github.is_configured() {
//!     println!("authenticated GitHub access");
//! }
//! ```

mod audit;
mod error;
mod github;
mod sheets;

pub use audit::AuditConfig;
pub use error::ConfigError;
pub use github::GithubConfig;
pub use sheets::SheetsConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StocktakeConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl StocktakeConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any layer fails to merge or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads the nearest `.env` file before building the figment. This is
    /// the typical entry point for the CLI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any layer fails to merge or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".stocktake/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("STOCKTAKE_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stocktake").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is
    /// found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = StocktakeConfig::default();
        assert!(!config.github.is_configured());
        assert!(!config.sheets.is_configured());
        assert_eq!(config.audit.delay_ms, 1000);
    }

    #[test]
    fn env_layer_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STOCKTAKE_GITHUB__TOKEN", "ghp_test");
            jail.set_env("STOCKTAKE_AUDIT__DELAY_MS", "250");

            let config: StocktakeConfig = StocktakeConfig::figment().extract()?;
            assert!(config.github.is_configured());
            assert_eq!(config.github.token(), Some("ghp_test"));
            assert_eq!(config.audit.delay_ms, 250);
            Ok(())
        });
    }

    #[test]
    fn project_toml_layer_is_read() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".stocktake")?;
            jail.create_file(
                ".stocktake/config.toml",
                r#"
                    [sheets]
                    endpoint = "https://api.sheety.co/abc/audit/sheet1"

                    [audit]
                    chapter = "State University"
                "#,
            )?;

            let config: StocktakeConfig = StocktakeConfig::figment().extract()?;
            assert!(config.sheets.is_configured());
            assert_eq!(config.audit.chapter, "State University");
            Ok(())
        });
    }

    #[test]
    fn env_wins_over_project_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".stocktake")?;
            jail.create_file(
                ".stocktake/config.toml",
                r#"
                    [audit]
                    delay_ms = 5000
                "#,
            )?;
            jail.set_env("STOCKTAKE_AUDIT__DELAY_MS", "100");

            let config: StocktakeConfig = StocktakeConfig::figment().extract()?;
            assert_eq!(config.audit.delay_ms, 100);
            Ok(())
        });
    }
}
