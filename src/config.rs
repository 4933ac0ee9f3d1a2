//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/navmenu/navmenu.toml`
//! 3. Local config: `<dir>/.navmenu.toml`
//! 4. Environment variables: `NAVMENU_*` prefix

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::application::render::RendererKind;
use crate::application::services::DEFAULT_CACHE_KEY_PREFIX;
use crate::application::ApplicationError;

/// Render cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache rendered menus in memory
    pub enabled: bool,
    /// Entry lifetime in seconds; unset keeps entries forever
    pub ttl_secs: Option<u64>,
    /// Prefix of cache keys (`<prefix><menu id>`)
    pub key_prefix: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: None,
            key_prefix: DEFAULT_CACHE_KEY_PREFIX.to_string(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }

    fn merge(&self, overlay: &RawCacheConfig) -> Self {
        Self {
            enabled: overlay.enabled.unwrap_or(self.enabled),
            ttl_secs: overlay.ttl_secs.or(self.ttl_secs),
            key_prefix: overlay
                .key_prefix
                .clone()
                .unwrap_or_else(|| self.key_prefix.clone()),
        }
    }
}

/// Raw cache config for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawCacheConfig {
    pub enabled: Option<bool>,
    pub ttl_secs: Option<u64>,
    pub key_prefix: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub renderer: Option<RendererKind>,
    pub cache: RawCacheConfig,
    pub url_vars: Option<IndexMap<String, String>>,
}

/// Unified configuration for navmenu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Renderer used when none is given on the command line
    pub renderer: RendererKind,
    /// Render cache settings
    pub cache: CacheConfig,
    /// URL placeholders: `{name}` in item URLs is replaced by the value
    pub url_vars: IndexMap<String, String>,
}

/// Get the XDG config directory for navmenu.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "navmenu").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("navmenu.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".navmenu.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self.
    ///
    /// Scalars: overlay wins if specified. `url_vars` merge by name.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut url_vars = self.url_vars.clone();
        if let Some(vars) = &overlay.url_vars {
            url_vars.extend(vars.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self {
            renderer: overlay.renderer.unwrap_or(self.renderer),
            cache: self.cache.merge(&overlay.cache),
            url_vars,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.navmenu.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        let local = local_dir
            .map(local_config_path)
            .filter(|path| path.exists());
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load from explicit config files (either may be absent), then env vars.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        for path in [global, local].into_iter().flatten() {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply NAVMENU_* environment variables as explicit overrides.
    ///
    /// Nested keys use `__`: `NAVMENU_CACHE__TTL_SECS=60`,
    /// `NAVMENU_URL_VARS__BASE=https://example.com`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NAVMENU")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("renderer") {
            settings.renderer =
                val.parse::<RendererKind>()
                    .map_err(|message| ApplicationError::Config {
                        message: format!("NAVMENU_RENDERER: {message}"),
                    })?;
        }
        if let Ok(val) = config.get_bool("cache.enabled") {
            settings.cache.enabled = val;
        }
        if let Ok(val) = config.get_int("cache.ttl_secs") {
            settings.cache.ttl_secs =
                Some(u64::try_from(val).map_err(|_| ApplicationError::Config {
                    message: format!("NAVMENU_CACHE__TTL_SECS must not be negative: {val}"),
                })?);
        }
        if let Ok(val) = config.get_string("cache.key_prefix") {
            settings.cache.key_prefix = val;
        }
        if let Ok(table) = config.get_table("url_vars") {
            for (name, value) in table {
                let value = value.into_string().map_err(config_err)?;
                settings.url_vars.insert(name, value);
            }
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# navmenu configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/navmenu/navmenu.toml
#   Local:  <dir>/.navmenu.toml
#   Env:    NAVMENU_* environment variables (nested keys use "__")

# Renderer used by `navmenu render` without --format
# One of: html, bootstrap, json, array
# renderer = "html"

[cache]
# Cache rendered menus
# enabled = false

# Entry lifetime in seconds (unset = never expires)
# ttl_secs = 300

# Cache key prefix, keys are <prefix><menu id>
# key_prefix = "menu_"

[url_vars]
# "{name}" in item URLs is replaced by the value
# base = "https://example.com"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
