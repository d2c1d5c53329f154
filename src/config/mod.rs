// SPDX-License-Identifier: MPL-2.0
//! This module handles the queue configuration, loading and saving it
//! to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[queue]` - Capacity and default auto-dismiss durations
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass a directory to `load_with_override()`
//! 3. Set `TOAST_QUEUE_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_queue::config;
//!
//! let (config, warning) = config::load();
//! if let Some(message) = warning {
//!     eprintln!("{message}");
//! }
//! let settings = config.queue_settings();
//! assert!(settings.max_toasts().value() <= config::MAX_TOASTS_LIMIT);
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::queue::{DurationMs, MaxToasts};
use crate::error::{Error, Result};
use crate::notifications::QueueSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "toast_queue";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_QUEUE_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// `[queue]` section.
///
/// Values are signed so that a hand-edited file with a negative number still
/// parses; they are clamped when resolved into [`QueueSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    #[serde(default)]
    pub max_toasts: Option<i64>,
    #[serde(default)]
    pub default_duration_ms: Option<i64>,
    #[serde(default)]
    pub error_duration_ms: Option<i64>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_toasts: Some(DEFAULT_MAX_TOASTS as i64),
            default_duration_ms: Some(DEFAULT_DURATION_MS as i64),
            error_duration_ms: Some(DEFAULT_ERROR_DURATION_MS as i64),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueConfig,
}

impl Config {
    /// Resolves the file values into validated store settings.
    ///
    /// Missing fields fall back to the defaults. Out-of-range values are
    /// clamped to `0..=MAX_TOASTS_LIMIT` and `0..=MAX_DURATION_MS`.
    #[must_use]
    pub fn queue_settings(&self) -> QueueSettings {
        let queue = &self.queue;
        let max_toasts = queue.max_toasts.map_or_else(MaxToasts::default, |value| {
            let clamped = MaxToasts::clamped(value);
            if i64::try_from(clamped.value()).ok() != Some(value) {
                tracing::warn!(
                    configured = value,
                    effective = clamped.value(),
                    "max_toasts out of range, clamped"
                );
            }
            clamped
        });
        let default_duration = queue
            .default_duration_ms
            .map_or(DurationMs::new(DEFAULT_DURATION_MS), |value| {
                clamped_duration("default_duration_ms", value)
            });
        let error_duration = queue
            .error_duration_ms
            .map_or(DurationMs::new(DEFAULT_ERROR_DURATION_MS), |value| {
                clamped_duration("error_duration_ms", value)
            });

        let settings = QueueSettings::new(max_toasts, default_duration, error_duration);
        if settings.error_duration() != error_duration {
            tracing::warn!(
                configured = error_duration.value(),
                effective = settings.error_duration().value(),
                "error_duration_ms adjusted to stay at least as long as default_duration_ms"
            );
        }
        settings
    }
}

fn clamped_duration(field: &str, value: i64) -> DurationMs {
    let clamped = DurationMs::clamped(value);
    if i64::try_from(clamped.value()).ok() != Some(value) {
        tracing::warn!(
            field,
            configured = value,
            effective = clamped.value(),
            "duration out of range, clamped"
        );
    }
    clamped
}

// =============================================================================
// Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    base_dir
        .or_else(|| std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from))
        .or_else(|| dirs::config_dir().map(|path| path.join(APP_NAME)))
        .map(|dir| dir.join(CONFIG_FILE))
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default location.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to load config, using defaults"
                    );
                    return (
                        Config::default(),
                        Some(format!("could not load {}: {err}", path.display())),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config = toml::from_str::<Config>(&content)?;
    Ok(config)
}

/// Saves the configuration to the default location.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_queue_section() {
        let config = Config {
            queue: QueueConfig {
                max_toasts: Some(3),
                default_duration_ms: Some(1_500),
                error_duration_ms: Some(6_000),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("[queue]\nmax_toasts = 2\n").expect("valid toml");
        let settings = config.queue_settings();

        assert_eq!(settings.max_toasts().value(), 2);
        assert_eq!(settings.default_duration().value(), DEFAULT_DURATION_MS);
        assert_eq!(settings.error_duration().value(), DEFAULT_ERROR_DURATION_MS);
    }

    #[test]
    fn empty_file_yields_default_settings() {
        let config: Config = toml::from_str("").expect("empty toml is valid");
        assert_eq!(config.queue_settings(), QueueSettings::default());
    }

    #[test]
    fn negative_values_are_clamped() {
        let config = Config {
            queue: QueueConfig {
                max_toasts: Some(-1),
                default_duration_ms: Some(-10),
                error_duration_ms: Some(-20),
            },
        };
        let settings = config.queue_settings();

        assert!(settings.max_toasts().is_degenerate());
        assert!(settings.default_duration().is_persistent());
        assert!(settings.error_duration().is_persistent());
    }

    #[test]
    fn oversized_values_are_clamped_to_limits() {
        let config = Config {
            queue: QueueConfig {
                max_toasts: Some(10_000),
                default_duration_ms: Some(i64::MAX),
                error_duration_ms: None,
            },
        };
        let settings = config.queue_settings();

        assert_eq!(settings.max_toasts().value(), MAX_TOASTS_LIMIT);
        assert_eq!(settings.default_duration().value(), MAX_DURATION_MS);
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join(CONFIG_FILE), "not = valid = toml").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.is_some(), "should warn about parse error");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_with_override_then_load_with_override() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let mut config = Config::default();
        config.queue.max_toasts = Some(7);

        save_with_override(&config, Some(base_dir.clone())).expect("save should succeed");
        let (loaded, warning) = load_with_override(Some(base_dir));

        assert!(warning.is_none());
        assert_eq!(loaded.queue.max_toasts, Some(7));
    }
}
