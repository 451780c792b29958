// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::status_bar::{Color, StatusBarStyle};
use crate::types::CHANNEL_NAME;

/// File name of the persisted configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Persistent bridge settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Channel the dispatcher is registered under.
    pub channel_name: String,
    /// Background reported before any `setStatusBarBackground` call.
    pub default_background: Color,
    /// Style reported before any `setStatusBarStyle` call.
    pub default_style: StatusBarStyle,
    /// Capabilities of the desktop stub service.
    pub simulated: SimulatedPlatform,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            channel_name: CHANNEL_NAME.to_owned(),
            default_background: Color::BLACK,
            default_style: StatusBarStyle::Light,
            simulated: SimulatedPlatform::default(),
        }
    }
}

/// What the stub service pretends the OS can do.
///
/// Turning a capability off makes the stub behave like an old OS release:
/// setters become no-ops and getters report the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatedPlatform {
    /// Status-bar height in density-independent units.
    pub status_bar_height: f64,
    /// Whether the status-bar background can be tinted.
    pub supports_background: bool,
    /// Whether the foreground style can be switched.
    pub supports_style: bool,
}

impl Default for SimulatedPlatform {
    fn default() -> Self {
        Self {
            status_bar_height: 24.0,
            supports_background: true,
            supports_style: true,
        }
    }
}

impl NavigatorConfig {
    /// Load the config from `dir`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), "no config file ({e}), using defaults");
                return Self::default();
            }
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring malformed config: {e}");
                Self::default()
            }
        }
    }

    /// Like [`load_or_default`](Self::load_or_default), but on first run
    /// writes the defaults to `dir` so there is a file to edit.
    pub fn load_or_init(dir: &Path) -> Self {
        if dir.join(CONFIG_FILE).exists() {
            return Self::load_or_default(dir);
        }
        let config = Self::default();
        match config.persist(dir) {
            Ok(()) => tracing::info!(path = %dir.display(), "wrote default config"),
            Err(e) => tracing::warn!(path = %dir.display(), "cannot write default config: {e}"),
        }
        config
    }

    /// Write the config as pretty JSON into `dir`.
    pub fn persist(&self, dir: &Path) -> Result<()> {
        let path = dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_channel_contract() {
        let config = NavigatorConfig::default();
        assert_eq!(config.channel_name, "plus_navigator");
        assert_eq!(config.default_background.to_string(), "#000000");
        assert_eq!(config.default_style, StatusBarStyle::Light);
    }

    #[test]
    fn persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = NavigatorConfig {
            default_background: Color::from_rgb(0x336699),
            simulated: SimulatedPlatform {
                status_bar_height: 47.0,
                supports_background: false,
                supports_style: true,
            },
            ..Default::default()
        };
        config.persist(dir.path()).unwrap();
        assert_eq!(NavigatorConfig::load_or_default(dir.path()), config);
    }

    #[test]
    fn missing_or_malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(NavigatorConfig::load_or_default(dir.path()), NavigatorConfig::default());

        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(NavigatorConfig::load_or_default(dir.path()), NavigatorConfig::default());
    }

    #[test]
    fn first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(NavigatorConfig::load_or_init(dir.path()), NavigatorConfig::default());

        let written = std::fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        let parsed: NavigatorConfig = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, NavigatorConfig::default());
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "default_style": "dark" }"#).unwrap();

        let config = NavigatorConfig::load_or_init(dir.path());
        assert_eq!(config.default_style, StatusBarStyle::Dark);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{ "default_style": "dark" }"#
        );
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{ "default_style": "dark", "simulated": { "status_bar_height": 20.0 } }"#,
        )
        .unwrap();
        let config = NavigatorConfig::load_or_default(dir.path());
        assert_eq!(config.default_style, StatusBarStyle::Dark);
        assert_eq!(config.simulated.status_bar_height, 20.0);
        assert!(config.simulated.supports_background);
        assert_eq!(config.channel_name, "plus_navigator");
    }
}
