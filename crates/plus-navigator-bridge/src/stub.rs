// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub status bar for desktop/CI builds where no mobile status bar exists.
//
// State is kept in memory so the channel contract can be exercised end to end.
// `SimulatedPlatform` switches capabilities off to mimic old OS releases;
// real implementations live in the `ios` and `android` modules.

use std::sync::{Mutex, PoisonError};

use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::{Color, NavigatorConfig, SimulatedPlatform, StatusBarState, StatusBarStyle};

use crate::traits::NativeStatusBarService;

/// In-memory status bar returned on non-mobile platforms.
#[derive(Debug)]
pub struct StubStatusBar {
    platform: SimulatedPlatform,
    defaults: StatusBarState,
    state: Mutex<StatusBarState>,
}

impl StubStatusBar {
    /// Create a stub seeded with the configured defaults.
    pub fn new(config: &NavigatorConfig) -> Self {
        let defaults = StatusBarState {
            background: config.default_background,
            style: config.default_style,
        };
        Self {
            platform: config.simulated.clone(),
            defaults,
            state: Mutex::new(defaults),
        }
    }

    /// Snapshot of the stored state, regardless of simulated capabilities.
    pub fn state(&self) -> StatusBarState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for StubStatusBar {
    fn default() -> Self {
        Self::new(&NavigatorConfig::default())
    }
}

impl NativeStatusBarService for StubStatusBar {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn status_bar_height(&self) -> f64 {
        self.platform.status_bar_height.max(0.0)
    }

    fn set_background(&self, color: Color) -> Result<()> {
        if !self.platform.supports_background {
            tracing::warn!(%color, "status bar tinting not supported on this platform");
            return Err(NavigatorError::PlatformUnavailable);
        }
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .background = color;
        Ok(())
    }

    fn background(&self) -> Color {
        if !self.platform.supports_background {
            return self.defaults.background;
        }
        self.state().background
    }

    fn set_style(&self, style: StatusBarStyle) -> Result<()> {
        if !self.platform.supports_style {
            tracing::warn!(%style, "status bar style not supported on this platform");
            return Err(NavigatorError::PlatformUnavailable);
        }
        self.state.lock().unwrap_or_else(PoisonError::into_inner).style = style;
        Ok(())
    }

    fn style(&self) -> StatusBarStyle {
        if !self.platform.supports_style {
            return self.defaults.style;
        }
        self.state().style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limited() -> NavigatorConfig {
        NavigatorConfig {
            simulated: SimulatedPlatform {
                status_bar_height: 0.0,
                supports_background: false,
                supports_style: false,
            },
            ..Default::default()
        }
    }

    #[test]
    fn platform_name() {
        assert_eq!(StubStatusBar::default().platform_name(), "Desktop (stub)");
    }

    #[test]
    fn setters_update_state() {
        let bar = StubStatusBar::default();
        bar.set_background(Color::from_rgb(0x00FF00)).unwrap();
        bar.set_style(StatusBarStyle::Dark).unwrap();
        assert_eq!(bar.background(), Color::from_rgb(0x00FF00));
        assert_eq!(bar.style(), StatusBarStyle::Dark);
    }

    #[test]
    fn unsupported_capabilities_fall_back_to_defaults() {
        let bar = StubStatusBar::new(&limited());
        assert!(matches!(
            bar.set_background(Color::WHITE),
            Err(NavigatorError::PlatformUnavailable)
        ));
        assert!(matches!(
            bar.set_style(StatusBarStyle::Dark),
            Err(NavigatorError::PlatformUnavailable)
        ));
        assert_eq!(bar.background(), Color::BLACK);
        assert_eq!(bar.style(), StatusBarStyle::Light);
        assert_eq!(bar.status_bar_height(), 0.0);
        assert_eq!(bar.state(), StatusBarState::default());
    }

    #[test]
    fn configured_defaults_seed_the_state() {
        let config = NavigatorConfig {
            default_background: Color::WHITE,
            default_style: StatusBarStyle::Dark,
            ..Default::default()
        };
        let bar = StubStatusBar::new(&config);
        assert_eq!(bar.background(), Color::WHITE);
        assert_eq!(bar.style(), StatusBarStyle::Dark);
    }

    #[test]
    fn negative_height_is_clamped() {
        let mut config = NavigatorConfig::default();
        config.simulated.status_bar_height = -3.0;
        assert_eq!(StubStatusBar::new(&config).status_bar_height(), 0.0);
    }
}
