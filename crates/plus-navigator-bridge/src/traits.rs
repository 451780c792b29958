// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait for the native status bar.

use plus_navigator_core::error::Result;
use plus_navigator_core::{Color, StatusBarStyle};

/// Native control over the OS status bar.
///
/// Getters never fail: when the OS lacks the capability (or the UI is not
/// reachable) they return the configured default (`0.0` height, black
/// background, light style). Setters report platform problems through
/// `Err` so they can be logged, but callers treat them as non-fatal.
///
/// Implementations own their state and use interior mutability; the
/// dispatcher only ever holds a shared reference.
pub trait NativeStatusBarService: Send + Sync {
    /// Human-readable platform name (e.g. "iOS", "Android").
    fn platform_name(&self) -> &str;

    /// Status-bar height in density-independent units, `0.0` if unknown.
    fn status_bar_height(&self) -> f64;

    /// Paint the status-bar background.
    fn set_background(&self, color: Color) -> Result<()>;

    /// Most recently applied background, or the default.
    fn background(&self) -> Color;

    /// Switch the foreground (icon/text) tint.
    fn set_style(&self, style: StatusBarStyle) -> Result<()>;

    /// Current foreground tint, or the default.
    fn style(&self) -> StatusBarStyle;
}
