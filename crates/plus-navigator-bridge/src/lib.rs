// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Plus Navigator — Native status-bar service abstractions.
//!
//! Defines the [`NativeStatusBarService`](traits::NativeStatusBarService)
//! trait and picks the implementation for the target operating system at
//! build time: UIKit via `objc2` on iOS, the Android SDK via JNI on Android,
//! and an in-memory stub everywhere else.

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

use plus_navigator_core::NavigatorConfig;

pub use traits::NativeStatusBarService;

/// Build the status-bar service for the target operating system.
///
/// The returned service owns the status-bar state for one running app
/// instance; hand it to exactly one dispatcher.
pub fn platform_service(config: &NavigatorConfig) -> Box<dyn NativeStatusBarService> {
    #[cfg(target_os = "ios")]
    {
        // iOS: overlay view + UIApplication status-bar style via objc2.
        Box::new(ios::IosStatusBar::new(config))
    }
    #[cfg(target_os = "android")]
    {
        // Android: Window flags and decor-view visibility via jni-rs.
        Box::new(android::AndroidStatusBar::new(config))
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // DESKTOP/CI: in-memory state shaped by `config.simulated`.
        Box::new(stub::StubStatusBar::new(config))
    }
}
