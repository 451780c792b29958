// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS status bar via objc2.
//
// Requires compilation with the iOS SDK (Xcode). UIKit offers no API to tint
// the status bar itself, so the background is painted with an overlay view
// sized to the status-bar frame and tagged so it can be replaced later.
// Foreground style goes through `UIApplication.statusBarStyle`, which needs
// `UIViewControllerBasedStatusBarAppearance = NO` in the host Info.plist.
//
// All UIKit interactions require the main thread; the embedding delivers
// method-channel calls there. Off-main calls return `NavigatorError::Bridge`
// from setters and defaults from getters.

#![cfg(target_os = "ios")]

use std::sync::{Mutex, PoisonError};

use objc2::encode::{Encode, Encoding};
use objc2::rc::{Allocated, Retained};
use objc2::runtime::AnyObject;
use objc2::{MainThreadMarker, class, msg_send};
use objc2_foundation::NSProcessInfo;
use objc2_ui_kit::UIApplication;

use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::{Color, NavigatorConfig, StatusBarState, StatusBarStyle};

use crate::traits::NativeStatusBarService;

// ---------------------------------------------------------------------------
// UIKit constants & geometry
// ---------------------------------------------------------------------------

/// Tag identifying our overlay among the key window's subviews.
const OVERLAY_TAG: isize = 999;

/// `UIStatusBarStyleDefault`
const UI_STATUS_BAR_STYLE_DEFAULT: isize = 0;
/// `UIStatusBarStyleLightContent`
const UI_STATUS_BAR_STYLE_LIGHT_CONTENT: isize = 1;
/// `UIStatusBarStyleDarkContent` (iOS 13+)
const UI_STATUS_BAR_STYLE_DARK_CONTENT: isize = 3;

/// `CGPoint` with 64-bit `CGFloat`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CGPoint {
    x: f64,
    y: f64,
}

/// `CGSize` with 64-bit `CGFloat`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CGSize {
    width: f64,
    height: f64,
}

/// `CGRect` as returned by `statusBarFrame`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct CGRect {
    origin: CGPoint,
    size: CGSize,
}

// SAFETY: the encodings match the C layout of the CoreGraphics structs on
// 64-bit iOS, where `CGFloat` is `double`.
unsafe impl Encode for CGPoint {
    const ENCODING: Encoding = Encoding::Struct("CGPoint", &[f64::ENCODING, f64::ENCODING]);
}

// SAFETY: see `CGPoint`.
unsafe impl Encode for CGSize {
    const ENCODING: Encoding = Encoding::Struct("CGSize", &[f64::ENCODING, f64::ENCODING]);
}

// SAFETY: see `CGPoint`.
unsafe impl Encode for CGRect {
    const ENCODING: Encoding = Encoding::Struct("CGRect", &[CGPoint::ENCODING, CGSize::ENCODING]);
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| NavigatorError::Bridge("must be called from the main thread".into()))
}

/// Whether the running iOS is at least `major`.0.
fn ios_at_least(major: isize) -> bool {
    NSProcessInfo::processInfo().operatingSystemVersion().majorVersion >= major
}

/// First window of the shared application, if any.
fn first_window(mtm: MainThreadMarker) -> Option<Retained<AnyObject>> {
    let app = UIApplication::sharedApplication(mtm);
    // SAFETY: `windows` returns an NSArray<UIWindow *>; `firstObject` returns
    // nil for an empty array. Main-thread access is guaranteed by `mtm`.
    unsafe {
        let windows: Option<Retained<AnyObject>> = msg_send![&app, windows];
        windows.and_then(|w| msg_send![&w, firstObject])
    }
}

/// Frame of the status bar in window coordinates.
///
/// iOS 13+ reads it from the first window's scene; earlier releases use the
/// application-wide (since deprecated) property.
fn status_bar_frame(mtm: MainThreadMarker) -> Option<CGRect> {
    if ios_at_least(13) {
        let window = first_window(mtm)?;
        // SAFETY: `windowScene` and `statusBarManager` are nullable UIKit
        // properties; `statusBarFrame` returns a CGRect by value.
        unsafe {
            let scene: Option<Retained<AnyObject>> = msg_send![&window, windowScene];
            let manager: Option<Retained<AnyObject>> =
                scene.and_then(|s| msg_send![&s, statusBarManager]);
            manager.map(|m| msg_send![&m, statusBarFrame])
        }
    } else {
        let app = UIApplication::sharedApplication(mtm);
        // SAFETY: `statusBarFrame` exists on UIApplication before iOS 13.
        Some(unsafe { msg_send![&app, statusBarFrame] })
    }
}

/// `None` for `default`, whose tint depends on the OS release; the caller
/// falls back to the recorded style.
fn style_from_raw(raw: isize) -> Option<StatusBarStyle> {
    match raw {
        UI_STATUS_BAR_STYLE_LIGHT_CONTENT => Some(StatusBarStyle::Light),
        UI_STATUS_BAR_STYLE_DARK_CONTENT => Some(StatusBarStyle::Dark),
        _ => None,
    }
}

fn raw_from_style(style: StatusBarStyle, dark_content_available: bool) -> isize {
    match style {
        StatusBarStyle::Light => UI_STATUS_BAR_STYLE_LIGHT_CONTENT,
        StatusBarStyle::Dark if dark_content_available => UI_STATUS_BAR_STYLE_DARK_CONTENT,
        StatusBarStyle::Dark => UI_STATUS_BAR_STYLE_DEFAULT,
    }
}

// ---------------------------------------------------------------------------
// Service struct
// ---------------------------------------------------------------------------

/// iOS implementation of the status-bar service.
///
/// The overlay colour cannot be read back from UIKit, so the last applied
/// value is recorded in `state`.
pub struct IosStatusBar {
    state: Mutex<StatusBarState>,
}

impl IosStatusBar {
    /// Create a new iOS status bar. No UIKit call happens until a trait
    /// method is invoked.
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            state: Mutex::new(StatusBarState {
                background: config.default_background,
                style: config.default_style,
            }),
        }
    }

    fn recorded_style(&self) -> StatusBarStyle {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).style
    }

    /// Replace the tagged overlay with a fresh one painted `color`.
    fn paint_overlay(&self, mtm: MainThreadMarker, color: Color) -> Result<()> {
        let window =
            first_window(mtm).ok_or_else(|| NavigatorError::Bridge("no window found".into()))?;
        let frame = status_bar_frame(mtm)
            .ok_or_else(|| NavigatorError::Bridge("no status bar frame found".into()))?;
        let (red, green, blue) = color.to_unit_rgb();

        tracing::debug!(%color, height = frame.size.height, "iOS: painting status bar overlay");

        // SAFETY: plain UIView/UIColor message sends on the main thread
        // (guaranteed by `mtm`). Argument and return types match the UIKit
        // selectors: NSInteger tags, CGFloat components, CGRect frames.
        unsafe {
            let previous: Option<Retained<AnyObject>> =
                msg_send![&window, viewWithTag: OVERLAY_TAG];
            if let Some(previous) = previous {
                let _: () = msg_send![&previous, removeFromSuperview];
            }

            let ui_color: Retained<AnyObject> = msg_send![
                class!(UIColor),
                colorWithRed: red,
                green: green,
                blue: blue,
                alpha: 1.0_f64
            ];
            let allocated: Allocated<AnyObject> = msg_send![class!(UIView), alloc];
            let overlay: Retained<AnyObject> = msg_send![allocated, initWithFrame: frame];
            let _: () = msg_send![&overlay, setBackgroundColor: &*ui_color];
            let _: () = msg_send![&overlay, setTag: OVERLAY_TAG];
            let _: () = msg_send![&window, addSubview: &*overlay];
        }
        Ok(())
    }
}

impl NativeStatusBarService for IosStatusBar {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn status_bar_height(&self) -> f64 {
        let Some(mtm) = MainThreadMarker::new() else {
            tracing::warn!("iOS: status bar height requested off the main thread");
            return 0.0;
        };
        status_bar_frame(mtm).map_or(0.0, |frame| frame.size.height.max(0.0))
    }

    fn set_background(&self, color: Color) -> Result<()> {
        let mtm = require_main_thread()?;
        self.paint_overlay(mtm, color)?;
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .background = color;
        Ok(())
    }

    fn background(&self) -> Color {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .background
    }

    fn set_style(&self, style: StatusBarStyle) -> Result<()> {
        let mtm = require_main_thread()?;
        let raw = raw_from_style(style, ios_at_least(13));
        let app = UIApplication::sharedApplication(mtm);
        // SAFETY: `setStatusBarStyle:` takes a UIStatusBarStyle (NSInteger).
        unsafe {
            let _: () = msg_send![&app, setStatusBarStyle: raw];
        }
        self.state.lock().unwrap_or_else(PoisonError::into_inner).style = style;
        Ok(())
    }

    fn style(&self) -> StatusBarStyle {
        let Some(mtm) = MainThreadMarker::new() else {
            return self.recorded_style();
        };
        let app = UIApplication::sharedApplication(mtm);
        // SAFETY: `statusBarStyle` returns a UIStatusBarStyle (NSInteger).
        let raw: isize = unsafe { msg_send![&app, statusBarStyle] };
        style_from_raw(raw).unwrap_or_else(|| self.recorded_style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify that the service reports the correct platform name.
    #[test]
    fn platform_name() {
        let bar = IosStatusBar::new(&NavigatorConfig::default());
        assert_eq!(bar.platform_name(), "iOS");
    }

    #[test]
    fn style_mapping() {
        assert_eq!(raw_from_style(StatusBarStyle::Dark, true), UI_STATUS_BAR_STYLE_DARK_CONTENT);
        assert_eq!(raw_from_style(StatusBarStyle::Dark, false), UI_STATUS_BAR_STYLE_DEFAULT);
        assert_eq!(style_from_raw(UI_STATUS_BAR_STYLE_LIGHT_CONTENT), Some(StatusBarStyle::Light));
        assert_eq!(style_from_raw(UI_STATUS_BAR_STYLE_DARK_CONTENT), Some(StatusBarStyle::Dark));
        assert_eq!(style_from_raw(UI_STATUS_BAR_STYLE_DEFAULT), None);
    }

    // Overlay and style methods need a running app with a key window; they
    // are exercised in the Xcode test target rather than via `cargo test`.
}
