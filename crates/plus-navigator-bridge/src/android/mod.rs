// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android status bar via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Every call goes through the hosting Activity's
// `Window` in the ART runtime.
//
// ## Threading
//
// Window and decor-view mutations must happen on the UI thread. The embedding
// delivers method-channel calls on that thread, so the setters below touch the
// window directly instead of posting a Runnable.
//
// ## API levels
//
// - Background tinting needs API 21 (`Window.setStatusBarColor`).
// - Light/dark content needs API 23 (`SYSTEM_UI_FLAG_LIGHT_STATUS_BAR`).
//
// Below those levels the setters are no-ops and the getters report defaults.

#![cfg(target_os = "android")]

use std::sync::OnceLock;

use jni::objects::{JObject, JValue};
use jni::{JNIEnv, JavaVM};

use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::{Color, NavigatorConfig, StatusBarStyle};

use crate::traits::NativeStatusBarService;

// ---------------------------------------------------------------------------
// Android SDK constants
// ---------------------------------------------------------------------------

/// `Build.VERSION_CODES.LOLLIPOP`
const API_LOLLIPOP: i32 = 21;
/// `Build.VERSION_CODES.M`
const API_M: i32 = 23;

/// `WindowManager.LayoutParams.FLAG_TRANSLUCENT_STATUS`
const FLAG_TRANSLUCENT_STATUS: i32 = 0x0400_0000;
/// `WindowManager.LayoutParams.FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS`
const FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS: i32 = 0x8000_0000_u32 as i32;
/// `View.SYSTEM_UI_FLAG_LIGHT_STATUS_BAR`; set means dark icons.
const SYSTEM_UI_FLAG_LIGHT_STATUS_BAR: i32 = 0x0000_2000;

/// Local references reserved per call. The height lookup needs five.
const LOCAL_FRAME_CAPACITY: i32 = 16;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Process-wide handle to the Java VM, resolved on first use.
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

fn java_vm() -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| NavigatorError::Bridge(format!("failed to obtain JavaVM: {e}")))?;
    Ok(JAVA_VM.get_or_init(|| vm))
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    java_vm()?
        .attach_current_thread_permanently()
        .map_err(|e| NavigatorError::Bridge(format!("failed to attach JNI thread: {e}")))
}

/// Obtain the hosting `Activity` as a [`JObject`].
fn activity() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(NavigatorError::Bridge("Activity is null".into()));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Map a `jni::errors::Error` into `NavigatorError::Bridge`, clearing any
/// pending Java exception so the next JNI call starts clean.
fn jni_err(env: &mut JNIEnv, context: &str, e: jni::errors::Error) -> NavigatorError {
    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_clear();
    }
    NavigatorError::Bridge(format!("{context}: {e}"))
}

/// Run `f` inside a fresh JNI local frame.
///
/// The calling thread stays attached, so no Java frame ever returns to free
/// local references. Popping the frame releases every one `f` created.
fn in_local_frame<T>(f: impl FnOnce(&mut JNIEnv) -> Result<T>) -> Result<T> {
    let mut env = jni_env()?;
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
        Ok::<_, jni::errors::Error>(f(env))
    })
    .map_err(|e| NavigatorError::Bridge(format!("JNI local frame: {e}")))?
}

/// `Build.VERSION.SDK_INT`
fn sdk_int(env: &mut JNIEnv) -> Result<i32> {
    let value = env
        .get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| jni_err(env, "Build.VERSION.SDK_INT", e))?;
    value.i().map_err(|e| jni_err(env, "SDK_INT->i", e))
}

/// `activity.getWindow()`, failing if the Activity has no window yet.
fn window<'a>(env: &mut JNIEnv<'a>, activity: &JObject) -> Result<JObject<'a>> {
    let window = env
        .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])
        .map_err(|e| jni_err(env, "getWindow", e))?
        .l()
        .map_err(|e| jni_err(env, "getWindow->l", e))?;
    if window.is_null() {
        return Err(NavigatorError::Bridge("Activity window is null".into()));
    }
    Ok(window)
}

/// `window.getDecorView()`
fn decor_view<'a>(env: &mut JNIEnv<'a>, window: &JObject) -> Result<JObject<'a>> {
    env.call_method(window, "getDecorView", "()Landroid/view/View;", &[])
        .map_err(|e| jni_err(env, "getDecorView", e))?
        .l()
        .map_err(|e| jni_err(env, "getDecorView->l", e))
}

fn system_ui_visibility(env: &mut JNIEnv, decor: &JObject) -> Result<i32> {
    env.call_method(decor, "getSystemUiVisibility", "()I", &[])
        .map_err(|e| jni_err(env, "getSystemUiVisibility", e))?
        .i()
        .map_err(|e| jni_err(env, "getSystemUiVisibility->i", e))
}

// ---------------------------------------------------------------------------
// Service struct
// ---------------------------------------------------------------------------

/// Android implementation of the status-bar service.
///
/// The Activity window is the source of truth: getters read it back rather
/// than caching what was last set.
pub struct AndroidStatusBar {
    default_background: Color,
    default_style: StatusBarStyle,
}

impl AndroidStatusBar {
    /// Create a new Android status bar.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new(config: &NavigatorConfig) -> Self {
        Self {
            default_background: config.default_background,
            default_style: config.default_style,
        }
    }

    /// Height of the `status_bar_height` system dimension, converted from
    /// pixels to dp using the display density.
    fn try_height(&self) -> Result<f64> {
        in_local_frame(|env| {
            let activity = activity()?;

            let resources = env
                .call_method(
                    &activity,
                    "getResources",
                    "()Landroid/content/res/Resources;",
                    &[],
                )
                .map_err(|e| jni_err(env, "getResources", e))?
                .l()
                .map_err(|e| jni_err(env, "getResources->l", e))?;

            let name = env
                .new_string("status_bar_height")
                .map_err(|e| jni_err(env, "new_string(name)", e))?;
            let def_type = env
                .new_string("dimen")
                .map_err(|e| jni_err(env, "new_string(defType)", e))?;
            let package = env
                .new_string("android")
                .map_err(|e| jni_err(env, "new_string(package)", e))?;

            let resource_id = env
                .call_method(
                    &resources,
                    "getIdentifier",
                    "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)I",
                    &[
                        JValue::Object(&name),
                        JValue::Object(&def_type),
                        JValue::Object(&package),
                    ],
                )
                .map_err(|e| jni_err(env, "getIdentifier", e))?
                .i()
                .map_err(|e| jni_err(env, "getIdentifier->i", e))?;
            if resource_id <= 0 {
                return Ok(0.0);
            }

            let pixels = env
                .call_method(
                    &resources,
                    "getDimensionPixelSize",
                    "(I)I",
                    &[JValue::Int(resource_id)],
                )
                .map_err(|e| jni_err(env, "getDimensionPixelSize", e))?
                .i()
                .map_err(|e| jni_err(env, "getDimensionPixelSize->i", e))?;

            let metrics = env
                .call_method(
                    &resources,
                    "getDisplayMetrics",
                    "()Landroid/util/DisplayMetrics;",
                    &[],
                )
                .map_err(|e| jni_err(env, "getDisplayMetrics", e))?
                .l()
                .map_err(|e| jni_err(env, "getDisplayMetrics->l", e))?;
            let density = env
                .get_field(&metrics, "density", "F")
                .map_err(|e| jni_err(env, "DisplayMetrics.density", e))?
                .f()
                .map_err(|e| jni_err(env, "density->f", e))?;

            Ok(px_to_dp(pixels, density))
        })
    }

    fn try_background(&self) -> Result<Option<Color>> {
        in_local_frame(|env| {
            if sdk_int(env)? < API_LOLLIPOP {
                return Ok(None);
            }
            let activity = activity()?;
            let window = window(env, &activity)?;
            let argb = env
                .call_method(&window, "getStatusBarColor", "()I", &[])
                .map_err(|e| jni_err(env, "getStatusBarColor", e))?
                .i()
                .map_err(|e| jni_err(env, "getStatusBarColor->i", e))?;
            Ok(Some(Color::from_argb(argb)))
        })
    }

    fn try_style(&self) -> Result<Option<StatusBarStyle>> {
        in_local_frame(|env| {
            if sdk_int(env)? < API_M {
                return Ok(None);
            }
            let activity = activity()?;
            let window = window(env, &activity)?;
            let decor = decor_view(env, &window)?;
            let flags = system_ui_visibility(env, &decor)?;
            Ok(Some(style_from_flags(flags)))
        })
    }
}

impl NativeStatusBarService for AndroidStatusBar {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn status_bar_height(&self) -> f64 {
        self.try_height().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Android: status bar height unavailable");
            0.0
        })
    }

    /// Make the window draw its own system-bar background, then paint it.
    fn set_background(&self, color: Color) -> Result<()> {
        in_local_frame(|env| {
            if sdk_int(env)? < API_LOLLIPOP {
                tracing::warn!("Android: status bar color not supported below API 21");
                return Err(NavigatorError::PlatformUnavailable);
            }
            let activity = activity()?;
            let window = window(env, &activity)?;

            tracing::debug!(%color, "Android: setting status bar color");

            env.call_method(
                &window,
                "clearFlags",
                "(I)V",
                &[JValue::Int(FLAG_TRANSLUCENT_STATUS)],
            )
            .map_err(|e| jni_err(env, "clearFlags", e))?;
            env.call_method(
                &window,
                "addFlags",
                "(I)V",
                &[JValue::Int(FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS)],
            )
            .map_err(|e| jni_err(env, "addFlags", e))?;
            env.call_method(
                &window,
                "setStatusBarColor",
                "(I)V",
                &[JValue::Int(color.to_argb())],
            )
            .map_err(|e| jni_err(env, "setStatusBarColor", e))?;
            Ok(())
        })
    }

    fn background(&self) -> Color {
        match self.try_background() {
            Ok(Some(color)) => color,
            Ok(None) => self.default_background,
            Err(e) => {
                tracing::warn!(error = %e, "Android: could not read status bar color");
                self.default_background
            }
        }
    }

    fn set_style(&self, style: StatusBarStyle) -> Result<()> {
        in_local_frame(|env| {
            if sdk_int(env)? < API_M {
                tracing::warn!("Android: status bar style not supported below API 23");
                return Err(NavigatorError::PlatformUnavailable);
            }
            let activity = activity()?;
            let window = window(env, &activity)?;
            let decor = decor_view(env, &window)?;
            let flags = system_ui_visibility(env, &decor)?;

            env.call_method(
                &decor,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(flags_for_style(flags, style))],
            )
            .map_err(|e| jni_err(env, "setSystemUiVisibility", e))?;
            Ok(())
        })
    }

    fn style(&self) -> StatusBarStyle {
        match self.try_style() {
            Ok(Some(style)) => style,
            Ok(None) => self.default_style,
            Err(e) => {
                tracing::warn!(error = %e, "Android: could not read status bar style");
                self.default_style
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

fn px_to_dp(pixels: i32, density: f32) -> f64 {
    if density > 0.0 {
        f64::from(pixels) / f64::from(density)
    } else {
        f64::from(pixels)
    }
}

/// Light content clears the light-status-bar flag; dark content sets it.
fn flags_for_style(flags: i32, style: StatusBarStyle) -> i32 {
    match style {
        StatusBarStyle::Light => flags & !SYSTEM_UI_FLAG_LIGHT_STATUS_BAR,
        StatusBarStyle::Dark => flags | SYSTEM_UI_FLAG_LIGHT_STATUS_BAR,
    }
}

fn style_from_flags(flags: i32) -> StatusBarStyle {
    if flags & SYSTEM_UI_FLAG_LIGHT_STATUS_BAR != 0 {
        StatusBarStyle::Dark
    } else {
        StatusBarStyle::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_name() {
        let bar = AndroidStatusBar::new(&NavigatorConfig::default());
        assert_eq!(bar.platform_name(), "Android");
    }

    #[test]
    fn style_flags_round_trip() {
        let other = 0x0000_0400;
        let dark = flags_for_style(other, StatusBarStyle::Dark);
        assert_eq!(style_from_flags(dark), StatusBarStyle::Dark);
        let light = flags_for_style(dark, StatusBarStyle::Light);
        assert_eq!(light, other);
        assert_eq!(style_from_flags(light), StatusBarStyle::Light);
    }

    #[test]
    fn density_conversion() {
        assert_eq!(px_to_dp(72, 3.0), 24.0);
        assert_eq!(px_to_dp(24, 0.0), 24.0);
    }

    // Window-touching methods need a running Activity; they are exercised by
    // the instrumented tests of the host app rather than `cargo test`.
}
