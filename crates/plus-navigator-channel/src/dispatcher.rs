// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bridge dispatcher: method name -> argument validation -> native service.
//
// Only malformed caller input is reported as a failure. Platform limitations
// and unparseable colour/style strings are logged and answered with the
// usual success value, leaving the stored state untouched.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use plus_navigator_bridge::NativeStatusBarService;
use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::{Color, Method, MethodRequest, MethodResponse, StatusBarStyle};

use crate::channel::MethodCallHandler;

/// Routes status-bar method calls to one native service instance.
#[derive(Clone)]
pub struct Dispatcher {
    service: Arc<dyn NativeStatusBarService>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn NativeStatusBarService>) -> Self {
        Self { service }
    }

    /// The service this dispatcher drives.
    pub fn service(&self) -> &dyn NativeStatusBarService {
        self.service.as_ref()
    }

    /// Handle one request. Always produces exactly one response.
    pub fn dispatch(&self, request: &MethodRequest) -> MethodResponse {
        let span = tracing::debug_span!("method_call", id = %request.id, method = %request.method);
        let _guard = span.enter();

        let Some(method) = Method::from_name(&request.method) else {
            debug!("no handler for method");
            return MethodResponse::NotImplemented;
        };

        let response = match self.handle(method, request) {
            Ok(value) => MethodResponse::Success(value),
            Err(e) => {
                warn!(error = %e, "rejecting call");
                MethodResponse::from_error(&e)
            }
        };
        debug!(?response, "method call finished");
        response
    }

    fn handle(&self, method: Method, request: &MethodRequest) -> Result<Value> {
        match method {
            Method::GetStatusBarHeight => Ok(Value::from(self.service.status_bar_height())),
            Method::SetStatusBarBackground => {
                let raw = required_str(request, "color", "Color")?;
                match Color::parse(raw) {
                    Ok(color) => report_setter(method, self.service.set_background(color)),
                    Err(e) => warn!(error = %e, "ignoring unparseable color"),
                }
                Ok(Value::Null)
            }
            Method::GetStatusBarBackground => {
                Ok(Value::String(self.service.background().to_string()))
            }
            Method::SetStatusBarStyle => {
                let raw = required_str(request, "style", "Style")?;
                match raw.parse::<StatusBarStyle>() {
                    Ok(style) => report_setter(method, self.service.set_style(style)),
                    Err(e) => warn!(error = %e, "ignoring unknown style"),
                }
                Ok(Value::Null)
            }
            Method::GetStatusBarStyle => Ok(Value::String(self.service.style().as_str().to_owned())),
            // The host cannot reliably tell foreground from background.
            Method::IsBackground => Ok(Value::Bool(false)),
        }
    }
}

impl MethodCallHandler for Dispatcher {
    fn on_method_call(&self, request: &MethodRequest) -> MethodResponse {
        self.dispatch(request)
    }
}

/// Required string argument `key`; `field` names it in the error message.
fn required_str<'a>(request: &'a MethodRequest, key: &str, field: &str) -> Result<&'a str> {
    request
        .str_argument(key)
        .ok_or_else(|| NavigatorError::invalid_argument(field))
}

/// Setter outcomes never reach the caller; they are only logged.
fn report_setter(method: Method, outcome: Result<()>) {
    match outcome {
        Ok(()) => debug!(%method, "applied"),
        Err(NavigatorError::PlatformUnavailable) => {
            warn!(%method, "not supported on this platform, keeping defaults")
        }
        Err(e) => error!(%method, error = %e, "native status bar call failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use plus_navigator_core::StatusBarState;
    use serde_json::{Map, json};

    use super::*;

    /// Service double that counts setter invocations.
    #[derive(Default)]
    struct RecordingStatusBar {
        state: Mutex<StatusBarState>,
        sets: AtomicUsize,
        unsupported: bool,
    }

    impl NativeStatusBarService for RecordingStatusBar {
        fn platform_name(&self) -> &str {
            "test"
        }

        fn status_bar_height(&self) -> f64 {
            if self.unsupported { 0.0 } else { 44.0 }
        }

        fn set_background(&self, color: Color) -> Result<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            if self.unsupported {
                return Err(NavigatorError::PlatformUnavailable);
            }
            self.state.lock().unwrap().background = color;
            Ok(())
        }

        fn background(&self) -> Color {
            self.state.lock().unwrap().background
        }

        fn set_style(&self, style: StatusBarStyle) -> Result<()> {
            self.sets.fetch_add(1, Ordering::SeqCst);
            if self.unsupported {
                return Err(NavigatorError::PlatformUnavailable);
            }
            self.state.lock().unwrap().style = style;
            Ok(())
        }

        fn style(&self) -> StatusBarStyle {
            self.state.lock().unwrap().style
        }
    }

    fn setup() -> (Dispatcher, Arc<RecordingStatusBar>) {
        let service = Arc::new(RecordingStatusBar::default());
        (Dispatcher::new(service.clone()), service)
    }

    fn call(dispatcher: &Dispatcher, method: &str, args: Value) -> MethodResponse {
        let request = match args {
            Value::Object(map) => MethodRequest::with_arguments(method, map),
            _ => MethodRequest::new(method),
        };
        dispatcher.dispatch(&request)
    }

    fn invalid(message: &str) -> MethodResponse {
        MethodResponse::failure("INVALID_ARGUMENT", message)
    }

    #[test]
    fn unknown_methods_are_not_implemented() {
        let (dispatcher, _) = setup();
        for name in ["", "getStatusBarHeight", "setStatusBarColor", "ISBACKGROUND"] {
            assert_eq!(
                call(&dispatcher, name, json!({ "color": "#FF0000" })),
                MethodResponse::NotImplemented
            );
        }
    }

    #[test]
    fn missing_color_is_rejected_without_touching_the_service() {
        let (dispatcher, service) = setup();
        call(&dispatcher, "setStatusBarBackground", json!({ "color": "#123456" }));

        assert_eq!(
            call(&dispatcher, "setStatusBarBackground", Value::Null),
            invalid("Color is null")
        );
        assert_eq!(
            call(&dispatcher, "setStatusBarBackground", json!({ "colour": "#FFFFFF" })),
            invalid("Color is null")
        );
        assert_eq!(service.sets.load(Ordering::SeqCst), 1);
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#123456"))
        );
    }

    #[test]
    fn wrongly_typed_arguments_are_invalid() {
        let (dispatcher, service) = setup();
        assert_eq!(
            call(&dispatcher, "setStatusBarBackground", json!({ "color": 0xFF0000 })),
            invalid("Color is null")
        );
        assert_eq!(
            call(&dispatcher, "setStatusBarStyle", json!({ "style": null })),
            invalid("Style is null")
        );
        assert_eq!(
            call(&dispatcher, "setStatusBarStyle", json!({ "style": true })),
            invalid("Style is null")
        );
        assert_eq!(service.sets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn background_round_trip() {
        let (dispatcher, _) = setup();
        assert_eq!(
            call(&dispatcher, "setStatusBarBackground", json!({ "color": "#FF0000" })),
            MethodResponse::null()
        );
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#FF0000"))
        );
    }

    #[test]
    fn background_is_normalised() {
        let (dispatcher, _) = setup();
        call(&dispatcher, "setStatusBarBackground", json!({ "color": "00ff7f" }));
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#00FF7F"))
        );
    }

    #[test]
    fn setting_the_same_color_twice_is_idempotent() {
        let (dispatcher, _) = setup();
        for _ in 0..2 {
            call(&dispatcher, "setStatusBarBackground", json!({ "color": "#0A0B0C" }));
        }
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#0A0B0C"))
        );
    }

    #[test]
    fn malformed_color_keeps_previous_value() {
        let (dispatcher, service) = setup();
        call(&dispatcher, "setStatusBarBackground", json!({ "color": "#336699" }));
        assert_eq!(
            call(&dispatcher, "setStatusBarBackground", json!({ "color": "notacolor" })),
            MethodResponse::null()
        );
        assert_eq!(service.sets.load(Ordering::SeqCst), 1);
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#336699"))
        );
    }

    #[test]
    fn style_round_trip_both_ways() {
        let (dispatcher, _) = setup();
        for style in ["dark", "light"] {
            assert_eq!(
                call(&dispatcher, "setStatusBarStyle", json!({ "style": style })),
                MethodResponse::null()
            );
            assert_eq!(
                call(&dispatcher, "getStatusBarStyle", Value::Null),
                MethodResponse::Success(json!(style))
            );
        }
    }

    #[test]
    fn fresh_service_reports_defaults() {
        let (dispatcher, _) = setup();
        assert_eq!(
            call(&dispatcher, "getStatusBarStyle", Value::Null),
            MethodResponse::Success(json!("light"))
        );
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#000000"))
        );
    }

    #[test]
    fn unknown_style_is_ignored() {
        let (dispatcher, service) = setup();
        call(&dispatcher, "setStatusBarStyle", json!({ "style": "dark" }));
        assert_eq!(
            call(&dispatcher, "setStatusBarStyle", json!({ "style": "sepia" })),
            MethodResponse::null()
        );
        assert_eq!(service.sets.load(Ordering::SeqCst), 1);
        assert_eq!(
            call(&dispatcher, "getStatusBarStyle", Value::Null),
            MethodResponse::Success(json!("dark"))
        );
    }

    #[test]
    fn is_background_is_always_false() {
        let (dispatcher, _) = setup();
        assert_eq!(
            call(&dispatcher, "isBackground", Value::Null),
            MethodResponse::Success(json!(false))
        );
        call(&dispatcher, "setStatusBarStyle", json!({ "style": "dark" }));
        call(&dispatcher, "setStatusBarBackground", json!({ "color": "#FFFFFF" }));
        assert_eq!(
            call(&dispatcher, "isBackground", json!({ "anything": 1 })),
            MethodResponse::Success(json!(false))
        );
    }

    #[test]
    fn height_is_a_float() {
        let (dispatcher, _) = setup();
        let response = call(&dispatcher, "getStatusbarHeight", Value::Null);
        assert_eq!(response.value().and_then(Value::as_f64), Some(44.0));
        assert!(response.value().is_some_and(Value::is_f64));
    }

    #[test]
    fn platform_limitations_are_not_errors() {
        let service = Arc::new(RecordingStatusBar {
            unsupported: true,
            ..Default::default()
        });
        let dispatcher = Dispatcher::new(service);
        assert_eq!(
            call(&dispatcher, "setStatusBarBackground", json!({ "color": "#FF0000" })),
            MethodResponse::null()
        );
        assert_eq!(
            call(&dispatcher, "setStatusBarStyle", json!({ "style": "dark" })),
            MethodResponse::null()
        );
        assert_eq!(
            call(&dispatcher, "getStatusBarBackground", Value::Null),
            MethodResponse::Success(json!("#000000"))
        );
        assert_eq!(
            call(&dispatcher, "getStatusBarStyle", Value::Null),
            MethodResponse::Success(json!("light"))
        );
        assert_eq!(
            call(&dispatcher, "getStatusbarHeight", Value::Null),
            MethodResponse::Success(json!(0.0))
        );
    }

    #[test]
    fn empty_argument_map_behaves_like_missing() {
        let (dispatcher, _) = setup();
        let request = MethodRequest::with_arguments("setStatusBarStyle", Map::new());
        assert_eq!(dispatcher.dispatch(&request), invalid("Style is null"));
    }
}
