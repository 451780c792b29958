// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method-call types exchanged over the channel.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::NavigatorError;

/// Name of the channel the bridge listens on.
pub const CHANNEL_NAME: &str = "plus_navigator";

/// Identifier attached to every inbound call for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallId(pub Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Methods understood by the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GetStatusBarHeight,
    SetStatusBarBackground,
    GetStatusBarBackground,
    SetStatusBarStyle,
    GetStatusBarStyle,
    IsBackground,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Self::GetStatusBarHeight,
        Self::SetStatusBarBackground,
        Self::GetStatusBarBackground,
        Self::SetStatusBarStyle,
        Self::GetStatusBarStyle,
        Self::IsBackground,
    ];

    /// Wire name. Note the lower-case `b` in `getStatusbarHeight`; callers
    /// in the field depend on it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetStatusBarHeight => "getStatusbarHeight",
            Self::SetStatusBarBackground => "setStatusBarBackground",
            Self::GetStatusBarBackground => "getStatusBarBackground",
            Self::SetStatusBarStyle => "setStatusBarStyle",
            Self::GetStatusBarStyle => "getStatusBarStyle",
            Self::IsBackground => "isBackground",
        }
    }

    /// Look up a method by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One inbound call. Built once by the transport and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRequest {
    pub id: CallId,
    pub method: String,
    pub arguments: Option<Map<String, Value>>,
}

impl MethodRequest {
    /// Create a request without arguments.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            id: CallId::new(),
            method: method.into(),
            arguments: None,
        }
    }

    /// Create a request carrying an argument map.
    pub fn with_arguments(method: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            id: CallId::new(),
            method: method.into(),
            arguments: Some(arguments),
        }
    }

    /// Raw argument value by key, if the call carried one.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.as_ref().and_then(|args| args.get(key))
    }

    /// String argument by key. `None` when absent, null, or not a string.
    pub fn str_argument(&self, key: &str) -> Option<&str> {
        self.argument(key).and_then(Value::as_str)
    }
}

/// Outcome of a single call. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodResponse {
    Success(Value),
    Failure {
        code: String,
        message: String,
        details: Value,
    },
    /// No handler for the method. Distinct from both success and failure so
    /// callers can check for capabilities.
    NotImplemented,
}

impl MethodResponse {
    /// Success carrying `null`.
    pub fn null() -> Self {
        Self::Success(Value::Null)
    }

    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failure {
            code: code.into(),
            message: message.into(),
            details: Value::Null,
        }
    }

    /// Turn an error into a `Failure` carrying its wire code and message.
    pub fn from_error(err: &NavigatorError) -> Self {
        Self::failure(err.code(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success value, if any.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }
}
