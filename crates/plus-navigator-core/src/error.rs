// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Plus Navigator.

use thiserror::Error;

/// Wire code for a missing or wrongly-typed required argument.
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";

/// Top-level error type for all Plus Navigator operations.
#[derive(Debug, Error)]
pub enum NavigatorError {
    // -- Caller errors --
    /// `field` is the capitalised argument name, e.g. "Color".
    #[error("{field} is null")]
    InvalidArgument { field: String },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("invalid status bar style: {0}")]
    InvalidStyle(String),

    // -- Transport --
    #[error("malformed method call: {0}")]
    Codec(String),

    #[error("method channel closed")]
    ChannelClosed,

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NavigatorError {
    /// Build an `InvalidArgument` for the named field.
    pub fn invalid_argument(field: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
        }
    }

    /// Error code reported to the caller when this error crosses the channel.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } | Self::InvalidColor(_) | Self::InvalidStyle(_) => {
                INVALID_ARGUMENT
            }
            Self::Codec(_) => "MALFORMED_CALL",
            Self::ChannelClosed => "CHANNEL_CLOSED",
            Self::Bridge(_) => "BRIDGE_ERROR",
            Self::PlatformUnavailable => "PLATFORM_UNAVAILABLE",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NavigatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_the_field() {
        let err = NavigatorError::invalid_argument("Color");
        assert_eq!(err.to_string(), "Color is null");
        assert_eq!(err.code(), INVALID_ARGUMENT);
    }

    #[test]
    fn bridge_errors_have_their_own_code() {
        assert_eq!(NavigatorError::Bridge("no window".into()).code(), "BRIDGE_ERROR");
        assert_eq!(NavigatorError::PlatformUnavailable.code(), "PLATFORM_UNAVAILABLE");
    }
}
