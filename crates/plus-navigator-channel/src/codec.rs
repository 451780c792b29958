// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wire codecs for method calls and their replies.
//
// The JSON codec follows the layout UI frameworks use on their platform
// channels:
//
//   call              {"method": "<name>", "args": <value>}
//   success envelope  [<value>]
//   error envelope    ["<code>", "<message>", <details>]
//   not implemented   empty reply

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::{MethodRequest, MethodResponse};

/// Encodes and decodes method calls and result envelopes.
pub trait MethodCodec {
    /// Decode an inbound call.
    fn decode_method_call(buf: &[u8]) -> Result<MethodRequest>;
    /// Encode the reply for an inbound call.
    fn encode_response(response: &MethodResponse) -> Result<Vec<u8>>;

    /// Encode an outbound call.
    fn encode_method_call(request: &MethodRequest) -> Result<Vec<u8>>;
    /// Decode the reply to an outbound call.
    fn decode_response(buf: &[u8]) -> Result<MethodResponse>;
}

#[derive(Debug, Serialize, Deserialize)]
struct WireCall {
    method: String,
    #[serde(default)]
    args: Value,
}

/// UTF-8 JSON method codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMethodCodec;

impl MethodCodec for JsonMethodCodec {
    /// Arguments that are not a JSON object are treated as absent, so any
    /// required argument is then reported missing.
    fn decode_method_call(buf: &[u8]) -> Result<MethodRequest> {
        let call: WireCall =
            serde_json::from_slice(buf).map_err(|e| NavigatorError::Codec(e.to_string()))?;
        if call.method.is_empty() {
            return Err(NavigatorError::Codec("method name is empty".into()));
        }
        Ok(match call.args {
            Value::Object(map) => MethodRequest::with_arguments(call.method, map),
            _ => MethodRequest::new(call.method),
        })
    }

    fn encode_response(response: &MethodResponse) -> Result<Vec<u8>> {
        let envelope = match response {
            MethodResponse::Success(value) => json!([value]),
            MethodResponse::Failure {
                code,
                message,
                details,
            } => json!([code, message, details]),
            MethodResponse::NotImplemented => return Ok(Vec::new()),
        };
        Ok(serde_json::to_vec(&envelope)?)
    }

    fn encode_method_call(request: &MethodRequest) -> Result<Vec<u8>> {
        let call = WireCall {
            method: request.method.clone(),
            args: request
                .arguments
                .clone()
                .map_or(Value::Null, Value::Object),
        };
        Ok(serde_json::to_vec(&call)?)
    }

    fn decode_response(buf: &[u8]) -> Result<MethodResponse> {
        if buf.is_empty() {
            return Ok(MethodResponse::NotImplemented);
        }
        let envelope: Value =
            serde_json::from_slice(buf).map_err(|e| NavigatorError::Codec(e.to_string()))?;
        match envelope {
            Value::Array(mut items) if items.len() == 1 => {
                Ok(MethodResponse::Success(items.remove(0)))
            }
            Value::Array(items) if items.len() == 3 => {
                let mut items = items.into_iter();
                let (Some(Value::String(code)), Some(message), Some(details)) =
                    (items.next(), items.next(), items.next())
                else {
                    return Err(NavigatorError::Codec("error code must be a string".into()));
                };
                let message = match message {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                Ok(MethodResponse::Failure {
                    code,
                    message,
                    details,
                })
            }
            other => Err(NavigatorError::Codec(format!("invalid envelope: {other}"))),
        }
    }
}
