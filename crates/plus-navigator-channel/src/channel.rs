// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named method channel with an attachable call handler.

use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock};

use plus_navigator_core::error::Result;
use plus_navigator_core::{MethodRequest, MethodResponse};

use crate::codec::{JsonMethodCodec, MethodCodec};

/// Receives decoded calls arriving on a channel.
pub trait MethodCallHandler: Send + Sync {
    fn on_method_call(&self, request: &MethodRequest) -> MethodResponse;
}

/// A named, bidirectional method-call path.
///
/// The handler is attached when the bridge registers with the UI engine and
/// cleared when it detaches. Calls arriving without a handler are answered
/// with `NotImplemented`.
pub struct MethodChannel<C = JsonMethodCodec> {
    name: String,
    handler: RwLock<Option<Arc<dyn MethodCallHandler>>>,
    codec: PhantomData<fn() -> C>,
}

impl<C: MethodCodec> MethodChannel<C> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: RwLock::new(None),
            codec: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach `handler`, replacing any previous one.
    pub fn set_handler(&self, handler: Arc<dyn MethodCallHandler>) {
        tracing::debug!(channel = %self.name, "handler attached");
        *self.handler.write().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    /// Detach the current handler, if any.
    pub fn clear_handler(&self) {
        tracing::debug!(channel = %self.name, "handler detached");
        *self.handler.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn has_handler(&self) -> bool {
        self.handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Route an already-decoded call to the handler.
    pub fn invoke(&self, request: &MethodRequest) -> MethodResponse {
        // Clone the handler out so the lock is not held during the call.
        let handler = self
            .handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match handler {
            Some(handler) => handler.on_method_call(request),
            None => {
                tracing::debug!(channel = %self.name, method = %request.method, "no handler attached");
                MethodResponse::NotImplemented
            }
        }
    }

    /// Decode a wire message, route it, and encode the reply.
    ///
    /// Undecodable messages are a transport error and produce no reply.
    pub fn handle_message(&self, message: &[u8]) -> Result<Vec<u8>> {
        let request = C::decode_method_call(message)?;
        let response = self.invoke(&request);
        C::encode_response(&response)
    }
}
