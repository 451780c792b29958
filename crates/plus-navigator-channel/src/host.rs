// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Single-flight channel host.
//
// One task owns the channel and drains a queue of inbound messages in order,
// so a call always completes before the next one on the same channel starts.
// Clients wait on a oneshot for their reply.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use plus_navigator_core::error::{NavigatorError, Result};
use plus_navigator_core::{MethodRequest, MethodResponse};

use crate::channel::MethodChannel;
use crate::codec::{JsonMethodCodec, MethodCodec};

/// Default number of calls that may queue up behind the one in flight.
pub const DEFAULT_QUEUE_DEPTH: usize = 64;

struct Envelope {
    message: Vec<u8>,
    reply: oneshot::Sender<Result<Vec<u8>>>,
}

/// Spawns the task that serves a [`MethodChannel`].
pub struct ChannelHost;

impl ChannelHost {
    /// Serve `channel` on the current Tokio runtime.
    ///
    /// Calls run on a runtime worker thread, never on the caller's thread.
    /// Use this for services with no UI-thread requirement, such as the
    /// desktop stub. The Android and iOS services expect the embedding to
    /// deliver calls on the UI thread; call
    /// [`MethodChannel::handle_message`] there directly instead. The iOS
    /// setters fail with `Bridge` off the main thread.
    ///
    /// The task ends once every [`ChannelClient`] has been dropped.
    pub fn spawn<C>(
        channel: Arc<MethodChannel<C>>,
        queue_depth: usize,
    ) -> (ChannelClient<C>, JoinHandle<()>)
    where
        C: MethodCodec + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Envelope>(queue_depth.max(1));
        let name = channel.name().to_owned();

        let handle = tokio::spawn(async move {
            tracing::info!(channel = %channel.name(), "channel host started");
            while let Some(envelope) = rx.recv().await {
                let reply = channel.handle_message(&envelope.message);
                if let Err(e) = &reply {
                    tracing::warn!(channel = %channel.name(), error = %e, "dropping undecodable call");
                }
                // The caller may have given up waiting; nothing to do then.
                let _ = envelope.reply.send(reply);
            }
            tracing::info!(channel = %channel.name(), "channel host stopped");
        });

        let client = ChannelClient {
            name,
            tx,
            codec: PhantomData,
        };
        (client, handle)
    }
}

/// Cloneable handle for sending calls to a hosted channel.
pub struct ChannelClient<C = JsonMethodCodec> {
    name: String,
    tx: mpsc::Sender<Envelope>,
    codec: PhantomData<fn() -> C>,
}

impl<C> Clone for ChannelClient<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tx: self.tx.clone(),
            codec: PhantomData,
        }
    }
}

impl<C: MethodCodec> ChannelClient<C> {
    /// Name of the channel this client talks to.
    pub fn channel_name(&self) -> &str {
        &self.name
    }

    /// Send a raw wire message and wait for the raw reply.
    pub async fn send(&self, message: Vec<u8>) -> Result<Vec<u8>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                message,
                reply: reply_tx,
            })
            .await
            .map_err(|_| NavigatorError::ChannelClosed)?;
        reply_rx.await.map_err(|_| NavigatorError::ChannelClosed)?
    }

    /// Encode a call, send it, and decode the reply.
    pub async fn invoke_method(
        &self,
        method: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<MethodResponse> {
        let request = match arguments {
            Some(args) => MethodRequest::with_arguments(method, args),
            None => MethodRequest::new(method),
        };
        let reply = self.send(C::encode_method_call(&request)?).await?;
        C::decode_response(&reply)
    }
}
