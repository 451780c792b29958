// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plus Navigator — method-channel plumbing.
//
// `Dispatcher` maps method names onto a `NativeStatusBarService`,
// `MethodChannel` decodes wire messages and routes them to its handler, and
// `ChannelHost` serialises calls so one finishes before the next begins.

pub mod channel;
pub mod codec;
pub mod dispatcher;
pub mod host;

pub use channel::{MethodCallHandler, MethodChannel};
pub use codec::{JsonMethodCodec, MethodCodec};
pub use dispatcher::Dispatcher;
pub use host::{ChannelClient, ChannelHost};
