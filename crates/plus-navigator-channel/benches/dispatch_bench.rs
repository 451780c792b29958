// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for call decoding, dispatch and reply encoding in the
// plus-navigator-channel crate.

use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use plus_navigator_bridge::platform_service;
use plus_navigator_channel::{Dispatcher, JsonMethodCodec, MethodChannel, MethodCodec};
use plus_navigator_core::{MethodRequest, NavigatorConfig};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark decoding a setter call with an argument map.
fn bench_decode_call(c: &mut Criterion) {
    let message = br##"{"method":"setStatusBarBackground","args":{"color":"#336699"}}"##;

    c.bench_function("decode_method_call (setter)", |b| {
        b.iter(|| {
            let request =
                JsonMethodCodec::decode_method_call(black_box(message)).expect("decode failed");
            black_box(request);
        });
    });
}

/// Benchmark dispatching already-decoded calls against the platform service.
fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(Arc::from(platform_service(&NavigatorConfig::default())));
    let getter = MethodRequest::new("getStatusBarBackground");
    let unknown = MethodRequest::new("openSettings");

    c.bench_function("dispatch getStatusBarBackground", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&getter))));
    });
    c.bench_function("dispatch unknown method", |b| {
        b.iter(|| black_box(dispatcher.dispatch(black_box(&unknown))));
    });
}

/// Benchmark the full wire path: decode, dispatch, encode.
fn bench_handle_message(c: &mut Criterion) {
    let channel: MethodChannel = MethodChannel::new("plus_navigator");
    channel.set_handler(Arc::new(Dispatcher::new(Arc::from(platform_service(
        &NavigatorConfig::default(),
    )))));
    let message = br#"{"method":"setStatusBarStyle","args":{"style":"dark"}}"#;

    c.bench_function("handle_message setStatusBarStyle", |b| {
        b.iter(|| {
            let reply = channel
                .handle_message(black_box(message))
                .expect("handle failed");
            black_box(reply);
        });
    });
}

criterion_group!(benches, bench_decode_call, bench_dispatch, bench_handle_message);
criterion_main!(benches);
