// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plus Navigator — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod status_bar;
pub mod types;

pub use config::{NavigatorConfig, SimulatedPlatform};
pub use error::NavigatorError;
pub use status_bar::{Color, StatusBarState, StatusBarStyle};
pub use types::*;
