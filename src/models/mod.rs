// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the client.

pub mod session;
pub mod toast;
pub mod weight;

pub use session::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
pub use toast::{Toast, ToastKind};
pub use weight::{AgeBand, Gender, WeightBracket};
