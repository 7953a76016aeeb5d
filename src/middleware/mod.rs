// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request and navigation middleware (authentication).

pub mod auth;

pub use auth::{authorize, guard, Navigation};
