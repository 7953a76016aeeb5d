// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Toast notification model.

use serde::Serialize;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Millisecond timestamp, strictly increasing within a store
    pub id: u64,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}
