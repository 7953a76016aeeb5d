// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide toast notification store.
//!
//! Toasts are kept in insertion order. Each toast with a non-zero duration
//! gets its own timer task that removes it when the duration elapses;
//! removing a toast by hand cancels that timer.

use crate::models::{Toast, ToastKind};
use crate::time_utils;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::AbortHandle;

#[derive(Default)]
struct ToastState {
    toasts: Vec<Toast>,
    timers: HashMap<u64, AbortHandle>,
    last_id: u64,
}

/// Shared, cloneable handle to the toast list.
#[derive(Clone)]
pub struct ToastStore {
    state: Arc<Mutex<ToastState>>,
    default_duration: Duration,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

impl ToastStore {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(ToastState::default())),
            default_duration,
        }
    }

    fn state(&self) -> MutexGuard<'_, ToastState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add a toast and return its id.
    ///
    /// A zero `duration` keeps the toast until [`remove`](Self::remove) is
    /// called. Auto-removal needs a Tokio runtime; without one the toast
    /// stays until removed by hand.
    pub fn add(&self, message: impl Into<String>, kind: ToastKind, duration: Duration) -> u64 {
        let message = message.into();
        let mut state = self.state();

        let id = time_utils::now_millis().max(state.last_id + 1);
        state.last_id = id;
        state.toasts.push(Toast {
            id,
            message: message.clone(),
            kind,
        });

        tracing::debug!(id, ?kind, message = %message, "Toast added");

        if duration.is_zero() {
            return id;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = self.clone();
                let task = handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    store.expire(id);
                });
                state.timers.insert(id, task.abort_handle());
            }
            Err(_) => {
                tracing::warn!(id, "No async runtime, toast will not be removed automatically");
            }
        }

        id
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Info, self.default_duration)
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Success, self.default_duration)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Error, self.default_duration)
    }

    /// Remove a toast and cancel its timer. Unknown ids are ignored.
    pub fn remove(&self, id: u64) {
        let mut state = self.state();
        if let Some(timer) = state.timers.remove(&id) {
            timer.abort();
        }
        state.toasts.retain(|t| t.id != id);
    }

    /// Timer path: the task is finishing on its own, nothing to abort.
    fn expire(&self, id: u64) {
        let mut state = self.state();
        state.timers.remove(&id);
        state.toasts.retain(|t| t.id != id);
        tracing::debug!(id, "Toast expired");
    }

    /// Snapshot of the current toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.state().toasts.clone()
    }

    pub fn len(&self) -> usize {
        self.state().toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().toasts.is_empty()
    }

    /// Drop every toast and cancel all timers.
    pub fn clear(&self) {
        let mut state = self.state();
        for (_, timer) in state.timers.drain() {
            timer.abort();
        }
        state.toasts.clear();
    }
}
