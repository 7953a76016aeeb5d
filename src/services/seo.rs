// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page title and meta description binding.
//!
//! A view publishes its [`PageMeta`] on a watch channel; [`use_seo`] keeps
//! the shared [`PageHead`] in sync with it until the returned
//! [`SeoBinding`] is dropped.

use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Title and description declared by a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Default)]
struct HeadState {
    title: String,
    description: Option<String>,
}

/// The document head shared by all views.
#[derive(Debug, Clone, Default)]
pub struct PageHead {
    state: Arc<RwLock<HeadState>>,
}

impl PageHead {
    pub fn title(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .title
            .clone()
    }

    /// `None` until a view has set a description.
    pub fn description(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .description
            .clone()
    }

    fn apply(&self, meta: &PageMeta, site_name: &str) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.title = format!("{} | {}", meta.title, site_name);
        state.description = Some(meta.description.clone());
    }
}

/// Live subscription created by [`use_seo`]. Dropping it stops updates.
#[must_use = "dropping the binding detaches it immediately"]
pub struct SeoBinding {
    task: JoinHandle<()>,
}

impl Drop for SeoBinding {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Apply `meta` to `head` now and again every time it changes.
///
/// Must be called from within a Tokio runtime.
pub fn use_seo(
    head: &PageHead,
    site_name: &str,
    mut meta: watch::Receiver<PageMeta>,
) -> SeoBinding {
    head.apply(&meta.borrow_and_update(), site_name);

    let head = head.clone();
    let site_name = site_name.to_string();
    let task = tokio::spawn(async move {
        while meta.changed().await.is_ok() {
            let current = meta.borrow_and_update().clone();
            head.apply(&current, &site_name);
            tracing::debug!(title = %current.title, "Page head updated");
        }
    });

    SeoBinding { task }
}
