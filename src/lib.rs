// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Judo club client: authenticated access to the club API
//!
//! This crate provides the client side of the club management application:
//! session handling with silent token refresh, user notifications, route
//! guards and the federation weight category tables used at registration.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod time_utils;

use config::Config;
use routes::Router;
use services::{ApiClient, PageHead, SessionStore, ToastStore};
use std::sync::Arc;
use storage::KeyValueStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: SessionStore,
    pub toasts: ToastStore,
    pub router: Arc<Router>,
    pub head: PageHead,
    pub api: ApiClient,
}

impl AppState {
    /// Wire the client components around a storage backend.
    pub fn new(config: Config, storage: Arc<dyn KeyValueStore>) -> Self {
        let session = SessionStore::new(storage);
        let toasts = ToastStore::new(config.toast_duration);
        let router = Arc::new(Router::new(session.clone()));
        let api = ApiClient::new(&config, session.clone(), toasts.clone(), router.clone());

        Self {
            config,
            session,
            toasts,
            router,
            head: PageHead::default(),
            api,
        }
    }
}
