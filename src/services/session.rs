// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session credentials on top of local key-value storage.
//!
//! Every read and write of the four session keys goes through
//! [`SessionStore`]; nothing else touches those keys directly.

use crate::models::LoginResponse;
use crate::storage::KeyValueStore;
use std::sync::Arc;

/// Storage keys, shared with the web front-end.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const USERNAME: &str = "username";
    pub const IS_STAFF: &str = "is_staff";

    pub const ALL: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, USERNAME, IS_STAFF];
}

/// Cloneable handle to the session stored in a [`KeyValueStore`].
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    pub fn access_token(&self) -> Option<String> {
        self.non_empty(keys::ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.non_empty(keys::REFRESH_TOKEN)
    }

    pub fn username(&self) -> Option<String> {
        self.non_empty(keys::USERNAME)
    }

    /// Staff flag. Only the exact string `"true"` counts.
    pub fn is_staff(&self) -> bool {
        self.storage.get(keys::IS_STAFF).as_deref() == Some("true")
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Record a fresh login.
    pub fn start(&self, login: &LoginResponse) {
        self.storage.set(keys::ACCESS_TOKEN, &login.access);
        self.storage.set(keys::REFRESH_TOKEN, &login.refresh);
        self.storage.set(keys::USERNAME, &login.username);
        if login.is_staff {
            self.storage.set(keys::IS_STAFF, "true");
        } else {
            self.storage.remove(keys::IS_STAFF);
        }
        tracing::info!(username = %login.username, is_staff = login.is_staff, "Session started");
    }

    pub fn set_access_token(&self, token: &str) {
        self.storage.set(keys::ACCESS_TOKEN, token);
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.storage.set(keys::REFRESH_TOKEN, token);
    }

    /// Remove all four session keys.
    pub fn clear(&self) {
        for key in keys::ALL {
            self.storage.remove(key);
        }
        tracing::info!("Session cleared");
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.storage.get(key).filter(|v| !v.is_empty())
    }
}
