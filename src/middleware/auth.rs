// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication checks: bearer header for outgoing requests and the
//! navigation guard for protected routes.

use crate::error::ApiError;
use crate::routes::{Route, LOGIN_PATH, MEMBER_HOME_PATH};
use crate::services::SessionStore;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Build an `Authorization: Bearer` header value.
pub fn bearer_value(token: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| ApiError::Setup("Access token is not a valid header value".to_string()))
}

/// Attach the stored access token, if any, to outgoing headers.
pub fn authorize(headers: &mut HeaderMap, session: &SessionStore) -> Result<(), ApiError> {
    if let Some(token) = session.access_token() {
        headers.insert(AUTHORIZATION, bearer_value(&token)?);
    }
    Ok(())
}

/// Outcome of the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(&'static str),
}

/// Decide whether the current session may enter `route`.
///
/// Anonymous users are sent to the login page; signed-in members without
/// the staff flag are sent to their own space.
pub fn guard(route: &Route, session: &SessionStore) -> Navigation {
    if route.requires_auth && !session.is_authenticated() {
        Navigation::Redirect(LOGIN_PATH)
    } else if route.requires_admin && !session.is_staff() {
        Navigation::Redirect(MEMBER_HOME_PATH)
    } else {
        Navigation::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session::keys;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_authorize_sets_bearer() {
        let storage = Arc::new(MemoryStore::new());
        let session = SessionStore::new(storage.clone());

        let mut headers = HeaderMap::new();
        authorize(&mut headers, &session).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());

        storage.set(keys::ACCESS_TOKEN, "abc.def");
        authorize(&mut headers, &session).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc.def");
    }

    #[test]
    fn test_invalid_token_is_setup_error() {
        let err = bearer_value("bad\ntoken").unwrap_err();
        assert!(matches!(err, ApiError::Setup(_)));
    }
}
