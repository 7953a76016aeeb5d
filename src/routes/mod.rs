// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Front-end route table and navigation.

use crate::middleware::auth::{guard, Navigation};
use crate::services::{analytics, SessionStore};
use std::sync::{PoisonError, RwLock};

/// Where anonymous users are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in members without staff rights are sent.
pub const MEMBER_HOME_PATH: &str = "/my-space";

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

const fn public(name: &'static str, path: &'static str) -> Route {
    Route {
        name,
        path,
        requires_auth: false,
        requires_admin: false,
    }
}

pub const ROUTES: &[Route] = &[
    public("home", "/"),
    public("registration", "/inscription"),
    Route {
        name: "dashboard",
        path: "/dashboard",
        requires_auth: true,
        requires_admin: true,
    },
    public("events", "/events"),
    public("gallery", "/gallery"),
    public("contact", "/contact"),
    public("login", LOGIN_PATH),
    public("admin-login", "/admin/login"),
    public("signup", "/signup"),
    Route {
        name: "parent-dashboard",
        path: MEMBER_HOME_PATH,
        requires_auth: true,
        requires_admin: false,
    },
    public("payment-success", "/payment/success"),
    public("payment-cancel", "/payment/cancel"),
];

/// Look up a route by path. Query strings, fragments and a trailing slash
/// are ignored.
pub fn find_route(path: &str) -> Option<&'static Route> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };
    ROUTES.iter().find(|r| r.path == path)
}

/// Something that can send the user to another page.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// Navigation errors
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("No route for path: {0}")]
    NotFound(String),

    #[error("Redirect loop while navigating to {0}")]
    RedirectLoop(String),
}

/// Tracks the current location and applies the guard on every move.
pub struct Router {
    session: SessionStore,
    current: RwLock<&'static Route>,
}

impl Router {
    /// Start on the home page.
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            current: RwLock::new(&ROUTES[0]),
        }
    }

    pub fn current(&self) -> &'static Route {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current_path(&self) -> &'static str {
        self.current().path
    }

    /// Navigate to `path`, following guard redirects.
    pub fn navigate(&self, path: &str) -> Result<&'static Route, RouteError> {
        let mut target = path.to_string();

        for _ in 0..ROUTES.len() {
            let route = find_route(&target).ok_or_else(|| RouteError::NotFound(target.clone()))?;

            match guard(route, &self.session) {
                Navigation::Allow => {
                    *self.current.write().unwrap_or_else(PoisonError::into_inner) = route;
                    analytics::track_page_view(route.path);
                    return Ok(route);
                }
                Navigation::Redirect(next) => {
                    tracing::debug!(from = route.path, to = next, "Navigation redirected");
                    target = next.to_string();
                }
            }
        }

        Err(RouteError::RedirectLoop(path.to_string()))
    }
}

impl Navigator for Router {
    fn redirect(&self, path: &str) {
        if let Err(e) = self.navigate(path) {
            tracing::warn!(error = %e, path, "Redirect failed");
        }
    }
}
