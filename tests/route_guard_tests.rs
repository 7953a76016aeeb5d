// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation guard tests for protected pages.

use judo_club_client::routes::RouteError;

mod common;
use common::{seed_session, test_state};

#[test]
fn test_public_pages_are_open() {
    let (state, _) = test_state("http://localhost:8001");

    for path in ["/", "/inscription", "/events", "/gallery", "/payment/success"] {
        let route = state.router.navigate(path).unwrap();
        assert_eq!(route.path, path);
    }
    assert_eq!(state.router.current_path(), "/payment/success");
}

#[test]
fn test_anonymous_user_sent_to_login() {
    let (state, _) = test_state("http://localhost:8001");

    assert_eq!(state.router.navigate("/my-space").unwrap().path, "/login");
    assert_eq!(state.router.navigate("/dashboard").unwrap().path, "/login");
    assert_eq!(state.router.current_path(), "/login");
}

#[test]
fn test_member_without_staff_flag_sent_to_own_space() {
    let (state, storage) = test_state("http://localhost:8001");
    seed_session(&storage, "token", Some("refresh"), false);

    let route = state.router.navigate("/dashboard").unwrap();
    assert_eq!(route.name, "parent-dashboard");
    assert_eq!(state.router.navigate("/my-space").unwrap().path, "/my-space");
}

#[test]
fn test_staff_reaches_dashboard() {
    let (state, storage) = test_state("http://localhost:8001");
    seed_session(&storage, "token", Some("refresh"), true);

    let route = state.router.navigate("/dashboard").unwrap();
    assert_eq!(route.name, "dashboard");
}

#[test]
fn test_unknown_path_is_an_error() {
    let (state, _) = test_state("http://localhost:8001");

    let err = state.router.navigate("/dojo").unwrap_err();
    assert!(matches!(err, RouteError::NotFound(ref p) if p == "/dojo"));
    assert_eq!(state.router.current_path(), "/");
}
