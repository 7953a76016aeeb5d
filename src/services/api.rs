// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated client for the club API.
//!
//! Handles:
//! - Bearer token injection from the session store
//! - Silent access token refresh on 401 (one attempt per request)
//! - Session teardown and login redirect when refresh fails
//! - A user notification for every failure that is not recovered

use crate::config::Config;
use crate::error::{ApiError, ErrorCategory};
use crate::middleware::auth::{authorize, bearer_value};
use crate::models::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse};
use crate::routes::{Navigator, LOGIN_PATH};
use crate::services::{SessionStore, ToastStore};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

/// Token refresh endpoint, relative to the base URL.
pub const REFRESH_PATH: &str = "/api/token/refresh/";

/// Token obtain (login) endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "/api/token/";

/// A request that can be re-issued after a token refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            retried: false,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Never attempt a token refresh for this request.
    ///
    /// Used for credential checks, where a 401 means bad credentials rather
    /// than an expired session.
    pub fn without_refresh(mut self) -> Self {
        self.retried = true;
        self
    }

    /// Whether the request has already been through a refresh attempt.
    pub fn is_retried(&self) -> bool {
        self.retried
    }
}

/// A successful (2xx) response with its body read into memory.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| ApiError::Decode(format!("JSON parse error: {}", e)))
    }
}

/// Club API client.
///
/// Cheap to clone; all clones share the HTTP pool, default headers and the
/// refresh lock.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    toasts: ToastStore,
    navigator: Arc<dyn Navigator>,
    /// Headers sent with every request, before the stored token is applied.
    default_headers: Arc<RwLock<HeaderMap>>,
    /// Serializes token refreshes so concurrent 401s share one refresh.
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        session: SessionStore,
        toasts: ToastStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            http: reqwest::Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
            toasts,
            navigator,
            default_headers: Arc::new(RwLock::new(default_headers)),
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // ─── Convenience wrappers ────────────────────────────────────────────────

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::new(Method::GET, path)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.send_json(Method::POST, path, body).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.send_json(Method::PUT, path, body).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// GET and parse the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get(path).await?.json()
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let body = match serde_json::to_value(body) {
            Ok(body) => body,
            Err(e) => {
                let error = ApiError::Setup(format!("Request body is not serializable: {}", e));
                self.report(false, &error);
                return Err(error);
            }
        };
        self.execute(ApiRequest::new(method, path).json(body)).await
    }

    // ─── Session ─────────────────────────────────────────────────────────────

    /// Exchange credentials for a token pair and start a session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        // Stale credentials must not be sent along with the login request.
        self.logout();

        let body = serde_json::to_value(LoginRequest { username, password })
            .map_err(|e| ApiError::Setup(e.to_string()))?;

        let request = ApiRequest::new(Method::POST, TOKEN_PATH)
            .json(body)
            .without_refresh();
        let login: LoginResponse = self.execute(request).await?.json()?;

        self.session.start(&login);
        self.set_default_authorization(&login.access)?;
        Ok(login)
    }

    /// Forget the session and stop sending credentials.
    pub fn logout(&self) {
        self.session.clear();
        self.clear_default_authorization();
    }

    // ─── Request pipeline ────────────────────────────────────────────────────

    /// Send a request, refreshing the access token once on 401.
    ///
    /// Errors are reported to the user through the toast store and then
    /// returned unchanged. A 401 that is recovered by a refresh is invisible
    /// to the caller.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        loop {
            let sent_token = self.session.access_token();

            let error = match self.dispatch(&request).await {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            if error.is_unauthorized()
                && !request.retried
                && self.session.refresh_token().is_some()
            {
                request.retried = true;

                match self.refresh_access_token(sent_token.as_deref()).await {
                    Ok(_) => {
                        // The refreshed token is in the session store; dispatch picks it up.
                        tracing::debug!(path = %request.path, "Retrying request with refreshed token");
                        continue;
                    }
                    Err(ended @ ApiError::SessionExpired(_)) => {
                        tracing::debug!(path = %request.path, "Session ended by a concurrent refresh");
                        return Err(ended);
                    }
                    Err(refresh_error) => {
                        tracing::warn!(error = %refresh_error, "Token refresh failed, ending session");
                        self.expire_session();
                        return Err(ApiError::SessionExpired(Box::new(refresh_error)));
                    }
                }
            }

            self.report(request.retried, &error);
            return Err(error);
        }
    }

    /// Send one request without any recovery.
    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url_for(&request.path)?;

        let mut headers = self
            .default_headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        headers.extend(request.headers.clone());
        authorize(&mut headers, &self.session)?;

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::from_transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(ApiError::from_transport)?
            .to_vec();

        if status.is_success() {
            return Ok(ApiResponse {
                status,
                headers,
                body,
            });
        }

        Err(ApiError::Status {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    /// Get a new access token, sharing the work with concurrent callers.
    ///
    /// `stale` is the token the failed request was sent with. If the stored
    /// token differs once the lock is held, another request already
    /// refreshed and its token is reused. If the session was cleared
    /// instead, the refresh failed for everyone and `SessionExpired` is
    /// returned; the caller must not end the session a second time.
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        match self.session.access_token() {
            Some(current) if stale != Some(current.as_str()) => {
                tracing::debug!("Access token already refreshed by a concurrent request");
                return Ok(current);
            }
            None if stale.is_some() && self.session.refresh_token().is_none() => {
                return Err(ApiError::SessionExpired(Box::new(
                    ApiError::MissingRefreshToken,
                )));
            }
            _ => {}
        }

        let refresh_token = self
            .session
            .refresh_token()
            .ok_or(ApiError::MissingRefreshToken)?;

        let url = self.url_for(REFRESH_PATH)?;
        let response = self
            .http
            .post(url)
            .json(&RefreshRequest {
                refresh: &refresh_token,
            })
            .send()
            .await
            .map_err(ApiError::from_transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let tokens: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Invalid refresh response: {}", e)))?;

        self.session.set_access_token(&tokens.access);
        if let Some(rotated) = &tokens.refresh {
            self.session.set_refresh_token(rotated);
        }
        self.set_default_authorization(&tokens.access)?;

        tracing::info!("Access token refreshed");
        Ok(tokens.access)
    }

    /// Clear credentials, tell the user and send them to the login page.
    fn expire_session(&self) {
        self.session.clear();
        self.clear_default_authorization();
        self.toasts.error(ApiError::SESSION_EXPIRED);
        self.navigator.redirect(LOGIN_PATH);
    }

    /// Notify the user about an error that is being returned to the caller.
    fn report(&self, retried: bool, error: &ApiError) {
        match error.category() {
            ErrorCategory::SessionExpired if retried => {
                tracing::debug!(error = %error, "Unauthorized after retry");
            }
            ErrorCategory::SessionExpired => {
                tracing::warn!(error = %error, "Unauthorized without refresh token");
                self.expire_session();
            }
            category => {
                tracing::warn!(error = %error, "API request failed");
                self.toasts.error(category.message());
            }
        }
    }

    fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        };
        Url::parse(&raw).map_err(|e| ApiError::Setup(format!("Invalid URL {}: {}", raw, e)))
    }

    fn set_default_authorization(&self, token: &str) -> Result<(), ApiError> {
        let value = bearer_value(token)?;
        self.default_headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(AUTHORIZATION, value);
        Ok(())
    }

    fn clear_default_authorization(&self) {
        self.default_headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(AUTHORIZATION);
    }
}
