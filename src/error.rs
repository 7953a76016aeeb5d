// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types and their user-facing classification.

use reqwest::StatusCode;

/// Error returned by every API call.
///
/// The variant records where the failure happened (before sending, on the
/// wire, or in the response), which is what the notification logic keys on.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be built (bad URL, body or header value).
    #[error("Invalid request: {0}")]
    Setup(String),

    /// No response was received.
    #[error("Server unreachable: {0}")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The access token could not be refreshed; the session is gone.
    #[error("Session expired: {0}")]
    SessionExpired(#[source] Box<ApiError>),

    #[error("No refresh token stored")]
    MissingRefreshToken,

    /// A response body did not have the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// What the user is told about a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    SessionExpired,
    AccessDenied,
    ServerFault,
    /// 4xx other than 401/403, carrying the message extracted from the body.
    ClientFault(String),
    Unreachable,
    Unexpected,
}

impl ApiError {
    pub const SESSION_EXPIRED: &'static str = "Session expirée, veuillez vous reconnecter.";
    pub const ACCESS_DENIED: &'static str = "Accès refusé.";
    pub const SERVER_ERROR: &'static str = "Erreur serveur. Veuillez réessayer plus tard.";
    pub const GENERIC_ERROR: &'static str = "Une erreur est survenue.";
    pub const NETWORK_ERROR: &'static str =
        "Impossible de contacter le serveur. Vérifiez votre connexion.";
    pub const UNEXPECTED_ERROR: &'static str = "Erreur inattendue.";

    /// Map a transport error from reqwest.
    ///
    /// Builder errors happen before anything is sent; everything else means
    /// no usable response came back.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Setup(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Classify the error for the user notification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Setup(_) | ApiError::Decode(_) => ErrorCategory::Unexpected,
            ApiError::Network(_) => ErrorCategory::Unreachable,
            ApiError::SessionExpired(_) | ApiError::MissingRefreshToken => {
                ErrorCategory::SessionExpired
            }
            ApiError::Status { status, body } => {
                if *status == StatusCode::UNAUTHORIZED {
                    ErrorCategory::SessionExpired
                } else if *status == StatusCode::FORBIDDEN {
                    ErrorCategory::AccessDenied
                } else if status.as_u16() >= 500 {
                    ErrorCategory::ServerFault
                } else {
                    ErrorCategory::ClientFault(extract_message(body))
                }
            }
        }
    }
}

impl ErrorCategory {
    /// Notification text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            ErrorCategory::SessionExpired => ApiError::SESSION_EXPIRED,
            ErrorCategory::AccessDenied => ApiError::ACCESS_DENIED,
            ErrorCategory::ServerFault => ApiError::SERVER_ERROR,
            ErrorCategory::ClientFault(message) => message,
            ErrorCategory::Unreachable => ApiError::NETWORK_ERROR,
            ErrorCategory::Unexpected => ApiError::UNEXPECTED_ERROR,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Looks at `detail`, `message` then `error`, taking the first non-empty
/// string. Anything else yields the generic message.
pub fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return ApiError::GENERIC_ERROR.to_string();
    };

    ["detail", "message", "error"]
        .iter()
        .filter_map(|field| value.get(field).and_then(|v| v.as_str()))
        .find(|message| !message.is_empty())
        .unwrap_or(ApiError::GENERIC_ERROR)
        .to_string()
}
