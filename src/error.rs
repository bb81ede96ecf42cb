// src/error.rs
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failures while reading or writing persisted session state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access session storage at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("Session storage lock poisoned")]
    Poisoned,
}

/// Everything that can go wrong talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authorized ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Unauthorized {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Request rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Server error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Not logged in")]
    NoSession,
}

impl ApiError {
    /// Builds the error for a non-success response from its status and raw body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = extract_detail(body);
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ApiError::Unauthorized { status, detail }
        } else if status.is_client_error() {
            ApiError::Rejected { status, detail }
        } else {
            ApiError::Server { status, detail }
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail, .. }
            | ApiError::Rejected { detail, .. }
            | ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The server-provided `detail`, or `fallback` when there is none.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. } | ApiError::NoSession)
    }
}

/// Pulls `detail` out of an error body. FastAPI sends either a string or a
/// list of `{loc, msg, type}` validation entries.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if msgs.is_empty() {
                None
            } else {
                Some(msgs.join("; "))
            }
        }
        _ => None,
    }
}

/// Client-side form validation. These block the request entirely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("New passwords do not match")]
    NewPasswordMismatch,
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("{0} is required")]
    Missing(&'static str),
}

/// Outcome of an auth surface (login, register, change password).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AuthError {
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AuthError::Form(e) => e.to_string(),
            AuthError::Api(e) => e.user_message(fallback),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
