// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for Seedgate
//!
//! Every failure carries enough detail (status line, truncated body snippet,
//! offending header) for the caller to render a user-facing message.
//! Nothing in this crate retries; recovery belongs to the caller.

use thiserror::Error;

use crate::network::HookKind;

/// Result type alias for Seedgate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Seedgate
#[derive(Error, Debug)]
pub enum Error {
    /// Unexpected API response (non-JSON 2xx body or unhandled status)
    #[error("API error: {0}")]
    Api(String),

    /// The server refused a torrent submission (HTTP 400)
    #[error("Torrent could not be added")]
    TorrentAdd,

    /// Invalid or expired credentials (HTTP 401)
    #[error("Login failed: invalid or expired credentials")]
    Login,

    /// A Set-Cookie header did not contain the requested key
    #[error("Malformed {header} header: no value for key '{key}'")]
    MalformedHeader { header: String, key: String },

    /// The interception facility rejected a hook
    #[error("Failed to register {hook} listener: {reason}")]
    Registration { hook: HookKind, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport failure while reading a response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an API error
    pub fn api<S: Into<String>>(detail: S) -> Self {
        Error::Api(detail.into())
    }

    /// Create a malformed header error
    pub fn malformed_header(header: impl Into<String>, key: impl Into<String>) -> Self {
        Error::MalformedHeader {
            header: header.into(),
            key: key.into(),
        }
    }

    /// Create a registration error for a hook
    pub fn registration(hook: HookKind, reason: impl Into<String>) -> Self {
        Error::Registration {
            hook,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the server rejected our credentials
    pub fn is_login(&self) -> bool {
        matches!(self, Error::Login)
    }

    /// Check if this failure came from the server's answer rather than
    /// from local setup or the transport
    pub fn is_api_failure(&self) -> bool {
        matches!(self, Error::Api(_) | Error::TorrentAdd | Error::Login)
    }

    /// Check if this is a setup-time failure
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Registration { .. } | Error::Config(_))
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Get the hook a registration error refers to
    pub fn hook(&self) -> Option<HookKind> {
        match self {
            Error::Registration { hook, .. } => Some(*hook),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                Error::Url(e) => Error::Config(format!("{}: {}", msg, e)),
                other => Error::Other(format!("{}: {}", msg, other)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_failures() {
        assert!(Error::api("500: Internal Server Error").is_api_failure());
        assert!(Error::TorrentAdd.is_api_failure());
        assert!(Error::Login.is_login());
        assert!(!Error::config("bad host").is_api_failure());
    }

    #[test]
    fn test_registration_error() {
        let err = Error::registration(HookKind::AuthRequired, "permission denied");

        assert!(err.is_fatal());
        assert_eq!(err.hook(), Some(HookKind::AuthRequired));
        assert_eq!(
            err.to_string(),
            "Failed to register auth-required listener: permission denied"
        );
    }

    #[test]
    fn test_malformed_header_message() {
        let err = Error::malformed_header("set-cookie", "SID");
        assert_eq!(
            err.to_string(),
            "Malformed set-cookie header: no value for key 'SID'"
        );
    }

    #[test]
    fn test_context_on_url_error() {
        let parsed: Result<url::Url> = url::Url::parse("not a url").context("server hostname");
        match parsed {
            Err(Error::Config(msg)) => assert!(msg.starts_with("server hostname")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }
}
