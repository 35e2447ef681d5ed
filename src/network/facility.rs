// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interceptable request facility
//!
//! The host transport exposes its interception hooks through
//! [`InterceptionFacility`]. Listeners are plain closures over plain data
//! records; the facility decides when to call them.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::event::{ChallengeDetails, CompletionDetails, HeadersDetails, HookKind};
use super::pattern::UrlPattern;
use crate::error::Result;
use crate::http::HeaderEntry;

/// Username/password pair answered to a credential challenge
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCredentials {
    pub username: String,
    pub password: String,
}

impl AuthCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` header value for HTTP basic auth
    pub fn basic_header(&self) -> String {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", self.username, self.password),
        );
        format!("Basic {}", encoded)
    }
}

impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What a header listener wants done with the headers it saw
#[derive(Debug, Clone, PartialEq)]
pub enum HeadersAction {
    /// Leave the headers as they are
    Continue,
    /// Replace the whole header list
    Replace(Vec<HeaderEntry>),
}

/// Listener for headers-received and before-send-headers
pub type HeadersHandler = Arc<dyn Fn(&HeadersDetails) -> Result<HeadersAction> + Send + Sync>;

/// Listener for auth-required; `None` lets the request proceed unanswered
pub type ChallengeHandler = Arc<dyn Fn(&ChallengeDetails) -> Option<AuthCredentials> + Send + Sync>;

/// Listener for completed and error-occurred
pub type CompletionHandler = Arc<dyn Fn(&CompletionDetails) + Send + Sync>;

/// Handle returned by the facility for a single installed listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    pub hook: HookKind,
    pub id: u64,
}

/// Host capability for observing and modifying HTTP traffic
///
/// Every `on_*` call installs one listener scoped to `pattern` and returns
/// its handle, or fails with a registration error.
pub trait InterceptionFacility: Send + Sync {
    /// Response headers arrived
    fn on_headers_received(&self, pattern: &UrlPattern, handler: HeadersHandler) -> Result<ListenerId>;

    /// Request headers are about to be sent
    fn on_before_send(&self, pattern: &UrlPattern, handler: HeadersHandler) -> Result<ListenerId>;

    /// The server asked for credentials
    fn on_challenge(&self, pattern: &UrlPattern, handler: ChallengeHandler) -> Result<ListenerId>;

    /// The request finished with a response
    fn on_completed(&self, pattern: &UrlPattern, handler: CompletionHandler) -> Result<ListenerId>;

    /// The request failed at the network level
    fn on_error(&self, pattern: &UrlPattern, handler: CompletionHandler) -> Result<ListenerId>;

    /// Remove an installed listener. Unknown handles are ignored.
    fn remove_listener(&self, listener: ListenerId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header() {
        let creds = AuthCredentials::new("admin", "adminadmin");
        assert_eq!(creds.basic_header(), "Basic YWRtaW46YWRtaW5hZG1pbg==");
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = AuthCredentials::new("admin", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
