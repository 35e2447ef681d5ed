// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception event records
//!
//! Plain data handed to listeners by the interception facility.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::http::HeaderEntry;

/// Identifier of one in-flight request, as assigned by the transport
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Numeric(u64),
    Text(String),
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        RequestId::Numeric(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        RequestId::Text(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::Text(id)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Numeric(id) => write!(f, "{}", id),
            RequestId::Text(id) => f.write_str(id),
        }
    }
}

/// Facility channel a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookKind {
    /// Response headers arrived
    HeadersReceived,
    /// Request headers are about to be sent
    BeforeSendHeaders,
    /// The server asked for credentials
    AuthRequired,
    /// The request finished
    Completed,
    /// The request failed at the network level
    ErrorOccurred,
}

impl HookKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookKind::HeadersReceived => "headers-received",
            HookKind::BeforeSendHeaders => "before-send-headers",
            HookKind::AuthRequired => "auth-required",
            HookKind::Completed => "completed",
            HookKind::ErrorOccurred => "error-occurred",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headers of a request or response passing through the facility
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadersDetails {
    pub request_id: RequestId,
    pub url: Url,
    /// Headers in transport order
    pub headers: Vec<HeaderEntry>,
}

impl HeadersDetails {
    pub fn new(request_id: impl Into<RequestId>, url: Url, headers: Vec<HeaderEntry>) -> Self {
        Self {
            request_id: request_id.into(),
            url,
            headers,
        }
    }
}

/// Credential challenge raised by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeDetails {
    pub request_id: RequestId,
    pub url: Url,
    /// Authentication scheme, e.g. "basic"
    pub scheme: String,
    pub realm: Option<String>,
    /// Whether the challenge came from a proxy
    pub is_proxy: bool,
}

impl ChallengeDetails {
    pub fn new(request_id: impl Into<RequestId>, url: Url) -> Self {
        Self {
            request_id: request_id.into(),
            url,
            scheme: "basic".to_string(),
            realm: None,
            is_proxy: false,
        }
    }

    /// Set the realm
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }
}

/// End of a request, successful or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionDetails {
    pub request_id: RequestId,
    pub url: Url,
    /// Final status, absent on network errors
    pub status: Option<u16>,
    /// Network error description
    pub error: Option<String>,
}

impl CompletionDetails {
    /// Request finished with a status
    pub fn completed(request_id: impl Into<RequestId>, url: Url, status: u16) -> Self {
        Self {
            request_id: request_id.into(),
            url,
            status: Some(status),
            error: None,
        }
    }

    /// Request failed before a response arrived
    pub fn failed(request_id: impl Into<RequestId>, url: Url, error: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            url,
            status: None,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
