// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response classification
//!
//! Maps an API response to either its JSON payload or a typed failure.
//! Rules are checked in order and the first match wins:
//!
//! 1. 2xx with a JSON content type: the parsed body.
//! 2. 2xx with any other content type: `Api` failure carrying the first
//!    256 characters of the trimmed body.
//! 3. 400: `TorrentAdd` failure.
//! 4. 401: `Login` failure.
//! 5. Anything else: `Api` failure carrying `"<code>: <reason>"`.
//!
//! Only the first two rules read the body.

use serde::Serialize;
use serde_json::Value;

use super::response::{ResponseBody, ResponseDescriptor};
use crate::error::{Error, Result};

/// Maximum number of body characters kept in an API failure
pub const BODY_SNIPPET_LEN: usize = 256;

/// Category of a failed API response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// Unexpected response
    Api,
    /// Torrent submission rejected
    TorrentAdd,
    /// Credentials rejected
    Login,
}

/// Outcome of classifying a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassifiedResponse {
    Success(Value),
    Failure {
        kind: FailureKind,
        detail: Option<String>,
    },
}

impl ClassifiedResponse {
    fn api(detail: impl Into<String>) -> Self {
        ClassifiedResponse::Failure {
            kind: FailureKind::Api,
            detail: Some(detail.into()),
        }
    }

    fn bare(kind: FailureKind) -> Self {
        ClassifiedResponse::Failure { kind, detail: None }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ClassifiedResponse::Success(_))
    }

    /// Failure category, if this is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ClassifiedResponse::Success(_) => None,
            ClassifiedResponse::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Convert into a payload or the matching error
    pub fn into_result(self) -> Result<Value> {
        match self {
            ClassifiedResponse::Success(value) => Ok(value),
            ClassifiedResponse::Failure { kind, detail } => Err(match kind {
                FailureKind::Api => Error::Api(detail.unwrap_or_default()),
                FailureKind::TorrentAdd => Error::TorrentAdd,
                FailureKind::Login => Error::Login,
            }),
        }
    }
}

/// Classify a response, reading its body only when the rules need it.
///
/// An `Err` means the transport failed while the body was being read.
pub async fn classify<B: ResponseBody>(response: ResponseDescriptor<B>) -> Result<ClassifiedResponse> {
    let classified = if response.is_success() && response.is_json() {
        let body = response.body.read().await?;
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => ClassifiedResponse::Success(value),
            Err(e) => ClassifiedResponse::api(format!("Invalid JSON body: {}", e)),
        }
    } else if response.is_success() {
        let body = response.body.read().await?;
        ClassifiedResponse::api(body_snippet(&String::from_utf8_lossy(&body)))
    } else if response.status.as_u16() == 400 {
        ClassifiedResponse::bare(FailureKind::TorrentAdd)
    } else if response.status.as_u16() == 401 {
        ClassifiedResponse::bare(FailureKind::Login)
    } else {
        ClassifiedResponse::api(format!(
            "{}: {}",
            response.status.as_u16(),
            response.status_text
        ))
    };

    if let Some(kind) = classified.failure_kind() {
        tracing::debug!(status = response.status.as_u16(), ?kind, "API response rejected");
    }

    Ok(classified)
}

/// Classify and convert to a payload or error in one step
pub async fn parse_json_response<B: ResponseBody>(response: ResponseDescriptor<B>) -> Result<Value> {
    classify(response).await?.into_result()
}

fn body_snippet(text: &str) -> String {
    text.trim().chars().take(BODY_SNIPPET_LEN).collect()
}
