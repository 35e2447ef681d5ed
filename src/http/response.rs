// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP response descriptors with lazily read bodies

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;

use super::CONTENT_TYPE;
use crate::error::Result;

/// Lazy accessor for a response body
///
/// Reading consumes the accessor, so a body is read at most once.
#[async_trait]
pub trait ResponseBody: Send {
    /// Read the whole body
    async fn read(self) -> Result<Bytes>;
}

#[async_trait]
impl ResponseBody for Bytes {
    async fn read(self) -> Result<Bytes> {
        Ok(self)
    }
}

#[async_trait]
impl ResponseBody for String {
    async fn read(self) -> Result<Bytes> {
        Ok(Bytes::from(self))
    }
}

#[async_trait]
impl ResponseBody for &'static str {
    async fn read(self) -> Result<Bytes> {
        Ok(Bytes::from_static(self.as_bytes()))
    }
}

#[async_trait]
impl ResponseBody for reqwest::Response {
    async fn read(self) -> Result<Bytes> {
        Ok(self.bytes().await?)
    }
}

/// HTTP response as seen by the classifier
#[derive(Debug)]
pub struct ResponseDescriptor<B> {
    /// Response status code
    pub status: StatusCode,
    /// Reason phrase
    pub status_text: String,
    /// Content-Type header, if any
    pub content_type: Option<String>,
    /// Unread body
    pub body: B,
}

impl<B: ResponseBody> ResponseDescriptor<B> {
    /// Create a descriptor using the canonical reason phrase for `status`
    pub fn new(status: StatusCode, content_type: Option<String>, body: B) -> Self {
        Self {
            status,
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            content_type,
            body,
        }
    }

    /// Override the reason phrase
    pub fn status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if content type is JSON
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false)
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }
}

impl ResponseDescriptor<reqwest::Response> {
    /// Wrap a live reqwest response without reading its body
    pub fn from_reqwest(response: reqwest::Response) -> Self {
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Self::new(response.status(), content_type, response)
    }
}
