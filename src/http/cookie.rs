// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Session cookie extraction and storage

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::headers::{find_header, HeaderEntry};
use super::SET_COOKIE;
use crate::error::{Error, Result};

/// A cookie value captured from a Set-Cookie header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// When the value was captured
    pub captured_at: DateTime<Utc>,
}

impl Cookie {
    /// Create a new cookie captured now
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            captured_at: Utc::now(),
        }
    }

    /// Convert to cookie header format
    pub fn to_header_value(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Extract the value bound to `key` in the first Set-Cookie header.
///
/// Returns `Ok(None)` when no Set-Cookie header is present. The value must be
/// followed by `;`: a pair sitting at the very end of the header does not
/// match and is reported as [`Error::MalformedHeader`], like any header that
/// lacks the key.
pub fn extract_cookie_value(headers: &[HeaderEntry], key: &str) -> Result<Option<String>> {
    let header = match find_header(headers, SET_COOKIE) {
        Some(header) => header,
        None => return Ok(None),
    };

    let pattern = Regex::new(&format!("{}=(.+?);", regex::escape(key)))
        .map_err(|e| Error::other(format!("Invalid cookie key '{}': {}", key, e)))?;

    pattern
        .captures(&header.value)
        .and_then(|captures| captures.get(1))
        .map(|value| Some(value.as_str().to_string()))
        .ok_or_else(|| Error::malformed_header(SET_COOKIE, key))
}

/// Shared slot holding the session cookie for one server session
#[derive(Debug, Clone, Default)]
pub struct SessionCookie {
    inner: Arc<RwLock<Option<Cookie>>>,
}

impl SessionCookie {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cookie, replacing the previous one
    pub fn set(&self, cookie: Cookie) {
        *self.inner.write() = Some(cookie);
    }

    /// Current cookie, if one has been captured
    pub fn get(&self) -> Option<Cookie> {
        self.inner.read().clone()
    }

    /// Forget the captured cookie
    pub fn clear(&self) {
        self.inner.write().take();
    }

    /// Value for a `Cookie` request header
    pub fn header_value(&self) -> Option<String> {
        self.inner.read().as_ref().map(Cookie::to_header_value)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_cookie(value: &str) -> Vec<HeaderEntry> {
        vec![
            HeaderEntry::new("Content-Type", "text/plain"),
            HeaderEntry::new("Set-Cookie", value),
        ]
    }

    #[test]
    fn test_extract_value() {
        let headers = set_cookie("sid=abc123; Path=/");
        assert_eq!(
            extract_cookie_value(&headers, "sid").unwrap(),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_no_set_cookie_header() {
        let headers = vec![HeaderEntry::new("Content-Type", "application/json")];
        assert_eq!(extract_cookie_value(&headers, "sid").unwrap(), None);
    }

    #[test]
    fn test_header_name_case_insensitive() {
        let headers = vec![HeaderEntry::new("set-cookie", "SID=xyz; HttpOnly; path=/")];
        assert_eq!(
            extract_cookie_value(&headers, "SID").unwrap(),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let headers = set_cookie("other=1; Path=/");
        let err = extract_cookie_value(&headers, "sid").unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { ref key, .. } if key == "sid"));
    }

    #[test]
    fn test_value_without_trailing_separator_is_not_matched() {
        let headers = set_cookie("Path=/; sid=abc123");
        assert!(matches!(
            extract_cookie_value(&headers, "sid"),
            Err(Error::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_only_first_set_cookie_is_read() {
        let headers = vec![
            HeaderEntry::new("Set-Cookie", "lang=en; Path=/"),
            HeaderEntry::new("Set-Cookie", "sid=abc; Path=/"),
        ];
        assert!(extract_cookie_value(&headers, "sid").is_err());
        assert_eq!(
            extract_cookie_value(&headers, "lang").unwrap(),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_key_is_matched_literally() {
        let headers = set_cookie("a.b=1; Path=/");
        assert!(extract_cookie_value(&headers, "a+b").is_err());
        assert_eq!(
            extract_cookie_value(&headers, "a.b").unwrap(),
            Some("1".to_string())
        );
    }

    #[test]
    fn test_session_cookie_slot() {
        let slot = SessionCookie::new();
        assert!(slot.is_empty());
        assert_eq!(slot.header_value(), None);

        let shared = slot.clone();
        shared.set(Cookie::new("SID", "abc"));
        assert_eq!(slot.header_value(), Some("SID=abc".to_string()));

        slot.clear();
        assert!(shared.get().is_none());
    }
}
