// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Header entries as seen by the interception facility

use serde::{Deserialize, Serialize};

/// A single header, in transport order
///
/// Names compare case-insensitively; the original spelling is kept so that
/// replaced header lists go back to the transport untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive name comparison
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Return the headers whose name is not in `blocked`, preserving order.
pub fn filter_headers<S: AsRef<str>>(headers: &[HeaderEntry], blocked: &[S]) -> Vec<HeaderEntry> {
    headers
        .iter()
        .filter(|header| !blocked.iter().any(|name| header.is(name.as_ref())))
        .cloned()
        .collect()
}

/// First header with the given name
pub fn find_header<'a>(headers: &'a [HeaderEntry], name: &str) -> Option<&'a HeaderEntry> {
    headers.iter().find(|header| header.is(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HeaderEntry> {
        vec![
            HeaderEntry::new("Host", "localhost:8080"),
            HeaderEntry::new("Origin", "chrome-extension://abc"),
            HeaderEntry::new("Accept", "*/*"),
            HeaderEntry::new("Referer", "http://localhost:8080/"),
            HeaderEntry::new("Cookie", "SID=old"),
            HeaderEntry::new("User-Agent", "seedgate"),
        ]
    }

    #[test]
    fn test_filter_preserves_order() {
        let filtered = filter_headers(&sample(), &["origin", "referer", "cookie"]);
        let names: Vec<&str> = filtered.iter().map(|h| h.name.as_str()).collect();

        assert_eq!(names, vec!["Host", "Accept", "User-Agent"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let headers = vec![
            HeaderEntry::new("COOKIE", "a=1"),
            HeaderEntry::new("cookie", "b=2"),
            HeaderEntry::new("X-Keep", "yes"),
        ];
        let filtered = filter_headers(&headers, &["Cookie"]);

        assert_eq!(filtered, vec![HeaderEntry::new("X-Keep", "yes")]);
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let headers = sample();
        let before = headers.clone();
        let _ = filter_headers(&headers, &["host"]);

        assert_eq!(headers, before);
    }

    #[test]
    fn test_filter_with_empty_blocklist() {
        let blocked: [&str; 0] = [];
        assert_eq!(filter_headers(&sample(), &blocked), sample());
    }

    #[test]
    fn test_find_header() {
        let headers = sample();
        assert_eq!(
            find_header(&headers, "user-agent").map(|h| h.value.as_str()),
            Some("seedgate")
        );
        assert!(find_header(&headers, "set-cookie").is_none());
    }
}
