// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL scoping for interception listeners

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Match pattern of the form `scheme://host/*`
///
/// The port is never part of the pattern, so any port on the host matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UrlPattern {
    scheme: String,
    host: String,
}

impl UrlPattern {
    /// Build a pattern from a scheme and a `host[:port]` string
    pub fn new(scheme: &str, hostname: &str) -> Result<Self> {
        let url = Url::parse(&format!("{}://{}/", scheme, hostname))?;
        Self::from_url(&url)
    }

    /// Pattern covering the scheme and host of `url`
    pub fn from_url(url: &Url) -> Result<Self> {
        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| Error::config(format!("URL has no host: {}", url)))?;

        Ok(Self {
            scheme: url.scheme().to_string(),
            host: host.to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Check if a request URL falls under this pattern
    pub fn matches(&self, url: &Url) -> bool {
        url.scheme() == self.scheme && url.host_str() == Some(self.host.as_str())
    }
}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}/*", self.scheme, self.host)
    }
}
