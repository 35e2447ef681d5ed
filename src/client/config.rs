// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server and session configuration

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, ErrorContext, Result};
use crate::http::{COOKIE, ORIGIN, REFERER};
use crate::network::{AuthCredentials, UrlPattern};

/// Connection settings for one remote server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// URL scheme, "http" or "https"
    pub scheme: String,
    /// Host with optional port, e.g. "localhost:8080"
    pub hostname: String,
    /// Credentials answered to challenges
    #[serde(default)]
    pub credentials: Option<AuthCredentials>,
}

impl ServerSettings {
    /// Create settings without credentials
    pub fn new(scheme: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            hostname: hostname.into(),
            credentials: None,
        }
    }

    /// Parse settings from a server URL such as `http://admin:pw@nas:8080/`
    ///
    /// Credentials embedded in the URL are kept, percent-decoded; path and
    /// query are ignored.
    pub fn from_url(server_url: &str) -> Result<Self> {
        let url = Url::parse(server_url).context("Invalid server URL")?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::config(format!("Server URL has no host: {}", server_url)))?;

        let hostname = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let mut settings = Self::new(url.scheme(), hostname);
        if !url.username().is_empty() {
            settings.credentials = Some(AuthCredentials::new(
                decode_userinfo(url.username())?,
                decode_userinfo(url.password().unwrap_or(""))?,
            ));
        }
        Ok(settings)
    }

    /// Set the credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(AuthCredentials::new(username, password));
        self
    }

    /// Base URL of the server, `scheme://hostname/`
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&format!("{}://{}/", self.scheme, self.hostname)).context("Invalid server hostname")
    }

    /// Resolve an API path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url()?
            .join(path.trim_start_matches('/'))
            .context("Invalid endpoint path")
    }

    /// Listener scope for this server: `scheme://host/*`, port stripped
    pub fn url_pattern(&self) -> Result<UrlPattern> {
        UrlPattern::from_url(&self.base_url()?)
    }
}

fn decode_userinfo(part: &str) -> Result<String> {
    percent_decode_str(part)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| Error::config(format!("Server URL credentials are not UTF-8: {}", e)))
}

/// Header and cookie handling for a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Set-Cookie key holding the session id
    pub capture_cookie: Option<String>,
    /// Request headers stripped before sending
    pub blocked_request_headers: Vec<String>,
    /// Response headers stripped before the caller sees them
    pub blocked_response_headers: Vec<String>,
    /// Send basic auth up front instead of waiting for a challenge
    pub preemptive_auth: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            capture_cookie: None,
            blocked_request_headers: Vec::new(),
            blocked_response_headers: Vec::new(),
            preemptive_auth: false,
        }
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the session cookie named `key`
    pub fn capture_cookie(mut self, key: impl Into<String>) -> Self {
        self.capture_cookie = Some(key.into());
        self
    }

    /// Strip a request header
    pub fn block_request_header(mut self, name: impl Into<String>) -> Self {
        self.blocked_request_headers.push(name.into().to_lowercase());
        self
    }

    /// Strip a response header
    pub fn block_response_header(mut self, name: impl Into<String>) -> Self {
        self.blocked_response_headers.push(name.into().to_lowercase());
        self
    }

    /// Enable/disable preemptive basic auth
    pub fn preemptive_auth(mut self, enabled: bool) -> Self {
        self.preemptive_auth = enabled;
        self
    }

    /// Options for cookie-session web APIs: capture `key` and strip the
    /// browser-supplied Cookie, Origin and Referer headers that such servers
    /// reject as cross-site.
    pub fn for_cookie_session(key: impl Into<String>) -> Self {
        Self::new()
            .capture_cookie(key)
            .block_request_header(COOKIE)
            .block_request_header(ORIGIN)
            .block_request_header(REFERER)
    }

    /// Options for servers using HTTP basic auth
    pub fn for_basic_auth() -> Self {
        Self::new().preemptive_auth(true)
    }
}
