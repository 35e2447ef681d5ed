// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Server session
//!
//! Ties one server's settings to the listeners that authenticate its
//! traffic: credential challenges, session cookie capture and request header
//! rewriting. The caller registers at log-in and unregisters at log-out.

use std::sync::Arc;

use super::config::{ServerSettings, SessionOptions};
use crate::error::Result;
use crate::http::{
    extract_cookie_value, filter_headers, Cookie, HeaderEntry, SessionCookie, AUTHORIZATION, COOKIE,
};
use crate::network::{
    AuthCredentials, AuthInterceptor, HeadersAction, HeadersDetails, HeadersHandler,
    InterceptionFacility, RequestSubscriptionManager, SubscriptionHandlers,
};

/// Authenticated session with one remote server
pub struct Session {
    settings: ServerSettings,
    options: SessionOptions,
    subscriptions: RequestSubscriptionManager,
    cookie: SessionCookie,
    auth: Option<AuthInterceptor>,
}

impl Session {
    /// Create an unregistered session
    pub fn new(
        facility: Arc<dyn InterceptionFacility>,
        settings: ServerSettings,
        options: SessionOptions,
    ) -> Self {
        Self {
            settings,
            options,
            subscriptions: RequestSubscriptionManager::new(facility),
            cookie: SessionCookie::new(),
            auth: None,
        }
    }

    /// Install the session's listeners on the facility
    pub fn register(&mut self) -> Result<()> {
        let mut handlers = SubscriptionHandlers::new();

        if let Some(handler) = self.headers_received_handler() {
            handlers = handlers.headers_received(handler);
        }
        if let Some(handler) = self.before_send_handler() {
            handlers = handlers.before_send(handler);
        }

        self.auth = self.settings.credentials.clone().map(AuthInterceptor::new);
        if let Some(ref auth) = self.auth {
            handlers = handlers.auth(auth.clone());
        }

        if handlers.is_empty() {
            tracing::warn!(host = %self.settings.hostname, "Session has nothing to intercept");
        }

        if let Err(e) = self.subscriptions.register(&self.settings, handlers) {
            self.auth = None;
            return Err(e);
        }
        Ok(())
    }

    /// Remove the session's listeners and forget the session cookie
    pub fn unregister(&mut self) {
        self.subscriptions.unregister();
        self.cookie.clear();
        self.auth = None;
    }

    pub fn is_registered(&self) -> bool {
        self.subscriptions.is_registered()
    }

    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Session cookie captured from the server, if any
    pub fn cookie(&self) -> Option<Cookie> {
        self.cookie.get()
    }

    /// Challenge interceptor, present while registered with credentials
    pub fn auth(&self) -> Option<&AuthInterceptor> {
        self.auth.as_ref()
    }

    fn headers_received_handler(&self) -> Option<HeadersHandler> {
        let key = self.options.capture_cookie.clone();
        let blocked = self.options.blocked_response_headers.clone();
        if key.is_none() && blocked.is_empty() {
            return None;
        }

        let slot = self.cookie.clone();
        Some(Arc::new(move |details: &HeadersDetails| -> Result<HeadersAction> {
            if let Some(ref key) = key {
                if let Some(value) = extract_cookie_value(&details.headers, key)? {
                    tracing::debug!(request_id = %details.request_id, cookie = %key, "Session cookie captured");
                    slot.set(Cookie::new(key.clone(), value));
                }
            }

            if blocked.is_empty() {
                Ok(HeadersAction::Continue)
            } else {
                Ok(HeadersAction::Replace(filter_headers(&details.headers, &blocked)))
            }
        }))
    }

    fn before_send_handler(&self) -> Option<HeadersHandler> {
        let blocked = self.options.blocked_request_headers.clone();
        let capture = self.options.capture_cookie.is_some();
        let preemptive: Option<AuthCredentials> = if self.options.preemptive_auth {
            self.settings.credentials.clone()
        } else {
            None
        };
        if blocked.is_empty() && !capture && preemptive.is_none() {
            return None;
        }

        let slot = self.cookie.clone();
        Some(Arc::new(move |details: &HeadersDetails| -> Result<HeadersAction> {
            let mut headers = filter_headers(&details.headers, &blocked);

            if let Some(ref credentials) = preemptive {
                headers.retain(|h| !h.is(AUTHORIZATION));
                headers.push(HeaderEntry::new("Authorization", credentials.basic_header()));
            }

            if let Some(cookie) = slot.header_value() {
                headers.retain(|h| !h.is(COOKIE));
                headers.push(HeaderEntry::new("Cookie", cookie));
            }

            Ok(HeadersAction::Replace(headers))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::http::find_header;
    use crate::network::{ChallengeDetails, CompletionDetails, HookKind, ListenerRegistry};
    use url::Url;

    fn url(path: &str) -> Url {
        Url::parse(&format!("http://localhost:8080{}", path)).unwrap()
    }

    fn registry() -> Arc<ListenerRegistry> {
        Arc::new(ListenerRegistry::new())
    }

    fn settings() -> ServerSettings {
        ServerSettings::new("http", "localhost:8080").credentials("admin", "secret")
    }

    #[test]
    fn test_cookie_session_flow() {
        let registry = registry();
        let mut session = Session::new(
            registry.clone(),
            settings(),
            SessionOptions::for_cookie_session("SID"),
        );
        session.register().unwrap();

        let login = HeadersDetails::new(
            1,
            url("/api/v2/auth/login"),
            vec![HeaderEntry::new("Set-Cookie", "SID=s3ss10n; HttpOnly; path=/")],
        );
        registry.dispatch_headers_received(&login).unwrap();
        assert_eq!(session.cookie().map(|c| c.value), Some("s3ss10n".to_string()));

        let outgoing = HeadersDetails::new(
            2,
            url("/api/v2/torrents/add"),
            vec![
                HeaderEntry::new("Origin", "chrome-extension://abc"),
                HeaderEntry::new("Cookie", "SID=stale"),
                HeaderEntry::new("Accept", "*/*"),
            ],
        );
        let sent = registry.dispatch_before_send(&outgoing).unwrap();

        assert_eq!(
            sent,
            vec![
                HeaderEntry::new("Accept", "*/*"),
                HeaderEntry::new("Cookie", "SID=s3ss10n"),
            ]
        );
    }

    #[test]
    fn test_malformed_session_cookie_propagates() {
        let registry = registry();
        let mut session = Session::new(
            registry.clone(),
            settings(),
            SessionOptions::new().capture_cookie("SID"),
        );
        session.register().unwrap();

        let response = HeadersDetails::new(
            1,
            url("/"),
            vec![HeaderEntry::new("Set-Cookie", "lang=en; path=/")],
        );
        let err = registry.dispatch_headers_received(&response).unwrap_err();
        assert!(matches!(err, Error::MalformedHeader { .. }));
        assert!(session.cookie().is_none());
    }

    #[test]
    fn test_preemptive_auth_header() {
        let registry = registry();
        let mut session = Session::new(registry.clone(), settings(), SessionOptions::for_basic_auth());
        session.register().unwrap();

        let sent = registry
            .dispatch_before_send(&HeadersDetails::new(
                1,
                url("/transmission/rpc"),
                vec![HeaderEntry::new("authorization", "Basic stale")],
            ))
            .unwrap();

        assert_eq!(sent.len(), 1);
        assert_eq!(
            find_header(&sent, "authorization").map(|h| h.value.clone()),
            Some(AuthCredentials::new("admin", "secret").basic_header())
        );
    }

    #[test]
    fn test_challenge_answered_once_per_request() {
        let registry = registry();
        let mut session = Session::new(registry.clone(), settings(), SessionOptions::new());
        session.register().unwrap();

        let challenge = ChallengeDetails::new(42, url("/gui/token.html")).realm("uTorrent");
        assert_eq!(
            registry.dispatch_challenge(&challenge),
            Some(AuthCredentials::new("admin", "secret"))
        );
        assert_eq!(registry.dispatch_challenge(&challenge), None);

        registry.dispatch_completed(&CompletionDetails::completed(42, url("/gui/token.html"), 401));
        assert_eq!(session.auth().map(|a| a.pending_count()), Some(0));
    }

    #[test]
    fn test_session_without_credentials_skips_auth() {
        let registry = registry();
        let mut session = Session::new(
            registry.clone(),
            ServerSettings::new("http", "localhost:8080"),
            SessionOptions::for_cookie_session("SID"),
        );
        session.register().unwrap();

        assert!(session.auth().is_none());
        assert_eq!(registry.listeners_on(HookKind::AuthRequired), 0);
        assert_eq!(registry.listener_count(), 2);
    }

    #[test]
    fn test_blocked_response_headers_stripped_in_order() {
        let registry = registry();
        let mut session = Session::new(
            registry.clone(),
            ServerSettings::new("http", "localhost:8080"),
            SessionOptions::new()
                .block_response_header("X-Frame-Options")
                .block_response_header("content-security-policy"),
        );
        session.register().unwrap();

        let received = registry
            .dispatch_headers_received(&HeadersDetails::new(
                1,
                url("/gui/"),
                vec![
                    HeaderEntry::new("x-frame-options", "DENY"),
                    HeaderEntry::new("A", "b"),
                    HeaderEntry::new("Content-Security-Policy", "default-src 'self'"),
                    HeaderEntry::new("Content-Type", "text/html"),
                ],
            ))
            .unwrap();

        assert_eq!(
            received,
            vec![
                HeaderEntry::new("A", "b"),
                HeaderEntry::new("Content-Type", "text/html"),
            ]
        );
        assert_eq!(registry.listeners_on(HookKind::BeforeSendHeaders), 0);
    }

    #[test]
    fn test_cookie_capture_with_blocked_response_header() {
        let registry = registry();
        let mut session = Session::new(
            registry.clone(),
            ServerSettings::new("http", "localhost:8080"),
            SessionOptions::for_cookie_session("SID").block_response_header("Set-Cookie"),
        );
        session.register().unwrap();

        let received = registry
            .dispatch_headers_received(&HeadersDetails::new(
                1,
                url("/api/v2/auth/login"),
                vec![
                    HeaderEntry::new("Content-Type", "text/plain"),
                    HeaderEntry::new("set-cookie", "SID=k3y; HttpOnly; path=/"),
                ],
            ))
            .unwrap();

        assert_eq!(received, vec![HeaderEntry::new("Content-Type", "text/plain")]);
        assert_eq!(session.cookie().map(|c| c.value), Some("k3y".to_string()));
    }

    #[test]
    fn test_auth_cleared_on_unregister() {
        let registry = registry();
        let mut session = Session::new(registry.clone(), settings(), SessionOptions::new());
        session.register().unwrap();
        assert!(session.auth().is_some());

        session.unregister();
        assert!(session.auth().is_none());
    }

    #[test]
    fn test_auth_cleared_when_registration_fails() {
        let registry = Arc::new(ListenerRegistry::new().max_listeners(2));
        let mut session = Session::new(registry.clone(), settings(), SessionOptions::new());

        let err = session.register().unwrap_err();

        assert!(matches!(err, Error::Registration { .. }));
        assert!(session.auth().is_none());
        assert!(!session.is_registered());
        assert_eq!(registry.listener_count(), 0);
    }

    #[test]
    fn test_unregister_clears_cookie_and_listeners() {
        let registry = registry();
        let mut session = Session::new(
            registry.clone(),
            settings(),
            SessionOptions::for_cookie_session("SID"),
        );
        session.register().unwrap();
        registry
            .dispatch_headers_received(&HeadersDetails::new(
                1,
                url("/"),
                vec![HeaderEntry::new("Set-Cookie", "SID=abc; path=/")],
            ))
            .unwrap();

        session.unregister();

        assert!(!session.is_registered());
        assert!(session.cookie().is_none());
        assert_eq!(registry.listener_count(), 0);
    }
}
