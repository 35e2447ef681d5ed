// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-process interception facility
//!
//! Keeps listeners in memory and delivers events to them on request. A
//! transport embedding Seedgate calls the `dispatch_*` methods at the matching
//! points of a request's life.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::event::{ChallengeDetails, CompletionDetails, HeadersDetails, HookKind};
use super::facility::{
    AuthCredentials, ChallengeHandler, CompletionHandler, HeadersAction, HeadersHandler,
    InterceptionFacility, ListenerId,
};
use super::pattern::UrlPattern;
use crate::error::{Error, Result};
use crate::http::HeaderEntry;

/// Default maximum number of installed listeners
pub const DEFAULT_MAX_LISTENERS: usize = 64;

#[derive(Clone)]
enum Handler {
    Headers(HeadersHandler),
    Challenge(ChallengeHandler),
    Completion(CompletionHandler),
}

struct Listener {
    id: u64,
    pattern: UrlPattern,
    handler: Handler,
}

/// Listener table with event dispatch
pub struct ListenerRegistry {
    listeners: DashMap<HookKind, Vec<Listener>>,
    next_id: AtomicU64,
    max_listeners: usize,
    allowed_schemes: Vec<String>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ListenerRegistry {
    /// Create a registry accepting http and https patterns
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
            next_id: AtomicU64::new(1),
            max_listeners: DEFAULT_MAX_LISTENERS,
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }

    /// Set the maximum number of installed listeners
    pub fn max_listeners(mut self, max: usize) -> Self {
        self.max_listeners = max;
        self
    }

    /// Set the schemes listeners may be scoped to
    pub fn allowed_schemes(mut self, schemes: Vec<String>) -> Self {
        self.allowed_schemes = schemes;
        self
    }

    /// Total number of installed listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.iter().map(|e| e.value().len()).sum()
    }

    /// Number of listeners installed on one hook
    pub fn listeners_on(&self, hook: HookKind) -> usize {
        self.listeners.get(&hook).map(|l| l.len()).unwrap_or(0)
    }

    fn install(&self, hook: HookKind, pattern: &UrlPattern, handler: Handler) -> Result<ListenerId> {
        if !self.allowed_schemes.iter().any(|s| s == pattern.scheme()) {
            return Err(Error::registration(
                hook,
                format!("scheme '{}' cannot be intercepted ({})", pattern.scheme(), pattern),
            ));
        }
        if self.listener_count() >= self.max_listeners {
            return Err(Error::registration(
                hook,
                format!("listener limit of {} reached", self.max_listeners),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.entry(hook).or_default().push(Listener {
            id,
            pattern: pattern.clone(),
            handler,
        });

        tracing::debug!(%hook, %pattern, id, "Listener installed");
        Ok(ListenerId { hook, id })
    }

    /// Snapshot of the handlers on `hook` matching `url`.
    /// Handlers run without the table locked, so they may register or remove listeners.
    fn matching(&self, hook: HookKind, url: &url::Url) -> Vec<Handler> {
        self.listeners
            .get(&hook)
            .map(|listeners| {
                listeners
                    .iter()
                    .filter(|l| l.pattern.matches(url))
                    .map(|l| l.handler.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn dispatch_headers(&self, hook: HookKind, details: &HeadersDetails) -> Result<Vec<HeaderEntry>> {
        let mut current = details.clone();
        for handler in self.matching(hook, &details.url) {
            if let Handler::Headers(handler) = handler {
                if let HeadersAction::Replace(headers) = handler(&current)? {
                    current.headers = headers;
                }
            }
        }
        Ok(current.headers)
    }

    /// Deliver response headers; returns the headers to hand to the caller
    pub fn dispatch_headers_received(&self, details: &HeadersDetails) -> Result<Vec<HeaderEntry>> {
        self.dispatch_headers(HookKind::HeadersReceived, details)
    }

    /// Deliver outgoing request headers; returns the headers to send
    pub fn dispatch_before_send(&self, details: &HeadersDetails) -> Result<Vec<HeaderEntry>> {
        self.dispatch_headers(HookKind::BeforeSendHeaders, details)
    }

    /// Deliver a credential challenge; the first listener supplying credentials wins
    pub fn dispatch_challenge(&self, details: &ChallengeDetails) -> Option<AuthCredentials> {
        self.matching(HookKind::AuthRequired, &details.url)
            .into_iter()
            .find_map(|handler| match handler {
                Handler::Challenge(handler) => handler(details),
                _ => None,
            })
    }

    /// Deliver a completed request
    pub fn dispatch_completed(&self, details: &CompletionDetails) {
        self.dispatch_completion(HookKind::Completed, details);
    }

    /// Deliver a network error
    pub fn dispatch_error(&self, details: &CompletionDetails) {
        self.dispatch_completion(HookKind::ErrorOccurred, details);
    }

    fn dispatch_completion(&self, hook: HookKind, details: &CompletionDetails) {
        for handler in self.matching(hook, &details.url) {
            if let Handler::Completion(handler) = handler {
                handler(details);
            }
        }
    }
}

impl InterceptionFacility for ListenerRegistry {
    fn on_headers_received(&self, pattern: &UrlPattern, handler: HeadersHandler) -> Result<ListenerId> {
        self.install(HookKind::HeadersReceived, pattern, Handler::Headers(handler))
    }

    fn on_before_send(&self, pattern: &UrlPattern, handler: HeadersHandler) -> Result<ListenerId> {
        self.install(HookKind::BeforeSendHeaders, pattern, Handler::Headers(handler))
    }

    fn on_challenge(&self, pattern: &UrlPattern, handler: ChallengeHandler) -> Result<ListenerId> {
        self.install(HookKind::AuthRequired, pattern, Handler::Challenge(handler))
    }

    fn on_completed(&self, pattern: &UrlPattern, handler: CompletionHandler) -> Result<ListenerId> {
        self.install(HookKind::Completed, pattern, Handler::Completion(handler))
    }

    fn on_error(&self, pattern: &UrlPattern, handler: CompletionHandler) -> Result<ListenerId> {
        self.install(HookKind::ErrorOccurred, pattern, Handler::Completion(handler))
    }

    fn remove_listener(&self, listener: ListenerId) {
        if let Some(mut listeners) = self.listeners.get_mut(&listener.hook) {
            let before = listeners.len();
            listeners.retain(|l| l.id != listener.id);
            if listeners.len() < before {
                tracing::debug!(hook = %listener.hook, id = listener.id, "Listener removed");
            }
        }
    }
}
