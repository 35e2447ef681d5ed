// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Hook registration scoped to one server
//!
//! Installs the header and auth listeners of a session on the interception
//! facility and removes exactly those listeners again.

use std::sync::Arc;

use super::event::HookKind;
use super::facility::{HeadersHandler, InterceptionFacility, ListenerId};
use super::interceptor::AuthInterceptor;
use super::pattern::UrlPattern;
use crate::client::ServerSettings;
use crate::error::Result;

/// Listeners a session wants installed
///
/// The auth-required listener and the completion listeners always come from
/// the same [`AuthInterceptor`], so they are installed together or not at all.
#[derive(Default)]
pub struct SubscriptionHandlers {
    headers_received: Option<HeadersHandler>,
    before_send: Option<HeadersHandler>,
    auth: Option<AuthInterceptor>,
}

impl SubscriptionHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe or rewrite response headers
    pub fn headers_received(mut self, handler: HeadersHandler) -> Self {
        self.headers_received = Some(handler);
        self
    }

    /// Observe or rewrite request headers
    pub fn before_send(mut self, handler: HeadersHandler) -> Self {
        self.before_send = Some(handler);
        self
    }

    /// Answer credential challenges
    pub fn auth(mut self, interceptor: AuthInterceptor) -> Self {
        self.auth = Some(interceptor);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.headers_received.is_none() && self.before_send.is_none() && self.auth.is_none()
    }
}

/// Owner of the listeners installed for one session
pub struct RequestSubscriptionManager {
    facility: Arc<dyn InterceptionFacility>,
    pattern: Option<UrlPattern>,
    installed: Vec<ListenerId>,
}

impl RequestSubscriptionManager {
    pub fn new(facility: Arc<dyn InterceptionFacility>) -> Self {
        Self {
            facility,
            pattern: None,
            installed: Vec::new(),
        }
    }

    /// Install `handlers` for requests to the server in `settings`.
    ///
    /// Listeners from an earlier call are removed first. If the facility
    /// rejects any listener, everything installed by this call is removed
    /// again and the error is returned.
    pub fn register(&mut self, settings: &ServerSettings, handlers: SubscriptionHandlers) -> Result<()> {
        self.unregister();

        let pattern = settings.url_pattern()?;
        let mut installed = Vec::new();

        if let Err(e) = self.install(&pattern, handlers, &mut installed) {
            tracing::warn!(%pattern, error = %e, "Listener registration failed");
            for listener in installed {
                self.facility.remove_listener(listener);
            }
            return Err(e);
        }

        if installed.is_empty() {
            tracing::debug!(%pattern, "No listeners requested");
            return Ok(());
        }

        tracing::info!(%pattern, listeners = installed.len(), "Interception listeners registered");
        self.pattern = Some(pattern);
        self.installed = installed;
        Ok(())
    }

    fn install(
        &self,
        pattern: &UrlPattern,
        handlers: SubscriptionHandlers,
        installed: &mut Vec<ListenerId>,
    ) -> Result<()> {
        if let Some(handler) = handlers.headers_received {
            installed.push(self.facility.on_headers_received(pattern, handler)?);
        }

        if let Some(handler) = handlers.before_send {
            installed.push(self.facility.on_before_send(pattern, handler)?);
        }

        if let Some(auth) = handlers.auth {
            installed.push(self.facility.on_challenge(pattern, auth.challenge_handler())?);
            installed.push(self.facility.on_completed(pattern, auth.completion_handler())?);
            installed.push(self.facility.on_error(pattern, auth.completion_handler())?);
        }

        Ok(())
    }

    /// Remove every listener this manager installed. Safe to call repeatedly.
    pub fn unregister(&mut self) {
        let pattern = self.pattern.take();
        if self.installed.is_empty() {
            return;
        }

        for listener in self.installed.drain(..) {
            self.facility.remove_listener(listener);
        }

        if let Some(pattern) = pattern {
            tracing::info!(%pattern, "Interception listeners removed");
        }
    }

    pub fn is_registered(&self) -> bool {
        !self.installed.is_empty()
    }

    /// Check if a listener is installed on `hook`
    pub fn has_listener(&self, hook: HookKind) -> bool {
        self.installed.iter().any(|l| l.hook == hook)
    }

    /// Scope of the installed listeners
    pub fn pattern(&self) -> Option<&UrlPattern> {
        self.pattern.as_ref()
    }
}

impl Drop for RequestSubscriptionManager {
    fn drop(&mut self) {
        self.unregister();
    }
}
