// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential challenge interceptor
//!
//! Answers each request's first credential challenge with the configured
//! credentials and stays silent on repeats, so a rejected password is never
//! replayed in a loop. The request id is forgotten once the request completes
//! or fails.

use std::sync::Arc;

use parking_lot::Mutex;

use super::event::{ChallengeDetails, CompletionDetails, RequestId};
use super::facility::{AuthCredentials, ChallengeHandler, CompletionHandler};
use super::tracker::PendingRequestTracker;

/// Challenge/response state machine for one server session
#[derive(Clone)]
pub struct AuthInterceptor {
    credentials: AuthCredentials,
    /// Only this interceptor writes to the tracker
    pending: Arc<Mutex<PendingRequestTracker>>,
}

impl AuthInterceptor {
    /// Create an interceptor answering challenges with `credentials`
    pub fn new(credentials: AuthCredentials) -> Self {
        Self {
            credentials,
            pending: Arc::new(Mutex::new(PendingRequestTracker::new())),
        }
    }

    /// Handle a credential challenge.
    ///
    /// Returns the credentials the first time a request id is challenged and
    /// `None` on every later challenge for the same id.
    pub fn on_challenge(&self, details: &ChallengeDetails) -> Option<AuthCredentials> {
        if !self.pending.lock().try_add(&details.request_id) {
            tracing::debug!(
                request_id = %details.request_id,
                url = %details.url,
                "Challenge already answered, leaving request unmodified"
            );
            return None;
        }

        tracing::debug!(
            request_id = %details.request_id,
            url = %details.url,
            realm = ?details.realm,
            "Answering credential challenge"
        );
        Some(self.credentials.clone())
    }

    /// Handle the end of a request, on both the completion and error channels
    pub fn on_completed(&self, details: &CompletionDetails) {
        if self.pending.lock().remove(&details.request_id) {
            tracing::debug!(
                request_id = %details.request_id,
                status = ?details.status,
                error = ?details.error,
                "Challenged request resolved"
            );
        }
    }

    /// Check if a request's challenge is answered but not yet resolved
    pub fn is_pending(&self, id: &RequestId) -> bool {
        self.pending.lock().contains(id)
    }

    /// Number of requests awaiting resolution
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Facility listener for auth-required events
    pub fn challenge_handler(&self) -> ChallengeHandler {
        let this = self.clone();
        Arc::new(move |details: &ChallengeDetails| this.on_challenge(details))
    }

    /// Facility listener for completed and error-occurred events
    pub fn completion_handler(&self) -> CompletionHandler {
        let this = self.clone();
        Arc::new(move |details: &CompletionDetails| this.on_completed(details))
    }
}
