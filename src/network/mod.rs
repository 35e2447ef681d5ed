// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request interception
//!
//! Challenge deduplication, listener registration and the facility
//! abstraction the host transport plugs into.

mod event;
mod facility;
mod interceptor;
mod pattern;
mod registry;
mod subscription;
mod tracker;

pub use event::{ChallengeDetails, CompletionDetails, HeadersDetails, HookKind, RequestId};
pub use facility::{
    AuthCredentials, ChallengeHandler, CompletionHandler, HeadersAction, HeadersHandler,
    InterceptionFacility, ListenerId,
};
pub use interceptor::AuthInterceptor;
pub use pattern::UrlPattern;
pub use registry::{ListenerRegistry, DEFAULT_MAX_LISTENERS};
pub use subscription::{RequestSubscriptionManager, SubscriptionHandlers};
pub use tracker::PendingRequestTracker;
