// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Requests whose credential challenge has already been answered

use std::collections::HashSet;

use super::event::RequestId;

/// Set of in-flight request ids awaiting resolution
#[derive(Debug, Default)]
pub struct PendingRequestTracker {
    pending: HashSet<RequestId>,
}

impl PendingRequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`; returns false if it was already tracked.
    pub fn try_add(&mut self, id: &RequestId) -> bool {
        self.pending.insert(id.clone())
    }

    /// Remove `id` if present
    pub fn remove(&mut self, id: &RequestId) -> bool {
        self.pending.remove(id)
    }

    pub fn contains(&self, id: &RequestId) -> bool {
        self.pending.contains(id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_add_guards_duplicates() {
        let mut tracker = PendingRequestTracker::new();
        let id = RequestId::from(17);

        assert!(tracker.try_add(&id));
        assert!(!tracker.try_add(&id));
        assert_eq!(tracker.len(), 1);

        tracker.remove(&id);
        assert!(tracker.try_add(&id));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut tracker = PendingRequestTracker::new();
        let id = RequestId::from("abc");

        assert!(!tracker.remove(&id));
        tracker.try_add(&id);
        assert!(tracker.remove(&id));
        assert!(!tracker.remove(&id));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_ids_are_independent() {
        let mut tracker = PendingRequestTracker::new();
        let a = RequestId::from(1);
        let b = RequestId::from(2);

        tracker.try_add(&a);
        tracker.try_add(&b);
        tracker.remove(&a);

        assert!(!tracker.contains(&a));
        assert!(tracker.contains(&b));
    }
}
