//! Per-stream request sequencing.
//!
//! Every logical request stream (one page fetch, one detail fetch, ...) owns a
//! [`RequestSequence`]. A call takes a [`Ticket`] before it suspends and
//! applies its response only if that ticket is still the latest one issued,
//! so a slow response can never overwrite the result of a newer request.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// How a remote-backed store operation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the store.
    Applied,
    /// A newer request on the same stream was issued; the response was dropped.
    Stale,
    /// The call failed; the error channel was notified.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_ticket_is_latest() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        assert!(seq.is_latest(first));

        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }
}
