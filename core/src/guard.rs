//! Stale-response guard for views that fetch on mount or on change.
//!
//! # Design
//! A view owns a `LatestOnly<T>` slot. Each fetch calls `begin()` before
//! building its request and gets a `FetchTicket` stamped with the current
//! generation. When the response arrives, `commit` stores it only if no
//! newer fetch has begun and the view has not been torn down. Late
//! responses are dropped, so a response never updates state for a request
//! whose triggering context no longer exists.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    torn_down: bool,
    value: Option<T>,
}

#[derive(Debug)]
pub struct LatestOnly<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for LatestOnly<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(Slot {
                generation: 0,
                torn_down: false,
                value: None,
            }),
        }
    }
}

impl<T> LatestOnly<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch. Any ticket handed out earlier becomes stale.
    pub fn begin(&self) -> FetchTicket {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.generation += 1;
        FetchTicket {
            generation: slot.generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        !slot.torn_down && slot.generation == ticket.generation
    }

    /// Store `value` if `ticket` is still current. Returns whether it was kept.
    pub fn commit(&self, ticket: FetchTicket, value: T) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.torn_down || slot.generation != ticket.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = slot.generation,
                "discarding stale response"
            );
            return false;
        }
        slot.value = Some(value);
        true
    }

    /// Invalidate every outstanding ticket and drop the stored value.
    pub fn teardown(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.torn_down = true;
        slot.generation += 1;
        slot.value = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).torn_down
    }
}

impl<T: Clone> LatestOnly<T> {
    pub fn get(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn latest_ticket_commits() {
        let slot = LatestOnly::new();
        let t = slot.begin();
        assert!(slot.commit(t, "offers"));
        assert_eq!(slot.get(), Some("offers"));
    }

    #[test]
    fn out_of_order_response_is_dropped() {
        let slot = LatestOnly::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.commit(second, "tab B"));
        assert!(!slot.commit(first, "tab A"));
        assert_eq!(slot.get(), Some("tab B"));
    }

    #[test]
    fn teardown_rejects_in_flight_responses() {
        let slot = LatestOnly::new();
        let t = slot.begin();
        slot.teardown();
        assert!(!slot.is_current(t));
        assert!(!slot.commit(t, 1));
        assert_eq!(slot.get(), None);

        let after = slot.begin();
        assert!(!slot.commit(after, 2));
        assert!(slot.is_torn_down());
    }

    #[test]
    fn commits_from_other_threads_respect_generation() {
        let slot = Arc::new(LatestOnly::new());
        let stale = slot.begin();
        let fresh = slot.begin();

        let handle = {
            let slot = slot.clone();
            std::thread::spawn(move || slot.commit(stale, "stale"))
        };
        assert!(!handle.join().unwrap());
        assert!(slot.commit(fresh, "fresh"));
        assert_eq!(slot.get(), Some("fresh"));
    }
}
