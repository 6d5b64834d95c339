//! Cancellation by supersession for debounced search flows.
//!
//! A [`SearchSlot`] models one logical search box: every new search bumps a
//! generation counter, and a result computed under an older generation is
//! discarded rather than merged. The table itself is immutable, so this is
//! the only coordination the engine needs.

use std::sync::atomic::{AtomicU64, Ordering};

/// One logical search slot shared by successive searches.
#[derive(Debug, Default)]
pub struct SearchSlot {
    generation: AtomicU64,
}

/// Handle for one in-flight search within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

impl SearchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, invalidating every earlier ticket for this slot.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no newer search has begun since the ticket was issued.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }
}
