//! Pass-scoped identifier counter

use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic identifier source for generated entry points
///
/// Identifiers are handed out post-increment: the first call returns the seed.
#[derive(Debug, Clone)]
pub struct IdCounter {
    next: u64,
}

impl IdCounter {
    pub fn starting_at(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Seed from wall-clock ticks, never below `floor`
    ///
    /// The clock only keeps names apart from files left by an earlier
    /// process; `floor` keeps them apart from earlier passes in this one.
    pub fn seeded(floor: u64) -> Self {
        Self::starting_at(clock_ticks().max(floor))
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Value the next call to `next_id` will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// 100ns ticks since the Unix epoch
fn clock_ticks() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| (elapsed.as_nanos() / 100) as u64)
        .unwrap_or(0)
}
