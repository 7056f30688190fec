use std::cell::Cell;

/// Proof that a request was started; compared on completion to drop stale responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter of issued requests. Only the most recent ticket is current.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    latest: Cell<u64>,
}

impl RequestGeneration {
    pub fn begin(&self) -> Ticket {
        let next = self.latest.get().wrapping_add(1);
        self.latest.set(next);
        Ticket(next)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get() == ticket.0
    }
}
