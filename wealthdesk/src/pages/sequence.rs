//! Request tickets that keep overlapping fetches in order.

/// Identifies one fetch; later fetches carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Issues tickets and remembers the newest one.
///
/// A response may be applied only while its ticket is still the newest, so
/// a slow early request can never overwrite the result of a later one.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    /// Sequencer that has issued nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticket for a fetch that is starting now.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Whether `ticket` is the newest issued.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}
