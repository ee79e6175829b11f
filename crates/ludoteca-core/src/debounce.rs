//! Single-slot debouncer driven by generation tickets
//!
//! The host owns the clock: it calls [`Debouncer::schedule`], waits out the
//! quiescence window with whatever timer its platform has, then hands the
//! ticket back to [`Debouncer::commit`]. Only the newest ticket commits;
//! anything scheduled earlier is silently superseded.

/// Handle for one scheduled value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }
}

impl<T> Debouncer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending value and return the ticket that may commit it
    pub fn schedule(&mut self, value: T) -> DebounceTicket {
        self.generation += 1;
        self.pending = Some(value);
        DebounceTicket(self.generation)
    }

    /// Take the pending value if `ticket` is still the latest one
    pub fn commit(&mut self, ticket: DebounceTicket) -> Option<T> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    /// Drop the pending value; outstanding tickets become no-ops
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_commits() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule("c");
        let second = debouncer.schedule("ca");
        let third = debouncer.schedule("cat");

        assert_eq!(debouncer.commit(first), None);
        assert_eq!(debouncer.commit(second), None);
        assert_eq!(debouncer.commit(third), Some("cat"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_commit_is_single_shot() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule(1);
        assert_eq!(debouncer.commit(ticket), Some(1));
        assert_eq!(debouncer.commit(ticket), None);
    }

    #[test]
    fn test_cancel_invalidates_outstanding_ticket() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule(String::from("azul"));
        debouncer.cancel();
        assert_eq!(debouncer.commit(ticket), None);
        assert!(!debouncer.is_pending());
    }
}
