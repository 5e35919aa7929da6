//! Per-view state holders.
//!
//! Each controller splits a fetch in two: an action (`mount`, `set_page`,
//! `submit`, ...) updates state and hands back a request tagged with a
//! [`Ticket`], and `apply` takes the response for that ticket. Only the most
//! recently issued ticket is accepted; responses to superseded requests are
//! dropped. The async helpers (`load`, `submit_to`) run both halves against a
//! [`ContentService`](crate::ContentService).

mod create;
mod detail;
mod list;
mod search;

pub use create::{CreateController, CreatePhase, CreateSubmission, PostForm};
pub use detail::{DetailController, DetailRequest, DetailState, MissingPost};
pub use list::{ListController, ListRequest};
pub use search::{SearchController, SearchRequest};

/// Identifies one issued request within a single controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub(crate) struct Sequencer {
    issued: u64,
    outstanding: Option<u64>,
}

impl Sequencer {
    pub(crate) fn issue(&mut self) -> Ticket {
        self.issued += 1;
        self.outstanding = Some(self.issued);
        Ticket(self.issued)
    }

    /// Returns `true` if `ticket` is the outstanding one and marks it settled.
    pub(crate) fn settle(&mut self, ticket: Ticket) -> bool {
        if self.outstanding == Some(ticket.0) {
            self.outstanding = None;
            true
        } else {
            false
        }
    }

    /// Drops interest in whatever is outstanding.
    pub(crate) fn abandon(&mut self) {
        self.outstanding = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.outstanding.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_settles() {
        let mut seq = Sequencer::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(seq.is_pending());
        assert!(!seq.settle(first));
        assert!(seq.settle(second));
        assert!(!seq.is_pending());
        assert!(!seq.settle(second));
    }

    #[test]
    fn abandoned_tickets_never_settle() {
        let mut seq = Sequencer::default();
        let ticket = seq.issue();
        seq.abandon();
        assert!(!seq.settle(ticket));
    }
}
