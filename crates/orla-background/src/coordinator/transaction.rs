//! Per-request transaction state machine.

use std::fmt;

use tracing::{Span, debug, debug_span, warn};
use uuid::Uuid;

/// Phase of one coordinator transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Received,
    ResolvingTab,
    Injecting,
    Forwarding,
    Completed,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Completed | Phase::Failed)
    }

    /// Phases only move forward. Flows that are handed a tab skip
    /// `ResolvingTab`; any live phase may fail.
    pub fn can_advance_to(self, next: Phase) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Phase::Failed => true,
            Phase::Completed => self != Phase::Injecting,
            _ => next > self,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Received => "RECEIVED",
            Phase::ResolvingTab => "RESOLVING_TAB",
            Phase::Injecting => "INJECTING",
            Phase::Forwarding => "FORWARDING",
            Phase::Completed => "COMPLETED",
            Phase::Failed => "FAILED",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One independent coordinator transaction.
///
/// Carries a `tracing` span tagged with the request kind and a fresh id;
/// every phase transition is logged inside it.
#[derive(Debug)]
pub struct Transaction {
    id: Uuid,
    kind: &'static str,
    phase: Phase,
    span: Span,
}

impl Transaction {
    pub fn begin(kind: &'static str) -> Self {
        let id = Uuid::new_v4();
        let span = debug_span!("transaction", %id, kind);
        span.in_scope(|| debug!(phase = %Phase::Received, "transaction started"));
        Self {
            id,
            kind,
            phase: Phase::Received,
            span,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Move to `next`. Backward or post-terminal moves are ignored.
    pub fn advance(&mut self, next: Phase) {
        let _entered = self.span.enter();
        if !self.phase.can_advance_to(next) {
            warn!(from = %self.phase, to = %next, "ignoring invalid phase transition");
            return;
        }
        debug!(from = %self.phase, to = %next, "phase transition");
        self.phase = next;
    }

    pub fn complete(&mut self) {
        self.advance(Phase::Completed);
    }

    pub fn fail(&mut self, reason: &dyn fmt::Display) {
        {
            let _entered = self.span.enter();
            debug!(%reason, "transaction failed");
        }
        self.advance(Phase::Failed);
    }
}
