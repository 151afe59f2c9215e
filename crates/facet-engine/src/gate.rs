//! Validation gate.
//!
//! Holds at most one validated snapshot. An outcome is only shown while the
//! live selections are structurally equal to the snapshot it was computed
//! for; any selection change clears it in the same update, before any
//! network activity can complete.

use facet_model::{FETCH_FAILED_MESSAGE, FilterError, Selections, ValidationOutcome};

use crate::command::{Commands, ValidationTicket};
use crate::fetcher::Resolution;
use crate::store::{SelectionChange, SelectionObserver};

/// A completed round trip: the exact selections sent and the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSnapshot {
    pub selections: Selections,
    pub outcome: ValidationOutcome,
}

/// What the gate currently has to show for the live selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus<'a> {
    /// Nothing requested, or the last result no longer applies.
    Idle,
    /// A validation request for the live selections is in flight.
    Pending,
    /// The last request failed without a structured error body.
    Failed(&'a str),
    /// The backend's verdict on exactly the live selections.
    Decided(&'a ValidationOutcome),
}

#[derive(Debug, Default)]
pub struct ValidationGate {
    next_id: u64,
    pending: Option<ValidationTicket>,
    snapshot: Option<ValidationSnapshot>,
    failure: Option<String>,
}

impl ValidationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots `selections` and starts a validation round trip.
    ///
    /// A previous pending request is superseded; its response will be
    /// discarded. Any outcome or failure on display is cleared.
    pub fn apply(&mut self, selections: &Selections) -> ValidationTicket {
        self.next_id += 1;
        let ticket = ValidationTicket {
            id: self.next_id,
            snapshot: selections.clone(),
        };
        tracing::debug!("Validating selection #{}: {}", ticket.id, ticket.snapshot);

        self.snapshot = None;
        self.failure = None;
        self.pending = Some(ticket.clone());
        ticket
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies a validation completion.
    ///
    /// `Err(FilterError::Rejected)` is treated exactly like an `Invalid`
    /// outcome; every other error becomes a generic fetch failure with no
    /// outcome.
    pub fn resolve(
        &mut self,
        id: u64,
        result: Result<ValidationOutcome, FilterError>,
    ) -> Resolution {
        let Some(ticket) = self.pending.take_if(|ticket| ticket.id == id) else {
            tracing::trace!("Dropping superseded validation response #{}", id);
            return Resolution::Stale;
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(FilterError::Rejected(errors)) => ValidationOutcome::Invalid { errors },
            Err(error) => {
                tracing::warn!("Validation request #{} failed: {}", id, error);
                self.failure = Some(FETCH_FAILED_MESSAGE.to_string());
                return Resolution::Applied;
            }
        };

        tracing::debug!("Validation #{} resolved: valid={}", id, outcome.is_valid());
        self.snapshot = Some(ValidationSnapshot {
            selections: ticket.snapshot,
            outcome,
        });
        Resolution::Applied
    }

    /// The stored snapshot, regardless of whether it still matches.
    pub fn snapshot(&self) -> Option<&ValidationSnapshot> {
        self.snapshot.as_ref()
    }

    /// The outcome to render for `live`, if it is still current.
    pub fn current_outcome(&self, live: &Selections) -> Option<&ValidationOutcome> {
        self.snapshot
            .as_ref()
            .filter(|snapshot| snapshot.selections == *live)
            .map(|snapshot| &snapshot.outcome)
    }

    pub fn status(&self, live: &Selections) -> GateStatus<'_> {
        if self
            .pending
            .as_ref()
            .is_some_and(|ticket| ticket.snapshot == *live)
        {
            return GateStatus::Pending;
        }
        if let Some(message) = &self.failure {
            return GateStatus::Failed(message.as_str());
        }
        match self.current_outcome(live) {
            Some(outcome) => GateStatus::Decided(outcome),
            None => GateStatus::Idle,
        }
    }

    /// Drops every displayed or pending result.
    pub fn invalidate(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("Abandoning pending validation after selection change");
        }
        self.clear_outcome();
    }

    /// Drops a displayed outcome or failure; a pending request stays live.
    pub fn clear_outcome(&mut self) {
        self.snapshot = None;
        self.failure = None;
    }
}

impl SelectionObserver for ValidationGate {
    fn selection_changed(&mut self, _change: &SelectionChange, _selections: &Selections) -> Commands {
        self.invalidate();
        Commands::none()
    }
}
