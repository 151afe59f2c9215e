//! Filter session - the update loop tying the components together.
//!
//! # Architecture
//!
//! The session follows the Elm pattern: `Message -> update -> Commands`.
//! All state lives here and is only mutated inside [`FilterSession::update`],
//! one message at a time. Network work is described by the returned
//! commands and comes back later as `FacetLoaded` / `Validated` messages.
//!
//! On every selection change the store's event is delivered to the
//! validation gate first and to the cascade coordinator second, so a
//! displayed outcome is gone before any refetch is even issued.

use facet_model::{Facet, Selections};

use crate::cascade::CascadeCoordinator;
use crate::command::{Command, Commands};
use crate::fetcher::{FacetState, Resolution};
use crate::gate::{GateStatus, ValidationGate};
use crate::message::Message;
use crate::store::{SelectionChange, SelectionObserver, SelectionStore};
use crate::view::FilterView;

#[derive(Debug, Default)]
pub struct FilterSession {
    store: SelectionStore,
    gate: ValidationGate,
    cascade: CascadeCoordinator,
    stale_discarded: u64,
}

impl FilterSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes one message and returns the round trips it requires.
    pub fn update(&mut self, message: Message) -> Commands {
        match message {
            Message::Mount => self.cascade.mount(self.store.selections()),

            Message::Select { facet, ids } => match self.store.select(facet, ids) {
                Some(change) => self.publish(change),
                None => Commands::none(),
            },

            Message::Reset => match self.store.reset() {
                Some(change) => self.publish(change),
                None => {
                    // Selections are unchanged, so a pending validation
                    // still matches them; only what is on display goes.
                    self.gate.clear_outcome();
                    Commands::none()
                }
            },

            Message::Apply => {
                self.store.mark_applied();
                let ticket = self.gate.apply(self.store.selections());
                Commands::single(Command::Validate(ticket))
            }

            Message::Retry(facet) => self.cascade.retry(facet, self.store.selections()),

            Message::FacetLoaded { facet, seq, result } => {
                let resolution = self.cascade.resolve(facet, seq, result);
                self.record(resolution);
                Commands::none()
            }

            Message::Validated { id, result } => {
                let resolution = self.gate.resolve(id, result);
                self.record(resolution);
                Commands::none()
            }
        }
    }

    /// Delivers a change event to the observers in their fixed order.
    fn publish(&mut self, change: SelectionChange) -> Commands {
        let selections = self.store.selections();
        let mut commands = self.gate.selection_changed(&change, selections);
        commands.extend(self.cascade.selection_changed(&change, selections));
        commands
    }

    fn record(&mut self, resolution: Resolution) {
        if resolution == Resolution::Stale {
            self.stale_discarded += 1;
        }
    }

    pub fn selections(&self) -> &Selections {
        self.store.selections()
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn facet_state(&self, facet: Facet) -> &FacetState {
        self.cascade.state(facet)
    }

    pub fn cascade(&self) -> &CascadeCoordinator {
        &self.cascade
    }

    pub fn gate(&self) -> &ValidationGate {
        &self.gate
    }

    pub fn gate_status(&self) -> GateStatus<'_> {
        self.gate.status(self.store.selections())
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Number of completions dropped because a newer request superseded them.
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }

    /// Builds the render model for the current state.
    pub fn view(&self) -> FilterView {
        FilterView::build(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_model::{FacetOption, FilterError, ValidationOutcome};

    fn mounted() -> FilterSession {
        let mut session = FilterSession::new();
        let commands = session.update(Message::Mount);
        for ticket in commands.fetches() {
            session.update(Message::FacetLoaded {
                facet: ticket.facet,
                seq: ticket.seq,
                result: Ok(vec![FacetOption::new(1, "one"), FacetOption::new(2, "two")]),
            });
        }
        session
    }

    #[test]
    fn selection_change_invalidates_before_fetching() {
        let mut session = mounted();
        session.update(Message::select(Facet::Modules, [1]));
        let ticket = session
            .update(Message::Apply)
            .validation()
            .cloned()
            .expect("validate command");
        session.update(Message::Validated {
            id: ticket.id,
            result: Ok(ValidationOutcome::Valid),
        });
        assert!(matches!(session.gate_status(), GateStatus::Decided(_)));

        let commands = session.update(Message::select(Facet::Units, [2]));
        assert_eq!(session.gate_status(), GateStatus::Idle);
        assert!(session.gate().snapshot().is_none());
        assert_eq!(commands.fetches().count(), 2);
    }

    #[test]
    fn stale_completions_are_counted_not_applied() {
        let mut session = mounted();
        let first = session.update(Message::select(Facet::Modules, [1]));
        let second = session.update(Message::select(Facet::Modules, [1, 2]));

        let old = first.fetches().next().expect("first units ticket");
        let new = second.fetches().next().expect("second units ticket");
        assert_eq!(old.facet, Facet::Units);

        session.update(Message::FacetLoaded {
            facet: new.facet,
            seq: new.seq,
            result: Ok(vec![FacetOption::new(7, "seven")]),
        });
        session.update(Message::FacetLoaded {
            facet: old.facet,
            seq: old.seq,
            result: Err(FilterError::Transport("late".into())),
        });

        assert_eq!(session.stale_discarded(), 1);
        assert_eq!(
            session.facet_state(Facet::Units).options,
            vec![FacetOption::new(7, "seven")]
        );
    }

    #[test]
    fn reset_of_empty_selection_still_clears_failure() {
        let mut session = mounted();
        let ticket = session
            .update(Message::Apply)
            .validation()
            .cloned()
            .expect("validate command");
        session.update(Message::Validated {
            id: ticket.id,
            result: Err(FilterError::Transport("down".into())),
        });
        assert!(matches!(session.gate_status(), GateStatus::Failed(_)));

        assert!(session.update(Message::Reset).is_empty());
        assert_eq!(session.gate_status(), GateStatus::Idle);
    }

    #[test]
    fn reset_of_empty_selection_keeps_pending_validation() {
        let mut session = mounted();
        let ticket = session
            .update(Message::Apply)
            .validation()
            .cloned()
            .expect("validate command");

        assert!(session.update(Message::Reset).is_empty());
        assert_eq!(session.gate_status(), GateStatus::Pending);

        session.update(Message::Validated {
            id: ticket.id,
            result: Ok(ValidationOutcome::invalid(["module required"])),
        });
        assert_eq!(session.stale_discarded(), 0);
        assert_eq!(
            session.gate_status(),
            GateStatus::Decided(&ValidationOutcome::invalid(["module required"]))
        );
    }

    #[test]
    fn apply_clears_dirty_flag() {
        let mut session = mounted();
        session.update(Message::select(Facet::Locations, [2]));
        assert!(session.is_dirty());
        session.update(Message::Apply);
        assert!(!session.is_dirty());
    }
}
