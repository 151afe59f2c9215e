//! Selection store - the single owner of the three selection sets.
//!
//! Every mutation that changes membership produces a [`SelectionChange`]
//! event. The store does not know who listens; [`FilterSession`] forwards
//! the event to its observers in a fixed order.
//!
//! [`FilterSession`]: crate::FilterSession

use facet_model::{Facet, SelectionSet, Selections};

use crate::command::Commands;

/// What kind of mutation produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// One facet's selection was replaced.
    Select(Facet),
    /// All selections were cleared.
    Reset,
}

impl ChangeKind {
    /// Facets whose option lists must be recomputed after this change.
    ///
    /// A single-facet edit only affects the other two facets; the edited
    /// facet keeps its options. A reset may affect all three.
    pub fn affected_facets(self) -> Vec<Facet> {
        match self {
            ChangeKind::Select(facet) => facet.others().to_vec(),
            ChangeKind::Reset => Facet::ALL.to_vec(),
        }
    }
}

/// Event published after the selections changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub kind: ChangeKind,
}

/// A component reacting to selection changes.
///
/// Observers run synchronously, in the order the session registers them,
/// and may return follow-up commands.
pub trait SelectionObserver {
    fn selection_changed(&mut self, change: &SelectionChange, selections: &Selections) -> Commands;
}

/// Owned selection state with a derived dirty flag.
#[derive(Debug, Default)]
pub struct SelectionStore {
    selections: Selections,
    revision: u64,
    /// Revision at the last apply snapshot or reset.
    clean_revision: u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn get(&self, facet: Facet) -> &SelectionSet {
        self.selections.get(facet)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True once the selections changed since the last apply or reset.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.clean_revision
    }

    /// Replaces the selection of `facet` wholesale.
    ///
    /// Returns `None` when membership is unchanged.
    pub fn select(&mut self, facet: Facet, ids: SelectionSet) -> Option<SelectionChange> {
        if !self.selections.set(facet, ids) {
            return None;
        }
        self.revision += 1;
        Some(SelectionChange {
            kind: ChangeKind::Select(facet),
        })
    }

    /// Clears all three selections.
    ///
    /// Returns `None` when everything was already empty.
    pub fn reset(&mut self) -> Option<SelectionChange> {
        let was_empty = self.selections.is_empty();
        self.selections = Selections::default();
        if was_empty {
            self.clean_revision = self.revision;
            return None;
        }
        self.revision += 1;
        self.clean_revision = self.revision;
        Some(SelectionChange {
            kind: ChangeKind::Reset,
        })
    }

    /// Records that the current selections were submitted for validation.
    pub fn mark_applied(&mut self) {
        self.clean_revision = self.revision;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_is_total_replace() {
        let mut store = SelectionStore::new();
        store.select(Facet::Modules, [1, 2].into());
        let change = store.select(Facet::Modules, [3].into()).expect("changed");
        assert_eq!(change.kind, ChangeKind::Select(Facet::Modules));
        assert_eq!(store.get(Facet::Modules), &SelectionSet::from([3]));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn unchanged_selection_emits_nothing() {
        let mut store = SelectionStore::new();
        store.select(Facet::Units, [5, 1].into());
        assert!(store.select(Facet::Units, [1, 5].into()).is_none());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn dirty_flag_tracks_apply_and_reset() {
        let mut store = SelectionStore::new();
        assert!(!store.is_dirty());
        store.select(Facet::Locations, [2].into());
        assert!(store.is_dirty());
        store.mark_applied();
        assert!(!store.is_dirty());
        store.select(Facet::Units, [4].into());
        assert!(store.is_dirty());

        let change = store.reset().expect("reset changed selections");
        assert_eq!(change.kind, ChangeKind::Reset);
        assert!(store.selections().is_empty());
        assert!(!store.is_dirty());
        assert!(store.reset().is_none());
    }

    #[test]
    fn affected_facets_exclude_the_edited_one() {
        assert_eq!(
            ChangeKind::Select(Facet::Modules).affected_facets(),
            vec![Facet::Units, Facet::Locations]
        );
        assert_eq!(ChangeKind::Reset.affected_facets(), Facet::ALL.to_vec());
    }
}
