//! Messages accepted by [`FilterSession::update`](crate::FilterSession::update).
//!
//! User intents and backend completions share one enum so that every state
//! transition goes through a single, strictly sequential entry point.

use facet_model::{Facet, FacetOption, FilterError, SelectionSet, ValidationOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // =========================================================================
    // User intents
    // =========================================================================
    /// Seed all three option lists (first display).
    Mount,

    /// Replace a facet's selection.
    Select { facet: Facet, ids: SelectionSet },

    /// Clear all selections.
    Reset,

    /// Validate the current selections.
    Apply,

    /// Refetch a facet with its last query.
    Retry(Facet),

    // =========================================================================
    // Backend completions
    // =========================================================================
    /// A facet-listing request finished.
    FacetLoaded {
        facet: Facet,
        seq: u64,
        result: Result<Vec<FacetOption>, FilterError>,
    },

    /// A validation request finished.
    Validated {
        id: u64,
        result: Result<ValidationOutcome, FilterError>,
    },
}

impl Message {
    pub fn select(facet: Facet, ids: impl Into<SelectionSet>) -> Self {
        Self::Select {
            facet,
            ids: ids.into(),
        }
    }
}
