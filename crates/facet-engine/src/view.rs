//! Render model consumed by presentation adapters.
//!
//! Views are plain data derived from a [`FilterSession`]; building one never
//! mutates anything. Selected identifiers that no longer appear in a
//! refreshed option list are kept (listed under `missing`) rather than
//! pruned.

use std::fmt;

use facet_model::{Facet, Identifier, Selections};

use crate::fetcher::FacetStatus;
use crate::gate::GateStatus;
use crate::session::FilterSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub id: Identifier,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetView {
    pub facet: Facet,
    pub status: FacetStatus,
    /// Selectable options; empty while the facet is in `Error`.
    pub options: Vec<OptionView>,
    /// Selected ids absent from the current option list.
    pub missing: Vec<Identifier>,
    pub error: Option<String>,
    /// Set on failures that a retry could fix.
    pub retryable: bool,
}

impl FacetView {
    pub fn selected_labels(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.label.as_str())
            .collect()
    }
}

/// What the result area below the filters shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRegion {
    Hidden,
    Loading,
    Error(String),
    Valid { summary: String },
    Invalid { message: String },
}

impl fmt::Display for ResultRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultRegion::Hidden => Ok(()),
            ResultRegion::Loading => f.write_str("Validating..."),
            ResultRegion::Error(message) => write!(f, "Error: {message}"),
            ResultRegion::Valid { summary } => write!(f, "Valid: {summary}"),
            ResultRegion::Invalid { message } => write!(f, "Invalid: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterView {
    pub facets: [FacetView; 3],
    pub result: ResultRegion,
    pub dirty: bool,
}

impl FilterView {
    pub(crate) fn build(session: &FilterSession) -> Self {
        let selections = session.selections();
        let result = match session.gate_status() {
            GateStatus::Idle => ResultRegion::Hidden,
            GateStatus::Pending => ResultRegion::Loading,
            GateStatus::Failed(message) => ResultRegion::Error(message.to_string()),
            GateStatus::Decided(outcome) => match outcome.joined_errors() {
                None => ResultRegion::Valid {
                    summary: summarize(selections),
                },
                Some(message) => ResultRegion::Invalid { message },
            },
        };

        Self {
            facets: Facet::ALL.map(|facet| facet_view(session, facet)),
            result,
            dirty: session.is_dirty(),
        }
    }

    pub fn facet(&self, facet: Facet) -> &FacetView {
        &self.facets[facet.index()]
    }

    /// True while any facet list is being refreshed.
    pub fn is_loading(&self) -> bool {
        self.facets
            .iter()
            .any(|facet| facet.status == FacetStatus::Loading)
    }
}

fn facet_view(session: &FilterSession, facet: Facet) -> FacetView {
    let state = session.facet_state(facet);
    let selected = session.selections().get(facet);

    let options: Vec<OptionView> = match state.status {
        FacetStatus::Error => Vec::new(),
        FacetStatus::Idle | FacetStatus::Loading => state
            .options
            .iter()
            .map(|option| OptionView {
                id: option.id,
                label: option.display_label.clone(),
                selected: selected.contains(option.id),
            })
            .collect(),
    };
    let missing = selected
        .iter()
        .filter(|id| state.find_option(*id).is_none())
        .collect();

    FacetView {
        facet,
        status: state.status,
        options,
        missing,
        error: state.error_message.clone(),
        retryable: state.retryable,
    }
}

/// "2 modules, 0 units, 1 location"
pub fn summarize(selections: &Selections) -> String {
    Facet::ALL
        .iter()
        .map(|facet| {
            let count = selections.get(*facet).len();
            format!("{count} {}", facet.noun(count))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
