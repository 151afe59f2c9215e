//! Data model for cascading facet filters.
//!
//! Three facets (modules, units, locations) each hold a [`SelectionSet`].
//! A [`QueryDescriptor`] captures the selections constraining one facet's
//! option list, and a [`ValidationOutcome`] is the backend's verdict on a
//! complete [`Selections`] snapshot.

pub mod error;
pub mod facet;
pub mod option;
pub mod query;
pub mod selection;
pub mod validation;

pub use error::{FETCH_FAILED_MESSAGE, FilterError, Result};
pub use facet::{Facet, Identifier};
pub use option::FacetOption;
pub use query::QueryDescriptor;
pub use selection::{SelectionSet, Selections};
pub use validation::{ERROR_SEPARATOR, ValidationOutcome};

/// Parses a comma-separated identifier list such as `"3, 1,2"`.
///
/// Empty input yields an empty selection.
pub fn parse_id_list(input: &str) -> Result<SelectionSet> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse::<Identifier>)
        .collect()
}
