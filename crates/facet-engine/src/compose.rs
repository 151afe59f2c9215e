//! Query composer.

use facet_model::{Facet, QueryDescriptor, Selections};

/// Builds the descriptor constraining `for_facet`'s option list.
///
/// Only the two *other* facets contribute; `for_facet`'s own selection is
/// never part of its own query. Empty selections are omitted and ids are
/// sorted, so the result depends on membership alone.
pub fn compose(for_facet: Facet, selections: &Selections) -> QueryDescriptor {
    for_facet
        .others()
        .into_iter()
        .fold(QueryDescriptor::empty(), |descriptor, other| {
            descriptor.with(other, selections.get(other))
        })
}
