//! Canonical facet query descriptors.
//!
//! A descriptor is both the network query for a facet-listing request and the
//! key used to decide whether a refetch is needed. Two descriptors built from
//! the same memberships compare equal no matter how they were assembled.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::facet::{Facet, Identifier};
use crate::selection::SelectionSet;

/// Constraining selections for one facet-listing request.
///
/// Keys are facets in canonical order, values are ascending identifier
/// lists. Empty selections never appear: an absent key means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    params: BTreeMap<Facet, Vec<Identifier>>,
}

impl QueryDescriptor {
    /// The unconstrained descriptor.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a facet constraint. Empty selections are skipped.
    pub fn insert(&mut self, facet: Facet, selection: &SelectionSet) {
        if selection.is_empty() {
            self.params.remove(&facet);
        } else {
            self.params.insert(facet, selection.to_vec());
        }
    }

    /// Builder-style variant of [`QueryDescriptor::insert`].
    #[must_use]
    pub fn with(mut self, facet: Facet, selection: &SelectionSet) -> Self {
        self.insert(facet, selection);
        self
    }

    pub fn get(&self, facet: Facet) -> Option<&[Identifier]> {
        self.params.get(&facet).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `(param name, comma-separated ids)` pairs ready for a query string.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.params
            .iter()
            .map(|(facet, ids)| (facet.param_name(), join_ids(ids)))
            .collect()
    }
}

fn join_ids(ids: &[Identifier]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl Serialize for QueryDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (facet, ids) in &self.params {
            map.serialize_entry(facet.param_name(), ids)?;
        }
        map.end()
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = self
            .query_pairs()
            .into_iter()
            .map(|(name, ids)| format!("{name}=[{ids}]"))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}
