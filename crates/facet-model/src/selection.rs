//! Selected identifiers per facet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::facet::{Facet, Identifier};

/// Set of selected identifiers for one facet.
///
/// Membership is all that matters: `{3, 1}` and `{1, 3}` are the same
/// selection. Iteration is always ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<Identifier>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: Identifier) -> bool {
        self.0.contains(&id)
    }

    /// Identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Identifier> + '_ {
        self.0.iter().copied()
    }

    /// Identifiers in ascending order.
    pub fn to_vec(&self) -> Vec<Identifier> {
        self.iter().collect()
    }
}

impl FromIterator<Identifier> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[i64; N]> for SelectionSet {
    fn from(ids: [i64; N]) -> Self {
        ids.into_iter().map(Identifier::new).collect()
    }
}

impl fmt::Display for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.iter().map(|id| id.to_string()).collect();
        write!(f, "[{}]", ids.join(","))
    }
}

/// The selections of all three facets.
///
/// Serializes to the validation request body:
/// `{ "moduleIds": [...], "unitIds": [...], "locationIds": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selections {
    #[serde(rename = "moduleIds", default)]
    pub modules: SelectionSet,
    #[serde(rename = "unitIds", default)]
    pub units: SelectionSet,
    #[serde(rename = "locationIds", default)]
    pub locations: SelectionSet,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, facet: Facet) -> &SelectionSet {
        match facet {
            Facet::Modules => &self.modules,
            Facet::Units => &self.units,
            Facet::Locations => &self.locations,
        }
    }

    /// Replaces one facet's selection, returning whether membership changed.
    pub fn set(&mut self, facet: Facet, selection: SelectionSet) -> bool {
        let slot = match facet {
            Facet::Modules => &mut self.modules,
            Facet::Units => &mut self.units,
            Facet::Locations => &mut self.locations,
        };
        if *slot == selection {
            return false;
        }
        *slot = selection;
        true
    }

    /// Builder-style variant of [`Selections::set`].
    #[must_use]
    pub fn with(mut self, facet: Facet, selection: impl Into<SelectionSet>) -> Self {
        self.set(facet, selection.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|facet| self.get(*facet).is_empty())
    }
}

impl fmt::Display for Selections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "modules={} units={} locations={}",
            self.modules, self.units, self.locations
        )
    }
}
