//! Facet dimensions and the identifiers that live inside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// Opaque integer key for a module, unit, or location.
///
/// Unique within its facet namespace. The engine never interprets the value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Identifier(i64);

impl Identifier {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| FilterError::InvalidIdentifier(s.to_string()))
    }
}

/// One of the three filter dimensions.
///
/// The declaration order is the canonical key order used when a
/// [`QueryDescriptor`](crate::QueryDescriptor) is serialized.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Modules,
    Units,
    Locations,
}

impl Facet {
    /// All facets in canonical order.
    pub const ALL: [Facet; 3] = [Facet::Modules, Facet::Units, Facet::Locations];

    /// The two facets whose selections constrain this facet's option list.
    pub const fn others(self) -> [Facet; 2] {
        match self {
            Facet::Modules => [Facet::Units, Facet::Locations],
            Facet::Units => [Facet::Modules, Facet::Locations],
            Facet::Locations => [Facet::Modules, Facet::Units],
        }
    }

    /// Query/body parameter name carrying this facet's selected identifiers.
    pub const fn param_name(self) -> &'static str {
        match self {
            Facet::Modules => "moduleIds",
            Facet::Units => "unitIds",
            Facet::Locations => "locationIds",
        }
    }

    /// Path segment of the facet-listing endpoint (`/filters/<segment>`).
    pub const fn path_segment(self) -> &'static str {
        match self {
            Facet::Modules => "modules",
            Facet::Units => "units",
            Facet::Locations => "locations",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Facet::Modules => "Modules",
            Facet::Units => "Units",
            Facet::Locations => "Locations",
        }
    }

    /// Singular noun used in summaries ("1 module", "2 units").
    pub const fn noun(self, count: usize) -> &'static str {
        match (self, count) {
            (Facet::Modules, 1) => "module",
            (Facet::Modules, _) => "modules",
            (Facet::Units, 1) => "unit",
            (Facet::Units, _) => "units",
            (Facet::Locations, 1) => "location",
            (Facet::Locations, _) => "locations",
        }
    }

    /// Index into fixed-size per-facet arrays.
    pub const fn index(self) -> usize {
        match self {
            Facet::Modules => 0,
            Facet::Units => 1,
            Facet::Locations => 2,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn others_excludes_self() {
        for facet in Facet::ALL {
            let others = facet.others();
            assert!(!others.contains(&facet));
            assert_ne!(others[0], others[1]);
        }
    }

    #[test]
    fn parse_identifier() {
        assert_eq!("42".parse::<Identifier>().unwrap(), Identifier::new(42));
        assert!(matches!(
            "x1".parse::<Identifier>(),
            Err(FilterError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn index_matches_canonical_order() {
        for (i, facet) in Facet::ALL.iter().enumerate() {
            assert_eq!(facet.index(), i);
        }
    }
}
