use serde::{Deserialize, Serialize};

use crate::facet::Identifier;

/// A selectable option returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: Identifier,
    #[serde(rename = "label")]
    pub display_label: String,
}

impl FacetOption {
    pub fn new(id: impl Into<Identifier>, display_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_label: display_label.into(),
        }
    }
}
