//! JSON bodies exchanged with the filter endpoints.

use serde::Deserialize;

use facet_model::{Facet, FacetOption, FilterError, Identifier, Result};

#[derive(Debug, Deserialize)]
struct ModuleRecord {
    id: Identifier,
    title: String,
}

#[derive(Debug, Deserialize)]
struct NamedRecord {
    id: Identifier,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ModulesBody {
    modules: Vec<ModuleRecord>,
}

#[derive(Debug, Deserialize)]
struct UnitsBody {
    units: Vec<NamedRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationsBody {
    locations: Vec<NamedRecord>,
}

/// `{ "errors": [...] }` returned by a rejecting validation endpoint.
#[derive(Debug, Deserialize)]
struct RejectionBody {
    errors: Vec<String>,
}

fn decode<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| FilterError::Decode(e.to_string()))
}

/// Decodes a facet listing into options.
///
/// Modules are labelled by `title`, units and locations by `name`.
pub(crate) fn decode_options(facet: Facet, body: &str) -> Result<Vec<FacetOption>> {
    let options = match facet {
        Facet::Modules => decode::<ModulesBody>(body)?
            .modules
            .into_iter()
            .map(|record| FacetOption::new(record.id, record.title))
            .collect(),
        Facet::Units => named(decode::<UnitsBody>(body)?.units),
        Facet::Locations => named(decode::<LocationsBody>(body)?.locations),
    };
    Ok(options)
}

fn named(records: Vec<NamedRecord>) -> Vec<FacetOption> {
    records
        .into_iter()
        .map(|record| FacetOption::new(record.id, record.name))
        .collect()
}

/// Extracts rejection messages, `None` if the body has another shape.
///
/// An empty `errors` list is still a rejection.
pub(crate) fn decode_rejection(body: &str) -> Option<Vec<String>> {
    serde_json::from_str::<RejectionBody>(body)
        .ok()
        .map(|rejection| rejection.errors)
}
