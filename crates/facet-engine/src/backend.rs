//! The external authority the engine talks to.

use std::future::Future;

use facet_model::{Facet, FacetOption, QueryDescriptor, Result, Selections, ValidationOutcome};

/// Facet-listing and validation endpoints.
///
/// Implementations report every failure through the returned `Result`;
/// the engine turns those into facet or gate status and never panics on
/// them. Futures are polled on a single task and need not be `Send`.
pub trait FilterBackend {
    /// Lists the options of `facet` constrained by `descriptor`.
    fn list_options(
        &self,
        facet: Facet,
        descriptor: &QueryDescriptor,
    ) -> impl Future<Output = Result<Vec<FacetOption>>>;

    /// Submits the complete selection for validation.
    ///
    /// A structured rejection may be returned either as
    /// `Ok(ValidationOutcome::Invalid { .. })` or as
    /// `Err(FilterError::Rejected(..))`.
    fn validate(&self, selections: &Selections) -> impl Future<Output = Result<ValidationOutcome>>;
}
