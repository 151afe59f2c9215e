//! `browse` and `apply` against any backend.

use facet_engine::{Driver, FacetStatus, FilterBackend, FilterView, ResultRegion};
use facet_model::{Facet, Selections};

/// Loads every facet's option list under `selections`.
pub async fn browse<B: FilterBackend + 'static>(backend: B, selections: &Selections) -> FilterView {
    let driver = load(backend, selections).await;
    driver.view()
}

/// Loads option lists, then validates `selections`.
pub async fn apply<B: FilterBackend + 'static>(backend: B, selections: &Selections) -> FilterView {
    let mut driver = load(backend, selections).await;
    driver.apply();
    driver.settle().await;
    driver.view()
}

async fn load<B: FilterBackend + 'static>(backend: B, selections: &Selections) -> Driver<B> {
    let mut driver = Driver::new(backend);
    // Selecting first lets the initial fetches carry the constraints.
    for facet in Facet::ALL {
        let ids = selections.get(facet);
        if !ids.is_empty() {
            driver.select(facet, ids.clone());
        }
    }
    driver.mount();
    driver.settle().await;
    retry_transient_failures(&mut driver).await;
    tracing::info!(
        stale = driver.session().stale_discarded(),
        "option lists loaded"
    );
    driver
}

/// Refetches each facet whose failure looked transient, once.
async fn retry_transient_failures<B: FilterBackend + 'static>(driver: &mut Driver<B>) {
    let failed: Vec<Facet> = driver
        .view()
        .facets
        .iter()
        .filter(|facet| facet.status == FacetStatus::Error && facet.retryable)
        .map(|facet| facet.facet)
        .collect();
    if failed.is_empty() {
        return;
    }
    for facet in failed {
        tracing::info!("Retrying {} after a transient failure", facet);
        driver.retry(facet);
    }
    driver.settle().await;
}

/// 0 when every facet loaded.
pub fn browse_exit_code(view: &FilterView) -> i32 {
    let failed = view
        .facets
        .iter()
        .any(|facet| facet.status == FacetStatus::Error);
    i32::from(failed)
}

/// 0 only for a valid selection.
pub fn apply_exit_code(view: &FilterView) -> i32 {
    match view.result {
        ResultRegion::Valid { .. } => 0,
        _ => 1,
    }
}
