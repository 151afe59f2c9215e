//! Cascade coordinator.
//!
//! Owns the three facet fetchers and decides which of them must refetch
//! after a selection change. The rule is directional: an edit to facet X
//! recomputes the descriptors of the two other facets only, so X's own
//! option list never shifts under the user while they are selecting.
//! A recomputed descriptor equal to the facet's `last_query` is skipped.

use facet_model::{Facet, FacetOption, FilterError, Selections};

use crate::command::{Command, Commands};
use crate::compose::compose;
use crate::fetcher::{FacetFetcher, FacetState, Resolution};
use crate::store::{SelectionChange, SelectionObserver};

#[derive(Debug)]
pub struct CascadeCoordinator {
    fetchers: [FacetFetcher; 3],
    mounted: bool,
}

impl Default for CascadeCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl CascadeCoordinator {
    pub fn new() -> Self {
        Self {
            fetchers: Facet::ALL.map(FacetFetcher::new),
            mounted: false,
        }
    }

    pub fn state(&self, facet: Facet) -> &FacetState {
        self.fetchers[facet.index()].state()
    }

    pub fn fetcher(&self, facet: Facet) -> &FacetFetcher {
        &self.fetchers[facet.index()]
    }

    /// Seeds all three option lists once.
    ///
    /// Each facet is fetched with the descriptor for the current
    /// selections, which is the empty descriptor on a fresh session.
    /// Later calls are no-ops.
    pub fn mount(&mut self, selections: &Selections) -> Commands {
        if self.mounted {
            return Commands::none();
        }
        self.mounted = true;
        tracing::debug!("Seeding facet option lists");

        Facet::ALL
            .into_iter()
            .map(|facet| {
                let descriptor = compose(facet, selections);
                Command::FetchFacet(self.fetchers[facet.index()].request(descriptor))
            })
            .collect()
    }

    /// Issues requests for `facets` whose descriptor changed.
    fn refresh(&mut self, facets: &[Facet], selections: &Selections) -> Commands {
        let mut commands = Commands::none();
        for &facet in facets {
            let descriptor = compose(facet, selections);
            let fetcher = &mut self.fetchers[facet.index()];
            if fetcher.state().last_query.as_ref() == Some(&descriptor) {
                tracing::trace!("{} query unchanged, skipping refetch", facet);
                continue;
            }
            commands.push(Command::FetchFacet(fetcher.request(descriptor)));
        }
        commands
    }

    /// Re-issues a facet's last query, even though it is unchanged.
    ///
    /// Used to recover a facet stuck in `Error` after a transient failure.
    /// Before mount this behaves like a first fetch with the current
    /// selections.
    pub fn retry(&mut self, facet: Facet, selections: &Selections) -> Commands {
        let fetcher = &mut self.fetchers[facet.index()];
        let descriptor = fetcher
            .state()
            .last_query
            .clone()
            .unwrap_or_else(|| compose(facet, selections));
        tracing::debug!("Retrying {} options", facet);
        Commands::single(Command::FetchFacet(fetcher.request(descriptor)))
    }

    /// Routes a facet-listing completion to its fetcher.
    pub fn resolve(
        &mut self,
        facet: Facet,
        seq: u64,
        result: Result<Vec<FacetOption>, FilterError>,
    ) -> Resolution {
        self.fetchers[facet.index()].resolve(seq, result)
    }
}

impl SelectionObserver for CascadeCoordinator {
    fn selection_changed(&mut self, change: &SelectionChange, selections: &Selections) -> Commands {
        if !self.mounted {
            // Mount will fetch with whatever selections exist by then.
            return Commands::none();
        }
        self.refresh(&change.kind.affected_facets(), selections)
    }
}
