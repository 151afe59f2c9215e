//! Cascading filter coordination engine.
//!
//! Three facets (modules, units, locations) narrow one dataset together:
//! selecting values in one facet restricts the options of the other two,
//! and an explicit apply step validates the combined selection against the
//! backend before a result is shown.
//!
//! # Components
//!
//! - [`SelectionStore`] - owns the selections, publishes change events
//! - [`compose`] - canonical query descriptor for a facet
//! - [`FacetFetcher`] - per-facet request lifecycle, last-issued-wins
//! - [`CascadeCoordinator`] - directional refetch rule with deduplication
//! - [`ValidationGate`] - snapshot-keyed validation outcome
//! - [`FilterSession`] - message/update loop over all of the above
//! - [`Driver`] - runs session commands against a [`FilterBackend`]
//!
//! # Example
//!
//! ```ignore
//! let mut driver = Driver::new(backend);
//! driver.mount();
//! driver.select(Facet::Modules, [1, 2]);
//! driver.settle().await;
//! driver.apply();
//! driver.settle().await;
//! println!("{}", driver.view().result);
//! ```

pub mod backend;
pub mod cascade;
pub mod command;
pub mod compose;
pub mod driver;
pub mod fetcher;
pub mod gate;
pub mod message;
pub mod session;
pub mod store;
pub mod view;

pub use backend::FilterBackend;
pub use cascade::CascadeCoordinator;
pub use command::{Command, Commands, FetchTicket, ValidationTicket};
pub use compose::compose;
pub use driver::Driver;
pub use fetcher::{FacetFetcher, FacetState, FacetStatus, Resolution};
pub use gate::{GateStatus, ValidationGate, ValidationSnapshot};
pub use message::Message;
pub use session::FilterSession;
pub use store::{ChangeKind, SelectionChange, SelectionObserver, SelectionStore};
pub use view::{FacetView, FilterView, OptionView, ResultRegion, summarize};
