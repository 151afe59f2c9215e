//! Facet fetcher - request lifecycle for one facet's option list.
//!
//! # Ordering
//!
//! Every issued request gets the next sequence number. A completion is
//! applied only if it carries the highest number issued so far, so a slow
//! early request can never overwrite the result of a later one. Responses
//! that lose this race are reported as [`Resolution::Stale`] and dropped.

use facet_model::{Facet, FacetOption, FilterError, Identifier, QueryDescriptor};

use crate::command::FetchTicket;

/// Request status of a facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacetStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// Observable state of one facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetState {
    /// Options from the latest applied response, replaced wholesale.
    pub options: Vec<FacetOption>,
    pub status: FacetStatus,
    /// Descriptor of the most recently *issued* request.
    pub last_query: Option<QueryDescriptor>,
    pub error_message: Option<String>,
    /// Whether the last failure could clear up on a repeated request.
    pub retryable: bool,
}

impl FacetState {
    pub fn is_loading(&self) -> bool {
        self.status == FacetStatus::Loading
    }

    pub fn find_option(&self, id: Identifier) -> Option<&FacetOption> {
        self.options.iter().find(|option| option.id == id)
    }
}

/// Whether a completion was applied or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Stale,
}

/// Request tracker for a single facet.
#[derive(Debug)]
pub struct FacetFetcher {
    facet: Facet,
    state: FacetState,
    issued_seq: u64,
}

impl FacetFetcher {
    pub fn new(facet: Facet) -> Self {
        Self {
            facet,
            state: FacetState::default(),
            issued_seq: 0,
        }
    }

    pub fn facet(&self) -> Facet {
        self.facet
    }

    pub fn state(&self) -> &FacetState {
        &self.state
    }

    /// Highest sequence number issued so far (0 before the first request).
    pub fn issued_seq(&self) -> u64 {
        self.issued_seq
    }

    /// Starts a request for `descriptor`.
    ///
    /// Status switches to `Loading`, any previous error message is dropped,
    /// and `last_query` is recorded immediately, before any response exists.
    pub fn request(&mut self, descriptor: QueryDescriptor) -> FetchTicket {
        self.issued_seq += 1;
        self.state.status = FacetStatus::Loading;
        self.state.error_message = None;
        self.state.retryable = false;
        self.state.last_query = Some(descriptor.clone());

        tracing::debug!(
            "Requesting {} options (seq {}, query {})",
            self.facet,
            self.issued_seq,
            descriptor
        );

        FetchTicket {
            facet: self.facet,
            seq: self.issued_seq,
            descriptor,
        }
    }

    /// Applies the completion of request `seq`, unless a later one was issued.
    ///
    /// Failures never escape: they become `Error` status with an empty
    /// option list and a user-facing message.
    pub fn resolve(
        &mut self,
        seq: u64,
        result: Result<Vec<FacetOption>, FilterError>,
    ) -> Resolution {
        if seq != self.issued_seq {
            tracing::trace!(
                "Dropping stale {} response (seq {}, latest {})",
                self.facet,
                seq,
                self.issued_seq
            );
            return Resolution::Stale;
        }

        match result {
            Ok(options) => {
                tracing::debug!("Loaded {} {} options (seq {})", options.len(), self.facet, seq);
                self.state.options = options;
                self.state.status = FacetStatus::Idle;
                self.state.error_message = None;
            }
            Err(error) => {
                tracing::warn!("Failed to load {} options: {}", self.facet, error);
                self.state.options.clear();
                self.state.status = FacetStatus::Error;
                self.state.error_message = Some(error.user_message());
                self.state.retryable = error.is_retryable();
            }
        }
        Resolution::Applied
    }
}
