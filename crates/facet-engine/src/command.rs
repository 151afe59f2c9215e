//! Side effects requested by the engine.
//!
//! `update` never performs I/O. It returns [`Commands`] describing the
//! round trips to start; whoever drives the session executes them and feeds
//! the completions back as messages.

use facet_model::{Facet, QueryDescriptor, Selections};

/// An issued facet-listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub facet: Facet,
    /// Per-facet, strictly increasing request sequence number.
    pub seq: u64,
    pub descriptor: QueryDescriptor,
}

/// An issued validation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTicket {
    /// Strictly increasing across the session.
    pub id: u64,
    /// Selections frozen at the moment the request was made.
    pub snapshot: Selections,
}

/// A single side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `GET /filters/<facet>` with the ticket's descriptor as query parameters.
    FetchFacet(FetchTicket),
    /// `POST /filters/validate` with the ticket's snapshot as body.
    Validate(ValidationTicket),
}

/// Ordered batch of commands returned from one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commands(Vec<Command>);

impl Commands {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(command: Command) -> Self {
        Self(vec![command])
    }

    pub fn push(&mut self, command: Command) {
        self.0.push(command);
    }

    /// Appends all commands of `other`, preserving order.
    pub fn extend(&mut self, other: Commands) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.0.iter()
    }

    /// Fetch tickets in issue order.
    pub fn fetches(&self) -> impl Iterator<Item = &FetchTicket> {
        self.0.iter().filter_map(|command| match command {
            Command::FetchFacet(ticket) => Some(ticket),
            Command::Validate(_) => None,
        })
    }

    /// The validation ticket, if this batch carries one.
    pub fn validation(&self) -> Option<&ValidationTicket> {
        self.0.iter().find_map(|command| match command {
            Command::Validate(ticket) => Some(ticket),
            Command::FetchFacet(_) => None,
        })
    }
}

impl IntoIterator for Commands {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Command> for Commands {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
