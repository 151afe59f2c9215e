//! Single-task runtime executing session commands against a backend.
//!
//! All in-flight round trips sit in one `FuturesUnordered`, so requests for
//! different facets (and validation) overlap freely while every completion
//! is fed back through [`FilterSession::update`] on the same task. No locks
//! are involved; ordering within a facet is enforced by the session.
//!
//! Outdated requests are not cancelled; their completions are dropped by
//! the session when they arrive.

use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};

use facet_model::{Facet, SelectionSet};

use crate::backend::FilterBackend;
use crate::command::{Command, Commands};
use crate::message::Message;
use crate::session::FilterSession;
use crate::view::FilterView;

pub struct Driver<B> {
    session: FilterSession,
    backend: Rc<B>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, Message>>,
}

impl<B: FilterBackend + 'static> Driver<B> {
    pub fn new(backend: B) -> Self {
        Self {
            session: FilterSession::new(),
            backend: Rc::new(backend),
            in_flight: FuturesUnordered::new(),
        }
    }

    pub fn session(&self) -> &FilterSession {
        &self.session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn view(&self) -> FilterView {
        self.session.view()
    }

    /// Number of round trips not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Feeds one message to the session and starts the resulting requests.
    pub fn dispatch(&mut self, message: Message) {
        let commands = self.session.update(message);
        self.execute(commands);
    }

    pub fn mount(&mut self) {
        self.dispatch(Message::Mount);
    }

    pub fn select(&mut self, facet: Facet, ids: impl Into<SelectionSet>) {
        self.dispatch(Message::select(facet, ids));
    }

    pub fn reset(&mut self) {
        self.dispatch(Message::Reset);
    }

    pub fn apply(&mut self) {
        self.dispatch(Message::Apply);
    }

    pub fn retry(&mut self, facet: Facet) {
        self.dispatch(Message::Retry(facet));
    }

    fn execute(&mut self, commands: Commands) {
        for command in commands {
            let future = self.start(command);
            self.in_flight.push(future);
        }
    }

    fn start(&self, command: Command) -> LocalBoxFuture<'static, Message> {
        let backend = Rc::clone(&self.backend);
        match command {
            Command::FetchFacet(ticket) => async move {
                let result = backend.list_options(ticket.facet, &ticket.descriptor).await;
                Message::FacetLoaded {
                    facet: ticket.facet,
                    seq: ticket.seq,
                    result,
                }
            }
            .boxed_local(),
            Command::Validate(ticket) => async move {
                let result = backend.validate(&ticket.snapshot).await;
                Message::Validated {
                    id: ticket.id,
                    result,
                }
            }
            .boxed_local(),
        }
    }

    /// Waits for the next completion and applies it.
    ///
    /// Returns `false` when nothing is in flight.
    pub async fn step(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(message) => {
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    /// Runs until every in-flight round trip has completed.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }
}
