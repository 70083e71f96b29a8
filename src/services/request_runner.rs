//! Background request runner
//!
//! Every remote call runs on its own thread and reports back over a channel
//! that the UI drains on each tick. Requests are tagged with a ticket; when a
//! newer request of the same kind is issued, replies to older ones are
//! dropped, so the last query issued is the one that ends up on screen.

use crate::error::ApiError;
use crate::model::query::CatalogQuery;
use crate::model::state::CatalogPage;
use crate::services::api::{fetch_catalog_page, ShelterApi};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Login,
    Breeds,
    Catalog,
    Match,
}

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

/// Hands out tickets and remembers the newest one per kind
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: HashMap<RequestKind, u64>,
}

impl RequestTracker {
    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        let generation = self.latest.entry(kind).or_insert(0);
        *generation += 1;
        Ticket {
            kind,
            generation: *generation,
        }
    }

    /// True if no newer ticket of the same kind has been issued
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.get(&ticket.kind) == Some(&ticket.generation)
    }
}

/// Outcome of a finished request
#[derive(Debug)]
pub enum Reply {
    Login(Result<(), ApiError>),
    Breeds(Result<Vec<String>, ApiError>),
    Catalog(Result<CatalogPage, ApiError>),
    /// Id of the matched dog
    Match(Result<String, ApiError>),
}

pub struct RequestRunner {
    api: Arc<dyn ShelterApi>,
    sender: Sender<(Ticket, Reply)>,
    receiver: Receiver<(Ticket, Reply)>,
    tracker: RequestTracker,
    /// Spawned requests that have not replied yet
    in_flight: usize,
}

impl RequestRunner {
    pub fn new(api: Arc<dyn ShelterApi>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            api,
            sender,
            receiver,
            tracker: RequestTracker::default(),
            in_flight: 0,
        }
    }

    pub fn spawn_login(&mut self, name: String, email: String) -> Ticket {
        self.spawn(RequestKind::Login, move |api| {
            Reply::Login(api.login(&name, &email))
        })
    }

    pub fn spawn_breeds(&mut self) -> Ticket {
        self.spawn(RequestKind::Breeds, |api| Reply::Breeds(api.breeds()))
    }

    pub fn spawn_catalog(&mut self, query: CatalogQuery) -> Ticket {
        self.spawn(RequestKind::Catalog, move |api| {
            Reply::Catalog(fetch_catalog_page(api, &query))
        })
    }

    pub fn spawn_match(&mut self, ids: Vec<String>) -> Ticket {
        self.spawn(RequestKind::Match, move |api| {
            Reply::Match(api.find_match(&ids).map(|m| m.matched_id))
        })
    }

    fn spawn<F>(&mut self, kind: RequestKind, call: F) -> Ticket
    where
        F: FnOnce(&dyn ShelterApi) -> Reply + Send + 'static,
    {
        let ticket = self.tracker.issue(kind);
        let api = Arc::clone(&self.api);
        let tx = self.sender.clone();

        tracing::debug!(?kind, generation = ticket.generation, "spawning request");
        thread::spawn(move || {
            let reply = call(api.as_ref());
            // Receiver is gone only when the app is shutting down
            let _ = tx.send((ticket, reply));
        });

        self.in_flight += 1;
        ticket
    }

    /// Drain finished requests, keeping only replies to current tickets
    pub fn poll(&mut self) -> Vec<Reply> {
        let mut replies = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok((ticket, reply)) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    if self.tracker.is_current(ticket) {
                        replies.push(reply);
                    } else {
                        tracing::debug!(
                            kind = ?ticket.kind,
                            generation = ticket.generation,
                            "dropping stale reply"
                        );
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        replies
    }

    /// Requests spawned that have not replied yet, stale ones included
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Block until every spawned request has replied, then drain
    #[cfg(test)]
    pub fn wait(&mut self, timeout: std::time::Duration) -> Vec<Reply> {
        let deadline = std::time::Instant::now() + timeout;
        let mut replies = Vec::new();
        while self.in_flight > 0 && std::time::Instant::now() < deadline {
            replies.extend(self.poll());
            thread::sleep(std::time::Duration::from_millis(2));
        }
        replies.extend(self.poll());
        replies
    }
}
