//! Order-preserving load queue.
//!
//! Fetches resolve in any order; [`LoadQueue::drain`] only ever releases a
//! contiguous loaded prefix, so images reach the layout engine in the order
//! they were enqueued.

use std::collections::VecDeque;

use serde::Deserialize;

use crate::error::LoadError;
use crate::events::{LoadRequest, LoadedImage, Ticket};

/// What the drain does when the head entry failed to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadFailurePolicy {
    /// A failed head blocks every later entry.
    #[default]
    Stall,
    /// Failed heads are dropped and the drain continues.
    Skip,
}

#[derive(Debug)]
enum Status {
    Pending,
    Loaded(LoadedImage),
    Failed(LoadError),
}

#[derive(Debug)]
struct Entry {
    ticket: Ticket,
    request: LoadRequest,
    status: Status,
}

/// A failed head holding back the rest of the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stall {
    pub source: String,
    pub waiting: usize,
}

/// Result of one drain pass.
#[derive(Debug, Default)]
pub struct Drained {
    pub released: Vec<LoadedImage>,
    pub skipped: Vec<LoadRequest>,
    /// Set the first time a particular failed head is found blocking the queue.
    pub stalled: Option<Stall>,
}

#[derive(Debug)]
pub struct LoadQueue {
    entries: VecDeque<Entry>,
    next_ticket: u64,
    policy: LoadFailurePolicy,
    reported_stall: Option<Ticket>,
}

impl Default for LoadQueue {
    fn default() -> Self {
        Self::new(LoadFailurePolicy::default())
    }
}

impl LoadQueue {
    pub fn new(policy: LoadFailurePolicy) -> Self {
        Self {
            entries: VecDeque::new(),
            next_ticket: 0,
            policy,
            reported_stall: None,
        }
    }

    /// Append a pending entry at the tail.
    pub fn enqueue(&mut self, request: LoadRequest) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.entries.push_back(Entry {
            ticket,
            request,
            status: Status::Pending,
        });
        ticket
    }

    /// Record the outcome of a fetch.
    ///
    /// Returns `false` for tickets that are unknown, already drained, or
    /// already resolved.
    pub fn complete(&mut self, ticket: Ticket, result: Result<LoadedImage, LoadError>) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.ticket == ticket) else {
            return false;
        };
        if !matches!(entry.status, Status::Pending) {
            return false;
        }
        entry.status = match result {
            Ok(image) => Status::Loaded(image),
            Err(err) => Status::Failed(err),
        };
        true
    }

    /// Pop every loaded entry from the head, stopping at the first pending one.
    pub fn drain(&mut self) -> Drained {
        let mut out = Drained::default();
        while let Some(head) = self.entries.front() {
            match (&head.status, self.policy) {
                (Status::Pending, _) => break,
                (Status::Failed(_), LoadFailurePolicy::Stall) => {
                    if self.reported_stall != Some(head.ticket) {
                        self.reported_stall = Some(head.ticket);
                        out.stalled = Some(Stall {
                            source: head.request.source.clone(),
                            waiting: self.entries.len() - 1,
                        });
                    }
                    break;
                }
                (Status::Failed(_), LoadFailurePolicy::Skip) => {
                    if let Some(entry) = self.entries.pop_front() {
                        out.skipped.push(entry.request);
                    }
                }
                (Status::Loaded(_), _) => {
                    if let Some(Entry {
                        status: Status::Loaded(image),
                        ..
                    }) = self.entries.pop_front()
                    {
                        out.released.push(image);
                    }
                }
            }
        }
        out
    }

    /// Source locator of a still-queued entry.
    pub fn source_of(&self, ticket: Ticket) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.ticket == ticket)
            .map(|e| e.request.source.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> LoadFailurePolicy {
        self.policy
    }

    /// Entries whose fetch has not resolved yet.
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.status, Status::Pending))
            .count()
    }
}
