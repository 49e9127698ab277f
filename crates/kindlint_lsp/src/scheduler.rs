//! Per-document lint scheduling.
//!
//! At most one lint pass runs per document. Requests that arrive while a pass
//! is running are queued (identical requests collapse into one) and replayed
//! in queue order once the running pass settles.

use std::collections::HashMap;
use std::future::Future;

use indexmap::IndexSet;
use parking_lot::Mutex;
use tower_lsp::lsp_types::{TextEdit, Url};
use tracing::debug;

use crate::LintError;

/// Options of a lint request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LintOptions {
    /// Started from a fix action.
    pub fix: bool,
    /// Started from a format request; edits are returned instead of clearing
    /// diagnostics first.
    pub format: bool,
}

impl LintOptions {
    pub const FORMAT: Self = Self {
        fix: false,
        format: true,
    };
}

/// A request to lint one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LintRequest {
    pub uri: Url,
    pub options: LintOptions,
}

impl LintRequest {
    pub fn new(uri: Url, options: LintOptions) -> Self {
        Self { uri, options }
    }
}

#[derive(Debug)]
struct PendingLint {
    options: LintOptions,
    ticket: u64,
}

#[derive(Debug, Default)]
struct SchedulerState {
    pending: HashMap<Url, PendingLint>,
    queued: IndexSet<LintRequest>,
    next_ticket: u64,
}

impl SchedulerState {
    fn claim(&mut self, request: &LintRequest) -> u64 {
        self.next_ticket += 1;
        self.pending.insert(
            request.uri.clone(),
            PendingLint {
                options: request.options,
                ticket: self.next_ticket,
            },
        );
        self.next_ticket
    }

    fn owns(&self, uri: &Url, ticket: u64) -> bool {
        self.pending.get(uri).is_some_and(|p| p.ticket == ticket)
    }
}

/// Serializes lint passes per document.
#[derive(Debug, Default)]
pub struct LintScheduler {
    state: Mutex<SchedulerState>,
}

impl LintScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `run` for `request` unless a pass for the same document is in
    /// flight, in which case the request is queued and no edits are returned.
    ///
    /// The caller that owns the document slot also runs every request queued
    /// for that document while it was busy, and receives the edits of the
    /// last pass it ran.
    pub async fn validate<F, Fut>(&self, request: LintRequest, run: F) -> Vec<TextEdit>
    where
        F: Fn(LintRequest) -> Fut,
        Fut: Future<Output = Result<Vec<TextEdit>, LintError>>,
    {
        let mut ticket = {
            let mut state = self.state.lock();
            if state.pending.contains_key(&request.uri) {
                debug!(
                    "{} is already being linted, queueing {:?}",
                    request.uri, request.options
                );
                state.queued.insert(request);
                return Vec::new();
            }
            state.claim(&request)
        };

        let mut current = request;
        loop {
            let slot = Slot {
                scheduler: self,
                uri: &current.uri,
                ticket,
                armed: true,
            };

            // Failures are logged where the pass runs.
            let edits = run(current.clone()).await.unwrap_or_default();
            slot.disarm();

            match self.release(&current.uri, ticket) {
                Some((next, next_ticket)) => {
                    debug!("Replaying queued lint for {} ({:?})", next.uri, next.options);
                    current = next;
                    ticket = next_ticket;
                }
                None => return edits,
            }
        }
    }

    /// Frees the slot held by `ticket` and, in the same step, hands it to the
    /// first request queued for `uri`.
    fn release(&self, uri: &Url, ticket: u64) -> Option<(LintRequest, u64)> {
        let mut state = self.state.lock();
        if !state.owns(uri, ticket) {
            // Cancelled while running.
            return None;
        }
        state.pending.remove(uri);

        let index = state.queued.iter().position(|r| &r.uri == uri)?;
        let next = state.queued.shift_remove_index(index)?;
        let ticket = state.claim(&next);
        Some((next, ticket))
    }

    /// Drops queued requests and the in-flight bookkeeping for `uri`. A pass
    /// already running is not interrupted, but nothing is replayed after it.
    pub fn cancel(&self, uri: &Url) {
        let mut state = self.state.lock();
        state.queued.retain(|r| &r.uri != uri);
        if let Some(pending) = state.pending.remove(uri) {
            debug!("Cancelled lint for {} ({:?})", uri, pending.options);
        }
    }

    pub fn is_pending(&self, uri: &Url) -> bool {
        self.state.lock().pending.contains_key(uri)
    }

    /// Options of the requests queued for `uri`, in replay order.
    pub fn queued(&self, uri: &Url) -> Vec<LintOptions> {
        self.state
            .lock()
            .queued
            .iter()
            .filter(|r| &r.uri == uri)
            .map(|r| r.options)
            .collect()
    }
}

/// Releases the slot if the pass future is dropped before it settles.
struct Slot<'a> {
    scheduler: &'a LintScheduler,
    uri: &'a Url,
    ticket: u64,
    armed: bool,
}

impl Slot<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for Slot<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut state = self.scheduler.state.lock();
            if state.owns(self.uri, self.ticket) {
                state.pending.remove(self.uri);
            }
        }
    }
}
