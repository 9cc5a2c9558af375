//! Fetch lifecycle for one collection view
//!
//! Each list view (the batch change list, the changeset list of one batch
//! change) owns one `FetchState`. Starting a load cancels whatever request
//! was running for that view and hands out a ticket; only the response
//! carrying the ticket of the *latest* load may touch the state. Responses
//! from superseded loads, however late they arrive, are silently dropped.

use log::debug;
use sg_client::{CancellationToken, ClientError, ClientResult};

/// Handle identifying one load so its response can be matched against the
/// state it belongs to. The token is the request's cancellation signal, the
/// epoch ties the eventual response to this particular load.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub epoch: u64,
    pub cancel: CancellationToken,
}

/// What became of a finished load.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The response belonged to the current load; items were replaced.
    Applied,
    /// The response belonged to a superseded load; nothing changed.
    Stale,
    /// The request was cancelled; nothing changed.
    Cancelled,
    /// The current load failed; the loading flag was cleared and the error
    /// is handed back for reporting.
    Failed(ClientError),
}

/// Items, loading flag and in-flight request handle for one list view.
///
/// At most one non-cancelled request exists per instance: `begin_load`
/// cancels the previous request before issuing a new ticket.
#[derive(Debug)]
pub struct FetchState<T> {
    items: Vec<T>,
    is_loading: bool,
    cancel: Option<CancellationToken>,
    epoch: u64,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            cancel: None,
            epoch: 0,
        }
    }
}

impl<T> FetchState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Epoch of the most recent load, for matching responses in tests and
    /// event plumbing.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Starts a new load: cancels the previous in-flight request (if any),
    /// clears the items so stale data is never shown as current, raises the
    /// loading flag and returns the ticket the fetch task must carry.
    pub fn begin_load(&mut self) -> FetchTicket {
        if let Some(prev) = self.cancel.take() {
            prev.cancel();
        }
        self.epoch += 1;
        self.items.clear();
        self.is_loading = true;

        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());
        FetchTicket {
            epoch: self.epoch,
            cancel,
        }
    }

    /// Applies the response of the load identified by `epoch`.
    ///
    /// Responses of superseded loads are dropped without touching any state,
    /// and a cancelled request never clears the loading flag of a newer one.
    pub fn finish(&mut self, epoch: u64, result: ClientResult<Vec<T>>) -> FetchOutcome {
        if epoch != self.epoch {
            debug!("dropping response of superseded load (epoch {epoch}, current {})", self.epoch);
            return FetchOutcome::Stale;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.is_loading = false;
                self.cancel = None;
                FetchOutcome::Applied
            }
            Err(err) if err.is_cancelled() => {
                debug!("load cancelled (epoch {epoch})");
                FetchOutcome::Cancelled
            }
            Err(err) => {
                self.is_loading = false;
                self.cancel = None;
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Tears the view down: cancels any in-flight request and bumps the
    /// epoch so even an already-completed response can no longer apply.
    pub fn teardown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        self.epoch += 1;
        self.items.clear();
        self.is_loading = false;
    }
}
