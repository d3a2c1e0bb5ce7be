//! Per-view request lifecycle: idle → loading → settled.
//!
//! A [`RequestController`] spawns each submission on the tokio runtime and
//! receives its outcome over a private channel. Outcomes are applied on the
//! owning task when the view polls, so view state is never touched from the
//! spawned task. Dropping the controller drops the receiver; a call still in
//! flight then finishes and its outcome is thrown away.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::error::ApiError;

/// Terminal outcome of a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement<T> {
    Result(T),
    Error(String),
}

/// Observable state of a controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lifecycle<T> {
    #[default]
    Idle,
    Loading,
    Settled(Settlement<T>),
}

/// What to do with an outcome that arrives after a newer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalePolicy {
    /// Apply every outcome in arrival order; the last to resolve wins.
    #[default]
    LastResolved,
    /// Only the most recent submission may settle the controller.
    LatestSubmitted,
}

/// Identifies one submission of one controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

type Outcome<T> = (Ticket, Result<T, ApiError>);

pub struct RequestController<T> {
    label: &'static str,
    policy: StalePolicy,
    state: Lifecycle<T>,
    last_ticket: u64,
    in_flight: usize,
    outcome_tx: mpsc::UnboundedSender<Outcome<T>>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome<T>>,
}

impl<T: Send + 'static> RequestController<T> {
    pub fn new(label: &'static str, policy: StalePolicy) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            label,
            policy,
            state: Lifecycle::Idle,
            last_ticket: 0,
            in_flight: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Start a submission: clear the previous result and error, enter
    /// loading, and run `call` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit<F>(&mut self, call: F) -> Ticket
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.in_flight += 1;
        self.state = Lifecycle::Loading;
        log::debug!("{}: submitted request #{}", self.label, ticket.0);

        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = call.await;
            // The receiver is gone once the owning view is dropped.
            let _ = tx.send((ticket, outcome));
        });
        ticket
    }

    /// Settle immediately with a failure found before any call was made.
    pub fn reject(&mut self, error: ApiError) {
        log::debug!("{}: rejected locally: {error}", self.label);
        self.state = Lifecycle::Settled(Settlement::Error(error.to_string()));
    }

    /// Apply every outcome delivered since the last poll. Returns whether
    /// the state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((ticket, outcome)) = self.outcome_rx.try_recv() {
            changed |= self.apply(ticket, outcome);
        }
        changed
    }

    /// Wait for the next delivered outcome and apply it. Returns whether the
    /// state changed.
    pub async fn settled(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some((ticket, outcome)) => self.apply(ticket, outcome),
            None => false,
        }
    }

    fn apply(&mut self, ticket: Ticket, outcome: Result<T, ApiError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.policy == StalePolicy::LatestSubmitted && ticket.0 != self.last_ticket {
            log::debug!(
                "{}: discarding stale outcome #{} (latest #{})",
                self.label,
                ticket.0,
                self.last_ticket
            );
            return false;
        }

        self.state = match outcome {
            Ok(value) => {
                log::info!("{}: request #{} succeeded", self.label, ticket.0);
                Lifecycle::Settled(Settlement::Result(value))
            }
            Err(e) => {
                log::warn!("{}: request #{} failed: {e}", self.label, ticket.0);
                Lifecycle::Settled(Settlement::Error(e.to_string()))
            }
        };
        true
    }
}

impl<T> RequestController<T> {
    pub fn state(&self) -> &Lifecycle<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, Lifecycle::Loading)
    }

    pub fn result(&self) -> Option<&T> {
        match &self.state {
            Lifecycle::Settled(Settlement::Result(value)) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            Lifecycle::Settled(Settlement::Error(message)) => Some(message),
            _ => None,
        }
    }

    /// Submissions whose outcome has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }
}
