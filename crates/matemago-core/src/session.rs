//! Query lifecycle of the result view.
//!
//! A session holds at most one live response. Starting a query discards the previous response
//! and error, and every query gets a sequence ticket: a completion that does not carry the most
//! recently issued ticket is stale and is dropped instead of overwriting newer state.

use tracing::debug;

use crate::{ClientError, ExplanationClient, ExplanationRequest, ExplanationResponse};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryPhase {
    #[default]
    Idle,
    Loading,
    Failed(String),
    Showing(ExplanationResponse),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuerySession {
    phase: QueryPhase,
    issued: u64,
    applied: Option<u64>,
}

impl QuerySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &QueryPhase {
        &self.phase
    }

    pub fn response(&self) -> Option<&ExplanationResponse> {
        match &self.phase {
            QueryPhase::Showing(response) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            QueryPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, QueryPhase::Loading)
    }

    /// Starts a query: clears the previous outcome and returns the ticket of the new request.
    pub fn begin(&mut self) -> QueryTicket {
        self.issued += 1;
        self.phase = QueryPhase::Loading;
        QueryTicket(self.issued)
    }

    /// Applies the outcome of the request identified by `ticket`.
    ///
    /// Returns `false` (and changes nothing) when a newer query has been started since, or when
    /// this ticket's outcome was already applied.
    pub fn finish(
        &mut self,
        ticket: QueryTicket,
        outcome: Result<ExplanationResponse, ClientError>,
    ) -> bool {
        if ticket.0 != self.issued || self.applied == Some(ticket.0) {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "dropping stale explanation response"
            );
            return false;
        }
        self.applied = Some(ticket.0);

        self.phase = match outcome {
            Ok(response) => QueryPhase::Showing(response),
            Err(err) => QueryPhase::Failed(err.user_message()),
        };
        true
    }

    /// Runs one full query against `client`.
    pub async fn ask(
        &mut self,
        client: &ExplanationClient,
        request: &ExplanationRequest,
    ) -> &QueryPhase {
        let ticket = self.begin();
        let outcome = client.explain(request).await;
        self.finish(ticket, outcome);
        &self.phase
    }
}
