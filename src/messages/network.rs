//! Network messages - communication between App and Network layers

use crate::gateway::ListQuery;
use crate::models::{NewQuote, Quote, QuoteId, VotePatch};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the quote list
    LoadQuotes {
        id: u64,
        query: ListQuery,
    },
    /// Store a new quote
    InsertQuote {
        id: u64,
        quote: NewQuote,
    },
    /// Conditionally bump one vote counter
    UpdateVotes {
        id: u64,
        quote_id: QuoteId,
        patch: VotePatch,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    QuotesLoaded {
        id: u64,
        quotes: Vec<Quote>,
    },
    LoadFailed {
        id: u64,
        message: String,
    },
    QuoteInserted {
        id: u64,
        quote: Quote,
    },
    InsertFailed {
        id: u64,
        message: String,
    },
    VotesUpdated {
        id: u64,
        quote: Quote,
    },
    VoteFailed {
        id: u64,
        quote_id: QuoteId,
        message: String,
        /// The counter moved on the server since it was read
        conflict: bool,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::QuotesLoaded { id, .. } => *id,
            NetworkResponse::LoadFailed { id, .. } => *id,
            NetworkResponse::QuoteInserted { id, .. } => *id,
            NetworkResponse::InsertFailed { id, .. } => *id,
            NetworkResponse::VotesUpdated { id, .. } => *id,
            NetworkResponse::VoteFailed { id, .. } => *id,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            NetworkResponse::LoadFailed { .. }
                | NetworkResponse::InsertFailed { .. }
                | NetworkResponse::VoteFailed { .. }
        )
    }
}
