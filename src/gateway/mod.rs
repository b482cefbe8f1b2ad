//! Remote data gateway - the three round trips the app makes to the quote store
//!
//! `SupabaseGateway` talks PostgREST over HTTP, `MemoryGateway` keeps rows
//! in-process for the demo backend and for tests.

pub mod memory;
pub mod supabase;

use std::future::Future;

use thiserror::Error;

use crate::constants::LIST_LIMIT;
use crate::models::{CategoryFilter, NewQuote, Quote, QuoteId, VoteKind, VotePatch};

pub use memory::MemoryGateway;
pub use supabase::SupabaseGateway;

/// Errors from a gateway round trip
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("The store returned no rows")]
    EmptyResponse,
    #[error("Quote {0} was changed by someone else")]
    Conflict(QuoteId),
    #[error("Quote {0} not found")]
    NotFound(QuoteId),
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfiguration(&'static str),
}

impl GatewayError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, GatewayError::Conflict(_))
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// A list query: optional category filter, ordered by one counter, capped
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub order_by: VoteKind,
    pub descending: bool,
    pub limit: usize,
}

impl ListQuery {
    /// The query the quote list issues for a filter
    pub fn for_filter(filter: &CategoryFilter) -> Self {
        ListQuery {
            category: filter.category().map(str::to_string),
            order_by: VoteKind::Interesting,
            descending: true,
            limit: LIST_LIMIT,
        }
    }
}

/// The remote store as the app sees it
pub trait QuoteGateway: Send + Sync + 'static {
    /// Fetch quotes matching the query
    fn list(&self, query: &ListQuery) -> impl Future<Output = GatewayResult<Vec<Quote>>> + Send;

    /// Insert one quote and return the stored row
    fn insert(&self, quote: &NewQuote) -> impl Future<Output = GatewayResult<Quote>> + Send;

    /// Apply a conditional counter update and return the updated row.
    /// Fails with `Conflict` when the counter no longer holds `patch.expected`.
    fn update(
        &self,
        id: QuoteId,
        patch: &VotePatch,
    ) -> impl Future<Output = GatewayResult<Quote>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_for_all_has_no_filter() {
        let query = ListQuery::for_filter(&CategoryFilter::All);
        assert_eq!(query.category, None);
        assert_eq!(query.order_by, VoteKind::Interesting);
        assert!(query.descending);
        assert_eq!(query.limit, 1000);
    }

    #[test]
    fn test_query_for_category() {
        let query = ListQuery::for_filter(&CategoryFilter::Named("god".into()));
        assert_eq!(query.category.as_deref(), Some("god"));
    }
}
