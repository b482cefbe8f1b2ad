//! Gateway round trips - runs one command and turns the result into a response

use std::time::{Duration, Instant};

use crate::constants::REQUEST_TIMEOUT_SECS;
use crate::gateway::QuoteGateway;
use crate::messages::{NetworkCommand, NetworkResponse};

/// Execute one command against the gateway. `Shutdown` has no response.
pub async fn execute_command<G: QuoteGateway>(
    gateway: &G,
    command: NetworkCommand,
) -> Option<NetworkResponse> {
    let start = Instant::now();

    let response = match command {
        NetworkCommand::LoadQuotes { id, query } => {
            tracing::info!(id, category = ?query.category, limit = query.limit, "Loading quotes");
            match gateway.list(&query).await {
                Ok(quotes) => NetworkResponse::QuotesLoaded { id, quotes },
                Err(e) => NetworkResponse::LoadFailed {
                    id,
                    message: e.to_string(),
                },
            }
        }
        NetworkCommand::InsertQuote { id, quote } => {
            tracing::info!(id, category = %quote.category, "Inserting quote");
            match gateway.insert(&quote).await {
                Ok(quote) => NetworkResponse::QuoteInserted { id, quote },
                Err(e) => NetworkResponse::InsertFailed {
                    id,
                    message: e.to_string(),
                },
            }
        }
        NetworkCommand::UpdateVotes { id, quote_id, patch } => {
            tracing::info!(id, %quote_id, column = patch.kind.column(), value = patch.value, "Updating votes");
            match gateway.update(quote_id, &patch).await {
                Ok(quote) => NetworkResponse::VotesUpdated { id, quote },
                Err(e) => NetworkResponse::VoteFailed {
                    id,
                    quote_id,
                    conflict: e.is_conflict(),
                    message: e.to_string(),
                },
            }
        }
        NetworkCommand::Shutdown => return None,
    };

    let time_ms = start.elapsed().as_millis() as u64;
    if response.is_failure() {
        tracing::warn!(id = response.id(), time_ms, ?response, "Round trip failed");
    } else {
        tracing::info!(id = response.id(), time_ms, "Round trip completed");
    }
    Some(response)
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{ListQuery, MemoryGateway};
    use crate::models::{CategoryFilter, QuoteId, VoteKind, VotePatch};

    #[tokio::test]
    async fn test_failed_vote_reports_quote_and_conflict() {
        let gateway = MemoryGateway::with_demo_quotes();
        let quote = gateway.rows().remove(0);
        let command = NetworkCommand::UpdateVotes {
            id: 3,
            quote_id: quote.id,
            patch: VotePatch {
                kind: VoteKind::Interesting,
                expected: quote.votes_interesting + 1,
                value: quote.votes_interesting + 2,
            },
        };

        match execute_command(&gateway, command).await {
            Some(NetworkResponse::VoteFailed { id, quote_id, conflict, .. }) => {
                assert_eq!(id, 3);
                assert_eq!(quote_id, quote.id);
                assert!(conflict);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_offline_load_fails() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);
        let command = NetworkCommand::LoadQuotes {
            id: 1,
            query: ListQuery::for_filter(&CategoryFilter::All),
        };
        let response = execute_command(&gateway, command).await.unwrap();
        assert!(matches!(response, NetworkResponse::LoadFailed { id: 1, .. }));
    }

    #[tokio::test]
    async fn test_unknown_quote_is_not_a_conflict() {
        let gateway = MemoryGateway::new();
        let command = NetworkCommand::UpdateVotes {
            id: 2,
            quote_id: QuoteId(42),
            patch: VotePatch { kind: VoteKind::False, expected: 0, value: 1 },
        };
        let response = execute_command(&gateway, command).await.unwrap();
        assert!(matches!(response, NetworkResponse::VoteFailed { conflict: false, .. }));
    }

    #[tokio::test]
    async fn test_shutdown_has_no_response() {
        let gateway = MemoryGateway::new();
        assert!(execute_command(&gateway, NetworkCommand::Shutdown).await.is_none());
    }
}
