//! In-process quote store with the same contract as the remote one

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Datelike;

use crate::gateway::{GatewayError, GatewayResult, ListQuery, QuoteGateway};
use crate::models::{NewQuote, Quote, QuoteId, VotePatch};

#[derive(Debug, Default)]
struct MemoryStore {
    rows: Vec<Quote>,
    next_id: i64,
    offline: bool,
}

/// Cloneable handle; clones share the same rows
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    store: Arc<Mutex<MemoryStore>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with rows. Ids continue after the highest seeded id.
    pub fn with_quotes(rows: Vec<Quote>) -> Self {
        let next_id = rows.iter().map(|q| q.id.0).max().unwrap_or(0);
        MemoryGateway {
            store: Arc::new(Mutex::new(MemoryStore {
                rows,
                next_id,
                offline: false,
            })),
        }
    }

    /// Store used when no remote backend is configured
    pub fn with_demo_quotes() -> Self {
        let gateway = Self::new();
        let demo = [
            ("The only way to do great work is to love what you do.", "https://www.goodreads.com/quotes/772887", "success", 24, 9, 1),
            ("Time you enjoy wasting is not wasted time.", "https://quoteinvestigator.com/2010/06/11/time-you-enjoy/", "time", 17, 4, 0),
            ("Love all, trust a few, do wrong to none.", "https://www.gutenberg.org/ebooks/1536", "love", 12, 2, 0),
            ("The unexamined life is not worth living.", "https://en.wikipedia.org/wiki/The_unexamined_life_is_not_worth_living", "wisdom", 10, 7, 2),
            ("Happiness is a warm puppy.", "https://en.wikipedia.org/wiki/Happiness_Is_a_Warm_Puppy", "happiness", 3, 1, 5),
        ];
        {
            let mut store = gateway.lock();
            for (text, source, category, interesting, mindblowing, false_votes) in demo {
                store.create(NewQuote {
                    text: text.to_string(),
                    source: source.to_string(),
                    category: category.to_string(),
                });
                if let Some(row) = store.rows.last_mut() {
                    row.votes_interesting = interesting;
                    row.votes_mindblowing = mindblowing;
                    row.votes_false = false_votes;
                }
            }
        }
        gateway
    }

    /// When offline every call fails with `Unavailable`
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Snapshot of every stored row in insertion order
    pub fn rows(&self) -> Vec<Quote> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MemoryStore {
    fn check_online(&self) -> GatewayResult<()> {
        if self.offline {
            return Err(GatewayError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }

    fn create(&mut self, quote: NewQuote) -> Quote {
        self.next_id += 1;
        let row = Quote {
            id: QuoteId(self.next_id),
            text: quote.text,
            source: quote.source,
            category: quote.category,
            votes_interesting: 0,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: chrono::Local::now().year(),
        };
        self.rows.push(row.clone());
        row
    }
}

impl QuoteGateway for MemoryGateway {
    async fn list(&self, query: &ListQuery) -> GatewayResult<Vec<Quote>> {
        let store = self.lock();
        store.check_online()?;

        let mut rows: Vec<Quote> = store
            .rows
            .iter()
            .filter(|q| query.category.as_deref().map_or(true, |c| q.category == c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            let ordering = a.votes(query.order_by).cmp(&b.votes(query.order_by));
            if query.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        rows.truncate(query.limit);
        Ok(rows)
    }

    async fn insert(&self, quote: &NewQuote) -> GatewayResult<Quote> {
        let mut store = self.lock();
        store.check_online()?;
        Ok(store.create(quote.clone()))
    }

    async fn update(&self, id: QuoteId, patch: &VotePatch) -> GatewayResult<Quote> {
        let mut store = self.lock();
        store.check_online()?;

        let row = store
            .rows
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        if row.votes(patch.kind) != patch.expected {
            return Err(GatewayError::Conflict(id));
        }
        row.set_votes(patch.kind, patch.value);
        Ok(row.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryFilter, VoteKind};

    fn row(id: i64, category: &str, interesting: u32) -> Quote {
        Quote {
            id: QuoteId(id),
            text: format!("quote {}", id),
            source: "https://example.com".to_string(),
            category: category.to_string(),
            votes_interesting: interesting,
            votes_mindblowing: 0,
            votes_false: 0,
            created_in: 2022,
        }
    }

    fn scenario() -> MemoryGateway {
        MemoryGateway::with_quotes(vec![row(1, "god", 3), row(2, "love", 9), row(3, "god", 5)])
    }

    fn counts(rows: &[Quote]) -> Vec<u32> {
        rows.iter().map(|q| q.votes_interesting).collect()
    }

    #[tokio::test]
    async fn test_list_all_orders_by_interesting_desc() {
        let gateway = scenario();
        let rows = gateway.list(&ListQuery::for_filter(&CategoryFilter::All)).await.unwrap();
        assert_eq!(counts(&rows), vec![9, 5, 3]);
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let gateway = scenario();
        let query = ListQuery::for_filter(&CategoryFilter::Named("god".into()));
        let rows = gateway.list(&query).await.unwrap();
        assert_eq!(counts(&rows), vec![5, 3]);
        assert!(rows.iter().all(|q| q.category == "god"));
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let gateway = scenario();
        let mut query = ListQuery::for_filter(&CategoryFilter::All);
        query.limit = 2;
        assert_eq!(gateway.list(&query).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_defaults() {
        let gateway = scenario();
        let stored = gateway
            .insert(&NewQuote {
                text: "New".into(),
                source: "https://example.org".into(),
                category: "life".into(),
            })
            .await
            .unwrap();
        assert_eq!(stored.id, QuoteId(4));
        assert_eq!(stored.votes_interesting, 0);
        assert_eq!(stored.votes_false, 0);
        assert_eq!(stored.created_in, chrono::Local::now().year());
        assert_eq!(gateway.rows().len(), 4);
    }

    #[tokio::test]
    async fn test_update_applies_when_expected_matches() {
        let gateway = scenario();
        let patch = VotePatch { kind: VoteKind::False, expected: 0, value: 1 };
        let updated = gateway.update(QuoteId(1), &patch).await.unwrap();
        assert_eq!(updated.votes_false, 1);
        assert_eq!(updated.votes_interesting, 3);
    }

    #[tokio::test]
    async fn test_stale_update_conflicts_and_keeps_row() {
        let gateway = scenario();
        let patch = VotePatch { kind: VoteKind::Interesting, expected: 2, value: 3 };
        let err = gateway.update(QuoteId(2), &patch).await.unwrap_err();
        assert!(err.is_conflict());
        let stored = gateway.rows().into_iter().find(|q| q.id == QuoteId(2)).unwrap();
        assert_eq!(stored.votes_interesting, 9);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let gateway = scenario();
        let patch = VotePatch { kind: VoteKind::Interesting, expected: 0, value: 1 };
        let err = gateway.update(QuoteId(99), &patch).await.unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(QuoteId(99))));
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let gateway = scenario();
        gateway.set_offline(true);
        let result = gateway.list(&ListQuery::for_filter(&CategoryFilter::All)).await;
        assert!(matches!(result, Err(GatewayError::Unavailable(_))));
    }

    #[test]
    fn test_demo_quotes_are_in_registry() {
        let gateway = MemoryGateway::with_demo_quotes();
        let rows = gateway.rows();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|q| crate::categories::find(&q.category).is_some()));
        assert!(rows.iter().any(Quote::is_disputed));
    }
}
