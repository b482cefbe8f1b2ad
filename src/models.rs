use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned quote identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(pub i64);

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A quote row as stored remotely and mirrored in the list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    pub source: String,
    pub category: String,
    #[serde(default)]
    pub votes_interesting: u32,
    #[serde(default)]
    pub votes_mindblowing: u32,
    #[serde(default)]
    pub votes_false: u32,
    #[serde(default)]
    pub created_in: i32,
}

impl Quote {
    /// False votes outweigh the other two counters combined
    pub fn is_disputed(&self) -> bool {
        u64::from(self.votes_interesting) + u64::from(self.votes_mindblowing)
            < u64::from(self.votes_false)
    }

    pub fn votes(&self, kind: VoteKind) -> u32 {
        match kind {
            VoteKind::Interesting => self.votes_interesting,
            VoteKind::Mindblowing => self.votes_mindblowing,
            VoteKind::False => self.votes_false,
        }
    }

    pub fn set_votes(&mut self, kind: VoteKind, value: u32) {
        match kind {
            VoteKind::Interesting => self.votes_interesting = value,
            VoteKind::Mindblowing => self.votes_mindblowing = value,
            VoteKind::False => self.votes_false = value,
        }
    }
}

/// Insert payload. Counters and `createdIn` are filled in by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuote {
    pub text: String,
    pub source: String,
    pub category: String,
}

/// One of the three vote counters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteKind {
    Interesting,
    Mindblowing,
    False,
}

impl VoteKind {
    pub const ALL: [VoteKind; 3] = [VoteKind::Interesting, VoteKind::Mindblowing, VoteKind::False];

    /// Column name on the wire
    pub fn column(&self) -> &'static str {
        match self {
            VoteKind::Interesting => "votesInteresting",
            VoteKind::Mindblowing => "votesMindblowing",
            VoteKind::False => "votesFalse",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            VoteKind::Interesting => "👍",
            VoteKind::Mindblowing => "🤯",
            VoteKind::False => "⛔",
        }
    }
}

/// Conditional counter update: set `kind` to `value` only while it still equals `expected`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VotePatch {
    pub kind: VoteKind,
    pub expected: u32,
    pub value: u32,
}

impl VotePatch {
    /// One more vote than the locally observed count
    pub fn increment(quote: &Quote, kind: VoteKind) -> Self {
        let expected = quote.votes(kind);
        VotePatch {
            kind,
            expected,
            value: expected.saturating_add(1),
        }
    }

    /// JSON body for the update call
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(self.kind.column().to_string(), self.value.into());
        serde_json::Value::Object(body)
    }
}

/// Current list filter: everything, or one category by name
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn from_name(name: &str) -> Self {
        if name == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Named(name) => name,
        }
    }

    /// Category to filter by, `None` for all
    pub fn category(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Named(name) => Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(interesting: u32, mindblowing: u32, false_votes: u32) -> Quote {
        Quote {
            id: QuoteId(1),
            text: "Stay hungry".to_string(),
            source: "https://example.com".to_string(),
            category: "life".to_string(),
            votes_interesting: interesting,
            votes_mindblowing: mindblowing,
            votes_false: false_votes,
            created_in: 2024,
        }
    }

    #[test]
    fn test_disputed_when_false_votes_outweigh() {
        assert!(!quote(0, 0, 0).is_disputed());
        assert!(quote(0, 0, 1).is_disputed());
        assert!(quote(2, 1, 4).is_disputed());
        assert!(!quote(2, 2, 4).is_disputed());
        assert!(!quote(u32::MAX, u32::MAX, u32::MAX).is_disputed());
    }

    #[test]
    fn test_deserialize_camel_case_row() {
        let row = r#"{"id":7,"text":"t","source":"https://a.b","category":"god",
            "votesInteresting":5,"votesMindblowing":1,"votesFalse":0,"createdIn":2023,
            "created_at":"2023-01-01T00:00:00Z"}"#;
        let quote: Quote = serde_json::from_str(row).unwrap();
        assert_eq!(quote.id, QuoteId(7));
        assert_eq!(quote.votes(VoteKind::Interesting), 5);
        assert_eq!(quote.votes(VoteKind::Mindblowing), 1);
        assert_eq!(quote.created_in, 2023);
    }

    #[test]
    fn test_vote_patch_increments_observed_value() {
        let q = quote(3, 0, 9);
        let patch = VotePatch::increment(&q, VoteKind::False);
        assert_eq!(patch.expected, 9);
        assert_eq!(patch.value, 10);
        assert_eq!(patch.body(), serde_json::json!({ "votesFalse": 10 }));
    }

    #[test]
    fn test_category_filter_names() {
        assert_eq!(CategoryFilter::from_name("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::from_name("love").category(), Some("love"));
        assert_eq!(CategoryFilter::All.as_str(), "all");
        assert_eq!(CategoryFilter::All.category(), None);
    }
}
