//! App state - the quote list container and its transitions, no I/O

use std::collections::HashMap;

use crate::app::form::SubmissionForm;
use crate::constants::LOAD_FAILURE_MESSAGE;
use crate::gateway::ListQuery;
use crate::messages::{NetworkCommand, RenderState};
use crate::models::{CategoryFilter, Quote, QuoteId};

/// Severity of a status bar message
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

/// One-line feedback shown in the status bar
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
    pub timestamp: chrono::DateTime<chrono::Local>,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            level: StatusLevel::Info,
            text: text.into(),
            timestamp: chrono::Local::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            level: StatusLevel::Error,
            text: text.into(),
            timestamp: chrono::Local::now(),
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    /// Which backend the network actor talks to, for the header
    pub backend_label: String,

    // Quote list
    pub quotes: Vec<Quote>,
    pub selected: usize,
    pub current_category: CategoryFilter,
    pub is_loading: bool,

    // Request bookkeeping
    pub next_request_id: u64,
    /// Most recent list query; older responses are dropped
    pub pending_load_id: Option<u64>,
    pub pending_insert_id: Option<u64>,
    /// Quotes with a vote in flight, keyed to the request id
    pub pending_votes: HashMap<QuoteId, u64>,

    // Submission form
    pub form: SubmissionForm,
    pub form_open: bool,

    // Feedback
    pub status: Option<StatusMessage>,
    /// Blocking notification, dismissed by any key
    pub notification: Option<String>,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("")
    }
}

impl AppState {
    pub fn new(backend_label: impl Into<String>) -> Self {
        AppState {
            backend_label: backend_label.into(),
            quotes: Vec::new(),
            selected: 0,
            current_category: CategoryFilter::All,
            is_loading: false,
            next_request_id: 1,
            pending_load_id: None,
            pending_insert_id: None,
            pending_votes: HashMap::new(),
            form: SubmissionForm::new(),
            form_open: false,
            status: None,
            notification: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn is_voting(&self, quote_id: QuoteId) -> bool {
        self.pending_votes.contains_key(&quote_id)
    }

    pub fn selected_quote(&self) -> Option<&Quote> {
        self.quotes.get(self.selected)
    }

    // ========================
    // Transitions
    // ========================

    /// Switch the filter and start a reload
    pub fn set_category(&mut self, filter: CategoryFilter) -> NetworkCommand {
        tracing::debug!(category = filter.as_str(), "Category selected");
        self.current_category = filter;
        self.begin_load()
    }

    /// Enter `Loading` and issue a list query for the current filter
    pub fn begin_load(&mut self) -> NetworkCommand {
        let id = self.next_id();
        self.pending_load_id = Some(id);
        self.is_loading = true;
        NetworkCommand::LoadQuotes {
            id,
            query: ListQuery::for_filter(&self.current_category),
        }
    }

    /// Replace the list wholesale. Returns false for a superseded response.
    pub fn quotes_loaded(&mut self, id: u64, quotes: Vec<Quote>) -> bool {
        if self.pending_load_id != Some(id) {
            tracing::debug!(id, latest = ?self.pending_load_id, "Dropping superseded list response");
            return false;
        }
        tracing::info!(id, count = quotes.len(), "Quotes loaded");
        self.quotes = quotes;
        self.selected = 0;
        self.pending_load_id = None;
        self.is_loading = false;
        true
    }

    /// Keep the previous list and raise the load notification
    pub fn load_failed(&mut self, id: u64, message: &str) -> bool {
        if self.pending_load_id != Some(id) {
            tracing::debug!(id, "Dropping superseded list failure");
            return false;
        }
        tracing::error!(id, error = message, "Loading quotes failed");
        self.pending_load_id = None;
        self.is_loading = false;
        self.notification = Some(LOAD_FAILURE_MESSAGE.to_string());
        true
    }

    /// Prepend the stored row, then clear and close the form
    pub fn quote_inserted(&mut self, id: u64, quote: Quote) -> bool {
        if self.pending_insert_id != Some(id) {
            return false;
        }
        tracing::info!(id, quote_id = %quote.id, "Quote posted");
        self.quotes.insert(0, quote);
        self.selected = 0;
        self.pending_insert_id = None;
        self.form.clear();
        self.form_open = false;
        self.status = Some(StatusMessage::info("Quote posted"));
        true
    }

    /// Unlock the form and leave everything else as it was
    pub fn insert_failed(&mut self, id: u64, message: &str) -> bool {
        if self.pending_insert_id != Some(id) {
            return false;
        }
        self.pending_insert_id = None;
        self.form.is_uploading = false;
        self.status = Some(StatusMessage::error(format!("Could not post quote: {}", message)));
        true
    }

    /// Swap in the updated row by id and release the vote guard
    pub fn quote_voted(&mut self, id: u64, quote: Quote) -> bool {
        if self.pending_votes.get(&quote.id) == Some(&id) {
            self.pending_votes.remove(&quote.id);
        }
        match self.quotes.iter_mut().find(|q| q.id == quote.id) {
            Some(existing) => {
                *existing = quote;
                true
            }
            None => {
                tracing::debug!(quote_id = %quote.id, "Voted quote no longer listed");
                false
            }
        }
    }

    /// Release the vote guard. A conflict reloads so the counts are fresh.
    pub fn vote_failed(
        &mut self,
        id: u64,
        quote_id: QuoteId,
        message: &str,
        conflict: bool,
    ) -> Option<NetworkCommand> {
        if self.pending_votes.get(&quote_id) == Some(&id) {
            self.pending_votes.remove(&quote_id);
        }
        if conflict {
            self.status = Some(StatusMessage::error(
                "Votes changed on the server, reloading",
            ));
            Some(self.begin_load())
        } else {
            self.status = Some(StatusMessage::error(format!("Vote failed: {}", message)));
            None
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            backend_label: self.backend_label.clone(),
            current_category: self.current_category.clone(),
            quotes: self.quotes.clone(),
            selected: self.selected,
            voting: self.pending_votes.keys().copied().collect(),
            is_loading: self.is_loading,
            form_open: self.form_open,
            form: self.form.clone(),
            status: self.status.clone(),
            notification: self.notification.clone(),
            show_help: self.show_help,
        }
    }
}
