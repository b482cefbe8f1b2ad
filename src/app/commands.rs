//! Command handlers - business logic for processing UI events

use crate::app::state::StatusMessage;
use crate::app::AppState;
use crate::categories::{self, CATEGORIES};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{CategoryFilter, QuoteId, VoteKind, VotePatch};

impl AppState {
    // ========================
    // Category filter
    // ========================

    /// Position in the filter bar: 0 is "All", then the registry in order
    pub fn filter_index(&self) -> Option<usize> {
        match &self.current_category {
            CategoryFilter::All => Some(0),
            CategoryFilter::Named(name) => categories::position(name).map(|i| i + 1),
        }
    }

    pub fn select_filter(&mut self, index: usize) -> Option<NetworkCommand> {
        let filter = match index {
            0 => CategoryFilter::All,
            i => CategoryFilter::Named(CATEGORIES.get(i - 1)?.name.to_string()),
        };
        Some(self.set_category(filter))
    }

    pub fn next_category(&mut self) -> NetworkCommand {
        let count = CATEGORIES.len() + 1;
        let next = self.filter_index().map_or(0, |i| (i + 1) % count);
        self.select_filter(next)
            .unwrap_or_else(|| self.set_category(CategoryFilter::All))
    }

    pub fn prev_category(&mut self) -> NetworkCommand {
        let count = CATEGORIES.len() + 1;
        let prev = self.filter_index().map_or(0, |i| (i + count - 1) % count);
        self.select_filter(prev)
            .unwrap_or_else(|| self.set_category(CategoryFilter::All))
    }

    /// Re-run the list query for the current filter
    pub fn reload(&mut self) -> NetworkCommand {
        self.begin_load()
    }

    // ========================
    // List navigation
    // ========================

    pub fn select_next(&mut self) {
        if !self.quotes.is_empty() {
            self.selected = (self.selected + 1).min(self.quotes.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Source link of the selected quote
    pub fn selected_source(&self) -> Option<String> {
        self.selected_quote().map(|q| q.source.clone())
    }

    // ========================
    // Votes
    // ========================

    pub fn vote_selected(&mut self, kind: VoteKind) -> Option<NetworkCommand> {
        let quote_id = self.selected_quote()?.id;
        self.vote(quote_id, kind)
    }

    /// Ask for one more vote on a quote, unless one is already in flight
    pub fn vote(&mut self, quote_id: QuoteId, kind: VoteKind) -> Option<NetworkCommand> {
        if self.is_voting(quote_id) {
            tracing::debug!(%quote_id, "Vote already in flight");
            return None;
        }
        let patch = VotePatch::increment(self.quotes.iter().find(|q| q.id == quote_id)?, kind);
        let id = self.next_id();
        self.pending_votes.insert(quote_id, id);
        Some(NetworkCommand::UpdateVotes { id, quote_id, patch })
    }

    // ========================
    // Submission form
    // ========================

    pub fn toggle_form(&mut self) {
        if self.form.is_uploading {
            return;
        }
        self.form_open = !self.form_open;
    }

    pub fn close_form(&mut self) {
        if !self.form.is_uploading {
            self.form_open = false;
        }
    }

    /// Validate and post the form; rejected forms issue nothing
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        if !self.form_open || self.form.is_uploading {
            return None;
        }
        match self.form.validate() {
            Ok(quote) => {
                let id = self.next_id();
                self.form.is_uploading = true;
                self.pending_insert_id = Some(id);
                self.status = Some(StatusMessage::info("Posting quote..."));
                Some(NetworkCommand::InsertQuote { id, quote })
            }
            Err(e) => {
                tracing::debug!(error = %e, "Submission rejected");
                self.status = Some(StatusMessage::error(e.to_string()));
                None
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a gateway response; may ask for a follow-up reload
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::QuotesLoaded { id, quotes } => {
                self.quotes_loaded(id, quotes);
                None
            }
            NetworkResponse::LoadFailed { id, message } => {
                self.load_failed(id, &message);
                None
            }
            NetworkResponse::QuoteInserted { id, quote } => {
                self.quote_inserted(id, quote);
                None
            }
            NetworkResponse::InsertFailed { id, message } => {
                self.insert_failed(id, &message);
                None
            }
            NetworkResponse::VotesUpdated { id, quote } => {
                self.quote_voted(id, quote);
                None
            }
            NetworkResponse::VoteFailed { id, quote_id, message, conflict } => {
                self.vote_failed(id, quote_id, &message, conflict)
            }
        }
    }
}
