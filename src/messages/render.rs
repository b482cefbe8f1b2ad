//! Render state - data structure sent from App layer to UI for rendering

use crate::app::form::SubmissionForm;
use crate::app::state::StatusMessage;
use crate::models::{CategoryFilter, Quote, QuoteId};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub backend_label: String,

    // Filter and list
    pub current_category: CategoryFilter,
    pub quotes: Vec<Quote>,
    pub selected: usize,
    /// Quotes whose vote buttons are disabled
    pub voting: Vec<QuoteId>,
    pub is_loading: bool,

    // Submission form
    pub form_open: bool,
    pub form: SubmissionForm,

    // Feedback
    pub status: Option<StatusMessage>,
    pub notification: Option<String>,
    pub show_help: bool,
}

impl RenderState {
    pub fn is_voting(&self, quote_id: QuoteId) -> bool {
        self.voting.contains(&quote_id)
    }
}
