//! Submission form - field editing and local validation

use thiserror::Error;

use crate::categories::{Category, CATEGORIES};
use crate::constants::MAX_QUOTE_LENGTH;
use crate::models::NewQuote;

/// Form field with keyboard focus
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FormField {
    #[default]
    Text,
    Source,
    Category,
}

impl FormField {
    pub fn next(&self) -> FormField {
        match self {
            FormField::Text => FormField::Source,
            FormField::Source => FormField::Category,
            FormField::Category => FormField::Text,
        }
    }

    pub fn prev(&self) -> FormField {
        match self {
            FormField::Text => FormField::Category,
            FormField::Source => FormField::Text,
            FormField::Category => FormField::Source,
        }
    }
}

/// Why a submission was rejected before reaching the gateway
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Write a quote first")]
    EmptyText,
    #[error("Source must be an http:// or https:// link")]
    InvalidSource,
    #[error("Choose a category")]
    EmptyCategory,
    #[error("Quote is {len} characters long, the limit is {max}", max = MAX_QUOTE_LENGTH)]
    TextTooLong { len: usize },
}

/// Absolute URL with an http or https scheme
pub fn is_valid_http_url(value: &str) -> bool {
    reqwest::Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Candidate quote being typed in
#[derive(Clone, Debug, Default)]
pub struct SubmissionForm {
    pub text: String,
    pub source: String,
    /// Index into the registry, `None` until a category is chosen
    pub category: Option<usize>,
    pub focused: FormField,
    /// Byte offset into the focused text field
    pub cursor_position: usize,
    pub is_uploading: bool,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<&'static Category> {
        self.category.and_then(|i| CATEGORIES.get(i))
    }

    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }

    /// Characters left before hitting the limit; negative once over it
    pub fn remaining(&self) -> i64 {
        MAX_QUOTE_LENGTH as i64 - self.text_length() as i64
    }

    /// Check the fields in submission order and build the insert payload
    pub fn validate(&self) -> Result<NewQuote, ValidationError> {
        if self.text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if !is_valid_http_url(&self.source) {
            return Err(ValidationError::InvalidSource);
        }
        let category = self.category().ok_or(ValidationError::EmptyCategory)?;
        let len = self.text_length();
        if len > MAX_QUOTE_LENGTH {
            return Err(ValidationError::TextTooLong { len });
        }

        Ok(NewQuote {
            text: self.text.clone(),
            source: self.source.clone(),
            category: category.name.to_string(),
        })
    }

    /// Reset every field; used after a successful post
    pub fn clear(&mut self) {
        *self = SubmissionForm::default();
    }

    fn current_input(&self) -> Option<&str> {
        match self.focused {
            FormField::Text => Some(&self.text),
            FormField::Source => Some(&self.source),
            FormField::Category => None,
        }
    }

    fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.focused {
            FormField::Text => Some(&mut self.text),
            FormField::Source => Some(&mut self.source),
            FormField::Category => None,
        }
    }

    pub fn focus_next(&mut self) {
        if self.is_uploading {
            return;
        }
        self.focused = self.focused.next();
        self.cursor_position = self.current_input().map_or(0, str::len);
    }

    pub fn focus_prev(&mut self) {
        if self.is_uploading {
            return;
        }
        self.focused = self.focused.prev();
        self.cursor_position = self.current_input().map_or(0, str::len);
    }

    pub fn enter_char(&mut self, c: char) {
        if self.is_uploading {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.is_uploading || self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        if let Some(input) = self.current_input() {
            self.cursor_position = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(input) = self.current_input() {
            if self.cursor_position < input.len() {
                self.cursor_position = input[self.cursor_position..]
                    .char_indices()
                    .nth(1)
                    .map(|(i, _)| self.cursor_position + i)
                    .unwrap_or(input.len());
            }
        }
    }

    /// Cycle "choose category" -> first .. last -> "choose category"
    pub fn next_category(&mut self) {
        if self.is_uploading {
            return;
        }
        self.category = match self.category {
            None => Some(0),
            Some(i) if i + 1 < CATEGORIES.len() => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn prev_category(&mut self) {
        if self.is_uploading {
            return;
        }
        self.category = match self.category {
            None => Some(CATEGORIES.len() - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(text: &str, source: &str, category: Option<usize>) -> SubmissionForm {
        SubmissionForm {
            text: text.to_string(),
            source: source.to_string(),
            category,
            ..SubmissionForm::default()
        }
    }

    #[test]
    fn test_valid_form_builds_payload() {
        let form = filled("Know thyself", "https://example.com/q", Some(4));
        let quote = form.validate().unwrap();
        assert_eq!(quote.category, "wisdom");
        assert_eq!(quote.text, "Know thyself");
    }

    #[test]
    fn test_validation_order() {
        assert_eq!(filled("", "nope", None).validate(), Err(ValidationError::EmptyText));
        assert_eq!(filled("x", "nope", None).validate(), Err(ValidationError::InvalidSource));
        assert_eq!(
            filled("x", "http://example.com", None).validate(),
            Err(ValidationError::EmptyCategory)
        );
    }

    #[test]
    fn test_rejects_non_http_sources() {
        for source in ["ftp://example.com", "example.com", "mailto:a@b.c", "/relative", ""] {
            let form = filled("x", source, Some(0));
            assert_eq!(form.validate(), Err(ValidationError::InvalidSource), "{source}");
        }
    }

    #[test]
    fn test_text_length_limit() {
        let at_limit = "a".repeat(250);
        assert!(filled(&at_limit, "https://a.io", Some(0)).validate().is_ok());

        let over = "a".repeat(251);
        assert_eq!(
            filled(&over, "https://a.io", Some(0)).validate(),
            Err(ValidationError::TextTooLong { len: 251 })
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let form = filled(&"é".repeat(250), "https://a.io", Some(0));
        assert_eq!(form.remaining(), 0);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_editing_text_with_cursor() {
        let mut form = SubmissionForm::new();
        for c in "hllo".chars() {
            form.enter_char(c);
        }
        form.move_cursor_left();
        form.move_cursor_left();
        form.move_cursor_left();
        form.enter_char('e');
        assert_eq!(form.text, "hello");
        form.delete_char();
        assert_eq!(form.text, "hllo");
        assert_eq!(form.remaining(), 246);
    }

    #[test]
    fn test_focus_moves_between_fields() {
        let mut form = filled("abc", "https://x.y", None);
        form.focus_next();
        assert_eq!(form.focused, FormField::Source);
        assert_eq!(form.cursor_position, "https://x.y".len());
        form.focus_next();
        assert_eq!(form.focused, FormField::Category);
        form.enter_char('z');
        assert_eq!(form.source, "https://x.y");
        form.focus_prev();
        assert_eq!(form.focused, FormField::Source);
    }

    #[test]
    fn test_category_cycle_wraps_through_empty_choice() {
        let mut form = SubmissionForm::new();
        form.prev_category();
        assert_eq!(form.category().unwrap().name, "happiness");
        form.next_category();
        assert_eq!(form.category, None);
        form.next_category();
        assert_eq!(form.category().unwrap().name, "god");
    }

    #[test]
    fn test_inputs_frozen_while_uploading() {
        let mut form = filled("abc", "https://x.y", Some(1));
        form.cursor_position = 3;
        form.is_uploading = true;
        form.enter_char('d');
        form.delete_char();
        form.next_category();
        form.focus_next();
        assert_eq!(form.text, "abc");
        assert_eq!(form.category, Some(1));
        assert_eq!(form.focused, FormField::Text);
    }
}
