use ratatui::{prelude::*, widgets::*};

use crate::categories::{self, CATEGORIES};
use crate::constants::{EMPTY_LIST_MESSAGE, LOADING_MESSAGE};
use crate::messages::RenderState;
use crate::models::{CategoryFilter, Quote, VoteKind};

/// Tag color for unregistered categories
pub const FALLBACK_COLOR: Color = Color::DarkGray;

/// Registry color for a category; unknown names get the fallback
pub fn category_color(name: &str) -> Color {
    categories::find(name)
        .and_then(|cat| cat.color.parse::<Color>().ok())
        .unwrap_or(FALLBACK_COLOR)
}

/// Filter bar: "All" followed by every registry entry
pub fn render_category_tabs(current: &CategoryFilter) -> Tabs<'static> {
    let mut titles: Vec<Line> = vec![Line::from(" 0:All ")];
    titles.extend(CATEGORIES.iter().enumerate().map(|(i, cat)| {
        Line::from(Span::styled(
            format!(" {}:{} ", i + 1, cat.name),
            Style::default().fg(category_color(cat.name)),
        ))
    }));

    let selected = match current {
        CategoryFilter::All => Some(0),
        CategoryFilter::Named(name) => categories::position(name).map(|i| i + 1),
    };

    let tabs = Tabs::new(titles)
        .style(Style::default().fg(Color::Gray))
        .divider("|");
    match selected {
        Some(i) => tabs
            .select(i)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        // Unregistered filter: nothing to highlight
        None => tabs.highlight_style(Style::default()),
    }
}

/// Label for one vote button
pub fn vote_label(quote: &Quote, kind: VoteKind) -> String {
    format!("{} {}", kind.icon(), quote.votes(kind))
}

/// What the list area shows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListBody {
    Loading,
    Empty,
    Quotes,
}

impl ListBody {
    /// Centered text in place of the list, `None` when quotes are drawn
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            ListBody::Loading => Some(LOADING_MESSAGE),
            ListBody::Empty => Some(EMPTY_LIST_MESSAGE),
            ListBody::Quotes => None,
        }
    }
}

/// Loading wins over the list contents
pub fn list_body(state: &RenderState) -> ListBody {
    if state.is_loading {
        ListBody::Loading
    } else if state.quotes.is_empty() {
        ListBody::Empty
    } else {
        ListBody::Quotes
    }
}

pub fn footer_text(state: &RenderState) -> String {
    format!(
        "There are {} quotes in the database. Add your own!",
        state.quotes.len()
    )
}

/// Header hint for the form toggle; typing owns `n` once the form is open
pub fn header_hint(form_open: bool) -> &'static str {
    if form_open {
        "Esc: Close"
    } else {
        "n: Add a quote"
    }
}

/// Two-line list item: text with link, then tag and vote buttons
pub fn quote_item(quote: &Quote, is_selected: bool, is_voting: bool) -> ListItem<'static> {
    ListItem::new(quote_lines(quote, is_selected, is_voting))
}

pub fn quote_lines(quote: &Quote, is_selected: bool, is_voting: bool) -> Vec<Line<'static>> {
    let mut first = Vec::new();
    if quote.is_disputed() {
        first.push(Span::styled(
            "[⛔ DISPUTED] ",
            Style::default().fg(Color::Red).bold(),
        ));
    }
    let text_style = if is_selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };
    first.push(Span::styled(quote.text.clone(), text_style));
    first.push(Span::styled(
        format!("  ({})", quote.source),
        Style::default().fg(Color::Blue).underlined(),
    ));

    let tag_color = category_color(&quote.category);
    let button_style = if is_voting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let mut second = vec![
        Span::raw("    "),
        Span::styled(
            format!(" {} ", quote.category.to_uppercase()),
            Style::default().fg(Color::Black).bg(tag_color),
        ),
        Span::raw("  "),
    ];
    for kind in VoteKind::ALL {
        second.push(Span::styled(format!("[{}] ", vote_label(quote, kind)), button_style));
    }

    vec![Line::from(first), Line::from(second), Line::raw("")]
}

/// Remaining-characters counter; red once over the limit
pub fn remaining_style(remaining: i64) -> Style {
    if remaining < 0 {
        Style::default().fg(Color::Red).bold()
    } else if remaining < 20 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuoteId;

    #[test]
    fn test_known_category_uses_registry_color() {
        assert_eq!(category_color("god"), Color::Rgb(0x3b, 0x82, 0xf6));
    }

    #[test]
    fn test_unknown_category_falls_back() {
        assert_eq!(category_color("sports"), FALLBACK_COLOR);
        assert_eq!(category_color(""), FALLBACK_COLOR);
    }

    fn quote(id: i64, interesting: u32, mindblowing: u32, false_votes: u32) -> Quote {
        Quote {
            id: QuoteId(id),
            text: "t".into(),
            source: "https://a.io".into(),
            category: "mystery".into(),
            votes_interesting: interesting,
            votes_mindblowing: mindblowing,
            votes_false: false_votes,
            created_in: 2024,
        }
    }

    fn first_line(quote: &Quote) -> String {
        quote_lines(quote, false, false)[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn test_vote_label_shows_count() {
        let quote = quote(1, 4, 0, 12);
        assert_eq!(vote_label(&quote, VoteKind::False), "⛔ 12");
    }

    #[test]
    fn test_disputed_marker_follows_votes() {
        for (interesting, mindblowing, false_votes) in [(0, 0, 0), (0, 0, 1), (2, 1, 4), (2, 2, 4), (5, 0, 3)] {
            let quote = quote(1, interesting, mindblowing, false_votes);
            assert_eq!(
                first_line(&quote).contains("[⛔ DISPUTED]"),
                quote.is_disputed(),
                "votes {:?}",
                (interesting, mindblowing, false_votes)
            );
        }
    }

    #[test]
    fn test_unknown_category_tag_uses_fallback() {
        let lines = quote_lines(&quote(1, 0, 0, 0), true, false);
        let tag = &lines[1].spans[1];
        assert_eq!(tag.content.as_ref(), " MYSTERY ");
        assert_eq!(tag.style.bg, Some(FALLBACK_COLOR));
    }

    #[test]
    fn test_loading_shows_loader_even_with_quotes() {
        let state = RenderState {
            is_loading: true,
            quotes: vec![quote(1, 0, 0, 0)],
            ..RenderState::default()
        };
        assert_eq!(list_body(&state), ListBody::Loading);
        assert_eq!(list_body(&state).placeholder(), Some("Loading..."));
    }

    #[test]
    fn test_empty_list_shows_message() {
        let state = RenderState::default();
        assert_eq!(list_body(&state), ListBody::Empty);
        assert_eq!(list_body(&state).placeholder(), Some(EMPTY_LIST_MESSAGE));
    }

    #[test]
    fn test_loaded_list_draws_quotes() {
        let state = RenderState {
            quotes: vec![quote(1, 0, 0, 0)],
            ..RenderState::default()
        };
        assert_eq!(list_body(&state), ListBody::Quotes);
        assert_eq!(list_body(&state).placeholder(), None);
    }

    #[test]
    fn test_footer_counts_listed_quotes() {
        let state = RenderState {
            quotes: vec![quote(1, 0, 0, 0), quote(2, 0, 0, 0), quote(3, 0, 0, 0)],
            ..RenderState::default()
        };
        assert_eq!(footer_text(&state), "There are 3 quotes in the database. Add your own!");
        assert_eq!(footer_text(&RenderState::default()), "There are 0 quotes in the database. Add your own!");
    }

    #[test]
    fn test_header_hint_names_the_working_key() {
        assert_eq!(header_hint(false), "n: Add a quote");
        assert_eq!(header_hint(true), "Esc: Close");
    }

    #[test]
    fn test_remaining_style_turns_red_over_limit() {
        assert_eq!(remaining_style(-1).fg, Some(Color::Red));
        assert_eq!(remaining_style(100).fg, Some(Color::DarkGray));
    }
}
