//! Motiv Quotes - share and vote on quotes from the terminal
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async gateway round trips

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use motiv_quotes::app::state::StatusLevel;
use motiv_quotes::config::Config;
use motiv_quotes::constants::{APP_NAME, APP_VERSION};
use motiv_quotes::gateway::{MemoryGateway, QuoteGateway, SupabaseGateway};
use motiv_quotes::messages::ui_events::key_to_ui_event;
use motiv_quotes::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use motiv_quotes::ui::{self, quote_item, remaining_style, ListBody};
use motiv_quotes::{AppActor, NetworkActor};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let log_path = config.log_path();
    let log_dir = log_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| ".".into());
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;
    let log_name = log_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "motiv.log".into());
    let file_appender = tracing_appender::rolling::never(&log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!("{} v{} starting", APP_NAME, APP_VERSION);

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor; configuration errors surface before the terminal is taken over
    let backend_label = match config.backend() {
        Some(backend) => {
            let gateway = SupabaseGateway::new(&backend.url, &backend.anon_key, &backend.table)?;
            let label = gateway.table_url().to_string();
            spawn_network(gateway, net_cmd_rx, net_resp_tx);
            label
        }
        None => {
            tracing::warn!("No Supabase credentials configured, using the in-memory demo store");
            spawn_network(MemoryGateway::with_demo_quotes(), net_cmd_rx, net_resp_tx);
            "demo (in-memory)".to_string()
        }
    };

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx, backend_label);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

fn spawn_network<G: QuoteGateway>(
    gateway: G,
    cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>,
    resp_tx: mpsc::UnboundedSender<NetworkResponse>,
) {
    let network_actor = NetworkActor::new(gateway, resp_tx);
    tokio::spawn(network_actor.run(cmd_rx));
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState {
        is_loading: true,
        ..RenderState::default()
    };

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.form_open,
                    current_state.form.focused,
                    current_state.show_help,
                    current_state.notification.is_some(),
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let form_height = if state.form_open { 9 } else { 0 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Header
            Constraint::Length(1),           // Filter bar
            Constraint::Length(form_height), // Submission form
            Constraint::Min(3),              // Quote list
            Constraint::Length(1),           // Footer
            Constraint::Length(1),           // Status bar
        ])
        .split(area);

    draw_header(f, state, main_chunks[0]);
    f.render_widget(ui::render_category_tabs(&state.current_category), main_chunks[1]);
    if state.form_open {
        draw_form(f, state, main_chunks[2]);
    }
    draw_quote_list(f, state, main_chunks[3]);
    draw_footer(f, state, main_chunks[4]);
    draw_status_bar(f, state, main_chunks[5]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if let Some(message) = &state.notification {
        draw_notification_popup(f, message, area);
    }
}

fn draw_header(f: &mut Frame, state: &RenderState, area: Rect) {
    let header = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" {} ", state.backend_label), Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {} ", ui::header_hint(state.form_open)), Style::default().fg(Color::Yellow)),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_form(f: &mut Frame, state: &RenderState, area: Rect) {
    use motiv_quotes::app::form::FormField;

    let form = &state.form;
    let title = if form.is_uploading {
        " Share a quote [uploading...] "
    } else {
        " Share a quote (Tab:next field  Enter:post  Esc:close) "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Text
            Constraint::Length(2), // Source
            Constraint::Length(2), // Category
        ])
        .split(inner);

    let field_style = |field: FormField| {
        if form.focused == field {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        }
    };

    let remaining = form.remaining();
    let text_lines = vec![
        Line::from(vec![
            Span::styled("Quote:    ", field_style(FormField::Text)),
            Span::raw(form.text.clone()),
        ]),
        Line::from(Span::styled(format!("{} characters left", remaining), remaining_style(remaining))),
    ];
    f.render_widget(Paragraph::new(text_lines).wrap(Wrap { trim: false }), rows[0]);

    let source = Line::from(vec![
        Span::styled("Source:   ", field_style(FormField::Source)),
        Span::raw(form.source.clone()),
    ]);
    f.render_widget(Paragraph::new(source), rows[1]);

    let category = match form.category() {
        Some(cat) => Span::styled(
            format!(" {} ", cat.name.to_uppercase()),
            Style::default().fg(Color::Black).bg(ui::category_color(cat.name)),
        ),
        None => Span::styled("Choose category:", Style::default().fg(Color::DarkGray)),
    };
    let category_line = Line::from(vec![
        Span::styled("Category: ", field_style(FormField::Category)),
        category,
        Span::styled("  (←/→ to choose)", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(category_line), rows[2]);

    // Cursor
    if !form.is_uploading && form.focused != FormField::Category {
        let (row, value) = match form.focused {
            FormField::Text => (rows[0], &form.text),
            _ => (rows[1], &form.source),
        };
        let column = value[..form.cursor_position.min(value.len())].chars().count() as u16;
        let max_x = row.x + row.width.saturating_sub(1);
        let cursor_x = (row.x + 10 + column).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, row.y));
    }
}

fn draw_quote_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.current_category.as_str()));

    let body = ui::list_body(state);
    if let Some(text) = body.placeholder() {
        let color = if body == ListBody::Loading { Color::Yellow } else { Color::DarkGray };
        let placeholder = Paragraph::new(text)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem> = state
        .quotes
        .iter()
        .enumerate()
        .map(|(i, quote)| quote_item(quote, i == state.selected, state.is_voting(quote.id)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_footer(f: &mut Frame, state: &RenderState, area: Rect) {
    let footer = Paragraph::new(ui::footer_text(state))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let bar = match &state.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => Color::Green,
                StatusLevel::Error => Color::Red,
            };
            Paragraph::new(format!(" [{}] {}", status.timestamp.format("%H:%M:%S"), status.text))
                .style(Style::default().fg(color))
        }
        None => Paragraph::new(" ←/→:category | ↑/↓:select | i/m/f:vote | o:open source | n:add | ?:help | q:quit ")
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 MOTIV QUOTES - Keyboard Shortcuts

 CATEGORIES
   ← / → (h / l)      Previous / next category
   0-8                Jump to a category (0 or a = All)
   r                  Reload current category

 QUOTES
   ↑ / ↓ (k / j)      Select quote
   i                  Vote interesting 👍
   m                  Vote mind blowing 🤯
   f                  Vote false ⛔
   o / Enter          Open source link

 SHARE A QUOTE
   n                  Open / close the form
   Tab / Shift+Tab    Next / previous field
   ← / →              Choose category
   Enter              Post
   Esc                Close

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_notification_popup(f: &mut Frame, message: &str, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error (any key to dismiss) ")
        .style(Style::default().bg(Color::Black));

    let body = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(body, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
