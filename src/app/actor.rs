//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::{AppState, StatusMessage};
use crate::browser;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
        backend_label: impl Into<String>,
    ) -> Self {
        AppActor {
            state: AppState::new(backend_label),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Mount: first load for the default filter
        let initial = self.state.begin_load();
        self.dispatch(Some(initial));
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    let follow_up = self.state.handle_response(response);
                    self.dispatch(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn dispatch(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event. Returns true if app should quit.
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Category filter
            UiEvent::SelectFilter(index) => {
                let cmd = self.state.select_filter(index);
                self.dispatch(cmd);
            }
            UiEvent::NextCategory => {
                let cmd = self.state.next_category();
                self.dispatch(Some(cmd));
            }
            UiEvent::PrevCategory => {
                let cmd = self.state.prev_category();
                self.dispatch(Some(cmd));
            }
            UiEvent::Reload => {
                let cmd = self.state.reload();
                self.dispatch(Some(cmd));
            }

            // Quote list
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::Vote(kind) => {
                let cmd = self.state.vote_selected(kind);
                self.dispatch(cmd);
            }
            UiEvent::OpenSource => {
                if let Some(url) = self.state.selected_source() {
                    if let Err(e) = browser::open_url(&url) {
                        tracing::warn!(url = %url, error = %e, "Could not open source link");
                        self.state.status = Some(StatusMessage::error(format!("Could not open link: {}", e)));
                    }
                }
            }

            // Submission form
            UiEvent::ToggleForm => self.state.toggle_form(),
            UiEvent::CloseForm => self.state.close_form(),
            UiEvent::NextField => self.state.form.focus_next(),
            UiEvent::PrevField => self.state.form.focus_prev(),
            UiEvent::CharInput(c) => self.state.form.enter_char(c),
            UiEvent::Backspace => self.state.form.delete_char(),
            UiEvent::CursorLeft => self.state.form.move_cursor_left(),
            UiEvent::CursorRight => self.state.form.move_cursor_right(),
            UiEvent::NextCategoryChoice => self.state.form.next_category(),
            UiEvent::PrevCategoryChoice => self.state.form.prev_category(),
            UiEvent::Submit => {
                let cmd = self.state.submit();
                self.dispatch(cmd);
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),
            UiEvent::DismissNotification => self.state.dismiss_notification(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
