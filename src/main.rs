//! Zellij plugin wrapper and entry point.
//!
//! Translates Zellij events into [`pixellij::Event`]s, feeds them to the
//! library's event handler, and carries out the returned [`Action`]s with the
//! Zellij host API.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │      Zellij Main Thread      │
//! │  ┌────────────────────────┐  │   web_request ┌─────────────┐
//! │  │  State (plugin)        │──┼──────────────►│ Pixabay API │
//! │  │  keys, mouse, render   │◄─┼───────────────└─────────────┘
//! │  └────────────────────────┘  │ WebRequestResult
//! │        │ DecodePage  ▲       │
//! │        ▼             │       │
//! │  ┌────────────────────────┐  │
//! │  │ PixellijWorker         │  │  ← JSON decoding
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! # Keybindings
//!
//! Browsing:
//! - `j`/`Down`, `k`/`Up` (or `Ctrl+n`/`Ctrl+p`): Move selection
//! - `Enter`: Open the selected image in the preview overlay
//! - `m`/`Space`: Load the next page
//! - `o`: Open the selected image in the browser
//! - `/`: Edit the query
//! - `q`: Close the plugin
//!
//! Typing a query:
//! - Characters edit, `Backspace` deletes, `Enter` searches, `Esc` cancels
//!
//! Preview overlay:
//! - `Esc` or a click outside the box closes it, `o` opens the image in the browser
//!
//! Mouse: clicking a result opens it, the wheel scrolls the list.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use pixellij::gateway::FetchTicket;
use pixellij::worker::{PixellijWorker, WorkerMessage, WorkerResponse};
use pixellij::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(PixellijWorker, pixellij_worker, PIXELLIJ_WORKER);

/// Name of the worker registered above, also used as the reply message name.
const WORKER_NAME: &str = "pixellij";

/// Command used to open image URLs on the host desktop.
const OPENER: &str = "xdg-open";

struct State {
    app: pixellij::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: pixellij::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        pixellij::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();
        self.app = pixellij::initialize(&config);

        if config.gateway.api_key.is_none() {
            tracing::warn!("no api_key configured, searches will fail");
        }

        request_permission(&[
            PermissionType::ReadApplicationState,
            PermissionType::WebAccess,
            PermissionType::RunCommands,
        ]);
        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::event_name(&event);
        let _guard = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::Mouse(mouse) => Self::map_mouse_event(mouse),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_response(status, &body, &context)
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                Self::map_custom_message_event(&message, &payload)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                if matches!(status, PermissionStatus::Denied) {
                    tracing::warn!("permissions denied, image search is unavailable");
                }
                return false;
            }
            _ => None,
        };

        let Some(our_event) = our_event else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.app.set_pane_size(rows, cols);
        pixellij::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(mouse) => format!("Mouse({mouse:?})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(name, _) => format!("CustomMessage({name})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if self.app.overlay.is_listening() {
            return match key.bare_key {
                BareKey::Esc => Some(Event::DismissOverlay),
                BareKey::Char('o') => Some(Event::OpenInBrowser),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }

        if self.app.input_mode.is_search() {
            return match key.bare_key {
                BareKey::Enter => Some(Event::SubmitSearch),
                BareKey::Esc => Some(Event::CancelSearch),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            };
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Some(Event::KeyDown),
            BareKey::Up | BareKey::Char('k') => Some(Event::KeyUp),
            BareKey::Enter => Some(Event::OpenSelected),
            BareKey::Char('m' | ' ') => Some(Event::LoadMore),
            BareKey::Char('o') => Some(Event::OpenInBrowser),
            BareKey::Char('/') => Some(Event::EnterSearch),
            BareKey::Char('q') => Some(Event::CloseFocus),
            _ => None,
        }
    }

    /// Mouse positions arrive 0-indexed; the library works in terminal cells.
    fn map_mouse_event(mouse: Mouse) -> Option<Event> {
        match mouse {
            Mouse::LeftClick(line, col) => {
                let row = usize::try_from(line).ok()?;
                Some(Event::Click { row: row + 1, col: col + 1 })
            }
            Mouse::ScrollUp(rows) => Some(Event::ScrollUp(rows)),
            Mouse::ScrollDown(rows) => Some(Event::ScrollDown(rows)),
            _ => None,
        }
    }

    fn map_web_response(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(ticket) = FetchTicket::from_context(context) else {
            tracing::debug!(status = status, "ignoring web response without a fetch ticket");
            return None;
        };
        tracing::debug!(
            generation = ticket.generation,
            page = ticket.page,
            status = status,
            body_len = body.len(),
            "page downloaded"
        );
        Some(Event::PageDownloaded {
            ticket,
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        })
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }
        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::error!(error = %e, "failed to deserialize worker response");
                Some(Event::WorkerResponse(WorkerResponse::Error {
                    message: format!("Malformed worker response: {e}"),
                }))
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => post_message_to(PluginMessage {
                worker_name: Some(WORKER_NAME.to_string()),
                name: WORKER_NAME.to_string(),
                payload,
            }),
            Err(e) => tracing::error!(error = %e, "failed to serialize worker message"),
        }
    }

    #[tracing::instrument(level = "debug", skip(action), fields(action = action.kind()))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::FetchPage(request) => {
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    request.headers.clone(),
                    vec![],
                    request.context.clone(),
                );
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::OpenUrl(url) => {
                run_command(&[OPENER, url.as_str()], BTreeMap::new());
            }
        }
    }
}
