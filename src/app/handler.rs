//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which user input, web
//! responses and worker replies reach the controllers. It mutates
//! [`AppState`] synchronously and returns the side effects to perform as
//! [`Action`]s, together with a flag telling the runtime whether to re-render.
//!
//! # Fetch round trip
//!
//! ```text
//! SubmitSearch ──► PaginationController::submit_query ──► FetchTicket
//!              ──► Action::FetchPage (ticket in request context)
//! PageDownloaded { ticket, status, body }
//!              ──► Action::PostToWorker(DecodePage)
//! WorkerResponse::PageDecoded / PageFailed
//!              ──► PaginationController::reconcile ──► Applied | Stale
//! ```
//!
//! # Example
//!
//! ```rust
//! use pixellij::app::{handle_event, AppState, Event};
//! use pixellij::gateway::{GatewayConfig, PixabayGateway};
//! use pixellij::ui::Theme;
//!
//! let mut state = AppState::new(PixabayGateway::new(GatewayConfig::default()), Theme::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::EnterSearch)?;
//! assert!(should_render);
//! assert!(actions.is_empty());
//! # Ok::<(), pixellij::PixellijError>(())
//! ```

use super::modes::InputMode;
use super::overlay::{DismissGesture, OverlayState};
use super::pagination::Reconciliation;
use crate::app::{Action, AppState};
use crate::domain::error::{PixellijError, Result};
use crate::gateway::FetchTicket;
use crate::ui::layout::OverlayBox;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host responses, or worker replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one (wraps to top).
    KeyDown,
    /// Moves selection up by one (wraps to bottom).
    KeyUp,
    /// Opens the search bar, pre-filled with the current query.
    EnterSearch,
    /// Appends a character to the query being typed.
    Char(char),
    /// Removes the last character of the query being typed.
    Backspace,
    /// Submits the typed query and leaves search mode.
    SubmitSearch,
    /// Submits `query` directly, bypassing the search bar.
    SubmitQuery(String),
    /// Leaves search mode without changing the query.
    CancelSearch,
    /// Opens the selected result in the overlay.
    OpenSelected,
    /// Requests the next page of results.
    LoadMore,
    /// Mouse wheel up by the given number of rows.
    ScrollUp(usize),
    /// Mouse wheel down by the given number of rows.
    ScrollDown(usize),
    /// Left click at a 1-indexed terminal cell.
    Click { row: usize, col: usize },
    /// Escape while the overlay is listening for dismissal.
    DismissOverlay,
    /// Opens the overlay image (or the selected result) with the desktop handler.
    OpenInBrowser,
    /// Hides the plugin pane.
    CloseFocus,

    /// The host finished a page request.
    ///
    /// `status` is 0 when the request never produced a response.
    PageDownloaded {
        ticket: FetchTicket,
        status: u16,
        body: String,
    },

    /// Wraps a reply from the background worker.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Variant name for spans, without the payload.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::KeyDown => "key_down",
            Self::KeyUp => "key_up",
            Self::EnterSearch => "enter_search",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::SubmitSearch => "submit_search",
            Self::SubmitQuery(_) => "submit_query",
            Self::CancelSearch => "cancel_search",
            Self::OpenSelected => "open_selected",
            Self::LoadMore => "load_more",
            Self::ScrollUp(_) => "scroll_up",
            Self::ScrollDown(_) => "scroll_down",
            Self::Click { .. } => "click",
            Self::DismissOverlay => "dismiss_overlay",
            Self::OpenInBrowser => "open_in_browser",
            Self::CloseFocus => "close_focus",
            Self::PageDownloaded { .. } => "page_downloaded",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean in the returned pair tells the runtime whether the view changed.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for handlers that touch the
/// filesystem or the host.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::EnterSearch => {
            state.input_mode = InputMode::Search;
            state.draft_query = state.pagination.session().query().to_string();
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.draft_query.push(*c);
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if !state.input_mode.is_search() {
                return Ok((false, vec![]));
            }
            state.draft_query.pop();
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            state.input_mode = InputMode::Normal;
            let query = state.draft_query.trim().to_string();
            Ok((true, submit_query(state, &query)))
        }
        Event::SubmitQuery(query) => Ok((true, submit_query(state, query.trim()))),
        Event::CancelSearch => {
            state.input_mode = InputMode::Normal;
            state.draft_query.clear();
            Ok((true, vec![]))
        }
        Event::OpenSelected => {
            let Some(item) = state.selected_item() else {
                tracing::debug!("no result selected");
                return Ok((false, vec![]));
            };
            let (url, caption) = (item.full_image_url.clone(), item.display_caption().to_string());
            state.overlay.open(url, caption);
            Ok((true, vec![]))
        }
        Event::LoadMore => {
            let content_height = state.content_height();
            let Some(ticket) = state.pagination.request_more(content_height) else {
                return Ok((false, vec![]));
            };
            state.scroll_to_target();
            Ok((true, start_fetch(state, &ticket)))
        }
        Event::ScrollUp(rows) => {
            state.scroll_by(-isize::try_from(*rows).unwrap_or(isize::MAX));
            Ok((true, vec![]))
        }
        Event::ScrollDown(rows) => {
            state.scroll_by(isize::try_from(*rows).unwrap_or(isize::MAX));
            Ok((true, vec![]))
        }
        Event::Click { row, col } => Ok((handle_click(state, *row, *col), vec![])),
        Event::DismissOverlay => Ok((state.overlay.dismiss(DismissGesture::EscapeKey), vec![])),
        Event::OpenInBrowser => {
            let url = match state.overlay.state() {
                OverlayState::Open { full_image_url, .. } => Some(full_image_url.clone()),
                OverlayState::Closed => state.selected_item().map(|item| item.full_image_url.clone()),
            };
            Ok((false, url.map(Action::OpenUrl).into_iter().collect()))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::PageDownloaded { ticket, status, body } => {
            if !state.pagination.is_current(ticket) {
                tracing::debug!(
                    generation = ticket.generation,
                    query = %ticket.query,
                    page = ticket.page,
                    "dropping response for superseded fetch"
                );
                return Ok((false, vec![]));
            }
            tracing::debug!(
                generation = ticket.generation,
                page = ticket.page,
                status = status,
                body_len = body.len(),
                "forwarding page to worker"
            );
            Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::decode_page(
                    ticket.clone(),
                    *status,
                    body.clone(),
                    state.gateway.per_page(),
                ))],
            ))
        }
        Event::WorkerResponse(response) => Ok((handle_worker_response(state, response), vec![])),
    }
}

/// Switches to `query`, returning the fetch action for its first page if any.
fn submit_query(state: &mut AppState, query: &str) -> Vec<Action> {
    let changed = query != state.pagination.session().query();
    let ticket = state.pagination.submit_query(query);

    if changed {
        state.gateway.reset();
        state.overlay.close();
        state.reset_view();
    }

    ticket.map_or_else(Vec::new, |ticket| start_fetch(state, &ticket))
}

/// Turns a freshly minted ticket into a request, or fails it right away when
/// the request cannot be built.
fn start_fetch(state: &mut AppState, ticket: &FetchTicket) -> Vec<Action> {
    match state.gateway.page_request(ticket) {
        Ok(request) => vec![Action::FetchPage(request)],
        Err(e) => {
            tracing::warn!(error = %e, "cannot issue page request");
            state.pagination.reconcile(ticket, Err(e));
            vec![]
        }
    }
}

fn handle_click(state: &mut AppState, row: usize, col: usize) -> bool {
    if state.overlay.is_listening() {
        let on_content = OverlayBox::for_pane(state.pane_rows, state.pane_cols).contains(row, col);
        return state.overlay.dismiss(DismissGesture::Click { on_content });
    }

    let Some(index) = state.item_at_row(row) else {
        return false;
    };
    state.selected_index = index;
    if let Some(item) = state.selected_item() {
        let (url, caption) = (item.full_image_url.clone(), item.display_caption().to_string());
        state.overlay.open(url, caption);
    }
    true
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> bool {
    let applied = match response {
        WorkerResponse::PageDecoded { ticket, page } => {
            if state.pagination.is_current(ticket) {
                state.gateway.record(page);
            }
            state.pagination.reconcile(ticket, Ok(page.clone()))
        }
        WorkerResponse::PageFailed { ticket, failure } => {
            state.pagination.reconcile(ticket, Err(failure.clone().into()))
        }
        WorkerResponse::Error { message } => {
            tracing::error!(error = %message, "worker error");
            let Some(ticket) = state.pagination.in_flight().cloned() else {
                return false;
            };
            state
                .pagination
                .reconcile(&ticket, Err(PixellijError::Worker(message.clone())))
        }
    };

    if applied == Reconciliation::Stale {
        return false;
    }
    state.scroll_to_target();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionStatus;
    use crate::domain::ResultItem;
    use crate::gateway::{FetchedPage, GatewayConfig, PixabayGateway};
    use crate::ui::viewmodel::StatusLine;
    use crate::ui::Theme;
    use crate::worker::FetchFailure;

    fn state() -> AppState {
        AppState::new(
            PixabayGateway::new(GatewayConfig {
                api_key: Some("key".to_string()),
                ..GatewayConfig::default()
            }),
            Theme::default(),
        )
    }

    fn page(start: u64, count: u64, last_page: bool) -> FetchedPage {
        FetchedPage {
            items: (start..start + count)
                .map(|id| ResultItem::new(id, format!("https://cdn/{id}_640.jpg"), format!("https://cdn/{id}.jpg"), "cat"))
                .collect(),
            last_page,
        }
    }

    fn fetched_ticket(actions: &[Action]) -> FetchTicket {
        match actions {
            [Action::FetchPage(request)] => FetchTicket::from_context(&request.context).unwrap(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn search(state: &mut AppState, query: &str) -> Vec<Action> {
        handle_event(state, &Event::EnterSearch).unwrap();
        state.draft_query = query.to_string();
        handle_event(state, &Event::SubmitSearch).unwrap().1
    }

    fn deliver(state: &mut AppState, ticket: &FetchTicket, page: FetchedPage) -> bool {
        handle_event(
            state,
            &Event::WorkerResponse(WorkerResponse::PageDecoded {
                ticket: ticket.clone(),
                page,
            }),
        )
        .unwrap()
        .0
    }

    #[test]
    fn search_issues_first_page_request() {
        let mut state = state();
        let actions = search(&mut state, "  cats ");

        let ticket = fetched_ticket(&actions);
        assert_eq!(ticket.query, "cats");
        assert_eq!(ticket.page, 1);
        assert!(state.pagination.session().status().is_loading());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn download_is_forwarded_to_worker_only_when_current() {
        let mut state = state();
        let first = fetched_ticket(&search(&mut state, "cats"));
        let second = fetched_ticket(&search(&mut state, "dogs"));

        let (_, actions) = handle_event(
            &mut state,
            &Event::PageDownloaded {
                ticket: first,
                status: 200,
                body: "{}".to_string(),
            },
        )
        .unwrap();
        assert!(actions.is_empty());

        let (_, actions) = handle_event(
            &mut state,
            &Event::PageDownloaded {
                ticket: second.clone(),
                status: 200,
                body: "{}".to_string(),
            },
        )
        .unwrap();
        assert!(matches!(
            actions.as_slice(),
            [Action::PostToWorker(WorkerMessage::DecodePage { ticket, per_page: 12, .. })] if *ticket == second
        ));
    }

    #[test]
    fn load_more_then_terminal_page() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        assert!(deliver(&mut state, &ticket, page(0, 12, false)));
        assert_eq!(state.gateway.is_last_page(), Some(false));

        let (_, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        let ticket = fetched_ticket(&actions);
        assert_eq!(ticket.page, 2);
        assert_eq!(state.pagination.session().scroll_target(), 10);

        assert!(deliver(&mut state, &ticket, page(12, 12, true)));
        let session = state.pagination.session();
        assert_eq!(session.results().len(), 24);
        assert!(session.is_terminal());
        assert_eq!(state.gateway.is_last_page(), Some(true));
        assert_eq!(state.compute_viewmodel(24, 80).status, StatusLine::NoMoreContent);

        let (render, actions) = handle_event(&mut state, &Event::LoadMore).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_worker_reply_is_ignored() {
        let mut state = state();
        let cats = fetched_ticket(&search(&mut state, "cats"));
        let dogs = fetched_ticket(&search(&mut state, "dogs"));

        assert!(!deliver(&mut state, &cats, page(0, 12, false)));
        assert!(state.pagination.session().results().is_empty());
        assert_eq!(state.gateway.is_last_page(), None);

        assert!(deliver(&mut state, &dogs, page(100, 3, true)));
        assert_eq!(state.pagination.session().results()[0].id, 100);
    }

    #[test]
    fn empty_first_page_reports_no_results() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "zzzznoresults"));
        deliver(&mut state, &ticket, page(0, 0, true));
        assert_eq!(
            state.pagination.session().status(),
            &SessionStatus::Error("No results were found for zzzznoresults...".to_string())
        );
    }

    #[test]
    fn provider_failure_shows_its_message() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PageFailed {
                ticket,
                failure: FetchFailure::Provider {
                    status: 400,
                    message: "[ERROR 400] \"page\" is out of valid range.".to_string(),
                },
            }),
        )
        .unwrap();
        assert_eq!(
            state.pagination.session().status().error_message(),
            Some("[ERROR 400] \"page\" is out of valid range.")
        );
    }

    #[test]
    fn worker_error_fails_in_flight_fetch() {
        let mut state = state();
        search(&mut state, "cats");
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                message: "Malformed worker message".to_string(),
            }),
        )
        .unwrap();
        assert!(render);
        assert!(state.pagination.in_flight().is_none());
        assert!(state.pagination.session().status().error_message().is_some());
    }

    #[test]
    fn missing_api_key_fails_without_request() {
        let mut state = AppState::new(PixabayGateway::new(GatewayConfig::default()), Theme::default());
        let actions = search(&mut state, "cats");
        assert!(actions.is_empty());
        assert_eq!(
            state.pagination.session().status().error_message(),
            Some("Configuration error: api_key is not set in the plugin configuration")
        );
    }

    #[test]
    fn resubmitting_same_query_does_not_refetch() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        deliver(&mut state, &ticket, page(0, 12, false));
        state.selected_index = 4;

        assert!(search(&mut state, "cats").is_empty());
        assert_eq!(state.pagination.session().results().len(), 12);
        assert_eq!(state.selected_index, 4);
    }

    #[test]
    fn clearing_the_query_returns_to_welcome() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        deliver(&mut state, &ticket, page(0, 12, false));

        assert!(search(&mut state, "").is_empty());
        assert!(state.pagination.session().results().is_empty());
        assert!(state.compute_viewmodel(24, 80).empty_state.is_some_and(|e| !e.is_error));
    }

    #[test]
    fn click_opens_overlay_and_backdrop_click_closes_it() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        deliver(&mut state, &ticket, page(0, 12, false));
        state.set_pane_size(31, 80);

        assert!(handle_event(&mut state, &Event::Click { row: 6, col: 5 }).unwrap().0);
        assert_eq!(state.selected_index, 2);
        assert!(state.overlay.is_listening());

        // Inside the overlay box: ignored.
        assert!(!handle_event(&mut state, &Event::Click { row: 15, col: 40 }).unwrap().0);
        assert!(state.overlay.state().is_open());

        assert!(handle_event(&mut state, &Event::Click { row: 2, col: 2 }).unwrap().0);
        assert!(!state.overlay.state().is_open());
        assert!(!state.overlay.is_listening());
    }

    #[test]
    fn error_screen_rows_are_not_interactive() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        deliver(&mut state, &ticket, page(0, 12, false));
        let more = fetched_ticket(&handle_event(&mut state, &Event::LoadMore).unwrap().1);
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::PageFailed {
                ticket: more,
                failure: FetchFailure::Network {
                    message: "timeout".to_string(),
                },
            }),
        )
        .unwrap();
        assert_eq!(state.results().len(), 12);
        assert!(state.compute_viewmodel(24, 80).display_items.is_empty());

        let first_row = state.list_area().first_row;
        let (render, _) = handle_event(&mut state, &Event::Click { row: first_row + 1, col: 5 }).unwrap();
        assert!(!render);
        assert_eq!(state.overlay.state(), &OverlayState::Closed);

        let (render, _) = handle_event(&mut state, &Event::OpenSelected).unwrap();
        assert!(!render);
        assert_eq!(state.overlay.state(), &OverlayState::Closed);

        let selected = state.selected_index;
        handle_event(&mut state, &Event::KeyDown).unwrap();
        assert_eq!(state.selected_index, selected);

        let (_, actions) = handle_event(&mut state, &Event::OpenInBrowser).unwrap();
        assert!(actions.is_empty());
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn downloaded_body_stays_out_of_spans() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        let body = format!("{{\"totalHits\":1,\"hits\":[],\"marker\":\"{}\"}}", "x".repeat(64));

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::NEW)
            .finish();

        let (_, actions) = tracing::subscriber::with_default(subscriber, || {
            handle_event(
                &mut state,
                &Event::PageDownloaded {
                    ticket,
                    status: 200,
                    body: body.clone(),
                },
            )
            .unwrap()
        });

        assert_eq!(actions.len(), 1);
        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("page_downloaded"), "{output}");
        assert!(!output.contains(&"x".repeat(64)), "{output}");
    }

    #[test]
    fn open_in_browser_prefers_overlay_image() {
        let mut state = state();
        let ticket = fetched_ticket(&search(&mut state, "cats"));
        deliver(&mut state, &ticket, page(0, 3, true));

        let (_, actions) = handle_event(&mut state, &Event::OpenInBrowser).unwrap();
        assert_eq!(actions, vec![Action::OpenUrl("https://cdn/0.jpg".to_string())]);

        state.overlay.open("https://cdn/full.jpg", "cat");
        let (_, actions) = handle_event(&mut state, &Event::OpenInBrowser).unwrap();
        assert_eq!(actions, vec![Action::OpenUrl("https://cdn/full.jpg".to_string())]);

        assert!(handle_event(&mut state, &Event::DismissOverlay).unwrap().0);
        assert!(!handle_event(&mut state, &Event::DismissOverlay).unwrap().0);
    }
}
