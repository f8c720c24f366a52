//! End-to-end search flows: events go through the handler, downloads go
//! through the worker, and the result is checked on the rendered screen.

use pixellij::app::{handle_event, Action, AppState, Event, OverlayState, SessionStatus};
use pixellij::gateway::{FetchTicket, GatewayConfig, PixabayGateway};
use pixellij::ui::render_to_string;
use pixellij::worker::{PixellijWorker, WorkerMessage};
use pixellij::Theme;

const ROWS: usize = 24;
const COLS: usize = 100;

fn state() -> AppState {
    let mut state = AppState::new(
        PixabayGateway::new(GatewayConfig {
            api_key: Some("test-key".to_string()),
            ..GatewayConfig::default()
        }),
        Theme::default(),
    );
    state.set_pane_size(ROWS, COLS);
    state
}

fn pixabay_body(first_id: u64, count: u64, total_hits: u64) -> String {
    let hits: Vec<serde_json::Value> = (first_id..first_id + count)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "webformatURL": format!("https://cdn.pixabay.com/photo/{id}_640.jpg"),
                "largeImageURL": format!("https://pixabay.com/get/{id}_1280.jpg"),
                "tags": format!("cat, kitten, pet {id}"),
            })
        })
        .collect();
    serde_json::json!({ "total": total_hits, "totalHits": total_hits, "hits": hits }).to_string()
}

fn single_fetch(actions: &[Action]) -> FetchTicket {
    match actions {
        [Action::FetchPage(request)] => FetchTicket::from_context(&request.context).expect("ticket in context"),
        other => panic!("expected a single page fetch, got {other:?}"),
    }
}

/// Plays the host and worker side of a page request. Returns whether the
/// final reply asked for a re-render.
fn complete(state: &mut AppState, ticket: &FetchTicket, status: u16, body: &str) -> bool {
    let (_, actions) = handle_event(
        state,
        &Event::PageDownloaded {
            ticket: ticket.clone(),
            status,
            body: body.to_string(),
        },
    )
    .expect("download handled");

    let message: WorkerMessage = match actions.as_slice() {
        [Action::PostToWorker(message)] => message.clone(),
        [] => return false,
        other => panic!("expected a worker message, got {other:?}"),
    };

    let response = PixellijWorker.handle_message(message);
    handle_event(state, &Event::WorkerResponse(response))
        .expect("worker reply handled")
        .0
}

fn screen(state: &AppState) -> String {
    render_to_string(state, ROWS, COLS)
}

#[test]
fn cats_search_renders_first_page() {
    let mut state = state();
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery("cats".to_string())).expect("submit");
    let ticket = single_fetch(&actions);

    match actions.as_slice() {
        [Action::FetchPage(request)] => {
            assert!(request.url.contains("key=test-key"));
            assert!(request.url.contains("q=cats"));
            assert!(request.url.contains("page=1"));
        }
        other => panic!("unexpected actions {other:?}"),
    }
    assert!(screen(&state).contains("Loading..."));

    assert!(complete(&mut state, &ticket, 200, &pixabay_body(1, 12, 500)));

    let output = screen(&state);
    assert_eq!(state.results().len(), 12);
    assert!(output.contains("\"cats\" (12 images, page 1)"));
    assert!(output.contains("#1"));
    assert!(output.contains("[ Load more ]"));
    assert!(output.contains("m: more"));
}

#[test]
fn two_pages_reach_the_end_marker() {
    let mut state = state();
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery("cats".to_string())).expect("submit");
    complete(&mut state, &single_fetch(&actions), 200, &pixabay_body(1, 12, 24));

    let (_, actions) = handle_event(&mut state, &Event::LoadMore).expect("load more");
    let second = single_fetch(&actions);
    assert_eq!(second.page, 2);

    complete(&mut state, &second, 200, &pixabay_body(13, 12, 24));

    assert_eq!(state.results().len(), 24);
    assert_eq!(state.gateway.is_last_page(), Some(true));
    assert!(state.pagination.session().is_terminal());

    let (should_render, actions) = handle_event(&mut state, &Event::LoadMore).expect("load more");
    assert!(!should_render);
    assert!(actions.is_empty());

    // The view jumped towards the newly appended rows.
    assert!(state.viewport_top > 0);
    let output = screen(&state);
    assert!(output.contains("No more content"));
    assert!(!output.contains("m: more"));
}

#[test]
fn no_results_shows_error_in_place_of_list() {
    let mut state = state();
    let (_, actions) =
        handle_event(&mut state, &Event::SubmitQuery("zzzznoresults".to_string())).expect("submit");
    complete(&mut state, &single_fetch(&actions), 200, &pixabay_body(0, 0, 0));

    assert_eq!(
        state.pagination.session().status(),
        &SessionStatus::Error("No results were found for zzzznoresults...".to_string())
    );
    let output = screen(&state);
    assert!(output.contains("No results were found for zzzznoresults..."));
    assert!(output.contains("Press / to search again"));
}

#[test]
fn provider_rejection_is_reported() {
    let mut state = state();
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery("cats".to_string())).expect("submit");
    complete(&mut state, &single_fetch(&actions), 400, "[ERROR 400] \"key\" is invalid");

    let message = state
        .pagination
        .session()
        .status()
        .error_message()
        .expect("error status")
        .to_string();
    assert!(message.contains("is invalid"), "{message}");
    assert!(screen(&state).contains("is invalid"));
}

#[test]
fn superseded_download_never_reaches_the_worker() {
    let mut state = state();
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery("cats".to_string())).expect("submit");
    let cats = single_fetch(&actions);
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery("dogs".to_string())).expect("submit");
    let dogs = single_fetch(&actions);

    assert!(!complete(&mut state, &cats, 200, &pixabay_body(1, 12, 100)));
    assert!(state.results().is_empty());
    assert!(state.pagination.session().status().is_loading());

    assert!(complete(&mut state, &dogs, 200, &pixabay_body(50, 3, 3)));
    assert_eq!(state.results().len(), 3);
    assert_eq!(state.results()[0].id, 50);
}

#[test]
fn clicking_a_row_opens_preview_and_backdrop_closes_it() {
    let mut state = state();
    let (_, actions) = handle_event(&mut state, &Event::SubmitQuery("cats".to_string())).expect("submit");
    complete(&mut state, &single_fetch(&actions), 200, &pixabay_body(1, 12, 500));

    let first_row = state.list_area().first_row;
    let (should_render, _) =
        handle_event(&mut state, &Event::Click { row: first_row + 1, col: 5 }).expect("click");
    assert!(should_render);
    assert_eq!(
        state.overlay.state(),
        &OverlayState::Open {
            full_image_url: "https://pixabay.com/get/2_1280.jpg".to_string(),
            caption: "cat, kitten, pet 2".to_string(),
        }
    );
    assert!(screen(&state).contains("https://pixabay.com/get/2_1280.jpg"));

    let (_, actions) = handle_event(&mut state, &Event::OpenInBrowser).expect("open");
    assert_eq!(actions, vec![Action::OpenUrl("https://pixabay.com/get/2_1280.jpg".to_string())]);

    let (should_render, _) = handle_event(&mut state, &Event::Click { row: 1, col: 1 }).expect("click");
    assert!(should_render);
    assert_eq!(state.overlay.state(), &OverlayState::Closed);
    assert!(!state.overlay.is_listening());
}

#[test]
fn typing_a_query_in_the_search_bar() {
    let mut state = state();
    handle_event(&mut state, &Event::EnterSearch).expect("enter search");
    for c in "red car".chars() {
        handle_event(&mut state, &Event::Char(c)).expect("type");
    }
    handle_event(&mut state, &Event::Backspace).expect("backspace");
    assert!(screen(&state).contains("red ca"));

    let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).expect("submit");
    let ticket = single_fetch(&actions);
    assert_eq!(ticket.query, "red ca");
    assert!(!state.input_mode.is_search());
}
