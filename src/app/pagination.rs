//! Pagination controller: query changes, page advances and reconciliation.
//!
//! The controller owns the [`SessionState`] and is the only code that mutates
//! it. It never performs I/O itself; starting a fetch returns a
//! [`FetchTicket`] that the caller turns into an HTTP request, and the decoded
//! outcome is handed back through [`PaginationController::reconcile`].
//!
//! # Staleness
//!
//! Fetches are never cancelled. Every fetch gets a ticket with a fresh
//! generation number and the controller remembers the one in flight. A
//! response is applied only if its ticket is still the in-flight ticket;
//! anything else (a response for a superseded query, or a duplicate) is
//! discarded without touching the session.
//!
//! ```text
//! submit_query("cats") ──► ticket #1 (cats, 1) ──► Loading
//! submit_query("dogs") ──► ticket #2 (dogs, 1) ──► Loading
//! reconcile(#1, ..)    ──► Stale, session untouched
//! reconcile(#2, ..)    ──► Applied, Ready / Error
//! ```

use super::session::SessionState;
use crate::domain::error::{PixellijError, Result};
use crate::gateway::{FetchTicket, FetchedPage};

/// Rows kept above newly appended content when scrolling to it.
pub const SCROLL_OFFSET_ROWS: usize = 3;

/// Result of handing a fetch outcome to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The outcome belonged to the in-flight fetch and was applied.
    Applied,
    /// The outcome belonged to a superseded fetch and was dropped.
    Stale,
}

/// Drives one query/pagination lifecycle.
#[derive(Debug, Clone, Default)]
pub struct PaginationController {
    session: SessionState,
    in_flight: Option<FetchTicket>,
    generation: u64,
}

impl PaginationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the session for rendering.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Ticket of the fetch currently awaited, if any.
    #[must_use]
    pub const fn in_flight(&self) -> Option<&FetchTicket> {
        self.in_flight.as_ref()
    }

    /// Switches to `new_query` and starts fetching its first page.
    ///
    /// Submitting the current query again is a no-op and returns `None`.
    /// Submitting the empty query resets the session back to its "no search
    /// yet" baseline without fetching.
    pub fn submit_query(&mut self, new_query: &str) -> Option<FetchTicket> {
        if new_query == self.session.query() {
            tracing::debug!(query = %new_query, "query unchanged, ignoring submission");
            return None;
        }

        tracing::debug!(
            previous_query = %self.session.query(),
            query = %new_query,
            superseded = ?self.in_flight.as_ref().map(|t| t.generation),
            "starting new query session"
        );

        self.session.reset_for(new_query);
        self.in_flight = None;

        if new_query.is_empty() {
            return None;
        }

        Some(self.begin_fetch())
    }

    /// Whether [`request_more`](Self::request_more) would start a fetch.
    #[must_use]
    pub fn can_request_more(&self) -> bool {
        !self.session.status().is_loading()
            && !self.session.is_terminal()
            && !self.session.results().is_empty()
    }

    /// Advances to the next page and starts fetching it.
    ///
    /// `content_height` is the number of rendered content rows; the scroll
    /// target is placed [`SCROLL_OFFSET_ROWS`] above its end so the view lands
    /// just above the new results. Rejected (returns `None`) while loading,
    /// after the last page, or before any results exist.
    pub fn request_more(&mut self, content_height: usize) -> Option<FetchTicket> {
        if !self.can_request_more() {
            tracing::debug!(
                status = ?self.session.status(),
                terminal = self.session.is_terminal(),
                result_count = self.session.results().len(),
                "load more rejected"
            );
            return None;
        }

        self.session
            .advance_page(content_height.saturating_sub(SCROLL_OFFSET_ROWS));
        Some(self.begin_fetch())
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Non-empty pages are appended and end the cycle in `Ready`; an empty
    /// page or an error ends it in `Error`. Outcomes for any ticket other than
    /// the in-flight one are discarded.
    pub fn reconcile(&mut self, ticket: &FetchTicket, outcome: Result<FetchedPage>) -> Reconciliation {
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation,
                query = %ticket.query,
                page = ticket.page,
                current = ?self.in_flight.as_ref().map(|t| t.generation),
                "discarding stale fetch outcome"
            );
            return Reconciliation::Stale;
        }

        self.in_flight = None;

        let outcome = outcome.and_then(|page| {
            if page.items.is_empty() {
                Err(PixellijError::EmptyResult {
                    query: ticket.query.clone(),
                })
            } else {
                Ok(page)
            }
        });

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    query = %ticket.query,
                    page = ticket.page,
                    item_count = page.items.len(),
                    last_page = page.last_page,
                    "page applied"
                );
                self.session.append_page(page.items, page.last_page);
            }
            Err(e) => {
                tracing::debug!(query = %ticket.query, page = ticket.page, error = %e, "page fetch failed");
                self.session.fail(e.to_string());
            }
        }

        Reconciliation::Applied
    }

    /// Whether `ticket` identifies the fetch currently awaited.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.in_flight.as_ref() == Some(ticket)
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket::new(self.generation, self.session.query(), self.session.page());
        self.session.begin_loading();
        self.in_flight = Some(ticket.clone());
        tracing::debug!(
            generation = ticket.generation,
            query = %ticket.query,
            page = ticket.page,
            "fetch started"
        );
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::SessionStatus;
    use crate::domain::ResultItem;

    fn items(start: u64, count: u64) -> Vec<ResultItem> {
        (start..start + count)
            .map(|id| {
                ResultItem::new(
                    id,
                    format!("https://cdn.example/{id}_640.jpg"),
                    format!("https://cdn.example/{id}_1280.jpg"),
                    format!("tag{id}"),
                )
            })
            .collect()
    }

    fn page(start: u64, count: u64, last_page: bool) -> Result<FetchedPage> {
        Ok(FetchedPage {
            items: items(start, count),
            last_page,
        })
    }

    #[test]
    fn first_activation_does_not_fetch() {
        let controller = PaginationController::new();
        assert!(controller.in_flight().is_none());
        assert_eq!(controller.session().status(), &SessionStatus::Idle);
    }

    #[test]
    fn submitting_a_query_starts_loading_page_one() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("cats").unwrap();

        assert_eq!(ticket.query, "cats");
        assert_eq!(ticket.page, 1);
        assert_eq!(controller.session().status(), &SessionStatus::Loading);
        assert!(controller.is_current(&ticket));
    }

    #[test]
    fn cats_scenario_lands_ready_with_twelve_items() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("cats").unwrap();

        let outcome = controller.reconcile(&ticket, page(1, 12, false));

        assert_eq!(outcome, Reconciliation::Applied);
        let session = controller.session();
        assert_eq!(session.status(), &SessionStatus::Ready);
        assert_eq!(session.results().len(), 12);
        assert!(!session.is_terminal());
        assert!(controller.in_flight().is_none());
    }

    #[test]
    fn empty_page_becomes_no_results_error() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("zzzznoresults").unwrap();

        controller.reconcile(&ticket, page(0, 0, true));

        let session = controller.session();
        assert_eq!(
            session.status(),
            &SessionStatus::Error("No results were found for zzzznoresults...".to_string())
        );
        assert!(session.results().is_empty());
    }

    #[test]
    fn failure_message_is_surfaced_verbatim() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("cats").unwrap();

        controller.reconcile(&ticket, Err(PixellijError::Network("connection reset".to_string())));

        assert_eq!(
            controller.session().status(),
            &SessionStatus::Error("connection reset".to_string())
        );
    }

    #[test]
    fn second_page_appends_and_reaches_terminal() {
        let mut controller = PaginationController::new();
        let first = controller.submit_query("cats").unwrap();
        controller.reconcile(&first, page(1, 12, false));

        let second = controller.request_more(13).unwrap();
        assert_eq!(second.page, 2);
        assert_eq!(controller.session().page(), 2);
        assert_eq!(controller.session().scroll_target(), 13 - SCROLL_OFFSET_ROWS);

        controller.reconcile(&second, page(13, 12, true));

        let session = controller.session();
        assert_eq!(session.results().len(), 24);
        assert!(session.is_terminal());
        assert_eq!(session.results()[12].id, 13);
        assert!(controller.request_more(25).is_none());
        assert_eq!(controller.session().page(), 2);
    }

    #[test]
    fn request_more_is_rejected_while_loading_or_empty() {
        let mut controller = PaginationController::new();
        assert!(controller.request_more(10).is_none());

        let ticket = controller.submit_query("cats").unwrap();
        assert!(controller.request_more(10).is_none());
        assert_eq!(controller.session().page(), 1);

        controller.reconcile(&ticket, page(0, 0, false));
        assert!(controller.request_more(10).is_none(), "error with no results");
    }

    #[test]
    fn request_more_after_failed_page_moves_on_to_next_page() {
        let mut controller = PaginationController::new();
        let first = controller.submit_query("cats").unwrap();
        controller.reconcile(&first, page(1, 12, false));

        let second = controller.request_more(13).unwrap();
        controller.reconcile(&second, Err(PixellijError::Network("timeout".to_string())));
        assert_eq!(controller.session().results().len(), 12);

        let third = controller.request_more(13).unwrap();
        assert_eq!(third.page, 3);
    }

    #[test]
    fn repeated_query_is_a_no_op() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("cats").unwrap();
        controller.reconcile(&ticket, page(1, 12, false));
        let before = controller.session().clone();

        assert!(controller.submit_query("cats").is_none());
        assert_eq!(controller.session(), &before);
    }

    #[test]
    fn new_query_resets_page_results_and_scroll() {
        let mut controller = PaginationController::new();
        let first = controller.submit_query("cats").unwrap();
        controller.reconcile(&first, page(1, 12, false));
        let second = controller.request_more(13).unwrap();
        controller.reconcile(&second, page(13, 12, false));

        let dogs = controller.submit_query("dogs").unwrap();

        let session = controller.session();
        assert_eq!(dogs.page, 1);
        assert_eq!(session.page(), 1);
        assert!(session.results().is_empty());
        assert_eq!(session.scroll_target(), 0);
        assert_eq!(session.query(), "dogs");
    }

    #[test]
    fn stale_response_after_query_change_is_discarded() {
        let mut controller = PaginationController::new();
        let cats = controller.submit_query("cats").unwrap();
        let dogs = controller.submit_query("dogs").unwrap();

        assert_eq!(controller.reconcile(&cats, page(1, 12, true)), Reconciliation::Stale);
        assert!(controller.session().results().is_empty());
        assert_eq!(controller.session().status(), &SessionStatus::Loading);
        assert!(!controller.session().is_terminal());

        assert_eq!(controller.reconcile(&dogs, page(50, 12, false)), Reconciliation::Applied);
        assert_eq!(controller.session().results()[0].id, 50);
    }

    #[test]
    fn stale_response_for_same_query_text_is_discarded() {
        let mut controller = PaginationController::new();
        let first_cats = controller.submit_query("cats").unwrap();
        controller.submit_query("dogs");
        let second_cats = controller.submit_query("cats").unwrap();

        assert_ne!(first_cats, second_cats);
        assert_eq!(controller.reconcile(&first_cats, page(1, 12, false)), Reconciliation::Stale);
        assert_eq!(controller.session().status(), &SessionStatus::Loading);
    }

    #[test]
    fn duplicate_delivery_is_discarded() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("cats").unwrap();
        controller.reconcile(&ticket, page(1, 12, false));

        assert_eq!(controller.reconcile(&ticket, page(1, 12, false)), Reconciliation::Stale);
        assert_eq!(controller.session().results().len(), 12);
    }

    #[test]
    fn clearing_the_query_returns_to_idle_without_fetching() {
        let mut controller = PaginationController::new();
        let ticket = controller.submit_query("cats").unwrap();

        assert!(controller.submit_query("").is_none());
        assert_eq!(controller.session().status(), &SessionStatus::Idle);
        assert_eq!(controller.reconcile(&ticket, page(1, 12, false)), Reconciliation::Stale);
        assert!(controller.session().results().is_empty());
    }
}
