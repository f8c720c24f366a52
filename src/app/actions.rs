//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler mutates state synchronously and returns a list of
//! [`Action`]s for everything that has to leave the plugin thread: HTTP
//! requests, worker posts, and host commands. The runtime in `main.rs` executes
//! them in order.
//!
//! # Example
//!
//! ```rust
//! use pixellij::app::Action;
//!
//! let actions = vec![Action::OpenUrl("https://pixabay.com/get/abc_1280.jpg".to_string())];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::gateway::PageRequest;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP GET for one page of results.
    ///
    /// The response comes back as a `WebRequestResult` event carrying the
    /// request context, which holds the fetch ticket.
    FetchPage(PageRequest),

    /// Posts a message to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Asks the host to open a URL with the desktop's default handler.
    OpenUrl(String),
}

impl Action {
    /// Variant name for logs. Never includes the payload (URLs carry the API key).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CloseFocus => "close_focus",
            Self::FetchPage(_) => "fetch_page",
            Self::PostToWorker(_) => "post_to_worker",
            Self::OpenUrl(_) => "open_url",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{FetchTicket, GatewayConfig, PixabayGateway};

    #[test]
    fn kind_never_includes_the_request() {
        let gateway = PixabayGateway::new(GatewayConfig {
            api_key: Some("very-secret-key".to_string()),
            ..GatewayConfig::default()
        });
        let request = gateway.page_request(&FetchTicket::new(1, "cats", 1)).unwrap();
        assert!(request.url.contains("very-secret-key"));

        let action = Action::FetchPage(request);
        assert_eq!(action.kind(), "fetch_page");
        assert!(!action.kind().contains("very-secret-key"));
        assert_eq!(Action::OpenUrl("https://cdn/1.jpg".to_string()).kind(), "open_url");
    }
}
