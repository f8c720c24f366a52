//! Error types for the Pixellij plugin.
//!
//! This module defines the centralized error type [`PixellijError`] and a type alias
//! [`Result`] used throughout the plugin. Fetch failures are represented here as
//! well, because the pagination controller turns every one of them into the
//! user-visible status message via `Display`.

use thiserror::Error;

/// The main error type for Pixellij operations.
///
/// The first three variants form the fetch error taxonomy: they end a loading
/// cycle and their `Display` output is shown verbatim in the status line. The
/// remaining variants cover configuration, theming and worker plumbing.
///
/// # Examples
///
/// ```
/// use pixellij::PixellijError;
///
/// let err = PixellijError::EmptyResult { query: "cats".to_string() };
/// assert_eq!(err.to_string(), "No results were found for cats...");
/// ```
#[derive(Debug, Error)]
pub enum PixellijError {
    /// The provider answered successfully but returned zero hits.
    #[error("No results were found for {query}...")]
    EmptyResult {
        /// Query that produced no hits.
        query: String,
    },

    /// The request never reached the provider or the connection broke.
    #[error("{0}")]
    Network(String),

    /// The provider rejected the request or sent a body we could not use.
    ///
    /// `status` is the HTTP status code, or 200 for a malformed success body.
    #[error("{message}")]
    Provider {
        /// HTTP status reported by the host.
        status: u16,
        /// Human-readable description (provider body or decode error).
        message: String,
    },

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization of a worker message failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Pixellij operations.
pub type Result<T> = std::result::Result<T, PixellijError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_message_names_the_query() {
        let err = PixellijError::EmptyResult {
            query: "zzzznoresults".to_string(),
        };
        assert_eq!(err.to_string(), "No results were found for zzzznoresults...");
    }

    #[test]
    fn network_and_provider_messages_are_verbatim() {
        assert_eq!(
            PixellijError::Network("connection refused".to_string()).to_string(),
            "connection refused"
        );
        let provider = PixellijError::Provider {
            status: 400,
            message: "[ERROR 400] \"key\" is invalid".to_string(),
        };
        assert_eq!(provider.to_string(), "[ERROR 400] \"key\" is invalid");
    }

    #[test]
    fn ambient_errors_keep_their_prefix() {
        assert_eq!(
            PixellijError::Config("api_key is not set".to_string()).to_string(),
            "Configuration error: api_key is not set"
        );
    }
}
