//! Pixabay search provider.
//!
//! Builds request URLs for the Pixabay REST API and decodes its JSON responses
//! into [`ResultItem`]s. The HTTP exchange itself is performed by the Zellij
//! host through `web_request`; this module only deals with the wire format.
//!
//! # Response Format
//!
//! ```json
//! {
//!   "total": 4692,
//!   "totalHits": 500,
//!   "hits": [
//!     { "id": 195893, "webformatURL": "https://...", "largeImageURL": "https://...", "tags": "blossom, bloom" }
//!   ]
//! }
//! ```

use crate::domain::error::{PixellijError, Result};
use crate::domain::ResultItem;
use crate::gateway::FetchTicket;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default Pixabay API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Default number of hits requested per page.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Smallest page size the API accepts.
const MIN_PER_PAGE: u32 = 3;

/// Largest page size the API accepts.
const MAX_PER_PAGE: u32 = 200;

/// Longest provider error body echoed back to the user.
const MAX_ERROR_MESSAGE_LEN: usize = 200;

/// Request parameters shared by every page fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Pixabay API key. Fetches fail with a configuration error without it.
    pub api_key: Option<String>,
    pub endpoint: String,
    /// Hits per page, clamped to the provider's accepted range.
    pub per_page: u32,
    pub image_type: String,
    pub orientation: String,
    pub safe_search: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safe_search: true,
        }
    }
}

impl GatewayConfig {
    /// Clamps a requested page size into the range the API accepts.
    #[must_use]
    pub fn clamp_per_page(per_page: u32) -> u32 {
        per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE)
    }
}

/// A ready-to-send HTTP GET request for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Encoded [`FetchTicket`], echoed back by the host with the response.
    pub context: BTreeMap<String, String>,
}

/// One decoded page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    pub items: Vec<ResultItem>,
    pub last_page: bool,
}

impl FetchedPage {
    /// Whether no further pages exist for the query this page belongs to.
    #[must_use]
    pub const fn is_last_page(&self) -> bool {
        self.last_page
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "totalHits", default)]
    total_hits: u64,
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: u64,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
    #[serde(default)]
    tags: String,
}

impl From<Hit> for ResultItem {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id,
            thumbnail_url: hit.webformat_url,
            full_image_url: hit.large_image_url,
            caption: hit.tags,
        }
    }
}

/// Client-side view of the Pixabay API.
///
/// Holds the request configuration and remembers whether the most recently
/// recorded page was the final one for its query.
#[derive(Debug, Clone)]
pub struct PixabayGateway {
    config: GatewayConfig,
    last_page: Option<bool>,
}

impl PixabayGateway {
    #[must_use]
    pub fn new(mut config: GatewayConfig) -> Self {
        config.per_page = GatewayConfig::clamp_per_page(config.per_page);
        Self {
            config,
            last_page: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GatewayConfig {
        &self.config
    }

    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.config.per_page
    }

    /// Builds the GET request for the page identified by `ticket`.
    ///
    /// # Errors
    ///
    /// Returns [`PixellijError::Config`] when no API key is configured.
    pub fn page_request(&self, ticket: &FetchTicket) -> Result<PageRequest> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PixellijError::Config("api_key is not set in the plugin configuration".to_string())
            })?;

        let separator = if self.config.endpoint.contains('?') { '&' } else { '?' };
        let url = format!(
            "{endpoint}{separator}key={key}&q={query}&page={page}&per_page={per_page}&image_type={image_type}&orientation={orientation}&safesearch={safe_search}",
            endpoint = self.config.endpoint,
            key = urlencoding::encode(api_key),
            query = urlencoding::encode(&ticket.query),
            page = ticket.page,
            per_page = self.config.per_page,
            image_type = urlencoding::encode(&self.config.image_type),
            orientation = urlencoding::encode(&self.config.orientation),
            safe_search = self.config.safe_search,
        );

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(PageRequest {
            url,
            headers,
            context: ticket.to_context(),
        })
    }

    /// Remembers the last-page indicator of a page that was applied.
    pub fn record(&mut self, page: &FetchedPage) {
        self.last_page = Some(page.last_page);
    }

    /// Forgets the last-page indicator when the query changes.
    pub fn reset(&mut self) {
        self.last_page = None;
    }

    /// Whether the most recently recorded page was the final one.
    ///
    /// `None` until a page has been recorded for the current query.
    #[must_use]
    pub const fn is_last_page(&self) -> Option<bool> {
        self.last_page
    }
}

/// Returns true when `page` is the final page of `total_hits` results.
///
/// # Examples
///
/// ```
/// use pixellij::gateway::pixabay::is_last_page;
///
/// assert!(!is_last_page(1, 12, 24));
/// assert!(is_last_page(2, 12, 24));
/// assert!(is_last_page(1, 12, 5));
/// ```
#[must_use]
pub const fn is_last_page(page: u32, per_page: u32, total_hits: u64) -> bool {
    (page as u64) * (per_page as u64) >= total_hits
}

/// Decodes the host's answer to a page request.
///
/// An empty hit list is returned as an empty page; turning it into an
/// "empty result" error is the controller's decision.
///
/// # Errors
///
/// - [`PixellijError::Network`] when the host reports status 0 (no response).
/// - [`PixellijError::Provider`] for non-2xx statuses and undecodable bodies.
pub fn decode_page(ticket: &FetchTicket, status: u16, body: &str, per_page: u32) -> Result<FetchedPage> {
    if status == 0 {
        let message = body.trim();
        return Err(PixellijError::Network(if message.is_empty() {
            "Network request failed".to_string()
        } else {
            message.to_string()
        }));
    }

    if !(200..300).contains(&status) {
        return Err(PixellijError::Provider {
            status,
            message: provider_error_message(status, body),
        });
    }

    let response: SearchResponse = serde_json::from_str(body).map_err(|e| PixellijError::Provider {
        status,
        message: format!("Unexpected response from Pixabay: {e}"),
    })?;

    let last_page = is_last_page(ticket.page, per_page, response.total_hits);
    let items: Vec<ResultItem> = response.hits.into_iter().map(ResultItem::from).collect();

    tracing::debug!(
        query = %ticket.query,
        page = ticket.page,
        item_count = items.len(),
        total_hits = response.total_hits,
        last_page = last_page,
        "decoded pixabay page"
    );

    Ok(FetchedPage { items, last_page })
}

fn provider_error_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("Request failed with status {status}");
    }
    let mut message: String = body.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
    if body.chars().count() > MAX_ERROR_MESSAGE_LEN {
        message.push_str("...");
    }
    message
}
