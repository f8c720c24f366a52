//! Image search result model.
//!
//! A [`ResultItem`] is the provider-independent shape of one search hit: the
//! pagination controller accumulates them, the UI renders them, and the overlay
//! shows the full-size URL and caption of one of them.

use serde::{Deserialize, Serialize};

/// One image returned by the search provider.
///
/// `id` is unique within a query session. `thumbnail_url` is the small
/// preview rendered in the result list, `full_image_url` is what the overlay
/// shows, and `caption` is the provider's comma-separated tag string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub id: u64,
    pub thumbnail_url: String,
    pub full_image_url: String,
    pub caption: String,
}

impl ResultItem {
    /// Creates a result item from its parts.
    #[must_use]
    pub fn new(
        id: u64,
        thumbnail_url: impl Into<String>,
        full_image_url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self {
            id,
            thumbnail_url: thumbnail_url.into(),
            full_image_url: full_image_url.into(),
            caption: caption.into(),
        }
    }

    /// Returns the caption, or a placeholder for untagged images.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixellij::ResultItem;
    ///
    /// let item = ResultItem::new(1, "t", "f", "");
    /// assert_eq!(item.display_caption(), "(untagged)");
    /// ```
    #[must_use]
    pub fn display_caption(&self) -> &str {
        if self.caption.trim().is_empty() {
            "(untagged)"
        } else {
            &self.caption
        }
    }
}
