//! Fetch tickets identifying one issued page request.
//!
//! A ticket is minted by the pagination controller every time it starts a
//! fetch. It travels with the HTTP request (as the Zellij request context),
//! through the worker, and back into reconciliation, where it is compared with
//! the controller's in-flight ticket to detect stale responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const GENERATION_KEY: &str = "pixellij.generation";
const QUERY_KEY: &str = "pixellij.query";
const PAGE_KEY: &str = "pixellij.page";

/// Identity of an issued page fetch.
///
/// `generation` increases with every fetch the controller starts, so two
/// tickets for the same `(query, page)` pair issued at different times never
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: String,
    pub page: u32,
}

impl FetchTicket {
    #[must_use]
    pub fn new(generation: u64, query: impl Into<String>, page: u32) -> Self {
        Self {
            generation,
            query: query.into(),
            page,
        }
    }

    /// Encodes the ticket as a Zellij web request context map.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        context.insert(QUERY_KEY.to_string(), self.query.clone());
        context.insert(PAGE_KEY.to_string(), self.page.to_string());
        context
    }

    /// Decodes a ticket from a web request context map.
    ///
    /// Returns `None` when any key is missing or malformed, which happens for
    /// requests this plugin did not issue.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        let query = context.get(QUERY_KEY)?.clone();
        let page = context.get(PAGE_KEY)?.parse().ok()?;
        Some(Self {
            generation,
            query,
            page,
        })
    }
}
