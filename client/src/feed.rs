//! Paginated store feed ("load more" listing).
//!
//! The feed is a small state machine driven by [`FetchTicket`]s. Every fetch
//! carries the query key it was issued for, so a response that arrives after
//! the user changed the search, sort or page size is dropped instead of being
//! mixed into the new listing.
//!
//! Pages are fetched by number against a server-side sort. If stores are
//! created or renamed between two page fetches the listing can show an item
//! twice or skip one; the feed does not try to reconcile that.

use crate::error::ClientError;
use crate::http::StoreApi;
use crate::types::{StorePage, StoreSummary};

/// Parameters that identify one listing. Changing any of them starts over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StoreQuery {
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub limit: Option<u64>,
}

impl StoreQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    /// Query string pairs for `GET /store`.
    pub(crate) fn to_params(&self, page: u64) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", page.to_string())];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search", search.to_owned()));
        }
        if let Some(sort_by) = &self.sort_by {
            params.push(("sortBy", sort_by.clone()));
        }
        if let Some(order) = &self.order {
            params.push(("order", order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    /// First page of the current query is in flight.
    Loading,
    Ready { has_more: bool },
    /// A follow-up page is in flight; loaded stores stay visible.
    FetchingNext,
    Failed(String),
}

/// A fetch the caller must perform and hand back to [`StoreFeed::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: StoreQuery,
    pub page: u64,
}

impl FetchTicket {
    pub async fn fetch<A: StoreApi + ?Sized>(&self, api: &A) -> Result<StorePage, ClientError> {
        api.list_stores(&self.key, self.page).await
    }
}

#[derive(Debug)]
pub struct StoreFeed {
    key: Option<StoreQuery>,
    stores: Vec<StoreSummary>,
    pages_loaded: u64,
    state: FeedState,
}

impl Default for StoreFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreFeed {
    pub fn new() -> Self {
        Self {
            key: None,
            stores: Vec::new(),
            pages_loaded: 0,
            state: FeedState::Idle,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn stores(&self) -> &[StoreSummary] {
        &self.stores
    }

    pub fn query(&self) -> Option<&StoreQuery> {
        self.key.as_ref()
    }

    /// Switches the feed to `query`.
    ///
    /// A different key discards every loaded page and returns the ticket for
    /// page 1. Setting the key the feed already shows is a no-op.
    pub fn set_query(&mut self, query: StoreQuery) -> Option<FetchTicket> {
        if self.key.as_ref() == Some(&query) && self.state != FeedState::Idle {
            return None;
        }

        self.key = Some(query.clone());
        self.stores.clear();
        self.pages_loaded = 0;
        self.state = FeedState::Loading;

        Some(FetchTicket { key: query, page: 1 })
    }

    /// Requests the next page. Only valid while `Ready` with more pages left.
    pub fn load_more(&mut self) -> Option<FetchTicket> {
        if self.state != (FeedState::Ready { has_more: true }) {
            return None;
        }
        let key = self.key.clone()?;

        self.state = FeedState::FetchingNext;
        Some(FetchTicket {
            key,
            page: self.pages_loaded + 1,
        })
    }

    /// Re-issues the fetch that failed.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if !matches!(self.state, FeedState::Failed(_)) {
            return None;
        }
        let key = self.key.clone()?;

        self.state = if self.pages_loaded == 0 {
            FeedState::Loading
        } else {
            FeedState::FetchingNext
        };
        Some(FetchTicket {
            key,
            page: self.pages_loaded + 1,
        })
    }

    /// Feeds a fetch result back in. Returns `false` when the result was
    /// stale (old key, unexpected page, or nothing in flight) and ignored.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<StorePage, ClientError>) -> bool {
        if self.key.as_ref() != Some(&ticket.key) {
            tracing::debug!(page = ticket.page, "dropping response for a previous query");
            return false;
        }
        if !matches!(self.state, FeedState::Loading | FeedState::FetchingNext)
            || ticket.page != self.pages_loaded + 1
        {
            tracing::debug!(page = ticket.page, "dropping out-of-sequence page");
            return false;
        }

        match result {
            Ok(page) => {
                self.stores.extend(page.stores);
                self.pages_loaded += 1;
                self.state = FeedState::Ready {
                    has_more: page.pagination.has_more,
                };
            }
            Err(err) => {
                tracing::warn!(page = ticket.page, error = %err, "store feed fetch failed");
                self.state = FeedState::Failed(err.to_string());
            }
        }
        true
    }

    /// Fetches `ticket` through `api` and applies the result.
    pub async fn drive<A: StoreApi + ?Sized>(&mut self, api: &A, ticket: FetchTicket) -> bool {
        let result = ticket.fetch(api).await;
        self.apply(&ticket, result)
    }
}
