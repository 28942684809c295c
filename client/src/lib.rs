//! Client side of the store ratings app: a typed HTTP client, the paginated
//! store feed and a debouncer for search input.

pub mod debounce;
pub mod error;
pub mod feed;
pub mod http;
pub mod types;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use error::ClientError;
pub use feed::{FeedState, FetchTicket, StoreFeed, StoreQuery};
pub use http::{HttpClient, StoreApi};
