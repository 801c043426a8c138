// State management module.
// Feed pagination, cache fallback, notices and grid selection.

#![allow(dead_code)]

pub mod feed;
pub mod grid;
pub mod notice;
pub mod recent;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use feed::{FeedCommand, FeedState, FetchOutcome, FetchTicket, LoadTrigger, PagedFeed};
pub use grid::PhotoGrid;
pub use notice::{NOTICE_TTL, Notice};
pub use recent::RecentFeed;
pub use search::SearchFeed;
