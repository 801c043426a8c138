// Recent photos feed.
// Paginates flickr.photos.getRecent and falls back to the cached first page on failure.

use tracing::{debug, warn};

use crate::cache::{self, KeyValueStore};
use crate::error::Result;
use crate::flickr::{ImageDescriptor, PhotoPage, PhotoRequest};

use super::feed::{FeedState, FetchOutcome, FetchTicket, LoadTrigger, PagedFeed};
use super::notice::Notice;

pub struct RecentFeed<S> {
    state: FeedState,
    store: S,
}

impl<S: KeyValueStore> RecentFeed<S> {
    pub fn new(store: S) -> Self {
        Self {
            state: FeedState::new(),
            store,
        }
    }

    /// Show the cached page before the first fetch resolves.
    /// Returns whether anything was loaded.
    pub fn prime_from_cache(&mut self) -> bool {
        if !self.state.items.is_empty() {
            return false;
        }
        match self.cached_images() {
            Some(images) if !images.is_empty() => {
                self.state.items = images;
                true
            }
            _ => false,
        }
    }

    /// Read the cache, treating any failure as "nothing cached".
    fn cached_images(&self) -> Option<Vec<ImageDescriptor>> {
        match cache::read_images(&self.store) {
            Ok(images) => images,
            Err(e) => {
                warn!(error = %e, "cache read failed");
                None
            }
        }
    }

    fn store_first_page(&self) {
        match cache::write_images(&self.store, &self.state.items) {
            Ok(true) => debug!(count = self.state.items.len(), "cached first page"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "cache write failed"),
        }
    }
}

impl<S: KeyValueStore> PagedFeed for RecentFeed<S> {
    fn state(&self) -> &FeedState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FeedState {
        &mut self.state
    }

    fn begin(&mut self, trigger: LoadTrigger) -> Option<FetchTicket> {
        self.state.begin(trigger, PhotoRequest::recent)
    }

    fn complete(&mut self, ticket: FetchTicket, result: Result<PhotoPage>) -> FetchOutcome {
        let outcome = self.state.complete(&ticket, result);

        match &outcome {
            FetchOutcome::Applied { .. } if ticket.reset => self.store_first_page(),
            FetchOutcome::Failed(_) => {
                let message = match self.cached_images() {
                    Some(images) if !images.is_empty() => {
                        self.state.items = images;
                        "Could not fetch images. Showing cached ones."
                    }
                    _ => "Could not fetch images.",
                };
                self.state.notice = Some(Notice::fetch_failed(message));
            }
            _ => {}
        }

        outcome
    }
}
