// Feed pagination state.
// Shared page/has-more bookkeeping, in-flight guards and request fencing for both feeds.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::Result;
use crate::flickr::{ImageDescriptor, PhotoPage, PhotoRequest, PhotoSource};

use super::notice::Notice;

/// What caused a load. Everything except `EndReached` restarts at page 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    /// First load when the view is mounted.
    Initial,
    /// Pull-to-refresh.
    Refresh,
    /// Scrolled near the end of the rendered list.
    EndReached,
    /// Retry action on a failure notice.
    Retry,
}

impl LoadTrigger {
    pub fn is_reset(self) -> bool {
        !matches!(self, LoadTrigger::EndReached)
    }
}

/// Commands the UI dispatches to a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCommand {
    Mount,
    Refresh,
    EndReached,
    Retry,
    DismissNotice,
    Submit(String),
}

/// An accepted fetch. Handed out by `begin` and returned to `complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub reset: bool,
    pub request: PhotoRequest,
}

/// Result of handing a response back to a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The guard rejected the load; nothing was requested.
    Skipped,
    /// The page was merged into the list.
    Applied { received: usize },
    /// The fetch failed; the message is the collapsed error.
    Failed(String),
    /// A newer request replaced this one; the response was dropped.
    Superseded,
}

/// Pagination state for one feed.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub items: Vec<ImageDescriptor>,
    /// Next page to request.
    pub page: u32,
    pub has_more: bool,
    /// Initial or retry load in flight.
    pub loading: bool,
    /// Pull-to-refresh in flight.
    pub refreshing: bool,
    /// Incremental load in flight.
    pub loading_more: bool,
    pub notice: Option<Notice>,
    /// When a page was last applied.
    pub updated_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: true,
            loading: false,
            refreshing: false,
            loading_more: false,
            notice: None,
            updated_at: None,
            generation: 0,
        }
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> bool {
        self.loading || self.refreshing || self.loading_more
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Accept a load if the guards allow it, marking the matching flag.
    /// `request_for` builds the request for the target page.
    pub fn begin<F>(&mut self, trigger: LoadTrigger, request_for: F) -> Option<FetchTicket>
    where
        F: FnOnce(u32) -> PhotoRequest,
    {
        let reset = trigger.is_reset();
        if self.in_flight() || (!reset && !self.has_more) {
            return None;
        }

        match trigger {
            LoadTrigger::Initial | LoadTrigger::Retry => self.loading = true,
            LoadTrigger::Refresh => self.refreshing = true,
            LoadTrigger::EndReached => self.loading_more = true,
        }

        self.generation += 1;
        let target = if reset { 1 } else { self.page };

        Some(FetchTicket {
            generation: self.generation,
            reset,
            request: request_for(target),
        })
    }

    /// Merge a response. Stale tickets are ignored.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<PhotoPage>) -> FetchOutcome {
        if ticket.generation != self.generation || !self.in_flight() {
            return FetchOutcome::Superseded;
        }
        self.clear_flags();

        match result {
            Ok(page) => {
                let target = ticket.request.page;
                let received = page.images.len();
                if ticket.reset {
                    self.items = page.images;
                } else {
                    self.items.extend(page.images);
                }
                self.page = target + 1;
                self.has_more = target < page.total_pages;
                self.notice = None;
                self.updated_at = Some(Utc::now());

                info!(
                    page = target,
                    total_pages = page.total_pages,
                    received,
                    "page applied"
                );
                FetchOutcome::Applied { received }
            }
            Err(e) => {
                warn!(page = ticket.request.page, error = %e, "fetch failed");
                self.notice = Some(Notice::fetch_failed("Network error."));
                FetchOutcome::Failed(e.to_string())
            }
        }
    }

    /// Invalidate any in-flight request so its response is dropped.
    pub fn supersede(&mut self) {
        self.generation += 1;
        self.clear_flags();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drop the notice once it has been visible for `ttl`.
    pub fn expire_notice(&mut self, now: Instant, ttl: Duration) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now, ttl)) {
            self.notice = None;
        }
    }

    fn clear_flags(&mut self) {
        self.loading = false;
        self.refreshing = false;
        self.loading_more = false;
    }
}

/// Common surface of the recent and search feeds.
pub trait PagedFeed {
    fn state(&self) -> &FeedState;

    fn state_mut(&mut self) -> &mut FeedState;

    /// Accept a load for `trigger`, or return None if the guards reject it.
    fn begin(&mut self, trigger: LoadTrigger) -> Option<FetchTicket>;

    /// Hand back the result for a ticket from `begin`.
    fn complete(&mut self, ticket: FetchTicket, result: Result<PhotoPage>) -> FetchOutcome;

    /// Map a UI command onto feed operations.
    fn dispatch(&mut self, command: FeedCommand) -> Option<FetchTicket> {
        dispatch_common(self, command)
    }
}

/// Command handling shared by every feed. `Submit` is feed-specific and
/// ignored here.
pub fn dispatch_common<F: PagedFeed + ?Sized>(
    feed: &mut F,
    command: FeedCommand,
) -> Option<FetchTicket> {
    match command {
        FeedCommand::Mount => feed.begin(LoadTrigger::Initial),
        FeedCommand::Refresh => feed.begin(LoadTrigger::Refresh),
        FeedCommand::EndReached => feed.begin(LoadTrigger::EndReached),
        FeedCommand::Retry => {
            feed.state_mut().dismiss_notice();
            feed.begin(LoadTrigger::Retry)
        }
        FeedCommand::DismissNotice => {
            feed.state_mut().dismiss_notice();
            None
        }
        FeedCommand::Submit(_) => None,
    }
}

/// Run one load to completion against `source`.
pub async fn load<F, S>(feed: &mut F, source: &S, trigger: LoadTrigger) -> FetchOutcome
where
    F: PagedFeed + ?Sized,
    S: PhotoSource,
{
    match feed.begin(trigger) {
        Some(ticket) => fetch_and_complete(feed, source, ticket).await,
        None => FetchOutcome::Skipped,
    }
}

/// Dispatch a command and, if it produced a ticket, run it to completion.
pub async fn execute<F, S>(feed: &mut F, source: &S, command: FeedCommand) -> FetchOutcome
where
    F: PagedFeed + ?Sized,
    S: PhotoSource,
{
    match feed.dispatch(command) {
        Some(ticket) => fetch_and_complete(feed, source, ticket).await,
        None => FetchOutcome::Skipped,
    }
}

async fn fetch_and_complete<F, S>(feed: &mut F, source: &S, ticket: FetchTicket) -> FetchOutcome
where
    F: PagedFeed + ?Sized,
    S: PhotoSource,
{
    let result = source.fetch(&ticket.request).await;
    feed.complete(ticket, result)
}
