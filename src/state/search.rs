// Search feed.
// Paginates flickr.photos.search for the active query.

use crate::error::Result;
use crate::flickr::{PhotoPage, PhotoRequest, RequestKind};

use super::feed::{
    FeedCommand, FeedState, FetchOutcome, FetchTicket, LoadTrigger, PagedFeed, dispatch_common,
};

#[derive(Debug, Default)]
pub struct SearchFeed {
    state: FeedState,
    /// Query the list, `page` and `has_more` belong to.
    query: Option<String>,
    /// Submitted query whose first page has not arrived yet.
    pending: Option<String>,
}

impl SearchFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// The query the current results belong to.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// A submitted query still waiting on its first page.
    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// Submit a query. Blank text is ignored. A different query supersedes
    /// whatever is in flight; the same query is subject to the usual guard.
    /// The query becomes current only once its first page is applied.
    pub fn submit(&mut self, text: &str) -> Option<FetchTicket> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if self.target_query() != Some(text) {
            if self.state.in_flight() {
                self.state.supersede();
            }
            self.pending = Some(text.to_string());
        }

        self.state.dismiss_notice();
        self.begin(LoadTrigger::Initial)
    }

    /// Query a reset load fetches: the pending one if any.
    fn target_query(&self) -> Option<&str> {
        self.pending.as_deref().or(self.query.as_deref())
    }
}

impl PagedFeed for SearchFeed {
    fn state(&self) -> &FeedState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FeedState {
        &mut self.state
    }

    fn begin(&mut self, trigger: LoadTrigger) -> Option<FetchTicket> {
        // Paging continues the results on screen; resets go to the newest query
        let query = match trigger.is_reset() {
            true => self.target_query(),
            false => self.query.as_deref(),
        };
        let query = query?.to_string();
        self.state.begin(trigger, |page| PhotoRequest::search(query, page))
    }

    #[allow(clippy::collapsible_if)]
    fn complete(&mut self, ticket: FetchTicket, result: Result<PhotoPage>) -> FetchOutcome {
        let outcome = self.state.complete(&ticket, result);

        let applied_reset = ticket.reset && matches!(outcome, FetchOutcome::Applied { .. });
        if applied_reset {
            if let RequestKind::Search { text } = ticket.request.kind {
                if self.pending.as_deref() == Some(text.as_str()) {
                    self.pending = None;
                }
                self.query = Some(text);
            }
        }

        outcome
    }

    fn dispatch(&mut self, command: FeedCommand) -> Option<FetchTicket> {
        match command {
            FeedCommand::Submit(text) => self.submit(&text),
            other => dispatch_common(self, other),
        }
    }
}
