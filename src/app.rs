// App state and main event loop.
// Owns both feeds, turns key presses into feed commands and applies fetch results.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::cache::KeyValueStore;
use crate::error::Result;
use crate::flickr::{PhotoPage, PhotoSource};
use crate::state::{
    FeedCommand, FeedState, FetchOutcome, FetchTicket, NOTICE_TTL, PagedFeed, PhotoGrid,
    RecentFeed, SearchFeed,
};
use crate::ui;

/// Active tab in the application. Each tab owns one feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Recent,
    Search,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Recent, Tab::Search];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Recent => "Recent",
            Tab::Search => "Search",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Recent => Tab::Search,
            Tab::Search => Tab::Recent,
        }
    }

    pub fn prev(&self) -> Self {
        self.next()
    }
}

/// Whether keystrokes go to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// A finished fetch on its way back to the UI loop.
#[derive(Debug)]
pub struct FetchEvent {
    pub tab: Tab,
    pub ticket: FetchTicket,
    pub result: Result<PhotoPage>,
}

/// Main application state.
pub struct App<P, S> {
    /// Currently active tab.
    pub active_tab: Tab,
    pub recent: RecentFeed<S>,
    pub search: SearchFeed,
    pub recent_grid: PhotoGrid,
    pub search_grid: PhotoGrid,
    /// Text in the search box.
    pub search_input: String,
    pub input_mode: InputMode,
    /// Whether the help overlay is shown.
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    source: P,
    events_tx: UnboundedSender<FetchEvent>,
    events_rx: UnboundedReceiver<FetchEvent>,
}

impl<P, S> App<P, S>
where
    P: PhotoSource + Clone + Send + Sync + 'static,
    S: KeyValueStore,
{
    pub fn new(source: P, store: S) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            active_tab: Tab::default(),
            recent: RecentFeed::new(store),
            search: SearchFeed::new(),
            recent_grid: PhotoGrid::default(),
            search_grid: PhotoGrid::default(),
            search_input: String::new(),
            input_mode: InputMode::Normal,
            show_help: false,
            should_quit: false,
            source,
            events_tx,
            events_rx,
        }
    }

    /// Show the cached feed and kick off the first recent fetch.
    pub fn start(&mut self) {
        if self.recent.prime_from_cache() {
            let len = self.recent.state().items.len();
            self.recent_grid.reset_selection(len);
        }
        self.dispatch(Tab::Recent, FeedCommand::Mount);
    }

    /// Feed state for a tab.
    pub fn feed(&self, tab: Tab) -> &FeedState {
        match tab {
            Tab::Recent => self.recent.state(),
            Tab::Search => self.search.state(),
        }
    }

    /// Send a command to a tab's feed, spawning the fetch if one is accepted.
    pub fn dispatch(&mut self, tab: Tab, command: FeedCommand) {
        debug!(tab = tab.title(), ?command, "dispatch");
        let ticket = match tab {
            Tab::Recent => self.recent.dispatch(command),
            Tab::Search => self.search.dispatch(command),
        };
        if let Some(ticket) = ticket {
            self.spawn_fetch(tab, ticket);
        }
    }

    fn spawn_fetch(&self, tab: Tab, ticket: FetchTicket) {
        let source = self.source.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = source.fetch(&ticket.request).await;
            // Receiver is gone only during shutdown
            let _ = events_tx.send(FetchEvent {
                tab,
                ticket,
                result,
            });
        });
    }

    /// Merge a finished fetch into its feed and fix up the grid selection.
    pub fn apply(&mut self, event: FetchEvent) -> FetchOutcome {
        let (reset, generation) = (event.ticket.reset, event.ticket.generation);
        let tab = event.tab;
        let outcome = match tab {
            Tab::Recent => self.recent.complete(event.ticket, event.result),
            Tab::Search => self.search.complete(event.ticket, event.result),
        };
        let len = self.feed(tab).items.len();

        match &outcome {
            FetchOutcome::Applied { .. } if reset => self.grid_mut(tab).reset_selection(len),
            FetchOutcome::Superseded => {
                debug!(
                    tab = tab.title(),
                    generation,
                    current = self.feed(tab).generation(),
                    "dropped superseded response"
                );
            }
            FetchOutcome::Failed(_) => {
                let grid = self.grid_mut(tab);
                grid.clamp(len);
                grid.disarm_end_trigger(len);
            }
            _ => self.grid_mut(tab).clamp(len),
        }
        outcome
    }

    /// Apply every fetch result that has arrived.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    /// Per-frame housekeeping: expire notices and fire the end-of-list trigger.
    pub fn tick(&mut self, now: Instant) {
        self.recent.state_mut().expire_notice(now, NOTICE_TTL);
        self.search.state_mut().expire_notice(now, NOTICE_TTL);

        let tab = self.active_tab;
        let state = self.feed(tab);
        let (len, has_more) = (state.items.len(), state.has_more);
        if self.grid_mut(tab).take_end_trigger(len, has_more) {
            self.dispatch(tab, FeedCommand::EndReached);
        }
    }

    pub fn grid_mut(&mut self, tab: Tab) -> &mut PhotoGrid {
        match tab {
            Tab::Recent => &mut self.recent_grid,
            Tab::Search => &mut self.search_grid,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.start();
        while !self.should_quit {
            self.drain_events();
            self.tick(Instant::now());
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle a single key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key.code);
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        let tab = self.active_tab;
        let len = self.feed(tab).items.len();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.active_tab = self.active_tab.next(),
            KeyCode::BackTab => self.active_tab = self.active_tab.prev(),
            KeyCode::Right | KeyCode::Char('l') => self.grid_mut(tab).select_next(len),
            KeyCode::Left | KeyCode::Char('h') => self.grid_mut(tab).select_prev(len),
            KeyCode::Down | KeyCode::Char('j') => self.grid_mut(tab).select_down(len),
            KeyCode::Up | KeyCode::Char('k') => self.grid_mut(tab).select_up(len),
            KeyCode::Char('r') => self.dispatch(tab, FeedCommand::Refresh),
            KeyCode::Char('R') => self.dispatch(tab, FeedCommand::Retry),
            KeyCode::Char('x') => self.dispatch(tab, FeedCommand::DismissNotice),
            KeyCode::Char('/') => {
                self.active_tab = Tab::Search;
                self.input_mode = InputMode::Editing;
            }
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.search_input.push(c),
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                let text = self.search_input.clone();
                self.dispatch(Tab::Search, FeedCommand::Submit(text));
            }
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FileStore;
    use crate::flickr::PhotoRequest;
    use crate::state::testing::{ScriptedSource, page_of};
    use crossterm::event::KeyModifiers;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(dir: &TempDir, source: ScriptedSource) -> App<ScriptedSource, FileStore> {
        App::new(source, FileStore::new(dir.path()))
    }

    async fn settle<P, S>(app: &mut App<P, S>) -> FetchOutcome
    where
        P: PhotoSource + Clone + Send + Sync + 'static,
        S: KeyValueStore,
    {
        let event = app.events_rx.recv().await.unwrap();
        app.apply(event)
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Recent.next(), Tab::Search);
        assert_eq!(Tab::Search.next(), Tab::Recent);
        assert_eq!(Tab::Recent.prev(), Tab::Search);
    }

    #[tokio::test]
    async fn test_start_loads_recent() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        source.push_ok(page_of(&["1", "2", "3"], 2));
        let mut app = app(&dir, source.clone());

        app.start();
        assert!(app.feed(Tab::Recent).loading);

        let outcome = settle(&mut app).await;
        assert_eq!(outcome, FetchOutcome::Applied { received: 3 });
        assert_eq!(app.recent_grid.selected(), Some(0));
        assert_eq!(source.requests(), vec![PhotoRequest::recent(1)]);
    }

    #[tokio::test]
    async fn test_search_via_keys() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        source.push_ok(page_of(&["c1"], 1));
        let mut app = app(&dir, source.clone());

        app.handle_key(press(KeyCode::Char('/')));
        assert_eq!(app.active_tab, Tab::Search);
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "cat".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Normal);

        settle(&mut app).await;
        assert_eq!(app.search.query(), Some("cat"));
        assert_eq!(app.feed(Tab::Search).items.len(), 1);
        assert_eq!(source.requests(), vec![PhotoRequest::search("cat", 1)]);
    }

    #[tokio::test]
    async fn test_blank_search_issues_nothing() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        let mut app = app(&dir, source.clone());

        app.handle_key(press(KeyCode::Char('/')));
        app.handle_key(press(KeyCode::Char(' ')));
        app.handle_key(press(KeyCode::Enter));

        assert!(!app.feed(Tab::Search).in_flight());
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_scrolling_to_end_requests_next_page() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        source.push_ok(page_of(&["1", "2", "3", "4", "5", "6"], 3));
        source.push_ok(page_of(&["7", "8"], 3));
        let mut app = app(&dir, source.clone());

        app.start();
        settle(&mut app).await;

        app.tick(Instant::now());
        assert!(!app.feed(Tab::Recent).loading_more);

        app.handle_key(press(KeyCode::Down));
        app.tick(Instant::now());
        assert!(app.feed(Tab::Recent).loading_more);

        settle(&mut app).await;
        assert_eq!(app.feed(Tab::Recent).items.len(), 8);
        assert_eq!(app.feed(Tab::Recent).page, 3);
        assert_eq!(
            source.requests(),
            vec![PhotoRequest::recent(1), PhotoRequest::recent(2)]
        );
    }

    #[tokio::test]
    async fn test_failed_page_is_not_refetched_without_input() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        source.push_ok(page_of(&["1", "2", "3", "4"], 5));
        source.push_ok(page_of(&["5", "6", "7", "8"], 5));
        source.push_err("offline");
        let mut app = app(&dir, source.clone());

        app.start();
        settle(&mut app).await;
        app.handle_key(press(KeyCode::Down));
        app.tick(Instant::now());
        assert!(app.feed(Tab::Recent).loading_more);
        settle(&mut app).await;
        assert_eq!(app.feed(Tab::Recent).items.len(), 8);

        for _ in 0..4 {
            app.handle_key(press(KeyCode::Down));
        }
        app.tick(Instant::now());
        let outcome = settle(&mut app).await;
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert_eq!(app.feed(Tab::Recent).items.len(), 4);

        // Idle frames after the fallback must not page again
        app.tick(Instant::now());
        app.tick(Instant::now());
        assert!(!app.feed(Tab::Recent).in_flight());
        let pages: Vec<u32> = source.requests().iter().map(|r| r.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        assert!(app.feed(Tab::Recent).notice.is_some());
    }

    #[tokio::test]
    async fn test_retry_and_dismiss_keys() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        source.push_err("offline");
        source.push_ok(page_of(&["1"], 1));
        let mut app = app(&dir, source.clone());

        app.start();
        settle(&mut app).await;
        assert!(app.feed(Tab::Recent).notice.is_some());

        app.handle_key(press(KeyCode::Char('x')));
        assert!(app.feed(Tab::Recent).notice.is_none());

        app.handle_key(press(KeyCode::Char('R')));
        assert!(app.feed(Tab::Recent).loading);
        settle(&mut app).await;
        assert_eq!(app.feed(Tab::Recent).items.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_uses_refreshing_flag() {
        let dir = TempDir::new().unwrap();
        let source = ScriptedSource::new();
        source.push_ok(page_of(&["1"], 1));
        source.push_ok(page_of(&["2"], 1));
        let mut app = app(&dir, source);

        app.start();
        settle(&mut app).await;

        app.handle_key(press(KeyCode::Char('r')));
        assert!(app.feed(Tab::Recent).refreshing);
        assert!(!app.feed(Tab::Recent).loading);
        settle(&mut app).await;
        assert_eq!(app.feed(Tab::Recent).items[0].id, "2_s");
    }

    #[test]
    fn test_quit_and_help() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, ScriptedSource::new());

        app.handle_key(press(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.should_quit);
        app.handle_key(press(KeyCode::Esc));
        assert!(!app.show_help);
        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
