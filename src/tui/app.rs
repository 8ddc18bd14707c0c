//! Application state and logic.
//!
//! The [`App`] owns the page tabs, the state of the page on screen and at most
//! one in-flight load. Switching pages cancels that load, so a slow response
//! for a page the user has left never replaces the page they are looking at.

use fairway_core::{LoadHandle, Page, PageId, PageSource, spawn_load};
use std::sync::Arc;

/// What the body of the screen is showing.
pub enum LoadState {
    Loading,
    Ready(Page),
    Failed(String),
}

pub struct App {
    source: Arc<dyn PageSource>,
    pub pages: Vec<PageId>,
    pub current: usize,
    pub state: LoadState,
    pending: Option<LoadHandle>,
    /// First visible line of the page body.
    pub scroll: u16,
    pub should_quit: bool,
}

impl App {
    pub fn new(source: Arc<dyn PageSource>, max_round: u8, start: PageId) -> App {
        let pages = PageId::all(max_round);
        let current = pages
            .iter()
            .position(|p| *p == start)
            .unwrap_or(pages.len() - 1);
        App {
            source,
            pages,
            current,
            state: LoadState::Loading,
            pending: None,
            scroll: 0,
            should_quit: false,
        }
    }

    pub fn page(&self) -> PageId {
        self.pages[self.current]
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a fresh load of the current page, abandoning any load in flight.
    pub fn reload(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        self.state = LoadState::Loading;
        self.pending = Some(spawn_load(self.source.clone(), self.page()));
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.pages.len() {
            return;
        }
        self.current = index;
        self.scroll = 0;
        self.reload();
    }

    pub fn next_page(&mut self) {
        self.select((self.current + 1) % self.pages.len());
    }

    pub fn prev_page(&mut self) {
        let len = self.pages.len();
        self.select((self.current + len - 1) % len);
    }

    /// Jump to the page with the given id, if it is one of the tabs.
    pub fn goto(&mut self, page: PageId) {
        if let Some(index) = self.pages.iter().position(|p| *p == page) {
            self.select(index);
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let next = (self.scroll as i32 + delta).clamp(0, u16::MAX as i32);
        self.scroll = next as u16;
    }

    /// Pick up a finished load. Returns true when the screen changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(handle) = &self.pending else {
            return false;
        };
        let Some(result) = handle.poll() else {
            return false;
        };
        self.state = match result {
            Ok(page) => LoadState::Ready(page),
            Err(e) => {
                log::warn!("Loading {} failed: {}", self.page(), e);
                LoadState::Failed(e.to_string())
            }
        };
        self.pending = None;
        true
    }

    pub fn quit(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        self.should_quit = true;
    }
}
