//! Paginated Feed
//!
//! Incrementally loaded post list. One feed owns one `FeedState`; a trigger
//! while a page is in flight, or after the server ran out of posts, is a no-op.
//! Restarting pagination means building a new feed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::api::ApiGateway;
use crate::error::{ApiError, BoardError, BoardResult};
use crate::models::Post;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPhase {
    Idle,
    Loading,
    Exhausted,
}

/// Result of one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page is already in flight or the feed is exhausted; nothing was fetched
    Skipped,
    /// A page arrived and was appended
    Appended { count: usize, exhausted: bool },
    /// The first page came back empty
    Empty,
}

/// Pagination state of one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    page: u32,
    page_size: u32,
    items: Vec<Post>,
    loading: bool,
    exhausted: bool,
}

impl FeedState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            items: Vec::new(),
            loading: false,
            exhausted: false,
        }
    }

    /// Next page to request
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn items(&self) -> &[Post] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Exhausted without ever receiving a post
    pub fn is_empty_feed(&self) -> bool {
        self.exhausted && self.items.is_empty()
    }

    pub fn phase(&self) -> FeedPhase {
        if self.exhausted {
            FeedPhase::Exhausted
        } else if self.loading {
            FeedPhase::Loading
        } else {
            FeedPhase::Idle
        }
    }

    /// Enter `Loading` and return the page to fetch, unless that is not allowed
    fn begin(&mut self) -> Option<u32> {
        if self.loading || self.exhausted {
            return None;
        }
        self.loading = true;
        Some(self.page)
    }

    fn apply(&mut self, items: Vec<Post>) -> LoadOutcome {
        self.loading = false;

        if items.is_empty() && self.page == 1 {
            self.exhausted = true;
            return LoadOutcome::Empty;
        }

        let count = items.len();
        self.exhausted = count < self.page_size as usize;
        self.items.extend(items);
        self.page += 1;
        LoadOutcome::Appended {
            count,
            exhausted: self.exhausted,
        }
    }

    fn fail(&mut self) {
        self.loading = false;
    }
}

/// Feed controller
pub struct PaginatedFeed<G: ?Sized> {
    api: Rc<G>,
    session: SessionStore,
    state: Rc<RefCell<FeedState>>,
    disposed: Rc<Cell<bool>>,
}

impl<G: ?Sized> Clone for PaginatedFeed<G> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            session: self.session.clone(),
            state: Rc::clone(&self.state),
            disposed: Rc::clone(&self.disposed),
        }
    }
}

impl<G: ApiGateway + ?Sized> PaginatedFeed<G> {
    pub fn new(api: Rc<G>, session: SessionStore, page_size: u32) -> Self {
        Self {
            api,
            session,
            state: Rc::new(RefCell::new(FeedState::new(page_size))),
            disposed: Rc::new(Cell::new(false)),
        }
    }

    /// First trigger
    pub async fn start(&self) -> BoardResult<LoadOutcome> {
        self.load_next().await
    }

    /// Fetch and append the next page
    ///
    /// The list is only available to logged-in users: nothing is fetched for
    /// the first page without a session.
    pub async fn load_next(&self) -> BoardResult<LoadOutcome> {
        if self.state.borrow().page == 1 && !self.session.is_authenticated() {
            return Err(ApiError::unauthorized("login required to read the board").into());
        }
        let begun = self.state.borrow_mut().begin();
        let Some(page) = begun else {
            debug!(phase = ?self.phase(), "feed trigger ignored");
            return Ok(LoadOutcome::Skipped);
        };
        let limit = self.state.borrow().page_size;

        debug!(page, limit, "loading feed page");
        let result = self.api.list_posts(page, limit).await;

        if self.disposed.get() {
            debug!(page, "discarding page for disposed feed");
            return Err(BoardError::Disposed);
        }

        let mut state = self.state.borrow_mut();
        match result {
            Ok(items) => {
                let outcome = state.apply(items);
                debug!(?outcome, total = state.items.len(), "feed page applied");
                Ok(outcome)
            }
            Err(err) => {
                state.fail();
                Err(err.into())
            }
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    pub fn phase(&self) -> FeedPhase {
        self.state.borrow().phase()
    }

    /// Stop applying results; in-flight responses are dropped on arrival
    pub fn dispose(&self) {
        self.disposed.set(true);
    }
}
