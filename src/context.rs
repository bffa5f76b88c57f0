//! Application Context
//!
//! Shared services and navigation provided via Leptos Context API.

use std::rc::Rc;

use board_core::{
    AccountController, BoardError, ClientConfig, CommentEditController, HttpGateway,
    PaginatedFeed, PostDetailController, PostEditor, PostId, SessionStore,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a toast stays on screen
const TOAST_MS: u32 = 3_000;

/// Which screen is showing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Login,
    Board,
    Post(PostId),
    NewPost,
    Profile,
}

/// Non-reactive services shared by every page
#[derive(Clone)]
pub struct Services {
    pub config: ClientConfig,
    pub session: SessionStore,
    pub api: Rc<HttpGateway>,
}

impl Services {
    pub fn account(&self) -> AccountController<HttpGateway> {
        AccountController::new(Rc::clone(&self.api), self.session.clone())
    }

    pub fn feed(&self) -> PaginatedFeed<HttpGateway> {
        PaginatedFeed::new(
            Rc::clone(&self.api),
            self.session.clone(),
            self.config.page_size(),
        )
    }

    /// Detail controller plus the comment editor bound to it
    pub fn post_detail(
        &self,
    ) -> (
        PostDetailController<HttpGateway>,
        CommentEditController<HttpGateway>,
    ) {
        let detail = PostDetailController::new(Rc::clone(&self.api), self.session.clone());
        let edit = CommentEditController::new(detail.clone());
        (detail, edit)
    }

    pub fn post_editor(&self) -> PostEditor<HttpGateway> {
        PostEditor::new(Rc::clone(&self.api))
    }
}

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    services: StoredValue<Services, LocalStorage>,
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Transient message - read
    pub toast: ReadSignal<Option<String>>,
    /// Transient message - write
    set_toast: WriteSignal<Option<String>>,
}

impl AppContext {
    pub fn new(services: Services) -> Self {
        let start = if services.session.is_authenticated() {
            Page::Board
        } else {
            Page::Login
        };
        let (page, set_page) = signal(start);
        let (toast, set_toast) = signal(None);
        Self {
            services: StoredValue::new_local(services),
            page,
            set_page,
            toast,
            set_toast,
        }
    }

    pub fn services(&self) -> Services {
        self.services.get_value()
    }

    pub fn config(&self) -> ClientConfig {
        self.services.with_value(|s| s.config.clone())
    }

    pub fn navigate(&self, page: Page) {
        self.set_page.set(page);
    }

    /// Show a message that clears itself
    pub fn show_toast(&self, message: impl Into<String>) {
        let message = message.into();
        let set_toast = self.set_toast;
        set_toast.set(Some(message.clone()));
        spawn_local(async move {
            TimeoutFuture::new(TOAST_MS).await;
            set_toast.update(|current| {
                if current.as_deref() == Some(message.as_str()) {
                    *current = None;
                }
            });
        });
    }

    /// Surface a failed operation as a toast
    ///
    /// `Disposed` means the page is already gone and is dropped silently.
    pub fn report(&self, err: &BoardError) {
        match err {
            BoardError::Disposed => {}
            err if err.is_unauthorized() => self.show_toast("로그인이 필요합니다."),
            err => self.show_toast(err.to_string()),
        }
    }

    /// Like `report`, but pages that require a session leave for login
    pub fn report_or_login(&self, err: &BoardError) {
        self.report(err);
        if err.is_unauthorized() {
            self.navigate(Page::Login);
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
