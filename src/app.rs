//! Board Frontend App
//!
//! Builds the shared services, then switches between pages.

use std::rc::Rc;

use board_core::{HttpGateway, SessionStore};
use leptos::prelude::*;
use reactive_stores::Store;
use tracing::{error, info};

use crate::components::{
    AppHeader, DiagnosticsPanel, LoginForm, NewPostForm, PostDetailView, PostList, ProfileForm,
};
use crate::context::{AppContext, Page, Services};
use crate::storage;
use crate::store::{store_set_identity, BoardState};

#[component]
pub fn App() -> impl IntoView {
    let backend = storage::session_backend();
    let config = storage::load_config(backend.as_ref());
    let session = SessionStore::new(backend);

    let api = match HttpGateway::new(&config, session.clone()) {
        Ok(api) => Rc::new(api),
        Err(e) => {
            error!("[APP] cannot build API client: {}", e);
            return view! { <p class="fatal-error">"서버에 연결할 수 없습니다."</p> }.into_any();
        }
    };
    info!("[APP] API at {}", config.api_base_url);

    let store = Store::new(BoardState::default());
    store_set_identity(&store, session.get_identity());
    provide_context(store);

    let ctx = AppContext::new(Services {
        config,
        session,
        api,
    });
    provide_context(ctx);

    view! {
        <div class="app-layout">
            <AppHeader />
            <main class="main-content">
                {move || match ctx.page.get() {
                    Page::Login => view! { <LoginForm /> }.into_any(),
                    Page::Board => view! { <PostList /> }.into_any(),
                    Page::Post(post_id) => view! { <PostDetailView post_id=post_id /> }.into_any(),
                    Page::NewPost => view! { <NewPostForm /> }.into_any(),
                    Page::Profile => view! { <ProfileForm /> }.into_any(),
                }}
            </main>
            <Show when=move || ctx.toast.get().is_some()>
                <div class="toast">{move || ctx.toast.get().unwrap_or_default()}</div>
            </Show>
            <DiagnosticsPanel />
        </div>
    }
    .into_any()
}
