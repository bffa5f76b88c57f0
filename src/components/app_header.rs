//! App Header Component
//!
//! Board title, the logged-in user's avatar and account links.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, Page};
use crate::store::{store_set_identity, use_board_store, BoardStateStoreFields};

#[component]
pub fn AppHeader() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_board_store();

    let logout = move |_| {
        let account = ctx.services().account();
        spawn_local(async move {
            account.logout().await;
            store_set_identity(&store, None);
            ctx.navigate(Page::Login);
        });
    };

    let avatar_url = move || {
        let config = ctx.config();
        store
            .identity()
            .get()
            .and_then(|identity| identity.profile_image_url)
            .map(|url| config.resolve_asset_url(&url))
    };

    view! {
        <header class="app-header">
            <button class="header-title" on:click=move |_| ctx.navigate(Page::Board)>
                "아무 말 대잔치"
            </button>
            <Show when=move || store.identity().get().is_some()>
                <div class="header-account">
                    {move || match avatar_url() {
                        Some(url) => view! { <img class="header-avatar" src=url alt="" /> }.into_any(),
                        None => view! { <span class="header-avatar placeholder"></span> }.into_any(),
                    }}
                    <span class="header-nickname">
                        {move || store.identity().get().map(|i| i.nickname).unwrap_or_default()}
                    </span>
                    <button class="header-btn" on:click=move |_| ctx.navigate(Page::Profile)>
                        "회원정보수정"
                    </button>
                    <button class="header-btn" on:click=logout>
                        "로그아웃"
                    </button>
                </div>
            </Show>
        </header>
    }
}
