//! Post List Component
//!
//! Infinite-scroll feed. Scroll events near the bottom trigger the next
//! page; the feed itself drops triggers while a page is in flight.

use board_core::{BoardError, BoardResult, HttpGateway, LoadOutcome, PaginatedFeed};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use super::PostCard;
use crate::context::{use_app_context, AppContext, Page};
use crate::store::{store_apply_feed, use_board_store, BoardStateStoreFields, BoardStore};

/// Distance from the bottom (px) that counts as "reached the end"
const SCROLL_THRESHOLD_PX: i32 = 100;

fn near_bottom() -> bool {
    let Some(root) = document().document_element() else {
        return false;
    };
    root.scroll_top() + root.client_height() >= root.scroll_height() - SCROLL_THRESHOLD_PX
}

/// Run one feed trigger and mirror the result into the store
fn trigger(
    ctx: AppContext,
    store: BoardStore,
    feed: PaginatedFeed<HttpGateway>,
    first: bool,
) {
    store.feed_loading().set(true);
    spawn_local(async move {
        let result: BoardResult<LoadOutcome> = if first {
            feed.start().await
        } else {
            feed.load_next().await
        };
        match result {
            Ok(outcome) => {
                debug!("[FEED] {:?}", outcome);
                store_apply_feed(&store, &feed.snapshot());
            }
            Err(BoardError::Disposed) => {}
            Err(e) => {
                store_apply_feed(&store, &feed.snapshot());
                ctx.report_or_login(&e);
            }
        }
    });
}

#[component]
pub fn PostList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_board_store();

    let created = ctx.services().feed();
    store_apply_feed(&store, &created.snapshot());
    let feed = StoredValue::new_local(created);

    trigger(ctx, store, feed.get_value(), true);

    let listener = window_event_listener(leptos::ev::scroll, move |_| {
        if near_bottom() {
            if let Some(feed) = feed.try_get_value() {
                trigger(ctx, store, feed, false);
            }
        }
    });
    on_cleanup(move || {
        listener.remove();
        feed.try_with_value(|feed| feed.dispose());
    });

    view! {
        <section class="post-list">
            <div class="post-list-header">
                <p class="post-list-greeting">
                    "안녕하세요,"<br />"아무 말 대잔치 " <strong>"게시판"</strong> " 입니다."
                </p>
                <button class="primary-btn active" on:click=move |_| ctx.navigate(Page::NewPost)>
                    "게시글 작성"
                </button>
            </div>
            <Show when=move || store.feed_empty().get()>
                <p class="post-list-empty">"아직 게시글이 없습니다."</p>
            </Show>
            <For
                each=move || store.posts().get()
                key=|post| post.id
                children=move |post| view! { <PostCard post=post /> }
            />
            <Show when=move || store.feed_loading().get()>
                <p class="post-list-loading">"불러오는 중..."</p>
            </Show>
        </section>
    }
}
