//! Post Detail Component
//!
//! A single post with its like button, comment section, inline edits and
//! the delete confirmation dialog. Every action goes through the detail
//! controller; the store only mirrors its snapshot.

use board_core::format::{format_count, format_date};
use board_core::{
    BoardError, CommentEditController, CommentId, DeleteOutcome, DeleteTarget, ErrorKind,
    HttpGateway, LikeOutcome, Post, PostDetailController, PostId, PostPatch,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use super::{CommentItem, DeleteConfirmDialog};
use crate::context::{use_app_context, Page};
use crate::store::{
    store_apply_detail, store_clear_detail, store_set_editing, use_board_store,
    BoardStateStoreFields, BoardStore,
};

type Detail = PostDetailController<HttpGateway>;
type Edit = CommentEditController<HttpGateway>;

fn sync(store: &BoardStore, detail: &Detail, edit: &Edit) {
    store_apply_detail(store, &detail.snapshot());
    store_set_editing(store, edit.editing());
}

#[component]
pub fn PostDetailView(post_id: PostId) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_board_store();

    let (detail, edit) = ctx.services().post_detail();
    let detail = StoredValue::new_local(detail);
    let edit = StoredValue::new_local(edit);

    // ========================
    // Loading
    // ========================

    store_clear_detail(&store);
    {
        let (detail, edit) = (detail.get_value(), edit.get_value());
        spawn_local(async move {
            match detail.load(post_id).await {
                Ok(()) => sync(&store, &detail, &edit),
                Err(BoardError::Disposed) => {}
                Err(e) if e.api_kind() == Some(ErrorKind::NotFound) => {
                    ctx.show_toast("게시글을 찾을 수 없습니다.");
                    ctx.navigate(Page::Board);
                }
                Err(e) => ctx.report_or_login(&e),
            }
        });
    }
    on_cleanup(move || {
        detail.try_with_value(|detail| detail.dispose());
    });

    let my_id = move || store.identity().get().map(|identity| identity.id);

    // ========================
    // Likes
    // ========================

    let toggle_like = move |_| {
        let (detail, edit) = (detail.get_value(), edit.get_value());
        spawn_local(async move {
            match detail.toggle_like().await {
                Ok(LikeOutcome::Toggled(_)) => sync(&store, &detail, &edit),
                Ok(LikeOutcome::Reloaded(_)) => {
                    sync(&store, &detail, &edit);
                    ctx.show_toast("좋아요 상태를 새로 불러왔습니다.");
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    // ========================
    // Post Edit
    // ========================

    let (editing_post, set_editing_post) = signal(false);
    let (title_draft, set_title_draft) = signal(String::new());
    let (content_draft, set_content_draft) = signal(String::new());

    let begin_post_edit = move |post: &Post| {
        set_title_draft.set(post.title.clone());
        set_content_draft.set(post.content.clone());
        set_editing_post.set(true);
    };

    let save_post = move |_| {
        let (title, content) = (title_draft.get(), content_draft.get());
        if title.trim().is_empty() || content.trim().is_empty() {
            ctx.report(&BoardError::EmptyContent);
            return;
        }
        let (detail, edit) = (detail.get_value(), edit.get_value());
        spawn_local(async move {
            let patch = PostPatch {
                title: Some(title.trim().to_string()),
                content: Some(content.trim().to_string()),
                attachment_url: None,
            };
            match detail.update_post(&patch).await {
                Ok(_) => {
                    sync(&store, &detail, &edit);
                    set_editing_post.set(false);
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    // ========================
    // Comments
    // ========================

    let (comment_draft, set_comment_draft) = signal(String::new());

    let add_comment = move |_| {
        let text = comment_draft.get();
        let (detail, edit) = (detail.get_value(), edit.get_value());
        spawn_local(async move {
            match detail.add_comment(&text).await {
                Ok(_) => {
                    set_comment_draft.set(String::new());
                    sync(&store, &detail, &edit);
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    let begin_comment_edit = move |id: CommentId| {
        edit.with_value(|edit| edit.begin_edit(id));
        store_set_editing(&store, edit.with_value(|edit| edit.editing()));
    };

    let cancel_comment_edit = move || {
        edit.with_value(|edit| edit.cancel_edit());
        store_set_editing(&store, None);
    };

    let submit_comment_edit = move |id: CommentId, text: String| {
        let (detail, edit) = (detail.get_value(), edit.get_value());
        spawn_local(async move {
            let result = edit.submit_edit(id, &text).await;
            if let Err(e) = &result {
                ctx.report(e);
            }
            if !matches!(result, Err(BoardError::Disposed)) {
                sync(&store, &detail, &edit);
            }
        });
    };

    // ========================
    // Delete Confirmation
    // ========================

    let request_delete = move |target: DeleteTarget| {
        detail.with_value(|detail| detail.request_delete(target));
        store.pending_delete().set(Some(target));
    };

    let cancel_delete = Callback::new(move |_: ()| {
        detail.with_value(|detail| detail.cancel_delete());
        store.pending_delete().set(None);
    });

    let confirm_delete = Callback::new(move |_: ()| {
        let (detail, edit) = (detail.get_value(), edit.get_value());
        spawn_local(async move {
            match detail.confirm_delete().await {
                Ok(DeleteOutcome::PostDeleted(id)) => {
                    info!("[DETAIL] post {} deleted", id);
                    store_clear_detail(&store);
                    ctx.navigate(Page::Board);
                }
                Ok(_) => sync(&store, &detail, &edit),
                Err(BoardError::Disposed) => {}
                Err(e) => {
                    sync(&store, &detail, &edit);
                    ctx.report(&e);
                }
            }
        });
    });

    // ========================
    // View
    // ========================

    let post_view = move || {
        store.post().get().map(|post| {
            let is_author = my_id() == Some(post.author.id);
            let config = ctx.config();
            let avatar = post
                .author
                .profile_image_url
                .as_deref()
                .map(|url| config.resolve_asset_url(url));
            let attachment = post
                .attachment
                .as_ref()
                .map(|attachment| config.resolve_asset_url(&attachment.url));
            let target = DeleteTarget::Post(post.id);
            let for_edit = post.clone();

            view! {
                <article class="post-detail">
                    <h2 class="post-title">{post.title.clone()}</h2>
                    <div class="post-meta">
                        {match avatar {
                            Some(url) => view! { <img class="author-avatar" src=url alt="" /> }.into_any(),
                            None => view! { <span class="author-avatar placeholder"></span> }.into_any(),
                        }}
                        <span class="author-nickname">{post.author.nickname.clone()}</span>
                        <span class="post-date">{format_date(&post.created_at)}</span>
                        <Show when=move || is_author>
                            <button
                                class="small-btn"
                                on:click={
                                    let for_edit = for_edit.clone();
                                    move |_| begin_post_edit(&for_edit)
                                }
                            >
                                "수정"
                            </button>
                            <button class="small-btn" on:click=move |_| request_delete(target)>
                                "삭제"
                            </button>
                        </Show>
                    </div>
                    {attachment.map(|url| view! { <img class="post-image" src=url alt="" /> })}
                    <p class="post-content">{post.content.clone()}</p>
                    <div class="post-stats">
                        <button
                            class=move || if store.like().get().liked { "like-btn liked" } else { "like-btn" }
                            on:click=toggle_like
                        >
                            {move || format_count(store.like().get().count)}
                            <span>"좋아요수"</span>
                        </button>
                        <div class="stat-box">
                            {format_count(post.hits)}
                            <span>"조회수"</span>
                        </div>
                        <div class="stat-box">
                            {format_count(post.comment_count)}
                            <span>"댓글"</span>
                        </div>
                    </div>
                </article>
            }
        })
    };

    view! {
        <section class="post-detail-page">
            <Show
                when=move || !editing_post.get()
                fallback=move || view! {
                    <div class="post-edit">
                        <input
                            type="text"
                            maxlength="26"
                            prop:value=title_draft
                            on:input=move |ev| set_title_draft.set(event_target_value(&ev))
                        />
                        <textarea
                            prop:value=content_draft
                            on:input=move |ev| set_content_draft.set(event_target_value(&ev))
                        ></textarea>
                        <button class="small-btn" on:click=move |_| set_editing_post.set(false)>"취소"</button>
                        <button class="small-btn primary" on:click=save_post>"수정하기"</button>
                    </div>
                }
            >
                {post_view}
            </Show>

            <Show when=move || store.post().get().is_some()>
                <div class="comment-form">
                    <textarea
                        placeholder="댓글을 남겨주세요!"
                        prop:value=comment_draft
                        on:input=move |ev| set_comment_draft.set(event_target_value(&ev))
                    ></textarea>
                    <button
                        class=move || if comment_draft.get().trim().is_empty() { "primary-btn" } else { "primary-btn active" }
                        disabled=move || comment_draft.get().trim().is_empty()
                        on:click=add_comment
                    >
                        "댓글 등록"
                    </button>
                </div>
            </Show>

            <Show when=move || store.comments_failed().get()>
                <p class="helper-text">"댓글을 불러오지 못했습니다."</p>
            </Show>

            <ul class="comment-list">
                <For
                    each=move || store.comments().get()
                    key=|comment| (comment.id, comment.content.clone())
                    children=move |comment| {
                        let id = comment.id;
                        let is_mine = my_id() == Some(comment.author.id);
                        view! {
                            <CommentItem
                                comment=comment
                                editing=Signal::derive(move || store.editing_comment().get() == Some(id))
                                is_mine=is_mine
                                on_edit=Callback::new(move |_: ()| begin_comment_edit(id))
                                on_cancel=Callback::new(move |_: ()| cancel_comment_edit())
                                on_submit=Callback::new(move |text: String| submit_comment_edit(id, text))
                                on_delete=Callback::new(move |_: ()| request_delete(DeleteTarget::Comment(id)))
                            />
                        }
                    }
                />
            </ul>

            <DeleteConfirmDialog
                pending=Signal::derive(move || store.pending_delete().get())
                on_confirm=confirm_delete
                on_cancel=cancel_delete
            />
        </section>
    }
}
