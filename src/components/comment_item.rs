//! Comment Item Component
//!
//! One comment, switching to an inline editor while it is the edit target.

use board_core::format::format_date;
use board_core::Comment;
use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn CommentItem(
    comment: Comment,
    #[prop(into)] editing: Signal<bool>,
    /// Only the author gets edit/delete controls
    is_mine: bool,
    #[prop(into)] on_edit: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] on_submit: Callback<String>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let (draft, set_draft) = signal(comment.content.clone());
    let original = comment.content.clone();

    let avatar = comment
        .author
        .profile_image_url
        .as_deref()
        .map(|url| ctx.config().resolve_asset_url(url));

    let begin_edit = move |_| {
        set_draft.set(original.clone());
        on_edit.run(());
    };

    view! {
        <li class="comment-item">
            <div class="comment-author">
                {match avatar {
                    Some(url) => view! { <img class="author-avatar" src=url alt="" /> }.into_any(),
                    None => view! { <span class="author-avatar placeholder"></span> }.into_any(),
                }}
                <span class="author-nickname">{comment.author.nickname.clone()}</span>
                <span class="comment-date">{format_date(&comment.created_at)}</span>
                <Show when=move || is_mine && !editing.get()>
                    <button class="small-btn" on:click=begin_edit.clone()>"수정"</button>
                    <button class="small-btn" on:click=move |_| on_delete.run(())>"삭제"</button>
                </Show>
            </div>
            <Show
                when=move || editing.get()
                fallback={
                    let content = comment.content.clone();
                    move || view! { <p class="comment-content">{content.clone()}</p> }
                }
            >
                <div class="comment-edit">
                    <textarea
                        prop:value=draft
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    ></textarea>
                    <button class="small-btn" on:click=move |_| on_cancel.run(())>"취소"</button>
                    <button
                        class="small-btn primary"
                        disabled=move || draft.get().trim().is_empty()
                        on:click=move |_| on_submit.run(draft.get())
                    >
                        "댓글 수정"
                    </button>
                </div>
            </Show>
        </li>
    }
}
