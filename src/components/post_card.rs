//! Post Card Component
//!
//! One feed entry. Counts and dates are formatted here, never stored.

use board_core::format::{format_count, format_date, truncate_title};
use board_core::Post;
use leptos::prelude::*;

use crate::context::{use_app_context, Page};

#[component]
pub fn PostCard(post: Post) -> impl IntoView {
    let ctx = use_app_context();
    let post_id = post.id;
    let avatar = post
        .author
        .profile_image_url
        .as_deref()
        .map(|url| ctx.config().resolve_asset_url(url));

    view! {
        <article class="post-card" on:click=move |_| ctx.navigate(Page::Post(post_id))>
            <h3 class="post-card-title">{truncate_title(&post.title)}</h3>
            <div class="post-card-meta">
                <span>"좋아요 " {format_count(post.like_count)}</span>
                <span>"댓글 " {format_count(post.comment_count)}</span>
                <span>"조회수 " {format_count(post.hits)}</span>
                <span class="post-card-date">{format_date(&post.created_at)}</span>
            </div>
            <div class="post-card-author">
                {match avatar {
                    Some(url) => view! { <img class="author-avatar" src=url alt="" /> }.into_any(),
                    None => view! { <span class="author-avatar placeholder"></span> }.into_any(),
                }}
                <span class="author-nickname">{post.author.nickname.clone()}</span>
            </div>
        </article>
    }
}
