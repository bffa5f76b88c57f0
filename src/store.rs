//! Global Board State Store
//!
//! Reactive mirror of the core controllers' snapshots. Controllers own the
//! state; components read it from here and never write it directly.

use board_core::{
    Comment, CommentId, CommentsStatus, DeleteTarget, FeedState, LikeState, Post,
    PostDetailState, UserIdentity,
};
use leptos::prelude::*;
use reactive_stores::Store;

/// Board view state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BoardState {
    /// Feed items in display order
    pub posts: Vec<Post>,
    pub feed_loading: bool,
    pub feed_exhausted: bool,
    /// First page came back with no posts
    pub feed_empty: bool,
    /// Post on the detail page
    pub post: Option<Post>,
    pub like: LikeState,
    pub comments: Vec<Comment>,
    pub comments_failed: bool,
    /// Comment whose edit form is open
    pub editing_comment: Option<CommentId>,
    pub pending_delete: Option<DeleteTarget>,
    /// Logged-in user as last cached
    pub identity: Option<UserIdentity>,
}

pub type BoardStore = Store<BoardState>;

pub fn use_board_store() -> BoardStore {
    expect_context::<BoardStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_apply_feed(store: &BoardStore, feed: &FeedState) {
    store.posts().set(feed.items().to_vec());
    store.feed_loading().set(feed.is_loading());
    store.feed_exhausted().set(feed.is_exhausted());
    store.feed_empty().set(feed.is_empty_feed());
}

pub fn store_apply_detail(store: &BoardStore, detail: &PostDetailState) {
    store.post().set(detail.post.clone());
    store.like().set(detail.like);
    store.comments().set(detail.comments.clone());
    store
        .comments_failed()
        .set(matches!(detail.comments_status, CommentsStatus::Failed(_)));
    store.pending_delete().set(detail.pending_delete);
}

/// Forget the previous post before another one loads
pub fn store_clear_detail(store: &BoardStore) {
    store_apply_detail(store, &PostDetailState::default());
    store.editing_comment().set(None);
}

pub fn store_set_editing(store: &BoardStore, editing: Option<CommentId>) {
    store.editing_comment().set(editing);
}

pub fn store_set_identity(store: &BoardStore, identity: Option<UserIdentity>) {
    store.identity().set(identity);
}
