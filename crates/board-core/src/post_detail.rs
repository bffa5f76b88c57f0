//! Post Detail Controller
//!
//! State of one displayed post: the post itself, its like status, its
//! comments and a pending delete confirmation. Likes and deletes are applied
//! only after the server confirms them; counts always come from the server
//! or from a confirmed single-step change.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::api::ApiGateway;
use crate::error::{BoardError, BoardResult, ErrorKind};
use crate::models::{Comment, CommentId, LikeState, Post, PostId, PostPatch};
use crate::session::SessionStore;

/// Whether the comment section could be loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentsStatus {
    #[default]
    NotLoaded,
    Loaded,
    /// The post is shown without comments
    Failed(ErrorKind),
}

/// What a pending delete confirmation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Post(PostId),
    Comment(CommentId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Nothing was pending
    Nothing,
    /// The post is gone; the view should leave the page
    PostDeleted(PostId),
    CommentDeleted(CommentId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeOutcome {
    /// The server accepted the toggle
    Toggled(LikeState),
    /// The server disagreed with our view; state was reloaded instead
    Reloaded(LikeState),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDetailState {
    pub post: Option<Post>,
    pub like: LikeState,
    pub comments: Vec<Comment>,
    pub comments_status: CommentsStatus,
    pub pending_delete: Option<DeleteTarget>,
}

/// Single-post controller
pub struct PostDetailController<G: ?Sized> {
    api: Rc<G>,
    session: SessionStore,
    state: Rc<RefCell<PostDetailState>>,
    disposed: Rc<Cell<bool>>,
}

impl<G: ?Sized> Clone for PostDetailController<G> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            session: self.session.clone(),
            state: Rc::clone(&self.state),
            disposed: Rc::clone(&self.disposed),
        }
    }
}

impl<G: ApiGateway + ?Sized> PostDetailController<G> {
    pub fn new(api: Rc<G>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            state: Rc::new(RefCell::new(PostDetailState::default())),
            disposed: Rc::new(Cell::new(false)),
        }
    }

    pub fn snapshot(&self) -> PostDetailState {
        self.state.borrow().clone()
    }

    pub fn post_id(&self) -> Option<PostId> {
        self.state.borrow().post.as_ref().map(|post| post.id)
    }

    pub fn like_state(&self) -> LikeState {
        self.state.borrow().like
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.borrow().comments.clone()
    }

    /// Stop applying results; in-flight responses are dropped on arrival
    pub fn dispose(&self) {
        self.disposed.set(true);
    }

    pub(crate) fn api(&self) -> &Rc<G> {
        &self.api
    }

    pub(crate) fn ensure_live(&self) -> BoardResult<()> {
        if self.disposed.get() {
            debug!("discarding response for disposed post view");
            return Err(BoardError::Disposed);
        }
        Ok(())
    }

    fn require_post(&self) -> BoardResult<PostId> {
        self.post_id().ok_or(BoardError::NoPostLoaded)
    }

    // ========================
    // Loading
    // ========================

    /// Load a post, then its comments
    ///
    /// `NotFound` on the post propagates. A comment failure does not: the
    /// post stays loaded and `comments_status` records the failure.
    pub async fn load(&self, post_id: PostId) -> BoardResult<()> {
        let post = self.api.get_post(post_id).await;
        self.ensure_live()?;
        let post = post?;

        {
            let mut state = self.state.borrow_mut();
            state.like = LikeState::observe(&post, self.session.current_user_id());
            state.post = Some(post);
            state.comments.clear();
            state.comments_status = CommentsStatus::NotLoaded;
            state.pending_delete = None;
        }

        self.load_comments().await
    }

    /// Reload the comment section
    pub async fn load_comments(&self) -> BoardResult<()> {
        let post_id = self.require_post()?;
        let result = self.api.list_comments(post_id).await;
        self.ensure_live()?;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(comments) => {
                state.comments = comments;
                state.comments_status = CommentsStatus::Loaded;
            }
            Err(err) => {
                warn!(post_id, "comments unavailable: {}", err);
                state.comments.clear();
                state.comments_status = CommentsStatus::Failed(err.kind);
            }
        }
        Ok(())
    }

    /// Replace the post and its like state with the server's copy
    async fn reload_post(&self, post_id: PostId) -> BoardResult<LikeState> {
        let post = self.api.get_post(post_id).await;
        self.ensure_live()?;
        let post = post?;

        let mut state = self.state.borrow_mut();
        state.like = LikeState::observe(&post, self.session.current_user_id());
        state.post = Some(post);
        Ok(state.like)
    }

    // ========================
    // Likes
    // ========================

    /// Like or unlike, depending on the current state
    ///
    /// Nothing changes until the server answers. On `Conflict` the post is
    /// reloaded; any other failure leaves the state untouched.
    pub async fn toggle_like(&self) -> BoardResult<LikeOutcome> {
        let post_id = self.require_post()?;
        let was_liked = self.state.borrow().like.liked;

        let result = if was_liked {
            self.api.unlike_post(post_id).await
        } else {
            self.api.like_post(post_id).await
        };
        self.ensure_live()?;

        match result {
            Ok(count) => {
                let mut state = self.state.borrow_mut();
                let liked = !was_liked;
                state.like = LikeState { liked, count };
                let viewer = self.session.current_user_id();
                if let Some(post) = state.post.as_mut() {
                    post.like_count = count;
                    if let Some(user_id) = viewer {
                        if liked {
                            post.liked_by.insert(user_id);
                        } else {
                            post.liked_by.remove(&user_id);
                        }
                    }
                }
                debug!(post_id, liked, count, "like toggled");
                Ok(LikeOutcome::Toggled(state.like))
            }
            Err(err) if err.is(ErrorKind::Conflict) => {
                warn!(post_id, "like state out of sync, reloading: {}", err);
                let like = self.reload_post(post_id).await?;
                Ok(LikeOutcome::Reloaded(like))
            }
            Err(err) => Err(err.into()),
        }
    }

    // ========================
    // Post Edits
    // ========================

    pub async fn update_post(&self, patch: &PostPatch) -> BoardResult<Post> {
        let post_id = self.require_post()?;
        let updated = self.api.update_post(post_id, patch).await;
        self.ensure_live()?;
        let updated = updated?;

        let mut state = self.state.borrow_mut();
        state.like = LikeState::observe(&updated, self.session.current_user_id());
        state.post = Some(updated.clone());
        Ok(updated)
    }

    // ========================
    // Comments
    // ========================

    /// Post a comment; blank content is rejected without a request
    pub async fn add_comment(&self, content: &str) -> BoardResult<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BoardError::EmptyContent);
        }
        let post_id = self.require_post()?;

        let created = self.api.create_comment(post_id, content).await;
        self.ensure_live()?;
        let created = created?;

        let mut state = self.state.borrow_mut();
        state.comments.push(created.clone());
        if let Some(post) = state.post.as_mut() {
            post.comment_count += 1;
        }
        Ok(created)
    }

    /// Delete a comment once the server confirms it
    pub async fn delete_comment(&self, id: CommentId) -> BoardResult<()> {
        let post_id = self.require_post()?;
        let result = self.api.delete_comment(post_id, id).await;
        self.ensure_live()?;
        result?;

        let mut state = self.state.borrow_mut();
        state.comments.retain(|comment| comment.id != id);
        if let Some(post) = state.post.as_mut() {
            post.comment_count = post.comment_count.saturating_sub(1);
        }
        Ok(())
    }

    /// Swap in the server's copy of an edited comment
    pub(crate) fn replace_comment(&self, updated: Comment) -> BoardResult<()> {
        let mut state = self.state.borrow_mut();
        let slot = state
            .comments
            .iter_mut()
            .find(|comment| comment.id == updated.id)
            .ok_or(BoardError::CommentNotFound(updated.id))?;
        *slot = updated;
        Ok(())
    }

    // ========================
    // Delete Confirmation
    // ========================

    pub fn request_delete(&self, target: DeleteTarget) {
        self.state.borrow_mut().pending_delete = Some(target);
    }

    pub fn cancel_delete(&self) {
        self.state.borrow_mut().pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<DeleteTarget> {
        self.state.borrow().pending_delete
    }

    /// Carry out the pending delete, if any
    pub async fn confirm_delete(&self) -> BoardResult<DeleteOutcome> {
        let target = self.state.borrow_mut().pending_delete.take();
        match target {
            None => Ok(DeleteOutcome::Nothing),
            Some(DeleteTarget::Comment(id)) => {
                self.delete_comment(id).await?;
                Ok(DeleteOutcome::CommentDeleted(id))
            }
            Some(DeleteTarget::Post(id)) => {
                let result = self.api.delete_post(id).await;
                self.ensure_live()?;
                result?;

                let mut state = self.state.borrow_mut();
                if state.post.as_ref().map(|post| post.id) == Some(id) {
                    *state = PostDetailState::default();
                }
                Ok(DeleteOutcome::PostDeleted(id))
            }
        }
    }
}
