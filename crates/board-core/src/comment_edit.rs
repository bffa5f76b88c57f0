//! Comment Edit Controller
//!
//! At most one comment is in edit mode at a time. A failed submit keeps the
//! edit open so the text can be retried.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::api::ApiGateway;
use crate::error::{BoardError, BoardResult};
use crate::models::{Comment, CommentId};
use crate::post_detail::PostDetailController;

pub struct CommentEditController<G: ?Sized> {
    detail: PostDetailController<G>,
    target: Rc<Cell<Option<CommentId>>>,
}

impl<G: ?Sized> Clone for CommentEditController<G> {
    fn clone(&self) -> Self {
        Self {
            detail: self.detail.clone(),
            target: Rc::clone(&self.target),
        }
    }
}

impl<G: ApiGateway + ?Sized> CommentEditController<G> {
    /// Edits apply to the comment list held by `detail`
    pub fn new(detail: PostDetailController<G>) -> Self {
        Self {
            detail,
            target: Rc::new(Cell::new(None)),
        }
    }

    /// Comment currently in edit mode
    pub fn editing(&self) -> Option<CommentId> {
        self.target.get()
    }

    pub fn is_editing(&self, id: CommentId) -> bool {
        self.target.get() == Some(id)
    }

    /// Open an edit, closing any other; returns the closed one
    pub fn begin_edit(&self, id: CommentId) -> Option<CommentId> {
        let previous = self.target.replace(Some(id));
        debug!(comment_id = id, ?previous, "comment edit started");
        previous.filter(|prev| *prev != id)
    }

    pub fn cancel_edit(&self) {
        self.target.set(None);
    }

    /// Save the edit
    ///
    /// Blank content is rejected without a request. On failure the edit stays
    /// open; on success it closes, whether or not the comment is still listed.
    pub async fn submit_edit(&self, id: CommentId, content: &str) -> BoardResult<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BoardError::EmptyContent);
        }
        let post_id = self.detail.post_id().ok_or(BoardError::NoPostLoaded)?;

        let updated = self.detail.api().update_comment(post_id, id, content).await;
        self.detail.ensure_live()?;
        let updated = updated?;

        if self.is_editing(id) {
            self.target.set(None);
        }
        // The server accepted the edit even if the list was reloaded meanwhile
        if let Err(err) = self.detail.replace_comment(updated.clone()) {
            debug!(comment_id = id, "edited comment not in local list: {}", err);
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{comment, logged_in_session, post, FakeBoard};

    async fn setup() -> (Rc<FakeBoard>, PostDetailController<FakeBoard>, CommentEditController<FakeBoard>) {
        let mut p = post(7);
        p.comment_count = 2;
        let board = FakeBoard::with_post(p, vec![comment(1, 7, "first"), comment(2, 7, "second")]);
        let detail = PostDetailController::new(Rc::clone(&board), logged_in_session(&board));
        detail.load(7).await.unwrap();
        let edit = CommentEditController::new(detail.clone());
        (board, detail, edit)
    }

    #[tokio::test]
    async fn test_single_edit_at_a_time() {
        let (_board, _detail, edit) = setup().await;

        assert_eq!(edit.begin_edit(1), None);
        assert_eq!(edit.begin_edit(2), Some(1));

        assert_eq!(edit.editing(), Some(2));
        assert!(!edit.is_editing(1));
    }

    #[tokio::test]
    async fn test_cancel_makes_no_request() {
        let (board, _detail, edit) = setup().await;
        let calls = board.total_calls();

        edit.begin_edit(1);
        edit.cancel_edit();

        assert_eq!(edit.editing(), None);
        assert_eq!(board.total_calls(), calls);
    }

    #[tokio::test]
    async fn test_blank_submit_keeps_edit_open() {
        let (board, _detail, edit) = setup().await;
        let calls = board.total_calls();
        edit.begin_edit(1);

        assert_eq!(edit.submit_edit(1, "").await.unwrap_err(), BoardError::EmptyContent);

        assert_eq!(edit.editing(), Some(1));
        assert_eq!(board.total_calls(), calls);
    }

    #[tokio::test]
    async fn test_submit_replaces_in_place() {
        let (_board, detail, edit) = setup().await;
        edit.begin_edit(1);

        edit.submit_edit(1, "edited").await.unwrap();

        let contents: Vec<_> = detail.comments().into_iter().map(|c| c.content).collect();
        assert_eq!(contents, vec!["edited", "second"]);
        assert_eq!(edit.editing(), None);
        assert_eq!(detail.snapshot().post.unwrap().comment_count, 2);
    }

    #[tokio::test]
    async fn test_submit_succeeds_after_comment_left_list() {
        let (board, detail, edit) = setup().await;
        edit.begin_edit(1);
        board.fail_next("list_comments", ErrorKind::ServerError);
        detail.load_comments().await.unwrap();
        assert!(detail.comments().is_empty());

        let updated = edit.submit_edit(1, "edited").await.unwrap();

        assert_eq!(updated.content, "edited");
        assert_eq!(edit.editing(), None);
        assert!(detail.comments().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_edit_open() {
        let (board, detail, edit) = setup().await;
        edit.begin_edit(2);
        board.fail_next("update_comment", ErrorKind::Forbidden);

        let err = edit.submit_edit(2, "edited").await.unwrap_err();

        assert_eq!(err.api_kind(), Some(ErrorKind::Forbidden));
        assert_eq!(edit.editing(), Some(2));
        assert_eq!(detail.comments()[1].content, "second");
    }
}
