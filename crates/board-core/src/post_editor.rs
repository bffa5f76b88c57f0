//! Post Editor
//!
//! Publishing a new post, with an optional attachment uploaded first.

use std::rc::Rc;

use tracing::info;

use crate::api::ApiGateway;
use crate::error::{BoardError, BoardResult};
use crate::models::{NewPost, PostId, Upload};

/// New post form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub attachment: Option<Upload>,
}

pub struct PostEditor<G: ?Sized> {
    api: Rc<G>,
}

impl<G: ?Sized> Clone for PostEditor<G> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
        }
    }
}

impl<G: ApiGateway + ?Sized> PostEditor<G> {
    pub fn new(api: Rc<G>) -> Self {
        Self { api }
    }

    /// Publish the draft and return the new post's id
    ///
    /// A blank title or body is rejected before anything is uploaded.
    pub async fn publish(&self, draft: PostDraft) -> BoardResult<PostId> {
        let title = draft.title.trim();
        let content = draft.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(BoardError::EmptyContent);
        }

        let attachment_url = match draft.attachment {
            Some(upload) => Some(self.api.upload_file(upload).await?),
            None => None,
        };

        let id = self
            .api
            .create_post(&NewPost {
                title: title.to_string(),
                content: content.to_string(),
                attachment_url,
            })
            .await?;
        info!(post_id = id, "post published");
        Ok(id)
    }
}
