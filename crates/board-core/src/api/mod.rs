//! Board API
//!
//! Remote operations the controllers depend on. Every call resolves to the
//! decoded payload or an [`ApiError`](crate::error::ApiError); recovery is
//! left to the caller.

mod http;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::models::{
    Comment, CommentId, LoginResponse, NewPost, Post, PostId, PostPatch, Upload, UserIdentity,
    UserPatch,
};

pub use http::HttpGateway;

/// Remote board operations
///
/// Futures are `?Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait ApiGateway {
    // ========================
    // Auth
    // ========================

    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn logout(&self) -> ApiResult<()>;

    /// Fails with `Conflict` when the nickname is in use
    async fn check_nickname(&self, nickname: &str) -> ApiResult<()>;

    // ========================
    // Posts
    // ========================

    async fn list_posts(&self, page: u32, limit: u32) -> ApiResult<Vec<Post>>;

    async fn get_post(&self, id: PostId) -> ApiResult<Post>;

    async fn create_post(&self, post: &NewPost) -> ApiResult<PostId>;

    async fn update_post(&self, id: PostId, patch: &PostPatch) -> ApiResult<Post>;

    async fn delete_post(&self, id: PostId) -> ApiResult<()>;

    /// Returns the post's like count after the change
    async fn like_post(&self, id: PostId) -> ApiResult<u64>;

    /// Returns the post's like count after the change
    async fn unlike_post(&self, id: PostId) -> ApiResult<u64>;

    // ========================
    // Comments
    // ========================

    async fn list_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>>;

    async fn create_comment(&self, post_id: PostId, content: &str) -> ApiResult<Comment>;

    async fn update_comment(&self, post_id: PostId, id: CommentId, content: &str) -> ApiResult<Comment>;

    async fn delete_comment(&self, post_id: PostId, id: CommentId) -> ApiResult<()>;

    // ========================
    // Users & Files
    // ========================

    /// Returns the hosted URL
    async fn upload_file(&self, upload: Upload) -> ApiResult<String>;

    async fn get_current_user(&self) -> ApiResult<UserIdentity>;

    async fn update_user(&self, patch: &UserPatch) -> ApiResult<UserIdentity>;

    async fn update_password(&self, password: &str) -> ApiResult<()>;

    async fn withdraw(&self) -> ApiResult<()>;
}
