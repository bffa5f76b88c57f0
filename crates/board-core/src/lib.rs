//! Board Core
//!
//! Client-side state for the discussion board, independent of any renderer:
//! - session: credential and identity cache over a key-value backend
//! - api: remote operations and their typed failures
//! - feed / post_detail / comment_edit / account: controllers that own view state
//! - format: display text derived from authoritative values

pub mod account;
pub mod api;
pub mod comment_edit;
pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod models;
pub mod post_detail;
pub mod post_editor;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{AccountController, ProfileUpdate};
pub use api::{ApiGateway, HttpGateway};
pub use comment_edit::CommentEditController;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, BoardError, BoardResult, ErrorKind};
pub use feed::{FeedPhase, FeedState, LoadOutcome, PaginatedFeed};
pub use models::*;
pub use post_detail::{
    CommentsStatus, DeleteOutcome, DeleteTarget, LikeOutcome, PostDetailController, PostDetailState,
};
pub use post_editor::{PostDraft, PostEditor};
pub use session::{Credential, KeyValueStore, MemoryStore, SessionStore};
