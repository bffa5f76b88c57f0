//! In-memory board used by controller tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::ApiGateway;
use crate::error::{ApiError, ApiResult, ErrorKind};
use crate::models::*;
use crate::session::{Credential, SessionStore};

pub fn created_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

pub fn user(id: UserId, nickname: &str) -> UserIdentity {
    UserIdentity {
        id,
        nickname: nickname.to_string(),
        profile_image_url: None,
        email: Some(format!("{}@board.test", nickname)),
    }
}

pub fn post(id: PostId) -> Post {
    Post {
        id,
        title: format!("Post {}", id),
        content: format!("content of {}", id),
        author: user(100, "author"),
        created_at: created_at(),
        like_count: 0,
        hits: 0,
        comment_count: 0,
        liked_by: Default::default(),
        attachment: None,
    }
}

pub fn posts(range: std::ops::RangeInclusive<PostId>) -> Vec<Post> {
    range.map(post).collect()
}

pub fn comment(id: CommentId, post_id: PostId, content: &str) -> Comment {
    Comment {
        id,
        post_id,
        content: content.to_string(),
        author: user(100, "author"),
        created_at: created_at(),
    }
}

/// Session logged in as [`FakeBoard::me`]
pub fn logged_in_session(board: &FakeBoard) -> SessionStore {
    let session = SessionStore::in_memory();
    session.set_session(&Credential::new("token"), &board.me.borrow());
    session
}

/// Scriptable in-memory gateway
///
/// Every call is recorded by name. `fail_next` makes the next call to an
/// operation fail; otherwise operations act on the in-memory data.
pub struct FakeBoard {
    pub me: RefCell<UserIdentity>,
    pub pages: RefCell<VecDeque<ApiResult<Vec<Post>>>>,
    pub post: RefCell<Option<Post>>,
    pub comments: RefCell<Vec<Comment>>,
    pub taken_nicknames: RefCell<HashSet<String>>,
    calls: RefCell<Vec<&'static str>>,
    failures: RefCell<HashMap<&'static str, ErrorKind>>,
    next_id: Cell<u64>,
    in_flight: Cell<usize>,
    max_in_flight: Cell<usize>,
}

impl FakeBoard {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            me: RefCell::new(user(1, "me")),
            pages: RefCell::new(VecDeque::new()),
            post: RefCell::new(None),
            comments: RefCell::new(Vec::new()),
            taken_nicknames: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            failures: RefCell::new(HashMap::new()),
            next_id: Cell::new(1000),
            in_flight: Cell::new(0),
            max_in_flight: Cell::new(0),
        })
    }

    pub fn with_post(post: Post, comments: Vec<Comment>) -> Rc<Self> {
        let board = Self::new();
        *board.post.borrow_mut() = Some(post);
        *board.comments.borrow_mut() = comments;
        board
    }

    pub fn push_page(&self, page: ApiResult<Vec<Post>>) {
        self.pages.borrow_mut().push_back(page);
    }

    pub fn fail_next(&self, op: &'static str, kind: ErrorKind) {
        self.failures.borrow_mut().insert(op, kind);
    }

    pub fn calls_to(&self, op: &str) -> usize {
        self.calls.borrow().iter().filter(|name| **name == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }

    fn enter(&self, op: &'static str) -> ApiResult<()> {
        self.calls.borrow_mut().push(op);
        match self.failures.borrow_mut().remove(op) {
            Some(kind) => Err(ApiError::new(kind, format!("{} failed", op))),
            None => Ok(()),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn with_post_mut<T>(&self, id: PostId, f: impl FnOnce(&mut Post) -> T) -> ApiResult<T> {
        match self.post.borrow_mut().as_mut() {
            Some(post) if post.id == id => Ok(f(post)),
            _ => Err(ApiError::new(ErrorKind::NotFound, "no such post")),
        }
    }
}

#[async_trait(?Send)]
impl ApiGateway for FakeBoard {
    async fn login(&self, _email: &str, password: &str) -> ApiResult<LoginResponse> {
        self.enter("login")?;
        if password == "wrong" {
            return Err(ApiError::unauthorized("bad credentials"));
        }
        Ok(LoginResponse {
            access_token: "token-1".to_string(),
            user: self.me.borrow().clone(),
        })
    }

    async fn logout(&self) -> ApiResult<()> {
        self.enter("logout")
    }

    async fn check_nickname(&self, nickname: &str) -> ApiResult<()> {
        self.enter("check_nickname")?;
        if self.taken_nicknames.borrow().contains(nickname) {
            return Err(ApiError::new(ErrorKind::Conflict, "duplicate nickname"));
        }
        Ok(())
    }

    async fn list_posts(&self, _page: u32, _limit: u32) -> ApiResult<Vec<Post>> {
        self.in_flight.set(self.in_flight.get() + 1);
        self.max_in_flight
            .set(self.max_in_flight.get().max(self.in_flight.get()));
        // Suspend once so concurrent callers can interleave
        tokio::task::yield_now().await;
        self.in_flight.set(self.in_flight.get() - 1);

        self.enter("list_posts")?;
        self.pages.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_post(&self, id: PostId) -> ApiResult<Post> {
        tokio::task::yield_now().await;
        self.enter("get_post")?;
        self.with_post_mut(id, |post| post.clone())
    }

    async fn create_post(&self, new_post: &NewPost) -> ApiResult<PostId> {
        self.enter("create_post")?;
        let id = self.next_id();
        let mut created = post(id);
        created.title = new_post.title.clone();
        created.content = new_post.content.clone();
        created.attachment = new_post.attachment_url.clone().map(|url| Attachment { url });
        *self.post.borrow_mut() = Some(created);
        Ok(id)
    }

    async fn update_post(&self, id: PostId, patch: &PostPatch) -> ApiResult<Post> {
        self.enter("update_post")?;
        self.with_post_mut(id, |post| {
            if let Some(title) = &patch.title {
                post.title = title.clone();
            }
            if let Some(content) = &patch.content {
                post.content = content.clone();
            }
            post.clone()
        })
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        self.enter("delete_post")?;
        self.with_post_mut(id, |_| ())?;
        *self.post.borrow_mut() = None;
        Ok(())
    }

    async fn like_post(&self, id: PostId) -> ApiResult<u64> {
        self.enter("like_post")?;
        let me = self.me.borrow().id;
        self.with_post_mut(id, |post| {
            post.liked_by.insert(me);
            post.like_count += 1;
            post.like_count
        })
    }

    async fn unlike_post(&self, id: PostId) -> ApiResult<u64> {
        self.enter("unlike_post")?;
        let me = self.me.borrow().id;
        self.with_post_mut(id, |post| {
            post.liked_by.remove(&me);
            post.like_count = post.like_count.saturating_sub(1);
            post.like_count
        })
    }

    async fn list_comments(&self, _post_id: PostId) -> ApiResult<Vec<Comment>> {
        self.enter("list_comments")?;
        Ok(self.comments.borrow().clone())
    }

    async fn create_comment(&self, post_id: PostId, content: &str) -> ApiResult<Comment> {
        self.enter("create_comment")?;
        let mut created = comment(self.next_id(), post_id, content);
        created.author = self.me.borrow().clone();
        self.comments.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_comment(&self, _post_id: PostId, id: CommentId, content: &str) -> ApiResult<Comment> {
        self.enter("update_comment")?;
        let mut comments = self.comments.borrow_mut();
        let found = comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::new(ErrorKind::NotFound, "no such comment"))?;
        found.content = content.to_string();
        Ok(found.clone())
    }

    async fn delete_comment(&self, _post_id: PostId, id: CommentId) -> ApiResult<()> {
        self.enter("delete_comment")?;
        let mut comments = self.comments.borrow_mut();
        let before = comments.len();
        comments.retain(|c| c.id != id);
        if comments.len() == before {
            return Err(ApiError::new(ErrorKind::NotFound, "no such comment"));
        }
        Ok(())
    }

    async fn upload_file(&self, upload: Upload) -> ApiResult<String> {
        self.enter("upload_file")?;
        Ok(format!("/uploads/{}", upload.file_name))
    }

    async fn get_current_user(&self) -> ApiResult<UserIdentity> {
        self.enter("get_current_user")?;
        Ok(self.me.borrow().clone())
    }

    async fn update_user(&self, patch: &UserPatch) -> ApiResult<UserIdentity> {
        self.enter("update_user")?;
        let mut me = self.me.borrow_mut();
        if let Some(nickname) = &patch.nickname {
            me.nickname = nickname.clone();
        }
        if let Some(url) = &patch.profile_image_url {
            me.profile_image_url = Some(url.clone());
        }
        Ok(me.clone())
    }

    async fn update_password(&self, _password: &str) -> ApiResult<()> {
        self.enter("update_password")
    }

    async fn withdraw(&self) -> ApiResult<()> {
        self.enter("withdraw")
    }
}
