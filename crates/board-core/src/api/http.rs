//! HTTP Gateway
//!
//! `ApiGateway` over the board's JSON API. Responses are wrapped as
//! `{ "message": ..., "data": ... }`; non-2xx statuses become typed errors.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::ApiGateway;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ErrorKind};
use crate::models::{
    Comment, CommentId, LoginResponse, NewPost, Post, PostId, PostPatch, Upload, UserIdentity,
    UserPatch,
};
use crate::session::SessionStore;

// ========================
// Wire Types
// ========================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    message: Option<String>,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LikeCount {
    like_count: u64,
}

#[derive(Debug, Deserialize)]
struct Created {
    id: PostId,
}

#[derive(Debug, Deserialize)]
struct Hosted {
    url: String,
}

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ContentArgs<'a> {
    content: &'a str,
}

#[derive(Serialize)]
struct PasswordArgs<'a> {
    password: &'a str,
}

/// Decode a success body into its `data` payload
fn decode_envelope<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let envelope: Envelope<T> = serde_json::from_str(body)
        .map_err(|e| ApiError::new(ErrorKind::ServerError, format!("malformed response: {}", e)))?;
    envelope
        .data
        .ok_or_else(|| ApiError::new(ErrorKind::ServerError, "response carries no data"))
}

/// Pull the server's message out of an error body, if it has one
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.message)
}

// ========================
// Gateway
// ========================

/// Board API client over HTTP
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    session: SessionStore,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig, session: SessionStore) -> ApiResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout());
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Start a request, attaching the bearer token when logged in
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match self.session.get_credential() {
            Some(credential) => builder.bearer_auth(credential.as_str()),
            None => builder,
        }
    }

    /// Send and return the raw body of a 2xx response
    async fn execute(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(body);
        }

        let err = ApiError::from_status(status.as_u16(), error_message(&body));
        debug!(status = status.as_u16(), kind = ?err.kind, "api request failed");
        Err(err)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.execute(request).await?;
        decode_envelope(&body)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<()> {
        self.execute(request).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl ApiGateway for HttpGateway {
    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = self
            .request(Method::POST, "/auth/login")
            .json(&LoginArgs { email, password });
        self.fetch(request).await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.send(self.request(Method::POST, "/auth/logout")).await
    }

    async fn check_nickname(&self, nickname: &str) -> ApiResult<()> {
        let request = self
            .request(Method::GET, "/auth/nickname")
            .query(&[("nickname", nickname)]);
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn list_posts(&self, page: u32, limit: u32) -> ApiResult<Vec<Post>> {
        let path = format!("/posts?page={}&limit={}", page, limit);
        self.fetch(self.request(Method::GET, &path)).await
    }

    #[instrument(skip(self))]
    async fn get_post(&self, id: PostId) -> ApiResult<Post> {
        self.fetch(self.request(Method::GET, &format!("/posts/{}", id))).await
    }

    async fn create_post(&self, post: &NewPost) -> ApiResult<PostId> {
        let created: Created = self.fetch(self.request(Method::POST, "/posts").json(post)).await?;
        Ok(created.id)
    }

    async fn update_post(&self, id: PostId, patch: &PostPatch) -> ApiResult<Post> {
        let request = self.request(Method::PATCH, &format!("/posts/{}", id)).json(patch);
        self.fetch(request).await
    }

    async fn delete_post(&self, id: PostId) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, &format!("/posts/{}", id))).await
    }

    #[instrument(skip(self))]
    async fn like_post(&self, id: PostId) -> ApiResult<u64> {
        let request = self.request(Method::POST, &format!("/posts/{}/likes", id));
        let likes: LikeCount = self.fetch(request).await?;
        Ok(likes.like_count)
    }

    #[instrument(skip(self))]
    async fn unlike_post(&self, id: PostId) -> ApiResult<u64> {
        let request = self.request(Method::DELETE, &format!("/posts/{}/likes", id));
        let likes: LikeCount = self.fetch(request).await?;
        Ok(likes.like_count)
    }

    async fn list_comments(&self, post_id: PostId) -> ApiResult<Vec<Comment>> {
        let request = self.request(Method::GET, &format!("/posts/{}/comments", post_id));
        self.fetch(request).await
    }

    async fn create_comment(&self, post_id: PostId, content: &str) -> ApiResult<Comment> {
        let request = self
            .request(Method::POST, &format!("/posts/{}/comments", post_id))
            .json(&ContentArgs { content });
        self.fetch(request).await
    }

    async fn update_comment(&self, post_id: PostId, id: CommentId, content: &str) -> ApiResult<Comment> {
        let request = self
            .request(Method::PATCH, &format!("/posts/{}/comments/{}", post_id, id))
            .json(&ContentArgs { content });
        self.fetch(request).await
    }

    async fn delete_comment(&self, post_id: PostId, id: CommentId) -> ApiResult<()> {
        let path = format!("/posts/{}/comments/{}", post_id, id);
        self.send(self.request(Method::DELETE, &path)).await
    }

    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
    async fn upload_file(&self, upload: Upload) -> ApiResult<String> {
        let part = Part::bytes(upload.bytes).file_name(upload.file_name);
        let form = Form::new().part("file", part);
        let hosted: Hosted = self.fetch(self.request(Method::POST, "/files").multipart(form)).await?;
        Ok(hosted.url)
    }

    async fn get_current_user(&self) -> ApiResult<UserIdentity> {
        self.fetch(self.request(Method::GET, "/users/me")).await
    }

    async fn update_user(&self, patch: &UserPatch) -> ApiResult<UserIdentity> {
        self.fetch(self.request(Method::PATCH, "/users/me").json(patch)).await
    }

    async fn update_password(&self, password: &str) -> ApiResult<()> {
        let request = self
            .request(Method::PATCH, "/users/me/password")
            .json(&PasswordArgs { password });
        self.send(request).await
    }

    async fn withdraw(&self) -> ApiResult<()> {
        self.send(self.request(Method::DELETE, "/users/me")).await
    }
}
