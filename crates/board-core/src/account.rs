//! Account Controller
//!
//! Login/logout and the profile pages: nickname and image, password,
//! withdrawal. Keeps the cached identity in step with what the server accepted.

use std::rc::Rc;

use tracing::{info, warn};

use crate::api::ApiGateway;
use crate::error::{ApiError, BoardError, BoardResult, ErrorKind};
use crate::models::{Upload, UserIdentity, UserPatch};
use crate::session::{Credential, SessionStore};

/// Longest nickname the board accepts
pub const NICKNAME_MAX_CHARS: usize = 10;

/// Profile form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub nickname: String,
    pub image: Option<Upload>,
}

pub struct AccountController<G: ?Sized> {
    api: Rc<G>,
    session: SessionStore,
}

impl<G: ?Sized> Clone for AccountController<G> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            session: self.session.clone(),
        }
    }
}

impl<G: ApiGateway + ?Sized> AccountController<G> {
    pub fn new(api: Rc<G>, session: SessionStore) -> Self {
        Self { api, session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn login(&self, email: &str, password: &str) -> BoardResult<UserIdentity> {
        let response = self.api.login(email.trim(), password).await?;
        self.session
            .set_session(&Credential::new(response.access_token), &response.user);
        info!(user_id = response.user.id, "logged in");
        Ok(response.user)
    }

    /// Always ends the local session, whatever the server says
    pub async fn logout(&self) {
        if self.session.is_authenticated() {
            if let Err(err) = self.api.logout().await {
                warn!("server logout failed: {}", err);
            }
        }
        self.session.clear();
    }

    /// Fetch the authoritative identity and re-sync the cache
    pub async fn load_profile(&self) -> BoardResult<UserIdentity> {
        let user = self.expire_on_unauthorized(self.api.get_current_user().await)?;
        let cached = self.session.update_identity(|identity| *identity = user.clone());
        if cached.is_none() {
            if let Some(credential) = self.session.get_credential() {
                self.session.set_session(&credential, &user);
            }
        }
        Ok(user)
    }

    /// Validate, check the nickname, upload the image, then save
    pub async fn update_profile(&self, update: ProfileUpdate) -> BoardResult<UserIdentity> {
        let nickname = validate_nickname(&update.nickname)?;

        let unchanged = self
            .session
            .get_identity()
            .map(|identity| identity.nickname == nickname)
            .unwrap_or(false);
        if !unchanged {
            match self.api.check_nickname(&nickname).await {
                Err(err) if err.is(ErrorKind::Conflict) => return Err(BoardError::NicknameTaken),
                other => other?,
            }
        }

        let profile_image_url = match update.image {
            Some(upload) => Some(self.api.upload_file(upload).await?),
            None => None,
        };

        let patch = UserPatch {
            nickname: Some(nickname.clone()),
            profile_image_url: profile_image_url.clone(),
        };
        let updated = self.api.update_user(&patch).await?;

        self.session.update_identity(|identity| {
            identity.nickname = nickname;
            if let Some(url) = profile_image_url {
                identity.profile_image_url = Some(url);
            }
        });
        info!(user_id = updated.id, "profile updated");
        Ok(updated)
    }

    /// An expired session is cleared so the view can send the user to login
    pub async fn update_password(&self, password: &str) -> BoardResult<()> {
        let result = self.api.update_password(password).await;
        self.expire_on_unauthorized(result)
    }

    pub async fn withdraw(&self) -> BoardResult<()> {
        self.api.withdraw().await?;
        self.session.clear();
        info!("account withdrawn");
        Ok(())
    }

    fn expire_on_unauthorized<T>(&self, result: Result<T, ApiError>) -> BoardResult<T> {
        result.map_err(|err| {
            if err.is(ErrorKind::Unauthorized) {
                warn!("session expired: {}", err);
                self.session.clear();
            }
            err.into()
        })
    }
}

/// Trimmed nickname, or the reason it is unusable
pub fn validate_nickname(raw: &str) -> BoardResult<String> {
    let nickname = raw.trim();
    if nickname.is_empty() {
        return Err(BoardError::NicknameRequired);
    }
    if nickname.chars().count() > NICKNAME_MAX_CHARS {
        return Err(BoardError::NicknameTooLong {
            max: NICKNAME_MAX_CHARS,
        });
    }
    Ok(nickname.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{logged_in_session, FakeBoard};

    fn account(board: &Rc<FakeBoard>) -> AccountController<FakeBoard> {
        AccountController::new(Rc::clone(board), logged_in_session(board))
    }

    #[test]
    fn test_validate_nickname() {
        assert_eq!(validate_nickname("  "), Err(BoardError::NicknameRequired));
        assert_eq!(
            validate_nickname("abcdefghijk"),
            Err(BoardError::NicknameTooLong { max: 10 })
        );
        assert_eq!(validate_nickname(" 스타트업코드 ").unwrap(), "스타트업코드");
        assert_eq!(validate_nickname("abcdefghij").unwrap(), "abcdefghij");
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let board = FakeBoard::new();
        let account = AccountController::new(Rc::clone(&board), SessionStore::in_memory());

        let user = account.login("me@board.test", "pw").await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(account.session().get_credential(), Some(Credential::new("token-1")));
        assert_eq!(account.session().get_identity(), Some(user));
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let board = FakeBoard::new();
        let account = AccountController::new(Rc::clone(&board), SessionStore::in_memory());

        let err = account.login("me@board.test", "wrong").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!account.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_even_if_server_fails() {
        let board = FakeBoard::new();
        let account = account(&board);
        board.fail_next("logout", ErrorKind::NetworkError);

        account.logout().await;

        assert!(!account.session().is_authenticated());
        assert!(account.session().get_identity().is_none());
    }

    #[tokio::test]
    async fn test_taken_nickname_skips_update() {
        let board = FakeBoard::new();
        board.taken_nicknames.borrow_mut().insert("taken".to_string());
        let account = account(&board);

        let err = account
            .update_profile(ProfileUpdate {
                nickname: "taken".to_string(),
                image: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, BoardError::NicknameTaken);
        assert_eq!(board.calls_to("update_user"), 0);
    }

    #[tokio::test]
    async fn test_unchanged_nickname_skips_check() {
        let board = FakeBoard::new();
        let account = account(&board);

        account
            .update_profile(ProfileUpdate {
                nickname: "me".to_string(),
                image: None,
            })
            .await
            .unwrap();

        assert_eq!(board.calls_to("check_nickname"), 0);
        assert_eq!(board.calls_to("update_user"), 1);
    }

    #[tokio::test]
    async fn test_profile_update_resyncs_cache() {
        let board = FakeBoard::new();
        let account = account(&board);

        account
            .update_profile(ProfileUpdate {
                nickname: " newname ".to_string(),
                image: Some(Upload {
                    file_name: "face.png".to_string(),
                    bytes: vec![1, 2, 3],
                }),
            })
            .await
            .unwrap();

        let cached = account.session().get_identity().unwrap();
        assert_eq!(cached.nickname, "newname");
        assert_eq!(cached.profile_image_url.as_deref(), Some("/uploads/face.png"));
        assert_eq!(cached.email.as_deref(), Some("me@board.test"));
    }

    #[tokio::test]
    async fn test_invalid_nickname_makes_no_request() {
        let board = FakeBoard::new();
        let account = account(&board);

        let err = account
            .update_profile(ProfileUpdate {
                nickname: String::new(),
                image: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, BoardError::NicknameRequired);
        assert_eq!(board.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_expired_password_update_clears_session() {
        let board = FakeBoard::new();
        let account = account(&board);
        board.fail_next("update_password", ErrorKind::Unauthorized);

        let err = account.update_password("Secret1!").await.unwrap_err();

        assert!(err.is_unauthorized());
        assert!(!account.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_withdraw_clears_session() {
        let board = FakeBoard::new();
        let account = account(&board);

        account.withdraw().await.unwrap();

        assert!(!account.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_withdraw_keeps_session() {
        let board = FakeBoard::new();
        let account = account(&board);
        board.fail_next("withdraw", ErrorKind::ServerError);

        assert!(account.withdraw().await.is_err());
        assert!(account.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_load_profile_resyncs_stale_cache() {
        let board = FakeBoard::new();
        let account = account(&board);
        board.me.borrow_mut().nickname = "renamed".to_string();

        let user = account.load_profile().await.unwrap();

        assert_eq!(user.nickname, "renamed");
        assert_eq!(account.session().get_identity().unwrap().nickname, "renamed");
    }
}
