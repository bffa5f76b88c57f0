//! Profile Form Component
//!
//! Nickname and profile image, password change, and withdrawal.

use board_core::account::validate_nickname;
use board_core::{BoardError, ProfileUpdate};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::file_input::{read_selected_file, selected_file_name};
use crate::context::{use_app_context, Page};
use crate::store::{store_set_identity, use_board_store, BoardStateStoreFields};

/// Shortest password the server accepts
const PASSWORD_MIN_CHARS: usize = 8;

fn password_problem(password: &str, confirm: &str) -> Option<&'static str> {
    if password.is_empty() {
        Some("*비밀번호를 입력해주세요.")
    } else if password.chars().count() < PASSWORD_MIN_CHARS {
        Some("*비밀번호는 8자 이상이어야 합니다.")
    } else if password != confirm {
        Some("*비밀번호가 다릅니다.")
    } else {
        None
    }
}

fn nickname_message(err: &BoardError) -> String {
    match err {
        BoardError::NicknameRequired => "*닉네임을 입력해주세요.".to_string(),
        BoardError::NicknameTooLong { max } => format!("*닉네임은 최대 {}자 까지 작성 가능합니다.", max),
        BoardError::NicknameTaken => "*중복된 닉네임 입니다.".to_string(),
        other => other.to_string(),
    }
}

#[component]
pub fn ProfileForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_board_store();

    let (nickname, set_nickname) = signal(
        store
            .identity()
            .get_untracked()
            .map(|identity| identity.nickname)
            .unwrap_or_default(),
    );
    let (nickname_error, set_nickname_error) = signal::<Option<String>>(None);
    let (file_name, set_file_name) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let file_ref: NodeRef<html::Input> = NodeRef::new();

    let (password, set_password) = signal(String::new());
    let (confirm, set_confirm) = signal(String::new());
    let (confirm_withdraw, set_confirm_withdraw) = signal(false);

    // Refresh the cached identity from the server
    {
        let account = ctx.services().account();
        spawn_local(async move {
            match account.load_profile().await {
                Ok(user) => {
                    set_nickname.set(user.nickname.clone());
                    store_set_identity(&store, Some(user));
                }
                Err(e) => ctx.report_or_login(&e),
            }
        });
    }

    // ========================
    // Nickname and Image
    // ========================

    let save_profile = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if let Err(e) = validate_nickname(&nickname.get()) {
            set_nickname_error.set(Some(nickname_message(&e)));
            return;
        }
        set_nickname_error.set(None);
        set_saving.set(true);

        let account = ctx.services().account();
        let nickname = nickname.get();
        spawn_local(async move {
            let image = match read_selected_file(file_ref).await {
                Ok(image) => image,
                Err(e) => {
                    ctx.show_toast(e);
                    set_saving.set(false);
                    return;
                }
            };
            match account.update_profile(ProfileUpdate { nickname, image }).await {
                Ok(_) => {
                    store_set_identity(&store, account.session().get_identity());
                    ctx.show_toast("수정 완료");
                }
                Err(e @ BoardError::NicknameTaken) => set_nickname_error.set(Some(nickname_message(&e))),
                Err(e) => ctx.report_or_login(&e),
            }
            set_saving.set(false);
        });
    };

    // ========================
    // Password
    // ========================

    let password_hint = move || password_problem(&password.get(), &confirm.get());

    let save_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if password_hint().is_some() {
            return;
        }
        let account = ctx.services().account();
        let new_password = password.get();
        spawn_local(async move {
            match account.update_password(&new_password).await {
                Ok(()) => {
                    set_password.set(String::new());
                    set_confirm.set(String::new());
                    ctx.show_toast("수정 완료");
                }
                Err(e) if e.is_unauthorized() => {
                    store_set_identity(&store, None);
                    ctx.report_or_login(&e);
                }
                Err(e) => ctx.report(&e),
            }
        });
    };

    // ========================
    // Withdraw
    // ========================

    let withdraw = move |_| {
        let account = ctx.services().account();
        spawn_local(async move {
            match account.withdraw().await {
                Ok(()) => {
                    store_set_identity(&store, None);
                    ctx.show_toast("회원 탈퇴가 완료되었습니다.");
                    ctx.navigate(Page::Login);
                }
                Err(e) => ctx.report(&e),
            }
            set_confirm_withdraw.set(false);
        });
    };

    let email = move || {
        store
            .identity()
            .get()
            .and_then(|identity| identity.email)
            .unwrap_or_default()
    };

    view! {
        <section class="profile-page">
            <form class="profile-form" on:submit=save_profile>
                <h2>"회원정보수정"</h2>
                <label>
                    "프로필 사진"
                    <input
                        type="file"
                        accept="image/*"
                        node_ref=file_ref
                        on:change=move |_| set_file_name.set(selected_file_name(file_ref))
                    />
                </label>
                <Show when=move || file_name.get().is_some()>
                    <p class="file-name">{move || file_name.get().unwrap_or_default()}</p>
                </Show>
                <p class="profile-email">"이메일 " {email}</p>
                <label>
                    "닉네임"
                    <input
                        type="text"
                        prop:value=nickname
                        on:input=move |ev| set_nickname.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || nickname_error.get().is_some()>
                    <p class="helper-text">{move || nickname_error.get().unwrap_or_default()}</p>
                </Show>
                <button type="submit" class="primary-btn active" disabled=move || saving.get()>
                    "수정하기"
                </button>
            </form>

            <form class="password-form" on:submit=save_password>
                <h3>"비밀번호 수정"</h3>
                <input
                    type="password"
                    placeholder="비밀번호를 입력하세요"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="비밀번호를 한번 더 입력하세요"
                    prop:value=confirm
                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                />
                <Show when=move || password_hint().is_some()>
                    <p class="helper-text">{move || password_hint().unwrap_or_default()}</p>
                </Show>
                <button
                    type="submit"
                    class=move || if password_hint().is_none() { "primary-btn active" } else { "primary-btn" }
                    disabled=move || password_hint().is_some()
                >
                    "수정하기"
                </button>
            </form>

            <Show
                when=move || confirm_withdraw.get()
                fallback=move || view! {
                    <button class="text-btn" on:click=move |_| set_confirm_withdraw.set(true)>
                        "회원 탈퇴"
                    </button>
                }
            >
                <div class="modal-backdrop">
                    <div class="modal">
                        <p class="modal-title">"회원탈퇴 하시겠습니까?"</p>
                        <p class="modal-body">"작성된 게시글과 댓글은 삭제 됩니다."</p>
                        <div class="modal-actions">
                            <button class="cancel-btn" on:click=move |_| set_confirm_withdraw.set(false)>
                                "취소"
                            </button>
                            <button class="confirm-btn" on:click=withdraw>
                                "확인"
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </section>
    }
}
