//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::warn;

use crate::context::{use_app_context, Page};
use crate::store::{store_set_identity, use_board_store};

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_board_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let ready = move || !email.get().trim().is_empty() && !password.get().is_empty();

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !ready() || submitting.get() {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);

        let account = ctx.services().account();
        let (email, password) = (email.get(), password.get());
        spawn_local(async move {
            match account.login(&email, &password).await {
                Ok(user) => {
                    store_set_identity(&store, Some(user));
                    ctx.navigate(Page::Board);
                }
                Err(e) if e.is_unauthorized() => {
                    set_error.set(Some("*아이디 또는 비밀번호를 확인해주세요.".to_string()));
                }
                Err(e) => {
                    warn!("[LOGIN] failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="login-form" on:submit=submit>
            <h2>"로그인"</h2>
            <label>
                "이메일"
                <input
                    type="email"
                    placeholder="이메일을 입력하세요"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
            </label>
            <label>
                "비밀번호"
                <input
                    type="password"
                    placeholder="비밀번호를 입력하세요"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
            </label>
            <Show when=move || error.get().is_some()>
                <p class="helper-text">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button
                type="submit"
                class=move || if ready() { "primary-btn active" } else { "primary-btn" }
                disabled=move || !ready() || submitting.get()
            >
                "로그인"
            </button>
        </form>
    }
}
