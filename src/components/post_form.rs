//! New Post Form Component

use board_core::PostDraft;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::file_input::{read_selected_file, selected_file_name};
use crate::context::{use_app_context, Page};

#[component]
pub fn NewPostForm() -> impl IntoView {
    let ctx = use_app_context();

    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (file_name, set_file_name) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let file_ref: NodeRef<html::Input> = NodeRef::new();

    let ready = move || !title.get().trim().is_empty() && !content.get().trim().is_empty();

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get() {
            return;
        }
        set_submitting.set(true);

        let editor = ctx.services().post_editor();
        let (title, content) = (title.get(), content.get());
        spawn_local(async move {
            let attachment = match read_selected_file(file_ref).await {
                Ok(upload) => upload,
                Err(e) => {
                    ctx.show_toast(e);
                    set_submitting.set(false);
                    return;
                }
            };
            match editor
                .publish(PostDraft {
                    title,
                    content,
                    attachment,
                })
                .await
            {
                Ok(post_id) => ctx.navigate(Page::Post(post_id)),
                Err(e) => ctx.report_or_login(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="post-form" on:submit=submit>
            <h2>"게시글 작성"</h2>
            <label>
                "제목*"
                <input
                    type="text"
                    maxlength="26"
                    placeholder="제목을 입력해주세요. (최대 26글자)"
                    prop:value=title
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />
            </label>
            <label>
                "내용*"
                <textarea
                    placeholder="내용을 입력해주세요."
                    prop:value=content
                    on:input=move |ev| set_content.set(event_target_value(&ev))
                ></textarea>
            </label>
            <Show when=move || !ready()>
                <p class="helper-text">"*제목, 내용을 모두 작성해주세요."</p>
            </Show>
            <label>
                "이미지"
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
            <button
                type="submit"
                class=move || if ready() { "primary-btn active" } else { "primary-btn" }
                disabled=move || !ready() || submitting.get()
            >
                "완료"
            </button>
        </form>
    }
}
