//! Delete Confirm Dialog Component
//!
//! Modal confirmation for deleting a post or a comment. What is pending
//! lives in the detail controller; this only renders it.

use board_core::DeleteTarget;
use leptos::prelude::*;

/// Modal shown while `pending` holds a target
///
/// # Arguments
/// * `pending` - Target awaiting confirmation (None = hidden)
/// * `on_confirm` - Called when the user confirms
/// * `on_cancel` - Called when the user backs out
#[component]
pub fn DeleteConfirmDialog(
    #[prop(into)] pending: Signal<Option<DeleteTarget>>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let title = move || match pending.get() {
        Some(DeleteTarget::Post(_)) => "게시글을 삭제하시겠습니까?",
        Some(DeleteTarget::Comment(_)) => "댓글을 삭제하시겠습니까?",
        None => "",
    };

    view! {
        <Show when=move || pending.get().is_some()>
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <p class="modal-title">{title}</p>
                    <p class="modal-body">"삭제한 내용은 복구 할 수 없습니다."</p>
                    <div class="modal-actions">
                        <button class="cancel-btn" on:click=move |_| on_cancel.run(())>
                            "취소"
                        </button>
                        <button class="confirm-btn" on:click=move |_| on_confirm.run(())>
                            "확인"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
