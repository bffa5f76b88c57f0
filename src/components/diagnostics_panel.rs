//! Diagnostics Panel Component
//!
//! Collapsible view of recent log lines, for bug reports.

use leptos::prelude::*;

use crate::logging;

#[component]
pub fn DiagnosticsPanel() -> impl IntoView {
    let (open, set_open) = signal(false);
    let (lines, set_lines) = signal(Vec::<String>::new());

    let toggle = move |_| {
        let now_open = !open.get();
        if now_open {
            set_lines.set(logging::recent_lines());
        }
        set_open.set(now_open);
    };

    view! {
        <footer class="diagnostics">
            <button class="diagnostics-toggle" on:click=toggle>
                {move || if open.get() { "로그 닫기" } else { "로그 보기" }}
            </button>
            <Show when=move || open.get()>
                <pre class="diagnostics-lines">{move || lines.get().join("\n")}</pre>
            </Show>
        </footer>
    }
}
