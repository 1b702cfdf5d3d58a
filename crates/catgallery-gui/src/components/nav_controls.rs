//! 翻页按钮

use dioxus::prelude::*;

/// Back / Next
#[component]
pub fn NavControls(
    can_back: bool,
    loading: bool,
    on_back: EventHandler<()>,
    on_next: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "nav-controls",
            button {
                class: "btn btn-secondary",
                disabled: !can_back || loading,
                onclick: move |_| on_back.call(()),
                "◀ Back"
            }
            button {
                class: "btn btn-accent",
                disabled: loading,
                onclick: move |_| on_next.call(()),
                "Next ▶"
            }
        }
    }
}
