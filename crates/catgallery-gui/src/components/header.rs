//! 头部组件

use catgallery_core::Position;
use dioxus::prelude::*;

/// 应用头部
#[component]
pub fn Header(position: Position, loading: bool, on_settings: EventHandler<()>) -> Element {
    let status_class = if loading {
        "status-badge loading"
    } else {
        "status-badge"
    };

    let status_text = match (loading, position.current) {
        (true, _) => "Fetching a cat...".to_string(),
        (false, 0) => "No cats yet".to_string(),
        (false, current) => format!("{} / {}", current, position.max),
    };

    rsx! {
        div { class: "logo",
            h1 { "CAT GALLERY" }
        }

        div { class: "header-actions",
            div { class: "{status_class}", "{status_text}" }
            button {
                class: "btn btn-icon",
                title: "Settings",
                onclick: move |_| on_settings.call(()),
                "⚙️"
            }
        }
    }
}
