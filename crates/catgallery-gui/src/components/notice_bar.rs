//! 临时提示条

use catgallery_core::{LogEntry, LogLevel};
use dioxus::prelude::*;

#[component]
pub fn NoticeBar(notice: Option<LogEntry>, on_dismiss: EventHandler<()>) -> Element {
    let Some(notice) = notice else {
        return rsx! {};
    };

    let class = match notice.level {
        LogLevel::Error => "notice error",
        LogLevel::Info => "notice",
    };

    rsx! {
        div { class: "{class}",
            span { "{notice}" }
            button {
                class: "btn btn-icon",
                title: "Dismiss",
                onclick: move |_| on_dismiss.call(()),
                "✕"
            }
        }
    }
}
