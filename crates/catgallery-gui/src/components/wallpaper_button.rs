//! "设为壁纸"按钮
//!
//! 按钮内同时放置加载指示和文字：取图时显示加载指示、隐藏文字。

use catgallery_core::WallpaperControl;
use dioxus::prelude::*;

#[component]
pub fn WallpaperButton(
    control: WallpaperControl,
    label_visible: bool,
    on_click: EventHandler<()>,
) -> Element {
    let ready = control == WallpaperControl::Ready;

    rsx! {
        div { class: "wallpaper-row",
            button {
                class: "btn btn-primary wallpaper-btn",
                disabled: !ready,
                onclick: move |_| {
                    if ready {
                        on_click.call(());
                    }
                },
                if control == WallpaperControl::Busy {
                    span { class: "spinner spinner-sm" }
                }
                if label_visible {
                    span { "Set as wallpaper" }
                }
            }
        }
    }
}
