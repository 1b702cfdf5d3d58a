//! 设置面板

use catgallery_core::{WallpaperOptions, WallpaperTarget};
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct SettingsPanelProps {
    pub options: WallpaperOptions,
    pub history_dir: String,
    pub on_save: EventHandler<WallpaperOptions>,
    pub on_clear: EventHandler<()>,
}

/// 壁纸选项与历史管理
#[component]
pub fn SettingsPanel(props: SettingsPanelProps) -> Element {
    let mut draft = use_signal(|| props.options);
    let on_save = props.on_save;
    let on_clear = props.on_clear;

    let target_label = |target: WallpaperTarget| match target {
        WallpaperTarget::Background => "Desktop background",
        WallpaperTarget::Lockscreen => "Lock screen",
        WallpaperTarget::Both => "Background and lock screen",
    };

    rsx! {
        div { class: "card-header",
            h2 { "⚙️ Settings" }
        }

        div { class: "settings-grid",
            div {
                h3 { "Wallpaper" }
                label { class: "field",
                    span { "Apply to" }
                    select {
                        value: "{draft.read().set_on}",
                        onchange: move |evt| {
                            if let Ok(target) = evt.value().parse::<WallpaperTarget>() {
                                draft.write().set_on = target;
                            }
                        },
                        for target in WallpaperTarget::ALL {
                            option {
                                value: target.as_str(),
                                selected: draft.read().set_on == target,
                                "{target_label(target)}"
                            }
                        }
                    }
                }
                label { class: "field",
                    input {
                        r#type: "checkbox",
                        checked: draft.read().show_preview,
                        onchange: move |evt| draft.write().show_preview = evt.checked(),
                    }
                    span { "Show a preview before applying" }
                }
            }

            div {
                h3 { "History" }
                p { class: "hint", "Cats are kept in {props.history_dir} until the next start." }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_clear.call(()),
                    "🗑️ Clear history"
                }
            }
        }

        button {
            class: "btn btn-primary",
            style: "margin-top: 24px;",
            onclick: move |_| on_save.call(*draft.read()),
            "Save and return"
        }
    }
}
