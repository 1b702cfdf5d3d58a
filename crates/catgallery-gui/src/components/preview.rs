//! 图片预览组件

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct PreviewProps {
    /// 当前图片的 data URI，尚未加载时为 `None`
    pub image: Option<String>,
    pub caption: Option<String>,
    pub loading: bool,
}

/// 当前图片
#[component]
pub fn Preview(props: PreviewProps) -> Element {
    let image_class = if props.loading {
        "preview-image dimmed"
    } else {
        "preview-image"
    };

    rsx! {
        div { class: "preview",
            match &props.image {
                Some(src) => rsx! {
                    img {
                        class: "{image_class}",
                        src: "{src}",
                        alt: "A random cat",
                    }
                },
                None => rsx! {
                    div { class: "empty-state",
                        div { class: "empty-state-icon", "🐱" }
                        p { class: "empty-state-text",
                            if props.loading {
                                "Looking for a cat..."
                            } else {
                                "Press Next to fetch a cat"
                            }
                        }
                    }
                },
            }

            if let Some(caption) = &props.caption {
                p { class: "preview-caption", "{caption}" }
            }
        }
    }
}
