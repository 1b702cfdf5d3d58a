//! 应用状态管理
//!
//! 使用 Dioxus signals 管理应用状态，图库本身的状态机在 `catgallery_core::Gallery` 中。

use catgallery_core::{Gallery, GalleryError};

/// 应用模式
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AppMode {
    #[default]
    Gallery,
    Settings,
}

/// 打开图库的结果；历史目录无法创建时保存错误文字
pub type GalleryState = Result<Gallery, String>;

pub fn open_error(e: GalleryError) -> String {
    log::error!("Failed to open gallery: {}", e);
    format!("Could not prepare the image cache: {}", e)
}
