//! Cat Gallery Core Library
//!
//! 随机猫图浏览器的核心逻辑，与具体 UI 无关。
//!
//! # 模块
//!
//! - **history**: 按位置寻址、只追加的图片历史缓存
//! - **source**: 随机图片来源（HTTP）
//! - **worker**: 后台取图任务与 UI 线程交接
//! - **gallery**: UI 线程上的图库状态机
//! - **portal**: xdg-desktop-portal 壁纸设置
//! - **config**: 设置持久化
//!
//! # 使用示例
//!
//! ```ignore
//! use catgallery_core::{Gallery, GallerySettings};
//!
//! let settings = GallerySettings::load();
//! let mut gallery = Gallery::open(&settings)?;
//!
//! // "下一张"：在后台取图，UI 线程等待并应用结果
//! if let Some(pending) = gallery.next() {
//!     let done = pending.wait().await;
//!     gallery.complete(done);
//! }
//!
//! // "上一张"：同步
//! gallery.back();
//! ```

pub mod config;
pub mod error;
pub mod gallery;
pub mod history;
pub mod image;
pub mod logging;
pub mod portal;
pub mod source;
pub mod worker;

#[cfg(test)]
mod testing;

pub use config::GallerySettings;
pub use error::{GalleryError, Result};
pub use gallery::{Applied, Gallery, Shown, WallpaperControl};
pub use history::{HistoryCache, HistoryEntry, Position};
pub use image::ImageFormat;
pub use logging::{LogEntry, LogLevel};
pub use portal::{DesktopPortal, WallpaperOptions, WallpaperRequest, WallpaperSetter, WallpaperTarget};
pub use source::{CatApi, ImageSource};
pub use worker::{Advance, Completion, FetchWorker, PendingFetch};
