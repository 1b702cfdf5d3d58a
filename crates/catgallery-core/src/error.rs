//! 错误类型
//!
//! 所有错误都在产生处被吸收：网络、解码和门户错误只会重置 UI 状态并显示临时提示，
//! 不会终止进程。

use std::io;

/// Cat Gallery 错误
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server responded with HTTP {0}")]
    Status(u16),

    #[error("Unrecognised image data: {0}")]
    Decode(String),

    #[error("No history entry at position {position}")]
    CacheMiss { position: u32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Portal error: {0}")]
    Portal(#[from] zbus::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Fetch task aborted: {0}")]
    Worker(String),
}

impl GalleryError {
    /// 是否为网络类错误（传输失败或非 2xx 响应）
    pub fn is_network(&self) -> bool {
        matches!(self, GalleryError::Network(_) | GalleryError::Status(_))
    }
}

impl From<toml::de::Error> for GalleryError {
    fn from(e: toml::de::Error) -> Self {
        GalleryError::Settings(e.to_string())
    }
}

impl From<toml::ser::Error> for GalleryError {
    fn from(e: toml::ser::Error) -> Self {
        GalleryError::Settings(e.to_string())
    }
}

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;
