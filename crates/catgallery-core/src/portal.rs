//! 桌面门户壁纸客户端
//!
//! 通过 D-Bus 调用 `org.freedesktop.portal.Wallpaper`，由桌面环境负责真正的壁纸设置。
//! 调用是"发出即忘"的：门户返回的 Request 句柄只记录到日志。
//!
//! # 使用
//!
//! ```ignore
//! use catgallery_core::portal::{DesktopPortal, WallpaperOptions, WallpaperRequest, WallpaperSetter};
//!
//! let portal = DesktopPortal::new().await?;
//! let request = WallpaperRequest::for_file(&path, WallpaperOptions::default())?;
//! let handle = portal.set_wallpaper(&request).await?;
//! ```

use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;
use zbus::Connection;
use zbus::proxy;
use zbus::zvariant::{OwnedObjectPath, Value};

use crate::error::{GalleryError, Result};

/// xdg-desktop-portal Wallpaper 接口代理
#[proxy(
    interface = "org.freedesktop.portal.Wallpaper",
    default_service = "org.freedesktop.portal.Desktop",
    default_path = "/org/freedesktop/portal/desktop"
)]
trait Wallpaper {
    /// 设置壁纸，返回 Request 对象路径
    #[zbus(name = "SetWallpaperURI")]
    fn set_wallpaper_uri(
        &self,
        parent_window: &str,
        uri: &str,
        options: HashMap<&str, Value<'_>>,
    ) -> zbus::Result<OwnedObjectPath>;

    /// 接口版本
    #[zbus(property, name = "version")]
    fn version(&self) -> zbus::Result<u32>;
}

/// 壁纸应用位置（门户 `set-on` 选项）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperTarget {
    Background,
    Lockscreen,
    #[default]
    Both,
}

impl WallpaperTarget {
    pub const ALL: [WallpaperTarget; 3] = [
        WallpaperTarget::Background,
        WallpaperTarget::Lockscreen,
        WallpaperTarget::Both,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WallpaperTarget::Background => "background",
            WallpaperTarget::Lockscreen => "lockscreen",
            WallpaperTarget::Both => "both",
        }
    }
}

impl fmt::Display for WallpaperTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallpaperTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        WallpaperTarget::ALL
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("expected background, lockscreen or both, got '{}'", s))
    }
}

/// 门户调用选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperOptions {
    pub set_on: WallpaperTarget,
    pub show_preview: bool,
}

impl Default for WallpaperOptions {
    fn default() -> Self {
        Self {
            set_on: WallpaperTarget::Both,
            show_preview: true,
        }
    }
}

/// 一次壁纸设置请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRequest {
    /// `file://` URI
    pub uri: String,
    pub options: WallpaperOptions,
}

impl WallpaperRequest {
    /// 为本地文件创建请求（相对路径会基于当前目录转换为绝对路径）
    pub fn for_file(path: &Path, options: WallpaperOptions) -> Result<Self> {
        let absolute = std::path::absolute(path)?;
        let uri = reqwest::Url::from_file_path(&absolute).map_err(|()| {
            GalleryError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot build file URI for {:?}", absolute),
            ))
        })?;

        Ok(Self {
            uri: uri.to_string(),
            options,
        })
    }

    /// 门户的 `a{sv}` 选项
    pub fn portal_options(&self) -> HashMap<&'static str, Value<'static>> {
        let mut options = HashMap::new();
        options.insert("set-on", Value::from(self.options.set_on.as_str()));
        options.insert("show-preview", Value::from(self.options.show_preview));
        options
    }
}

/// 壁纸设置后端
#[async_trait]
pub trait WallpaperSetter: Send + Sync {
    /// 发出请求，返回门户的 Request 句柄
    async fn set_wallpaper(&self, request: &WallpaperRequest) -> Result<String>;
}

/// 基于会话总线的桌面门户
pub struct DesktopPortal {
    connection: Connection,
}

impl DesktopPortal {
    /// 连接到会话 D-Bus
    pub async fn new() -> Result<Self> {
        let connection = Connection::session().await?;
        Ok(Self { connection })
    }

    /// 门户 Wallpaper 接口版本
    pub async fn version(&self) -> Result<u32> {
        let proxy = WallpaperProxy::new(&self.connection).await?;
        Ok(proxy.version().await?)
    }
}

#[async_trait]
impl WallpaperSetter for DesktopPortal {
    async fn set_wallpaper(&self, request: &WallpaperRequest) -> Result<String> {
        let proxy = WallpaperProxy::new(&self.connection).await?;

        info!(
            "Requesting wallpaper {} (set-on={}, show-preview={})",
            request.uri, request.options.set_on, request.options.show_preview
        );

        let handle = proxy
            .set_wallpaper_uri("", &request.uri, request.portal_options())
            .await?;

        info!("Wallpaper request submitted: {}", handle.as_str());
        Ok(handle.as_str().to_string())
    }
}
