//! 应用配置和持久化
//!
//! 提供图片来源、超时、历史目录和壁纸选项等设置的存储和读取。

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::portal::{WallpaperOptions, WallpaperTarget};

/// 默认图片接口
pub const DEFAULT_ENDPOINT: &str = "https://cataas.com/cat";

/// 应用设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// 随机图片接口地址
    pub endpoint: String,
    /// 请求超时（秒）
    pub timeout_secs: u64,
    /// 每次下载前的等待时间（毫秒）
    pub fetch_delay_ms: u64,
    /// 历史缓存目录（每次启动时清空）
    pub history_dir: PathBuf,
    /// 壁纸设置位置
    pub set_on: WallpaperTarget,
    /// 设置壁纸前是否显示预览
    pub show_preview: bool,
    /// 详细日志模式
    pub verbose: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 10,
            fetch_delay_ms: 3000,
            history_dir: default_history_dir(),
            set_on: WallpaperTarget::Both,
            show_preview: true,
            verbose: false,
        }
    }
}

impl GallerySettings {
    /// 获取配置文件路径
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("catgallery");
        config_dir.join("settings.toml")
    }

    /// 加载设置（如果文件不存在或无法解析则使用默认值）
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(settings) => {
                        debug!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse settings: {}, using defaults", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read settings file: {}, using defaults", e);
                }
            }
        }
        Self::default()
    }

    /// 保存设置
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn wallpaper_options(&self) -> WallpaperOptions {
        WallpaperOptions {
            set_on: self.set_on,
            show_preview: self.show_preview,
        }
    }

    pub fn set_wallpaper_options(&mut self, options: WallpaperOptions) {
        self.set_on = options.set_on;
        self.show_preview = options.show_preview;
    }
}

/// `<cache dir>/catgallery/history`
fn default_history_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("catgallery")
        .join("history")
}
