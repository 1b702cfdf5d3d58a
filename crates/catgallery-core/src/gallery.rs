//! UI 线程上的图库状态
//!
//! [`Gallery`] 只在 UI 线程使用。它负责：
//!
//! - 发起后台取图（取图进行中时忽略新的"下一张"请求）
//! - 应用后台交回的 [`Completion`]：识别格式、写入历史、更新显示
//! - 同步后退（取图进行中时忽略）
//! - 壁纸按钮状态 `{Idle, Busy, Ready}`
//! - 错误的临时提示
//!
//! # 状态转换
//!
//! | 事件 | 加载指示 | 按钮文字 | 显示图片 | 历史 |
//! |------|---------|---------|---------|------|
//! | 开始取图 | 显示 | 隐藏 | 不变 | 不变 |
//! | 新图片 | 隐藏 | 显示 | 更新 | `append` |
//! | 重放历史 | 隐藏 | 显示 | 更新 | `seek` |
//! | 失败 | 隐藏 | 显示 | 不变 | 不变（显示提示） |

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::config::GallerySettings;
use crate::error::{GalleryError, Result};
use crate::history::{HistoryCache, HistoryEntry, Position};
use crate::image::ImageFormat;
use crate::logging::LogEntry;
use crate::portal::{WallpaperOptions, WallpaperRequest};
use crate::source::{CatApi, ImageSource};
use crate::worker::{Advance, Completion, FetchWorker, PendingFetch};

/// 壁纸按钮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperControl {
    /// 尚未加载任何图片
    Idle,
    /// 取图进行中
    Busy,
    /// 可以设置壁纸
    Ready,
}

/// 应用一次完成消息后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// 新图片已写入历史的该位置
    Appended(u32),
    /// 从历史重放了该位置
    Replayed(u32),
    /// 失败，显示内容不变
    Failed,
    /// 来自重置前的任务，已丢弃
    Stale,
}

/// 当前显示的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shown {
    pub entry: HistoryEntry,
    pub format: ImageFormat,
}

impl Shown {
    fn sniff(entry: HistoryEntry) -> Result<Self> {
        let format = ImageFormat::sniff(&entry.bytes)?;
        Ok(Self { entry, format })
    }

    pub fn data_uri(&self) -> String {
        self.format.data_uri(&self.entry.bytes)
    }
}

/// 图库
pub struct Gallery {
    worker: FetchWorker,
    wallpaper: WallpaperOptions,
    generation: u64,
    loading: bool,
    shown: Option<Shown>,
    notice: Option<LogEntry>,
}

impl Gallery {
    /// 按设置创建：清空历史目录，使用 HTTP 图片来源
    pub fn open(settings: &GallerySettings) -> Result<Self> {
        let history = Arc::new(HistoryCache::initialize(&settings.history_dir)?);
        let source = Arc::new(CatApi::from_settings(settings)?);
        Ok(Self::new(
            history,
            source,
            settings.fetch_delay(),
            settings.wallpaper_options(),
        ))
    }

    pub fn new(
        history: Arc<HistoryCache>,
        source: Arc<dyn ImageSource>,
        delay: Duration,
        wallpaper: WallpaperOptions,
    ) -> Self {
        Self {
            worker: FetchWorker::new(history, source, delay),
            wallpaper,
            generation: 0,
            loading: false,
            shown: None,
            notice: None,
        }
    }

    pub fn history(&self) -> &Arc<HistoryCache> {
        self.worker.history()
    }

    pub fn position(&self) -> Position {
        self.history().position()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 是否显示加载指示
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 壁纸按钮文字是否可见
    pub fn label_visible(&self) -> bool {
        !self.loading
    }

    pub fn shown(&self) -> Option<&Shown> {
        self.shown.as_ref()
    }

    pub fn notice(&self) -> Option<&LogEntry> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn wallpaper_options(&self) -> WallpaperOptions {
        self.wallpaper
    }

    pub fn set_wallpaper_options(&mut self, options: WallpaperOptions) {
        self.wallpaper = options;
    }

    /// 开始取下一张；已有任务进行中时返回 `None`
    pub fn next(&mut self) -> Option<PendingFetch> {
        if self.loading {
            debug!("Fetch already in flight, ignoring next");
            return None;
        }

        self.loading = true;
        Some(self.worker.spawn(self.generation))
    }

    /// 在 UI 线程应用后台任务的结果
    pub fn complete(&mut self, done: Completion) -> Applied {
        if done.generation != self.generation {
            debug!(
                "Dropping completion from generation {} (current {})",
                done.generation, self.generation
            );
            return Applied::Stale;
        }

        self.loading = false;

        match done.result.and_then(|advance| self.apply(advance)) {
            Ok(applied) => applied,
            Err(e) => {
                warn!("Failed to load next image: {}", e);
                self.notice = Some(LogEntry::error(describe(&e)));
                Applied::Failed
            }
        }
    }

    fn apply(&mut self, advance: Advance) -> Result<Applied> {
        match advance {
            Advance::Replayed(entry) => {
                let position = entry.position;
                let shown = Shown::sniff(entry)?;
                self.history().seek(position)?;
                self.shown = Some(shown);
                Ok(Applied::Replayed(position))
            }
            Advance::Fetched(bytes) => {
                let format = ImageFormat::sniff(&bytes)?;
                let position = self.history().append(&bytes)?;
                let path = self.history().entry_path(position)?;
                info!("Showing new {} image #{}", format.name(), position);

                self.shown = Some(Shown {
                    entry: HistoryEntry {
                        position,
                        path,
                        bytes,
                    },
                    format,
                });
                Ok(Applied::Appended(position))
            }
        }
    }

    /// 取下一张并等待结果（命令行和测试使用）
    pub async fn advance(&mut self) -> Option<Applied> {
        let pending = self.next()?;
        let done = pending.wait().await;
        Some(self.complete(done))
    }

    /// 后退一张；已在第一张或取图进行中时返回 `false`
    pub fn back(&mut self) -> bool {
        if self.loading {
            debug!("Fetch in flight, ignoring back");
            return false;
        }

        let result = self
            .worker
            .previous()
            .and_then(|entry| entry.map(Shown::sniff).transpose())
            .and_then(|shown| match shown {
                Some(shown) => self.history().seek(shown.entry.position).map(|()| Some(shown)),
                None => Ok(None),
            });

        match result {
            Ok(Some(shown)) => {
                debug!("Back to history entry {}", shown.entry.position);
                self.shown = Some(shown);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to go back: {}", e);
                self.notice = Some(LogEntry::error(e.to_string()));
                false
            }
        }
    }

    /// 重建历史目录并丢弃所有进行中的任务
    pub fn restart(&mut self) -> Result<()> {
        let root = self.history().root().to_path_buf();
        let history = Arc::new(HistoryCache::initialize(root)?);

        self.worker = FetchWorker::new(history, self.worker.source().clone(), self.worker.delay());
        self.generation += 1;
        self.loading = false;
        self.shown = None;
        self.notice = None;

        info!("History cleared (generation {})", self.generation);
        Ok(())
    }

    pub fn wallpaper_control(&self) -> WallpaperControl {
        if self.loading {
            WallpaperControl::Busy
        } else if self.shown.is_none() || self.position().current == 0 {
            WallpaperControl::Idle
        } else {
            WallpaperControl::Ready
        }
    }

    /// 当前图片的壁纸请求；按钮不处于 Ready 时返回 `None`
    pub fn wallpaper_request(&self) -> Option<Result<WallpaperRequest>> {
        if self.wallpaper_control() != WallpaperControl::Ready {
            return None;
        }
        let shown = self.shown.as_ref()?;
        Some(WallpaperRequest::for_file(&shown.entry.path, self.wallpaper))
    }

    /// 记录门户调用的结果
    pub fn wallpaper_result(&mut self, result: Result<String>) {
        match result {
            Ok(handle) => {
                info!("Wallpaper portal accepted request {}", handle);
                self.notice = Some(LogEntry::info("Wallpaper request sent"));
            }
            Err(e) => {
                warn!("Failed to set wallpaper: {}", e);
                self.notice = Some(LogEntry::error(format!("Could not set wallpaper: {}", e)));
            }
        }
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("position", &self.position())
            .field("generation", &self.generation)
            .field("loading", &self.loading)
            .finish()
    }
}

/// 错误的提示文字
pub fn describe(error: &GalleryError) -> String {
    match error {
        GalleryError::Network(_) | GalleryError::Status(_) => {
            format!("Could not reach the cat server: {}", error)
        }
        GalleryError::Decode(_) => format!("The server sent something that isn't an image: {}", error),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;
    use crate::testing::{ScriptedSource, png};

    fn gallery_with(source: Arc<ScriptedSource>) -> (tempfile::TempDir, Gallery) {
        let dir = tempfile::tempdir().unwrap();
        let history = Arc::new(HistoryCache::initialize(dir.path().join("history")).unwrap());
        let gallery = Gallery::new(history, source, Duration::ZERO, WallpaperOptions::default());
        (dir, gallery)
    }

    fn shown_bytes(gallery: &Gallery) -> Vec<u8> {
        gallery.shown().unwrap().entry.bytes.clone()
    }

    #[tokio::test]
    async fn test_browsing_scenario() {
        let source = ScriptedSource::new();
        source.push_ok(&png("img1"));
        source.push_ok(&png("img2"));
        let (_dir, mut gallery) = gallery_with(source.clone());

        assert_eq!(gallery.advance().await, Some(Applied::Appended(1)));
        assert_eq!(gallery.position(), Position { current: 1, max: 1 });
        assert_eq!(gallery.history().read(1).unwrap(), png("img1"));

        assert_eq!(gallery.advance().await, Some(Applied::Appended(2)));
        assert_eq!(gallery.position(), Position { current: 2, max: 2 });

        assert!(gallery.back());
        assert_eq!(gallery.position(), Position { current: 1, max: 2 });
        assert_eq!(shown_bytes(&gallery), png("img1"));

        assert_eq!(gallery.advance().await, Some(Applied::Replayed(2)));
        assert_eq!(gallery.position(), Position { current: 2, max: 2 });
        assert_eq!(shown_bytes(&gallery), png("img2"));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_loading_transitions() {
        let source = ScriptedSource::new();
        source.push_ok(&png("a"));
        let (_dir, mut gallery) = gallery_with(source);

        assert!(!gallery.is_loading());
        assert_eq!(gallery.wallpaper_control(), WallpaperControl::Idle);

        let pending = gallery.next().unwrap();
        assert!(gallery.is_loading());
        assert!(!gallery.label_visible());
        assert_eq!(gallery.wallpaper_control(), WallpaperControl::Busy);
        assert!(gallery.wallpaper_request().is_none());

        let applied = gallery.complete(pending.wait().await);
        assert_eq!(applied, Applied::Appended(1));
        assert!(!gallery.is_loading());
        assert!(gallery.label_visible());
        assert_eq!(gallery.wallpaper_control(), WallpaperControl::Ready);
        assert_eq!(gallery.shown().unwrap().format, ImageFormat::Png);
    }

    #[tokio::test]
    async fn test_next_ignored_while_in_flight() {
        let source = ScriptedSource::new();
        source.push_ok(&png("a"));
        source.push_ok(&png("b"));
        let (_dir, mut gallery) = gallery_with(source.clone());

        let pending = gallery.next().unwrap();
        assert!(gallery.next().is_none());
        assert_eq!(gallery.advance().await, None);

        gallery.complete(pending.wait().await);
        assert_eq!(gallery.position(), Position { current: 1, max: 1 });
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_display_and_sets_notice() {
        let source = ScriptedSource::new();
        source.push_ok(&png("a"));
        source.push_status(502);
        let (_dir, mut gallery) = gallery_with(source);

        gallery.advance().await;
        assert_eq!(gallery.advance().await, Some(Applied::Failed));

        assert!(!gallery.is_loading());
        assert_eq!(shown_bytes(&gallery), png("a"));
        assert_eq!(gallery.position(), Position { current: 1, max: 1 });

        let notice = gallery.notice().unwrap();
        assert_eq!(notice.level, LogLevel::Error);
        assert!(notice.message.contains("502"), "notice: {}", notice.message);

        gallery.dismiss_notice();
        assert!(gallery.notice().is_none());
    }

    #[tokio::test]
    async fn test_undecodable_bytes_are_not_appended() {
        let source = ScriptedSource::new();
        source.push_ok(b"<html>rate limited</html>");
        let (_dir, mut gallery) = gallery_with(source);

        assert_eq!(gallery.advance().await, Some(Applied::Failed));
        assert_eq!(gallery.position(), Position::default());
        assert!(gallery.shown().is_none());
        assert_eq!(gallery.wallpaper_control(), WallpaperControl::Idle);
    }

    #[tokio::test]
    async fn test_stale_completion_is_dropped() {
        let source = ScriptedSource::new();
        source.push_ok(&png("old"));
        source.push_ok(&png("new"));
        let (_dir, mut gallery) = gallery_with(source);

        let pending = gallery.next().unwrap();
        gallery.restart().unwrap();
        assert_eq!(gallery.generation(), 1);
        assert!(!gallery.is_loading());

        let stale = pending.wait().await;
        assert_eq!(gallery.complete(stale), Applied::Stale);
        assert_eq!(gallery.position(), Position::default());

        assert_eq!(gallery.advance().await, Some(Applied::Appended(1)));
        assert_eq!(shown_bytes(&gallery), png("new"));
    }

    #[tokio::test]
    async fn test_restart_clears_history() {
        let source = ScriptedSource::new();
        source.push_ok(&png("a"));
        let (_dir, mut gallery) = gallery_with(source);

        gallery.advance().await;
        let old_path = gallery.shown().unwrap().entry.path.clone();

        gallery.restart().unwrap();
        assert_eq!(gallery.position(), Position::default());
        assert!(gallery.shown().is_none());
        assert!(!old_path.exists());
    }

    #[test]
    fn test_back_is_noop_at_start() {
        let source = ScriptedSource::new();
        let (_dir, mut gallery) = gallery_with(source);

        assert!(!gallery.back());
        gallery.history().append(&png("a")).unwrap();
        assert!(!gallery.back());
        assert_eq!(gallery.position().current, 1);
    }

    /// 当前位置与显示的图片始终一致
    fn assert_in_step(gallery: &Gallery) {
        assert_eq!(
            gallery.position().current,
            gallery.shown().unwrap().entry.position
        );
    }

    #[tokio::test]
    async fn test_back_ignored_while_in_flight() {
        let source = ScriptedSource::new();
        source.push_ok(&png("img1"));
        source.push_ok(&png("img2"));
        source.push_ok(&png("img3"));
        let (_dir, mut gallery) = gallery_with(source.clone());

        gallery.advance().await;
        gallery.advance().await;

        // 网络取图进行中
        let pending = gallery.next().unwrap();
        assert!(!gallery.back());
        assert_eq!(gallery.complete(pending.wait().await), Applied::Appended(3));
        assert_eq!(gallery.position(), Position { current: 3, max: 3 });
        assert_in_step(&gallery);

        // 重放进行中
        assert!(gallery.back());
        let pending = gallery.next().unwrap();
        let done = pending.wait().await;
        assert!(!gallery.back());
        assert_eq!(gallery.complete(done), Applied::Replayed(3));
        assert_eq!(gallery.position(), Position { current: 3, max: 3 });
        assert_eq!(shown_bytes(&gallery), png("img3"));
        assert_in_step(&gallery);
        assert!(gallery.wallpaper_request().unwrap().unwrap().uri.ends_with("/history/3"));
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_replay_read_failure_keeps_cursor() {
        let source = ScriptedSource::new();
        source.push_ok(&png("img1"));
        source.push_ok(&png("img2"));
        let (_dir, mut gallery) = gallery_with(source);

        gallery.advance().await;
        gallery.advance().await;
        assert!(gallery.back());
        std::fs::remove_file(gallery.history().root().join("2")).unwrap();

        assert_eq!(gallery.advance().await, Some(Applied::Failed));
        assert_eq!(gallery.position(), Position { current: 1, max: 2 });
        assert_eq!(shown_bytes(&gallery), png("img1"));
        assert_in_step(&gallery);
        assert!(gallery.notice().unwrap().message.contains("position 2"));
    }

    #[tokio::test]
    async fn test_back_read_failure_keeps_cursor() {
        let source = ScriptedSource::new();
        source.push_ok(&png("img1"));
        source.push_ok(&png("img2"));
        let (_dir, mut gallery) = gallery_with(source);

        gallery.advance().await;
        gallery.advance().await;
        std::fs::remove_file(gallery.history().root().join("1")).unwrap();

        assert!(!gallery.back());
        assert_eq!(gallery.position(), Position { current: 2, max: 2 });
        assert_eq!(shown_bytes(&gallery), png("img2"));
        assert_in_step(&gallery);
        assert_eq!(gallery.notice().unwrap().level, LogLevel::Error);
    }

    #[tokio::test]
    async fn test_wallpaper_request_points_at_current_entry() {
        let source = ScriptedSource::new();
        source.push_ok(&png("a"));
        source.push_ok(&png("b"));
        let (_dir, mut gallery) = gallery_with(source);

        gallery.advance().await;
        gallery.advance().await;
        gallery.back();

        let request = gallery.wallpaper_request().unwrap().unwrap();
        assert!(request.uri.starts_with("file://"));
        assert!(request.uri.ends_with("/history/1"), "uri: {}", request.uri);
        assert_eq!(request.options, WallpaperOptions::default());
    }

    #[test]
    fn test_wallpaper_result_sets_notice() {
        let source = ScriptedSource::new();
        let (_dir, mut gallery) = gallery_with(source);

        gallery.wallpaper_result(Err(GalleryError::Settings("no portal".into())));
        assert_eq!(gallery.notice().unwrap().level, LogLevel::Error);

        gallery.wallpaper_result(Ok("/org/freedesktop/portal/desktop/request/1_1/t".into()));
        assert_eq!(gallery.notice().unwrap().level, LogLevel::Info);
    }
}
