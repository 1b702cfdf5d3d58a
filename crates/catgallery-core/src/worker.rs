//! 后台取图
//!
//! `advance` 在运行时的工作线程上执行，不接触任何 UI 状态，也不移动历史的当前位置：
//! 结果封装为 [`Completion`]，由 UI 线程 await 后自行应用（写入新条目或移动位置）。
//!
//! ```text
//!  UI 线程                        工作线程
//!  ───────                        ────────
//!  spawn(generation) ───────────▶ advance()
//!                                   ├─ current < max → 读取缓存条目
//!                                   └─ 否则 → 等待 → HTTP GET
//!  PendingFetch::wait() ◀──────── Completion { generation, result }
//! ```

use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::error::{GalleryError, Result};
use crate::history::{HistoryCache, HistoryEntry};
use crate::source::ImageSource;

/// 一次前进的结果
#[derive(Debug)]
pub enum Advance {
    /// 从历史中读取的下一条目（未访问网络，当前位置尚未移动）
    Replayed(HistoryEntry),
    /// 从网络获取的新图片，尚未写入历史
    Fetched(Vec<u8>),
}

/// 交还给 UI 线程的完成消息
#[derive(Debug)]
pub struct Completion {
    /// 发起任务时的 gallery 代数，用于丢弃过期结果
    pub generation: u64,
    pub result: Result<Advance>,
}

/// 正在运行的取图任务
#[derive(Debug)]
pub struct PendingFetch {
    generation: u64,
    task: JoinHandle<Result<Advance>>,
}

impl PendingFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 等待任务结束；任务 panic 或被取消时转换为 `Worker` 错误
    pub async fn wait(self) -> Completion {
        let result = match self.task.await {
            Ok(result) => result,
            Err(e) => Err(GalleryError::Worker(e.to_string())),
        };

        Completion {
            generation: self.generation,
            result,
        }
    }
}

/// 取图工作者
#[derive(Clone)]
pub struct FetchWorker {
    history: Arc<HistoryCache>,
    source: Arc<dyn ImageSource>,
    delay: Duration,
}

impl FetchWorker {
    pub fn new(history: Arc<HistoryCache>, source: Arc<dyn ImageSource>, delay: Duration) -> Self {
        Self {
            history,
            source,
            delay,
        }
    }

    pub fn history(&self) -> &Arc<HistoryCache> {
        &self.history
    }

    pub fn source(&self) -> &Arc<dyn ImageSource> {
        &self.source
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 获取下一张图片：优先重放历史，否则访问网络
    pub async fn advance(&self) -> Result<Advance> {
        if let Some(position) = self.history.peek_forward() {
            debug!("Replaying history entry {}", position);
            let entry = self.history.entry(position)?;
            return Ok(Advance::Replayed(entry));
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let bytes = self.source.fetch().await?;
        Ok(Advance::Fetched(bytes))
    }

    /// 在运行时上启动 `advance`
    ///
    /// 必须在 tokio 运行时上下文中调用。
    pub fn spawn(&self, generation: u64) -> PendingFetch {
        let worker = self.clone();
        let task = tokio::spawn(async move { worker.advance().await });
        PendingFetch { generation, task }
    }

    /// 读取上一个位置的条目；已在第一张时返回 `None`
    ///
    /// 同步执行，只在 UI 线程调用。当前位置由调用方在显示成功后移动。
    pub fn previous(&self) -> Result<Option<HistoryEntry>> {
        match self.history.peek_back() {
            Some(position) => self.history.entry(position).map(Some),
            None => Ok(None),
        }
    }
}
