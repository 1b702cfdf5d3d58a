//! 浏览历史缓存
//!
//! 每次运行使用一个全新的临时目录，按位置顺序追加已下载的图片：
//! 位置 `n` 的图片保存在 `<root>/<n>`，同时在内存中保存一份按位置排列的索引。
//!
//! # 不变量
//!
//! - `0 <= current <= max`，`current == 0` 表示尚未加载任何图片
//! - `[1, max]` 中每个位置在磁盘上都有对应文件
//! - 条目只追加，不修改，不单独删除
//!
//! 计数器和索引由同一把锁保护，UI 线程和后台任务都可以安全访问。

use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{GalleryError, Result};

/// 当前浏览位置与最高水位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub current: u32,
    pub max: u32,
}

impl Position {
    /// 是否可以直接从缓存前进（不需要网络）
    pub fn can_replay(&self) -> bool {
        self.current < self.max
    }

    pub fn can_retreat(&self) -> bool {
        self.current > 1
    }
}

/// 历史条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub position: u32,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Cursor {
    current: u32,
    records: Vec<PathBuf>,
}

impl Cursor {
    fn max(&self) -> u32 {
        self.records.len() as u32
    }

    fn record(&self, position: u32) -> Option<&PathBuf> {
        let index = (position as usize).checked_sub(1)?;
        self.records.get(index)
    }
}

/// 只追加、按位置寻址的图片历史
#[derive(Debug)]
pub struct HistoryCache {
    root: PathBuf,
    cursor: Mutex<Cursor>,
}

impl HistoryCache {
    /// 创建空的历史目录（已存在的同名目录会被整个删除）
    pub fn initialize(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        match fs::remove_dir_all(&root) {
            Ok(()) => debug!("Removed previous history at {:?}", root),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&root)?;

        info!("History cache ready at {:?}", root);

        Ok(Self {
            root,
            cursor: Mutex::new(Cursor::default()),
        })
    }

    fn cursor(&self) -> MutexGuard<'_, Cursor> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn position(&self) -> Position {
        let cursor = self.cursor();
        Position {
            current: cursor.current,
            max: cursor.max(),
        }
    }

    /// 在 `max + 1` 处写入新条目，并把当前位置移到该处
    pub fn append(&self, bytes: &[u8]) -> Result<u32> {
        let mut cursor = self.cursor();
        let position = cursor.max() + 1;
        let path = self.root.join(position.to_string());

        fs::write(&path, bytes)?;
        cursor.records.push(path);
        cursor.current = position;

        debug!("Appended history entry {} ({} bytes)", position, bytes.len());
        Ok(position)
    }

    /// 条目文件路径；位置超出 `[1, max]` 时返回 `CacheMiss`
    pub fn entry_path(&self, position: u32) -> Result<PathBuf> {
        self.cursor()
            .record(position)
            .cloned()
            .ok_or(GalleryError::CacheMiss { position })
    }

    /// 读取某个位置的原始图片字节
    pub fn read(&self, position: u32) -> Result<Vec<u8>> {
        let path = self.entry_path(position)?;
        fs::read(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GalleryError::CacheMiss { position },
            _ => e.into(),
        })
    }

    pub fn entry(&self, position: u32) -> Result<HistoryEntry> {
        let path = self.entry_path(position)?;
        let bytes = self.read(position)?;
        Ok(HistoryEntry {
            position,
            path,
            bytes,
        })
    }

    /// `current < max` 时返回下一个位置，不移动当前位置
    pub fn peek_forward(&self) -> Option<u32> {
        let cursor = self.cursor();
        (cursor.current < cursor.max()).then_some(cursor.current + 1)
    }

    /// 把当前位置移到 `position`；超出 `[1, max]` 时返回 `CacheMiss`
    pub fn seek(&self, position: u32) -> Result<()> {
        let mut cursor = self.cursor();
        if cursor.record(position).is_none() {
            return Err(GalleryError::CacheMiss { position });
        }
        cursor.current = position;
        Ok(())
    }

    /// `current > 1` 时返回上一个位置，不移动当前位置
    pub fn peek_back(&self) -> Option<u32> {
        let cursor = self.cursor();
        (cursor.current > 1).then(|| cursor.current - 1)
    }

    /// 删除历史目录并清空计数器
    pub fn discard(&self) -> Result<()> {
        let mut cursor = self.cursor();
        cursor.records.clear();
        cursor.current = 0;

        match fs::remove_dir_all(&self.root) {
            Ok(()) => {
                info!("Discarded history at {:?}", self.root);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
