//! 命令行输出

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use catgallery_core::{Applied, Shown};

/// 一张图片的输出信息
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub position: u32,
    pub path: PathBuf,
    pub format: &'static str,
    pub size: usize,
    /// 是否来自历史缓存
    pub replayed: bool,
}

impl EntryReport {
    /// 仅对成功显示了图片的结果生成报告
    pub fn from_shown(applied: Applied, shown: &Shown) -> Option<Self> {
        let replayed = match applied {
            Applied::Appended(_) => false,
            Applied::Replayed(_) => true,
            Applied::Failed | Applied::Stale => return None,
        };

        Some(Self {
            position: shown.entry.position,
            path: shown.entry.path.clone(),
            format: shown.format.name(),
            size: shown.entry.bytes.len(),
            replayed,
        })
    }
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<3} {:<5} {:>8} B  {}",
            self.position,
            self.format,
            self.size,
            self.path.display()
        )?;
        if self.replayed {
            write!(f, "  (cached)")?;
        }
        Ok(())
    }
}

/// `fetch` 命令的完整输出
#[derive(Debug, Default, Serialize)]
pub struct FetchReport {
    pub entries: Vec<EntryReport>,
    pub failures: Vec<String>,
    /// 历史目录是否已删除
    pub discarded: bool,
}
