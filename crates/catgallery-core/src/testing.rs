//! 测试辅助

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{GalleryError, Result};
use crate::source::ImageSource;

/// 按顺序返回预设结果的图片来源，并记录调用次数
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<VecDeque<Result<Vec<u8>>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, bytes: &[u8]) {
        self.replies.lock().unwrap().push_back(Ok(bytes.to_vec()));
    }

    pub fn push_status(&self, status: u16) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(GalleryError::Status(status)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GalleryError::Worker("no scripted reply".to_string())))
    }
}

/// 带 PNG 文件头的测试图片，`tag` 用于区分内容
pub fn png(tag: &str) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}
