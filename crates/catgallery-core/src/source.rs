//! 随机图片来源

use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;

use crate::config::GallerySettings;
use crate::error::{GalleryError, Result};

/// 新图片的来源
///
/// 默认实现是 [`CatApi`]，测试中可以替换为内存实现。
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// 获取一张新图片的原始字节
    async fn fetch(&self) -> Result<Vec<u8>>;
}

/// 基于 HTTP GET 的随机猫图接口
pub struct CatApi {
    client: reqwest::Client,
    endpoint: String,
}

impl CatApi {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("catgallery/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &GallerySettings) -> Result<Self> {
        Self::new(settings.endpoint.clone(), settings.timeout())
    }
}

#[async_trait]
impl ImageSource for CatApi {
    async fn fetch(&self) -> Result<Vec<u8>> {
        info!("Fetching image from {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Image request failed: HTTP {}", status);
            return Err(GalleryError::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        debug!("Received {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}
