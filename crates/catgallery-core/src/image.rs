//! 图片格式识别
//!
//! 像素解码交给 webview 完成，这里只根据文件头判断字节是否为浏览器可显示的图片，
//! 并生成 `data:` URI。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{GalleryError, Result};

/// 浏览器可直接显示的图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
    Avif,
}

impl ImageFormat {
    /// 根据魔数识别格式
    pub fn sniff(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(GalleryError::Decode("empty body".to_string()));
        }

        let format = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            ImageFormat::Png
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ImageFormat::Jpeg
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            ImageFormat::Gif
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            ImageFormat::WebP
        } else if bytes.starts_with(b"BM") && bytes.len() >= 14 {
            ImageFormat::Bmp
        } else if bytes.len() >= 12
            && &bytes[4..8] == b"ftyp"
            && (&bytes[8..12] == b"avif" || &bytes[8..12] == b"avis")
        {
            ImageFormat::Avif
        } else {
            let head: Vec<String> = bytes.iter().take(8).map(|b| format!("{:02x}", b)).collect();
            return Err(GalleryError::Decode(format!(
                "unknown signature {}",
                head.join(" ")
            )));
        };

        Ok(format)
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Avif => "image/avif",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::WebP => "WebP",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Avif => "AVIF",
        }
    }

    /// 生成可直接用于 `<img src>` 的 data URI
    pub fn data_uri(&self, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", self.mime_type(), STANDARD.encode(bytes))
    }
}
