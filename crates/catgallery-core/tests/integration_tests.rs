//! 集成测试 - HTTP 图片来源与完整浏览流程
//!
//! 使用本地 axum 服务器模拟随机猫图接口。

use axum::{Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use catgallery_core::{
    Applied, CatApi, Gallery, GalleryError, GallerySettings, HistoryCache, ImageFormat,
    ImageSource, Position, WallpaperControl, WallpaperOptions,
};

fn png(tag: &str) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend_from_slice(tag.as_bytes());
    bytes
}

/// 启动本地服务器，返回 `/cat` 的地址
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/cat", addr)
}

/// 每次请求返回不同的图片：cat1, cat2, ...
async fn numbered_cat(State(counter): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
    (
        StatusCode::OK,
        [("content-type", "image/png")],
        png(&format!("cat{}", n)),
    )
}

fn counting_router() -> (Router, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/cat", get(numbered_cat))
        .with_state(counter.clone());
    (router, counter)
}

#[tokio::test]
async fn test_cat_api_returns_body() {
    let (router, counter) = counting_router();
    let endpoint = serve(router).await;

    let api = CatApi::new(endpoint, Duration::from_secs(5)).unwrap();
    let bytes = api.fetch().await.unwrap();

    assert_eq!(bytes, png("cat1"));
    assert_eq!(ImageFormat::sniff(&bytes).unwrap(), ImageFormat::Png);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_cat_api_non_success_status() {
    let router = Router::new().route(
        "/cat",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
    );
    let endpoint = serve(router).await;

    let api = CatApi::new(endpoint, Duration::from_secs(5)).unwrap();
    let err = api.fetch().await.unwrap_err();

    assert!(matches!(err, GalleryError::Status(503)), "got {:?}", err);
    assert!(err.is_network());
}

#[tokio::test]
async fn test_cat_api_timeout() {
    let router = Router::new().route(
        "/cat",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            png("late")
        }),
    );
    let endpoint = serve(router).await;

    let api = CatApi::new(endpoint, Duration::from_millis(200)).unwrap();
    let err = api.fetch().await.unwrap_err();

    assert!(matches!(err, GalleryError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_cat_api_connection_refused() {
    // 绑定后立即释放端口
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = CatApi::new(format!("http://{}/cat", addr), Duration::from_secs(2)).unwrap();
    assert!(api.fetch().await.unwrap_err().is_network());
}

/// 完整浏览流程：下一张、下一张、上一张、下一张（来自缓存）
#[tokio::test]
async fn test_gallery_browsing_against_server() {
    let (router, counter) = counting_router();
    let endpoint = serve(router).await;

    let dir = tempfile::tempdir().unwrap();
    let history = Arc::new(HistoryCache::initialize(dir.path().join("history")).unwrap());
    let source = Arc::new(CatApi::new(endpoint, Duration::from_secs(5)).unwrap());
    let mut gallery = Gallery::new(
        history,
        source,
        Duration::ZERO,
        WallpaperOptions::default(),
    );

    assert_eq!(gallery.wallpaper_control(), WallpaperControl::Idle);

    assert_eq!(gallery.advance().await, Some(Applied::Appended(1)));
    assert_eq!(gallery.advance().await, Some(Applied::Appended(2)));
    assert_eq!(gallery.position(), Position { current: 2, max: 2 });

    assert!(gallery.back());
    assert_eq!(gallery.shown().unwrap().entry.bytes, png("cat1"));

    assert_eq!(gallery.advance().await, Some(Applied::Replayed(2)));
    assert_eq!(gallery.shown().unwrap().entry.bytes, png("cat2"));
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    let uri = gallery.shown().unwrap().data_uri();
    assert!(uri.starts_with("data:image/png;base64,"));
    assert_eq!(gallery.wallpaper_control(), WallpaperControl::Ready);
}

/// 使用设置打开图库会清空历史目录中的旧文件
#[tokio::test]
async fn test_open_from_settings_resets_history_dir() {
    let dir = tempfile::tempdir().unwrap();
    let history_dir = dir.path().join("history");
    std::fs::create_dir_all(&history_dir).unwrap();
    std::fs::write(history_dir.join("1"), png("previous run")).unwrap();

    let settings = GallerySettings {
        history_dir: history_dir.clone(),
        fetch_delay_ms: 0,
        ..Default::default()
    };

    let gallery = Gallery::open(&settings).unwrap();
    assert_eq!(gallery.position(), Position::default());
    assert!(!history_dir.join("1").exists());
    assert!(matches!(
        gallery.history().read(1),
        Err(GalleryError::CacheMiss { position: 1 })
    ));
}
