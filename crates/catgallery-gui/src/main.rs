//! Cat Gallery GUI Application
//!
//! 基于 Dioxus 的桌面 GUI：浏览随机猫图，前后翻阅历史，并通过桌面门户设置壁纸。
//!
//! # 架构
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Dioxus Desktop App                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │   Header    │  │   Preview   │  │  Controls/Wallpaper │  │
//! │  │  (状态栏)    │  │  (当前图片)  │  │   (翻页/设为壁纸)    │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────┘  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       Core Logic                            │
//! │              (catgallery-core crate)                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod components;
mod state;
mod styles;

use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

fn main() {
    // 初始化日志
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Cat Gallery GUI...");

    let window = WindowBuilder::new()
        .with_title("Cat Gallery")
        .with_inner_size(LogicalSize::new(800.0, 800.0));

    // 启动 Dioxus 桌面应用
    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .launch(app::App);
}
