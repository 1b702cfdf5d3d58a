//! UI 组件模块

mod header;
mod nav_controls;
mod notice_bar;
mod preview;
mod settings_panel;
mod wallpaper_button;

pub use header::Header;
pub use nav_controls::NavControls;
pub use notice_bar::NoticeBar;
pub use preview::Preview;
pub use settings_panel::SettingsPanel;
pub use wallpaper_button::WallpaperButton;
