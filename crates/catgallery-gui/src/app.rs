//! 主应用组件
//!
//! 后台取图在 tokio 工作线程上运行；这里只在 UI 的协作式执行器上 `spawn`
//! 一个等待 [`PendingFetch`] 的任务，结果回到 UI 后再交给 `Gallery::complete`。

use dioxus::prelude::*;
use std::time::Duration;

use crate::components::{Header, NavControls, NoticeBar, Preview, SettingsPanel, WallpaperButton};
use crate::state::{AppMode, GalleryState, open_error};
use crate::styles::GLOBAL_CSS;

use catgallery_core::{
    Applied, DesktopPortal, GallerySettings, LogEntry, Position, Result as CoreResult,
    WallpaperControl, WallpaperOptions, WallpaperRequest, WallpaperSetter,
};

/// 临时提示显示时长
const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);

/// 主应用
#[component]
pub fn App() -> Element {
    // 应用状态
    let mut mode = use_signal(|| AppMode::Gallery);
    let mut settings = use_signal(GallerySettings::load);
    let mut gallery = use_signal(|| -> GalleryState {
        catgallery_core::Gallery::open(&settings.peek()).map_err(open_error)
    });

    // "下一张"：取图进行中时 Gallery::next 返回 None，点击被忽略
    let on_next = move |_| {
        let pending = match gallery.write().as_mut() {
            Ok(g) => g.next(),
            Err(_) => None,
        };
        let Some(pending) = pending else {
            return;
        };
        log::debug!("Fetch started (generation {})", pending.generation());

        spawn(async move {
            let done = pending.wait().await;
            let applied = match gallery.write().as_mut() {
                Ok(g) => g.complete(done),
                Err(_) => return,
            };

            match applied {
                Applied::Appended(position) => log::debug!("New cat #{}", position),
                Applied::Replayed(position) => log::debug!("Replayed cat #{}", position),
                Applied::Failed => schedule_dismiss(gallery),
                Applied::Stale => {}
            }
        });
    };

    let on_back = move |_| {
        let failed = match gallery.write().as_mut() {
            Ok(g) => !g.back() && g.notice().is_some(),
            Err(_) => false,
        };
        if failed {
            schedule_dismiss(gallery);
        }
    };

    let on_set_wallpaper = move |_| {
        let request = match gallery.read().as_ref() {
            Ok(g) => g.wallpaper_request(),
            Err(_) => None,
        };
        // 按钮不处于 Ready 时忽略
        let Some(request) = request else {
            return;
        };

        spawn(async move {
            let result = match request {
                Ok(request) => set_wallpaper(&request).await,
                Err(e) => Err(e),
            };
            if let Ok(g) = gallery.write().as_mut() {
                g.wallpaper_result(result);
            }
            schedule_dismiss(gallery);
        });
    };

    let on_dismiss = move |_| {
        if let Ok(g) = gallery.write().as_mut() {
            g.dismiss_notice();
        }
    };

    let on_clear = move |_| {
        if let Ok(g) = gallery.write().as_mut()
            && let Err(e) = g.restart()
        {
            log::error!("Failed to clear history: {}", e);
        }
    };

    let on_save_settings = move |options: WallpaperOptions| {
        settings.write().set_wallpaper_options(options);
        if let Err(e) = settings.read().save() {
            log::warn!("Failed to save settings: {}", e);
        }
        if let Ok(g) = gallery.write().as_mut() {
            g.set_wallpaper_options(options);
        }
        mode.set(AppMode::Gallery);
    };

    // 渲染所需的快照
    let view = match gallery.read().as_ref() {
        Ok(g) => Ok(GalleryView {
            position: g.position(),
            loading: g.is_loading(),
            label_visible: g.label_visible(),
            control: g.wallpaper_control(),
            image: g.shown().map(|shown| shown.data_uri()),
            caption: g
                .shown()
                .map(|shown| format!("{} · {} KB", shown.format.name(), shown.entry.bytes.len() / 1024)),
            notice: g.notice().cloned(),
            options: g.wallpaper_options(),
        }),
        Err(e) => Err(e.clone()),
    };

    rsx! {
        style { "{GLOBAL_CSS}" }

        div { class: "app-container",
            match view {
                Err(err) => rsx! {
                    div { class: "bento-tile error-tile",
                        div { class: "empty-state-icon", "❌" }
                        p { class: "empty-state-text", "{err}" }
                    }
                },

                Ok(view) => rsx! {
                    div { class: "bento-tile header-tile",
                        Header {
                            position: view.position,
                            loading: view.loading,
                            on_settings: move |_| {
                                let next = if *mode.read() == AppMode::Settings {
                                    AppMode::Gallery
                                } else {
                                    AppMode::Settings
                                };
                                mode.set(next);
                            },
                        }
                    }

                    NoticeBar { notice: view.notice.clone(), on_dismiss: on_dismiss }

                    match *mode.read() {
                        AppMode::Gallery => rsx! {
                            div { class: "bento-tile preview-tile",
                                Preview {
                                    image: view.image.clone(),
                                    caption: view.caption.clone(),
                                    loading: view.loading,
                                }
                            }

                            div { class: "controls-tile",
                                NavControls {
                                    can_back: view.position.can_retreat(),
                                    loading: view.loading,
                                    on_back: on_back,
                                    on_next: on_next,
                                }

                                WallpaperButton {
                                    control: view.control,
                                    label_visible: view.label_visible,
                                    on_click: on_set_wallpaper,
                                }
                            }
                        },

                        AppMode::Settings => rsx! {
                            div { class: "bento-tile settings-tile",
                                SettingsPanel {
                                    options: view.options,
                                    history_dir: settings.read().history_dir.display().to_string(),
                                    on_save: on_save_settings,
                                    on_clear: on_clear,
                                }
                            }
                        },
                    }
                },
            }
        }
    }
}

/// 渲染用的图库快照
struct GalleryView {
    position: Position,
    loading: bool,
    label_visible: bool,
    control: WallpaperControl,
    image: Option<String>,
    caption: Option<String>,
    notice: Option<LogEntry>,
    options: WallpaperOptions,
}

async fn set_wallpaper(request: &WallpaperRequest) -> CoreResult<String> {
    let portal = DesktopPortal::new().await?;
    portal.set_wallpaper(request).await
}

/// 一段时间后清除当前提示（提示已被更新的提示替换时保留新的）
fn schedule_dismiss(mut gallery: Signal<GalleryState>) {
    let shown = match gallery.read().as_ref() {
        Ok(g) => g.notice().cloned(),
        Err(_) => None,
    };
    let Some(shown) = shown else {
        return;
    };

    spawn(async move {
        tokio::time::sleep(NOTICE_TIMEOUT).await;
        if let Ok(g) = gallery.write().as_mut()
            && g.notice() == Some(&shown)
        {
            g.dismiss_notice();
        }
    });
}
