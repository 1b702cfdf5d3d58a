//! Cat Gallery CLI
//!
//! 无界面的命令行前端：批量取图、设置壁纸、查看设置

mod report;

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use catgallery_core::{
    DesktopPortal, Gallery, GallerySettings, ImageFormat, WallpaperOptions, WallpaperRequest,
    WallpaperSetter, WallpaperTarget,
};

use report::{EntryReport, FetchReport};

#[derive(Parser)]
#[command(name = "catgallery", version, about = "Random cat browser and wallpaper setter")]
struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 取若干张随机猫图并写入历史目录
    Fetch {
        /// 取图次数
        #[arg(short = 'n', long, default_value = "1")]
        count: u32,
        /// 结束后保留历史目录
        #[arg(long)]
        keep: bool,
        /// 以 JSON 输出
        #[arg(long)]
        json: bool,
    },
    /// 通过桌面门户把图片设为壁纸
    Wallpaper {
        /// 图片文件
        file: PathBuf,
        /// background, lockscreen 或 both（默认取自设置）
        #[arg(long)]
        set_on: Option<WallpaperTarget>,
        /// 不显示预览直接设置
        #[arg(long)]
        no_preview: bool,
    },
    /// 查看当前设置
    Config {
        /// 只输出设置文件路径
        #[arg(long)]
        path: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = GallerySettings::load();

    init_tracing(cli.verbose || settings.verbose);

    match cli.command {
        Commands::Fetch { count, keep, json } => fetch(&settings, count, keep, json).await,
        Commands::Wallpaper {
            file,
            set_on,
            no_preview,
        } => {
            let mut options = settings.wallpaper_options();
            if let Some(target) = set_on {
                options.set_on = target;
            }
            if no_preview {
                options.show_preview = false;
            }
            wallpaper(file, options).await
        }
        Commands::Config { path } => {
            if path {
                println!("{}", GallerySettings::config_path().display());
            } else {
                print!("{}", toml::to_string_pretty(&settings)?);
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    // 桥接 log crate（catgallery-core 使用）到 tracing
    let _ = tracing_log::LogTracer::init();

    let default_filter = if verbose {
        "debug"
    } else {
        "info,catgallery_core=debug"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

async fn fetch(settings: &GallerySettings, count: u32, keep: bool, json: bool) -> Result<()> {
    let mut gallery = Gallery::open(settings).context("failed to prepare history directory")?;
    let mut report = FetchReport::default();

    tracing::info!(
        "Fetching {} image(s) from {} into {:?}",
        count,
        settings.endpoint,
        gallery.history().root()
    );

    for _ in 0..count {
        let Some(applied) = gallery.advance().await else {
            continue;
        };

        match gallery.shown().and_then(|shown| EntryReport::from_shown(applied, shown)) {
            Some(entry) => {
                if !json {
                    println!("{}", entry);
                }
                report.entries.push(entry);
            }
            None => {
                if let Some(notice) = gallery.notice() {
                    tracing::error!("{}", notice.message);
                    report.failures.push(notice.message.clone());
                }
                gallery.dismiss_notice();
            }
        }
    }

    if !keep {
        gallery.history().discard()?;
        report.discarded = true;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if report.entries.is_empty() && count > 0 {
        bail!("no image could be fetched");
    }
    Ok(())
}

async fn wallpaper(file: PathBuf, options: WallpaperOptions) -> Result<()> {
    ensure!(file.is_file(), "{} is not a file", file.display());

    let bytes = std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
    match ImageFormat::sniff(&bytes) {
        Ok(format) => tracing::debug!("{} looks like {}", file.display(), format.name()),
        Err(e) => tracing::warn!("{}: {}", file.display(), e),
    }

    let request = WallpaperRequest::for_file(&file, options)?;
    let portal = DesktopPortal::new()
        .await
        .context("failed to connect to the session bus")?;
    match portal.version().await {
        Ok(version) => tracing::info!("Wallpaper portal version {}", version),
        Err(e) => tracing::warn!("Wallpaper portal not available: {}", e),
    }
    let handle = portal.set_wallpaper(&request).await?;

    println!("🖼️  Wallpaper request sent ({})", handle);
    Ok(())
}
