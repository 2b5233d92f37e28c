use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use contrib_skyline::model::DateRange;
use contrib_skyline::net::credentials::{
    channel_prompt, ChannelPrompt, FsTokenStore, MemoryTokenStore, PromptingProvider, StaticToken,
};
use contrib_skyline::net::{ContributionClient, CredentialProvider};
use contrib_skyline::SkylineConfig;

mod app;

use app::SkylineApp;

/// Token read before the stored one.
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Render a GitHub contribution calendar as a 3D skyline.
#[derive(Parser, Debug)]
#[command(name = "contrib-skyline", version)]
struct Args {
    /// GitHub login to load on startup
    username: Option<String>,

    /// First day of the range (YYYY-MM-DD). Defaults to a year before `--to`.
    #[arg(long)]
    from: Option<String>,

    /// Last day of the range (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    to: Option<String>,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn date_range(args: &Args) -> anyhow::Result<DateRange> {
    let today = chrono::Local::now().date_naive();
    let to = match args.to {
        Some(ref to) => DateRange::parse(to, to)?.to,
        None => today,
    };
    let from = match args.from {
        Some(ref from) => DateRange::parse(from, from)?.from,
        None => DateRange::trailing_year(to).from,
    };
    Ok(DateRange::new(from, to)?)
}

fn credentials(prompt: ChannelPrompt) -> Arc<dyn CredentialProvider> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        if !token.trim().is_empty() {
            log::info!("Using token from {}", TOKEN_ENV);
            return Arc::new(StaticToken(Some(token)));
        }
    }
    match FsTokenStore::new() {
        Ok(store) => {
            log::debug!("Token store at {}", store.path().display());
            Arc::new(PromptingProvider::new(store, prompt))
        }
        Err(e) => {
            log::warn!("{}; the token will not be remembered", e);
            Arc::new(PromptingProvider::new(MemoryTokenStore::default(), prompt))
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => SkylineConfig::load_or_default(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SkylineConfig::default(),
    };
    let range = date_range(&args).context("invalid --from/--to")?;

    let (prompt, prompt_rx) = channel_prompt();
    let client = ContributionClient::from_config(&config.api, credentials(prompt))
        .context("creating HTTP client")?;

    log::info!(
        "Starting contrib-skyline ({} .. {}) against {}",
        range.from,
        range.to,
        config.api.endpoint
    );

    let autostart = args.username.is_some();
    let mut app = SkylineApp::new(config, client, prompt_rx, range, args.username);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Contribution Skyline",
        options,
        Box::new(move |cc| {
            if autostart {
                app.submit(&cc.egui_ctx);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("failed to start window: {}", e))
}
