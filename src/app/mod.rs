//! `SkylineApp`, the top-level egui application state.
//!
//! Methods are split across the sibling sub-modules:
//!
//! - `fetch`: submission, background fetch, scene rebuild
//! - `toolbar`: username / date inputs and controls
//! - `content`: 3-D viewport, hover tooltip, stats panel
//! - `prompt`: modal asking for the access token

pub mod content;
pub mod fetch;
pub mod prompt;
pub mod toolbar;

use std::sync::{mpsc, Arc};

use eframe::egui;

use contrib_skyline::model::{ContributionSeries, DateRange};
use contrib_skyline::net::credentials::PromptRequest;
use contrib_skyline::net::ContributionClient;
use contrib_skyline::viewport::{SurfaceHost, ViewportController, CONTAINER_ID};
use contrib_skyline::{SkylineConfig, SkylineResult};

/// Result handed back by the fetch worker.
pub struct FetchOutcome {
    pub login: String,
    pub range: DateRange,
    pub result: SkylineResult<ContributionSeries>,
}

/// The series currently on screen.
pub struct Shown {
    pub login: String,
    pub range: DateRange,
    pub series: ContributionSeries,
}

pub struct SkylineApp {
    pub config: SkylineConfig,
    pub client: Arc<ContributionClient>,
    pub username: String,
    pub from_input: String,
    pub to_input: String,
    pub loading: bool,
    pub error: Option<String>,
    pub fetch_rx: Option<mpsc::Receiver<FetchOutcome>>,
    pub shown: Option<Shown>,
    // Token prompt
    pub prompt_rx: mpsc::Receiver<PromptRequest>,
    pub prompt: Option<PromptRequest>,
    pub token_input: String,
    // Viewport
    pub host: SurfaceHost,
    pub viewport: ViewportController,
    pub show_stats: bool,
}

impl SkylineApp {
    pub fn new(
        config: SkylineConfig,
        client: ContributionClient,
        prompt_rx: mpsc::Receiver<PromptRequest>,
        range: DateRange,
        username: Option<String>,
    ) -> Self {
        let mut host = SurfaceHost::new();
        host.set_container(CONTAINER_ID, 1280.0, 760.0);
        let viewport = ViewportController::new(config.camera.clone());

        Self {
            config,
            client: Arc::new(client),
            username: username.unwrap_or_default(),
            from_input: range.from.format("%Y-%m-%d").to_string(),
            to_input: range.to.format("%Y-%m-%d").to_string(),
            loading: false,
            error: None,
            fetch_rx: None,
            shown: None,
            prompt_rx,
            prompt: None,
            token_input: String::new(),
            host,
            viewport,
            show_stats: true,
        }
    }
}

impl eframe::App for SkylineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch();
        self.check_prompt();

        // The worker may be blocked on the token prompt, keep polling
        if self.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        if self.show_stats {
            egui::SidePanel::right("stats")
                .default_width(220.0)
                .show(ctx, |ui| {
                    self.draw_stats_panel(ui);
                });
        }

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_content(ui, &ctx_clone);
            });

        self.draw_token_prompt(ctx);
    }
}
