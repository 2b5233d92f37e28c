//! Fetch lifecycle for `SkylineApp`.
//!
//! `submit` validates the inputs and starts a background fetch; `check_fetch`
//! polls for its result and rebuilds the scene. Only one fetch runs at a time.

use std::sync::{mpsc, Arc};

use eframe::egui;

use contrib_skyline::model::DateRange;
use contrib_skyline::render::Scene;

use super::{FetchOutcome, Shown, SkylineApp};

impl SkylineApp {
    /// Start fetching the calendar for the current inputs.
    pub fn submit(&mut self, ctx: &egui::Context) {
        if self.loading {
            log::warn!("Fetch already in progress, ignoring submission");
            return;
        }

        let login = self.username.trim().to_string();
        if login.is_empty() {
            self.error = Some("Enter a GitHub username".to_string());
            return;
        }
        let range = match DateRange::parse(&self.from_input, &self.to_input) {
            Ok(range) => range,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let client = Arc::clone(&self.client);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = client.fetch(&login, range.from, range.to);
            let _ = tx.send(FetchOutcome {
                login,
                range,
                result,
            });
            ctx.request_repaint();
        });
    }

    /// Poll the fetch channel and swap in the new scene when a result arrives.
    pub fn check_fetch(&mut self) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.error = Some("fetch worker exited without a result".to_string());
                self.loading = false;
                self.fetch_rx = None;
                return;
            }
        };
        self.loading = false;
        self.fetch_rx = None;

        match outcome.result {
            Ok(series) => {
                log::debug!("Rebuilding scene for {} ({} days)", outcome.login, series.len());
                let scene = Scene::compose(&self.config, Some(&series));
                if let Err(e) = self.viewport.setup(&mut self.host, scene) {
                    self.error = Some(e.to_string());
                    return;
                }
                self.shown = Some(Shown {
                    login: outcome.login,
                    range: outcome.range,
                    series,
                });
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Pick up a token question from the fetch worker.
    pub fn check_prompt(&mut self) {
        if self.prompt.is_some() {
            return;
        }
        if let Ok(req) = self.prompt_rx.try_recv() {
            self.token_input.clear();
            self.prompt = Some(req);
        }
    }
}
