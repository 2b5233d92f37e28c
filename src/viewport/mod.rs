//! Viewport controller: owns the camera, orbit controls and mounted surface
//! for the current scene, and produces one projected frame per tick.

pub mod render_loop;
pub mod surface;

pub use render_loop::{LoopHandle, RenderLoop};
pub use surface::{Surface, SurfaceHost, CONTAINER_ID, FALLBACK_CONTAINER_ID};

use egui::{Pos2, Rect};

use crate::config::CameraConfig;
use crate::error::{SkylineError, SkylineResult};
use crate::render::camera::{OrbitControls, PerspectiveCamera};
use crate::render::raster::{project_scene, Frame};
use crate::render::scene::{DayMetadata, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportPhase {
    Uninitialized,
    Running,
}

/// Everything one running viewport draws from.
#[derive(Debug, Clone)]
pub struct ViewportState {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub surface: Surface,
    /// Last projected frame, used for picking.
    pub frame: Frame,
}

pub struct ViewportController {
    camera_config: CameraConfig,
    state: Option<ViewportState>,
    render_loop: RenderLoop,
}

impl ViewportController {
    pub fn new(camera_config: CameraConfig) -> Self {
        Self {
            camera_config,
            state: None,
            render_loop: RenderLoop::new(),
        }
    }

    pub fn phase(&self) -> ViewportPhase {
        match self.state {
            Some(_) if self.render_loop.is_running() => ViewportPhase::Running,
            _ => ViewportPhase::Uninitialized,
        }
    }

    pub fn state(&self) -> Option<&ViewportState> {
        self.state.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.state.as_ref().map(|s| &s.scene)
    }

    /// Mount a fresh surface and start drawing `scene`. Any previous surface
    /// and scene are discarded first, so calling this again re-initializes.
    pub fn setup(&mut self, host: &mut SurfaceHost, scene: Scene) -> SkylineResult<()> {
        self.teardown(host);

        let surface = host
            .remount(CONTAINER_ID, FALLBACK_CONTAINER_ID)
            .ok_or_else(|| {
                SkylineError::Viewport(format!(
                    "no #{} or #{} container to mount into",
                    CONTAINER_ID, FALLBACK_CONTAINER_ID
                ))
            })?;

        let camera = PerspectiveCamera::from_config(&self.camera_config, surface.aspect());
        let controls = OrbitControls::from_config(&self.camera_config);
        log::debug!(
            "Viewport setup: surface {} ({}x{}), {} cubes",
            surface.id,
            surface.width,
            surface.height,
            scene.cube_count()
        );

        self.state = Some(ViewportState {
            scene,
            camera,
            controls,
            surface,
            frame: Frame::default(),
        });
        self.render_loop.start();
        Ok(())
    }

    /// Stop the loop and unmount the surface. Returns to `Uninitialized`.
    pub fn teardown(&mut self, host: &mut SurfaceHost) {
        self.render_loop.stop();
        if let Some(old) = self.state.take() {
            host.unmount(old.surface.id);
            log::debug!("Viewport teardown: surface {}", old.surface.id);
        }
    }

    /// One tick: damped control update, then projection into `rect`.
    /// `None` when not running.
    pub fn frame(&mut self, rect: Rect) -> Option<&Frame> {
        let state = self.state.as_mut()?;
        if !self.render_loop.tick() {
            return None;
        }
        state.controls.update(&mut state.camera);
        state.frame = project_scene(&state.scene, &state.camera, rect);
        Some(&state.frame)
    }

    /// Match the camera aspect and the surface size to the container's new
    /// dimensions. No-op when unchanged.
    pub fn resize(&mut self, host: &mut SurfaceHost, width: f32, height: f32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        if state.surface.width == width && state.surface.height == height {
            return;
        }
        state.surface.width = width;
        state.surface.height = height;
        state.camera.set_aspect(state.surface.aspect());
        host.resize_surface(state.surface.id, width, height);
        log::debug!("Viewport resize: {}x{}", width, height);
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if let Some(state) = self.state.as_mut() {
            let height = state.surface.height;
            state.controls.rotate(dx, dy, height);
        }
    }

    pub fn zoom(&mut self, amount: f32) {
        if let Some(state) = self.state.as_mut() {
            state.controls.zoom(amount);
        }
    }

    /// Day under `pos` in the last frame. Placeholder cubes have none.
    pub fn pick(&self, pos: Pos2) -> Option<&DayMetadata> {
        let state = self.state.as_ref()?;
        let owner = state.frame.pick(pos)?;
        state.scene.skyline.cubes.get(owner)?.metadata.as_ref()
    }

    pub fn camera_distance(&self) -> Option<f32> {
        self.state.as_ref().map(|s| s.camera.distance())
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    pub fn handle(&self) -> LoopHandle {
        self.render_loop.handle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkylineConfig;
    use crate::model::{ContributionDay, ContributionSeries};
    use chrono::NaiveDate;

    fn host() -> SurfaceHost {
        let mut host = SurfaceHost::new();
        host.set_container(CONTAINER_ID, 800.0, 600.0);
        host
    }

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    fn scene(days: usize) -> Scene {
        let start = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        let series = ContributionSeries::new(
            (0..days)
                .map(|i| ContributionDay {
                    date: start + chrono::Duration::days(i as i64),
                    count: 1 + i as u32,
                    level: 2,
                })
                .collect(),
            0,
        );
        Scene::compose(&SkylineConfig::default(), Some(&series))
    }

    #[test]
    fn setup_enters_running() {
        let mut host = host();
        let mut vp = ViewportController::new(CameraConfig::default());
        assert_eq!(vp.phase(), ViewportPhase::Uninitialized);
        assert!(vp.frame(rect()).is_none());

        vp.setup(&mut host, scene(7)).unwrap();
        assert_eq!(vp.phase(), ViewportPhase::Running);
        let state = vp.state().unwrap();
        assert!((state.camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(state.scene.cube_count(), 7);
    }

    #[test]
    fn setup_twice_leaves_one_surface() {
        let mut host = host();
        let mut vp = ViewportController::new(CameraConfig::default());
        vp.setup(&mut host, scene(7)).unwrap();
        vp.setup(&mut host, scene(14)).unwrap();

        let mounted = host.container(CONTAINER_ID).unwrap().surfaces();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].id, vp.state().unwrap().surface.id);
        assert_eq!(vp.scene().unwrap().cube_count(), 14);
    }

    #[test]
    fn setup_without_container_fails() {
        let mut host = SurfaceHost::new();
        let mut vp = ViewportController::new(CameraConfig::default());
        let err = vp.setup(&mut host, scene(1)).unwrap_err();
        assert!(matches!(err, SkylineError::Viewport(_)));
        assert_eq!(vp.phase(), ViewportPhase::Uninitialized);
    }

    #[test]
    fn frames_advance_and_pick_days() {
        let mut host = host();
        let mut vp = ViewportController::new(CameraConfig::default());
        vp.setup(&mut host, scene(7)).unwrap();

        let frame = vp.frame(rect()).unwrap();
        assert!(!frame.cubes.is_empty());
        let face = frame.cubes.last().unwrap().clone();
        vp.frame(rect());
        assert_eq!(vp.frames(), 2);

        let center = face
            .points
            .iter()
            .fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2())
            / 4.0;
        let day = vp.pick(center.to_pos2()).unwrap();
        assert_eq!(day.level, 2);
    }

    #[test]
    fn resize_updates_aspect_and_surface() {
        let mut host = host();
        let mut vp = ViewportController::new(CameraConfig::default());
        vp.setup(&mut host, scene(7)).unwrap();
        vp.resize(&mut host, 1000.0, 500.0);

        let state = vp.state().unwrap();
        assert_eq!(state.camera.aspect, 2.0);
        let mounted = host.container(CONTAINER_ID).unwrap().surfaces();
        assert_eq!((mounted[0].width, mounted[0].height), (1000.0, 500.0));
    }

    #[test]
    fn drag_moves_camera() {
        let mut host = host();
        let mut vp = ViewportController::new(CameraConfig::default());
        vp.setup(&mut host, scene(7)).unwrap();
        let before = vp.state().unwrap().camera.position;
        vp.rotate(120.0, 0.0);
        vp.frame(rect());
        assert!(vp.state().unwrap().camera.position.distance(before) > 1e-3);
    }

    #[test]
    fn teardown_and_handle_stop_the_loop() {
        let mut host = host();
        let mut vp = ViewportController::new(CameraConfig::default());
        vp.setup(&mut host, scene(7)).unwrap();
        vp.handle().stop();
        assert!(vp.frame(rect()).is_none());
        assert_eq!(vp.phase(), ViewportPhase::Uninitialized);

        vp.setup(&mut host, scene(7)).unwrap();
        vp.teardown(&mut host);
        assert!(vp.state().is_none());
        assert!(host.container(CONTAINER_ID).unwrap().surfaces().is_empty());
    }
}
