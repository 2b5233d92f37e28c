//! Perspective camera and damped orbit controls.

use glam::{Mat4, Vec3, Vec4};

use crate::config::CameraConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

/// A projected point: screen-normalized x/y in -1..1 and view depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub ndc_x: f32,
    pub ndc_y: f32,
    pub depth: f32,
}

impl PerspectiveCamera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_deg: config.fov_deg,
            aspect: sanitize_aspect(aspect),
            near: config.near.max(1e-4),
            far: config.far.max(config.near + 1.0),
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let projection =
            Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
        projection * view
    }

    /// `None` when the point is behind the near plane.
    pub fn project_with(&self, view_projection: &Mat4, p: Vec3) -> Option<Projected> {
        let clip = *view_projection * Vec4::new(p.x, p.y, p.z, 1.0);
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !ndc.x.is_finite() || !ndc.y.is_finite() {
            return None;
        }
        Some(Projected {
            ndc_x: ndc.x,
            ndc_y: ndc.y,
            depth: clip.w,
        })
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

/// Orbit around `camera.target` driven by pointer drag and scroll.
///
/// With damping enabled each `update` applies `damping` of the pending
/// rotation and keeps the rest, so the view glides to a stop.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

const EPS: f32 = 1e-6;
/// Smallest eye displacement reported as movement.
const MOVE_EPS: f32 = 1e-4;

impl OrbitControls {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            enable_damping: config.damping > 0.0,
            damping: config.damping.clamp(0.0, 1.0),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance.max(config.min_distance),
            min_polar: 0.0,
            max_polar: config.max_polar.clamp(0.0, std::f32::consts::PI),
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag of `(dx, dy)` pixels over a
    /// viewport `height` pixels tall. A full-height drag is one turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        let turn = std::f32::consts::TAU * self.rotate_speed;
        self.delta_theta -= turn * dx / h;
        self.delta_phi -= turn * dy / h;
    }

    /// Queue a dolly from scroll. Positive `amount` moves closer.
    pub fn zoom(&mut self, amount: f32) {
        self.scale *= 0.95f32.powf(amount * self.zoom_speed / 50.0);
    }

    pub fn is_settled(&self) -> bool {
        self.delta_theta.abs() < EPS && self.delta_phi.abs() < EPS && (self.scale - 1.0).abs() < EPS
    }

    /// Move `camera` by the pending deltas. Returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius < EPS {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let k = if self.enable_damping { self.damping } else { 1.0 };
        theta += self.delta_theta * k;
        phi += self.delta_phi * k;
        phi = phi.clamp(self.min_polar.max(EPS), self.max_polar.max(EPS));
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let next = camera.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
        let moved = next.distance(camera.position) > MOVE_EPS;
        camera.position = next;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping;
            self.delta_phi *= 1.0 - self.damping;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
        moved
    }
}
