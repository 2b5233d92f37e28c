//! Painter's-algorithm projection of a [`Scene`] onto an egui painter.
//!
//! Faces are projected in parallel, back faces dropped, and the rest sorted
//! far to near. The ground grid is drawn between the platform and the cubes
//! since the camera never drops below the ground plane.

use egui::{Pos2, Rect};
use glam::Vec3;
use rayon::prelude::*;

use crate::render::camera::PerspectiveCamera;
use crate::render::color::Rgb;
use crate::render::geometry::{grid_lines, scene_faces, Face};
use crate::render::scene::{Lights, Material, Scene};

/// Exponent of the specular highlight at zero roughness.
const SPECULAR_POWER: f32 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenFace {
    pub points: [Pos2; 4],
    /// Mean view depth of the corners
    pub depth: f32,
    pub color: Rgb,
    pub owner: Option<usize>,
}

impl ScreenFace {
    /// Point-in-convex-quad test, either winding.
    pub fn contains(&self, p: Pos2) -> bool {
        let mut sign = 0.0f32;
        for i in 0..4 {
            let a = self.points[i];
            let b = self.points[(i + 1) % 4];
            let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
            if cross.abs() < f32::EPSILON {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        sign != 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLine {
    pub points: [Pos2; 2],
    pub color: Rgb,
}

/// One rendered frame, already in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub rect: Option<Rect>,
    pub background: Option<Rgb>,
    pub platform: Vec<ScreenFace>,
    pub grid: Vec<ScreenLine>,
    pub cubes: Vec<ScreenFace>,
}

impl Frame {
    /// Cube under `p`, front-most first.
    pub fn pick(&self, p: Pos2) -> Option<usize> {
        self.cubes
            .iter()
            .rev()
            .find(|f| f.contains(p))
            .and_then(|f| f.owner)
    }

    pub fn face_count(&self) -> usize {
        self.platform.len() + self.cubes.len()
    }
}

/// Flat shading: ambient plus Lambert, with a small highlight that fades
/// with roughness. Metalness dims the diffuse term.
pub fn shade(material: &Material, normal: Vec3, to_eye: Vec3, lights: &Lights) -> Rgb {
    let lambert = normal.dot(lights.direction).max(0.0);
    let diffuse =
        lights.ambient + lights.directional * lambert * (1.0 - 0.5 * material.metalness);
    let half = (lights.direction + to_eye).normalize_or_zero();
    let gloss = (1.0 - material.roughness).clamp(0.0, 1.0);
    let specular = lights.directional * gloss * normal.dot(half).max(0.0).powf(SPECULAR_POWER);
    material.color.shade(diffuse).lighten(specular * 0.5)
}

fn to_screen(rect: Rect, ndc_x: f32, ndc_y: f32) -> Pos2 {
    egui::pos2(
        rect.left() + (ndc_x * 0.5 + 0.5) * rect.width(),
        rect.top() + (0.5 - ndc_y * 0.5) * rect.height(),
    )
}

fn project_face(
    face: &Face,
    camera: &PerspectiveCamera,
    view_projection: &glam::Mat4,
    rect: Rect,
    lights: &Lights,
) -> Option<ScreenFace> {
    let to_eye = camera.position - face.centroid();
    if face.normal.dot(to_eye) <= 0.0 {
        return None;
    }

    let mut points = [Pos2::ZERO; 4];
    let mut depth = 0.0;
    for (slot, p) in points.iter_mut().zip(face.points) {
        let projected = camera.project_with(view_projection, p)?;
        *slot = to_screen(rect, projected.ndc_x, projected.ndc_y);
        depth += projected.depth;
    }

    Some(ScreenFace {
        points,
        depth: depth / 4.0,
        color: shade(&face.material, face.normal, to_eye.normalize_or_zero(), lights),
        owner: face.owner,
    })
}

/// Project every visible face and grid line of `scene` into `rect`.
pub fn project_scene(scene: &Scene, camera: &PerspectiveCamera, rect: Rect) -> Frame {
    let view_projection = camera.view_projection();
    let faces = scene_faces(scene);

    let mut projected: Vec<ScreenFace> = faces
        .par_iter()
        .filter_map(|f| project_face(f, camera, &view_projection, rect, &scene.lights))
        .collect();
    projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let (cubes, platform): (Vec<_>, Vec<_>) =
        projected.into_iter().partition(|f| f.owner.is_some());

    let grid = grid_lines(&scene.grid)
        .into_iter()
        .filter_map(|line| {
            let a = camera.project_with(&view_projection, line.from)?;
            let b = camera.project_with(&view_projection, line.to)?;
            Some(ScreenLine {
                points: [to_screen(rect, a.ndc_x, a.ndc_y), to_screen(rect, b.ndc_x, b.ndc_y)],
                color: line.color,
            })
        })
        .collect();

    Frame {
        rect: Some(rect),
        background: Some(scene.background),
        platform,
        grid,
        cubes,
    }
}

fn push_quad(mesh: &mut egui::Mesh, face: &ScreenFace) {
    let color = face.color.to_color32();
    let base = mesh.vertices.len() as u32;
    for p in face.points {
        mesh.colored_vertex(p, color);
    }
    mesh.add_triangle(base, base + 1, base + 2);
    mesh.add_triangle(base, base + 2, base + 3);
}

/// Draw `frame` with `painter`.
pub fn paint(frame: &Frame, painter: &egui::Painter) {
    if let (Some(rect), Some(bg)) = (frame.rect, frame.background) {
        painter.rect_filled(rect, 0.0, bg.to_color32());
    }

    let mut platform = egui::Mesh::default();
    for face in &frame.platform {
        push_quad(&mut platform, face);
    }
    painter.add(egui::Shape::mesh(platform));

    for line in &frame.grid {
        painter.line_segment(line.points, egui::Stroke::new(1.0, line.color.to_color32()));
    }

    let mut cubes = egui::Mesh::default();
    for face in &frame.cubes {
        push_quad(&mut cubes, face);
    }
    painter.add(egui::Shape::mesh(cubes));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, SkylineConfig};
    use crate::model::{ContributionDay, ContributionSeries};
    use chrono::NaiveDate;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(800.0, 600.0))
    }

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::from_config(&CameraConfig::default(), 800.0 / 600.0)
    }

    fn series(n: usize) -> ContributionSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let days = (0..n)
            .map(|i| ContributionDay {
                date: start + chrono::Duration::days(i as i64),
                count: (i % 12) as u32,
                level: (i % 5) as u8,
            })
            .collect();
        ContributionSeries::new(days, 0)
    }

    #[test]
    fn at_most_three_faces_per_box_are_visible() {
        let cfg = SkylineConfig::default();
        let scene = Scene::compose(&cfg, Some(&series(21)));
        let frame = project_scene(&scene, &camera(), rect());
        assert!(!frame.cubes.is_empty());
        assert!(frame.cubes.len() <= 21 * 3);
        assert!(frame.platform.len() <= 5);
        assert_eq!(frame.background, Some(cfg.scene.background));
    }

    #[test]
    fn faces_are_sorted_far_to_near() {
        let scene = Scene::compose(&SkylineConfig::default(), Some(&series(70)));
        let frame = project_scene(&scene, &camera(), rect());
        assert!(frame.cubes.windows(2).all(|w| w[0].depth >= w[1].depth));
    }

    #[test]
    fn empty_scene_still_draws_stage() {
        let scene = Scene::compose(&SkylineConfig::default(), None);
        let frame = project_scene(&scene, &camera(), rect());
        assert!(frame.cubes.is_empty());
        assert!(!frame.platform.is_empty());
        assert_eq!(frame.grid.len(), 102);
    }

    #[test]
    fn pick_hits_cube_under_its_projected_center() {
        let scene = Scene::compose(&SkylineConfig::default(), Some(&series(7)));
        let frame = project_scene(&scene, &camera(), rect());
        let face = frame.cubes.last().unwrap();
        let center = face
            .points
            .iter()
            .fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2())
            / 4.0;
        assert_eq!(frame.pick(center.to_pos2()), face.owner);
        assert_eq!(frame.pick(egui::pos2(-50.0, -50.0)), None);
    }

    #[test]
    fn quad_containment() {
        let f = ScreenFace {
            points: [
                egui::pos2(0.0, 0.0),
                egui::pos2(10.0, 0.0),
                egui::pos2(10.0, 10.0),
                egui::pos2(0.0, 10.0),
            ],
            depth: 1.0,
            color: Rgb::from_hex(0),
            owner: Some(0),
        };
        assert!(f.contains(egui::pos2(5.0, 5.0)));
        assert!(!f.contains(egui::pos2(15.0, 5.0)));
    }

    #[test]
    fn lit_faces_are_brighter() {
        let lights = Lights {
            ambient: 0.6,
            directional: 0.8,
            direction: Vec3::ONE.normalize(),
        };
        let m = Material::matte(Rgb::from_hex(0x404040));
        let facing = shade(&m, Vec3::Y, Vec3::Y, &lights);
        let away = shade(&m, -Vec3::Y, Vec3::Y, &lights);
        assert!(facing.0[0] > away.0[0]);
        assert_eq!(away, Rgb::from_hex(0x404040).shade(0.6));
    }
}
