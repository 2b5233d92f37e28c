//! World-space faces and grid lines generated from a [`Scene`].

use glam::Vec3;

use crate::render::base::Platform;
use crate::render::color::Rgb;
use crate::render::scene::{Cube, GridHelper, Material, Scene};

/// Planar quad with an outward unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub points: [Vec3; 4],
    pub normal: Vec3,
    pub material: Material,
    /// Index into `scene.skyline.cubes`; `None` for the platform
    pub owner: Option<usize>,
}

impl Face {
    pub fn centroid(&self) -> Vec3 {
        (self.points[0] + self.points[1] + self.points[2] + self.points[3]) * 0.25
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Rgb,
}

/// Orient `points` so the normal faces away from `interior`.
fn oriented_quad(
    mut points: [Vec3; 4],
    interior: Vec3,
    material: Material,
    owner: Option<usize>,
) -> Face {
    let mut normal = (points[1] - points[0])
        .cross(points[3] - points[0])
        .normalize_or_zero();
    let centroid = (points[0] + points[1] + points[2] + points[3]) * 0.25;
    if normal.dot(centroid - interior) < 0.0 {
        points.reverse();
        normal = -normal;
    }
    Face {
        points,
        normal,
        material,
        owner,
    }
}

/// Six faces of an axis-aligned box centered at `center`.
pub fn box_faces(center: Vec3, size: Vec3, material: Material, owner: Option<usize>) -> [Face; 6] {
    let h = size * 0.5;
    let p = |sx: f32, sy: f32, sz: f32| center + Vec3::new(sx * h.x, sy * h.y, sz * h.z);
    let quads = [
        [p(-1., 1., -1.), p(-1., 1., 1.), p(1., 1., 1.), p(1., 1., -1.)],
        [p(-1., -1., -1.), p(1., -1., -1.), p(1., -1., 1.), p(-1., -1., 1.)],
        [p(1., -1., -1.), p(1., 1., -1.), p(1., 1., 1.), p(1., -1., 1.)],
        [p(-1., -1., -1.), p(-1., -1., 1.), p(-1., 1., 1.), p(-1., 1., -1.)],
        [p(-1., -1., 1.), p(1., -1., 1.), p(1., 1., 1.), p(-1., 1., 1.)],
        [p(-1., -1., -1.), p(-1., 1., -1.), p(1., 1., -1.), p(1., -1., -1.)],
    ];
    quads.map(|q| oriented_quad(q, center, material, owner))
}

pub fn cube_faces(cube: &Cube, offset: Vec3, owner: usize) -> [Face; 6] {
    box_faces(cube.center + offset, cube.size, cube.material, Some(owner))
}

/// Top, bottom and four sloped sides.
pub fn platform_faces(platform: &Platform) -> [Face; 6] {
    let [t0, t1, t2, t3, b0, b1, b2, b3] = platform.corners();
    let interior = platform.center + Vec3::Y * (platform.thickness / 2.0);
    let material = Material::matte(platform.color);
    [
        [t0, t1, t2, t3],
        [b0, b3, b2, b1],
        [t0, b0, b1, t1],
        [t1, b1, b2, t2],
        [t2, b2, b3, t3],
        [t3, b3, b0, t0],
    ]
    .map(|q| oriented_quad(q, interior, material, None))
}

/// Square grid on y = 0, centered at the origin. The two lines through the
/// origin use `center_color`.
pub fn grid_lines(grid: &GridHelper) -> Vec<GridLine> {
    let divisions = grid.divisions.max(1);
    let half = grid.size / 2.0;
    let step = grid.size / divisions as f32;
    let center = divisions / 2;
    let mut lines = Vec::with_capacity(2 * (divisions as usize + 1));

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if divisions % 2 == 0 && i == center {
            grid.center_color
        } else {
            grid.color
        };
        lines.push(GridLine {
            from: Vec3::new(-half, 0.0, k),
            to: Vec3::new(half, 0.0, k),
            color,
        });
        lines.push(GridLine {
            from: Vec3::new(k, 0.0, -half),
            to: Vec3::new(k, 0.0, half),
            color,
        });
    }
    lines
}

/// Every solid face in the scene: platform first, then cubes in order.
pub fn scene_faces(scene: &Scene) -> Vec<Face> {
    let mut faces = Vec::with_capacity(6 * (scene.skyline.cubes.len() + 1));
    if let Some(ref platform) = scene.platform {
        faces.extend(platform_faces(platform));
    }
    for (i, cube) in scene.skyline.cubes.iter().enumerate() {
        faces.extend(cube_faces(cube, scene.skyline.offset, i));
    }
    faces
}
