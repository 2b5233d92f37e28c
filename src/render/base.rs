//! Beveled platform under the skyline.

use glam::Vec3;

use crate::config::BaseConfig;
use crate::render::color::Rgb;
use crate::render::scene::Footprint;

/// A slab whose sides slope outward toward the bottom.
///
/// The top face is `top_width x top_depth`; the bottom face is wider by
/// `bevel` on every side. `center` is the middle of the bottom face.
///
/// The underside sits `drop` below the ground plane, so the top face is
/// `drop - thickness` under the cube bases. That gap is intended: the grid
/// helper on the ground plane stays visible between skyline and slab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    pub center: Vec3,
    pub top_width: f32,
    pub top_depth: f32,
    pub bevel: f32,
    pub thickness: f32,
    pub color: Rgb,
}

impl Platform {
    pub fn bottom_width(&self) -> f32 {
        self.top_width + 2.0 * self.bevel
    }

    pub fn bottom_depth(&self) -> f32 {
        self.top_depth + 2.0 * self.bevel
    }

    pub fn top_y(&self) -> f32 {
        self.center.y + self.thickness
    }

    /// Corners of the top face then the bottom face, counter-clockwise from
    /// (-x, -z) when seen from above.
    pub fn corners(&self) -> [Vec3; 8] {
        let c = self.center;
        let (tw, td) = (self.top_width / 2.0, self.top_depth / 2.0);
        let (bw, bd) = (self.bottom_width() / 2.0, self.bottom_depth() / 2.0);
        let (yb, yt) = (c.y, self.top_y());
        [
            Vec3::new(c.x - tw, yt, c.z - td),
            Vec3::new(c.x - tw, yt, c.z + td),
            Vec3::new(c.x + tw, yt, c.z + td),
            Vec3::new(c.x + tw, yt, c.z - td),
            Vec3::new(c.x - bw, yb, c.z - bd),
            Vec3::new(c.x - bw, yb, c.z + bd),
            Vec3::new(c.x + bw, yb, c.z + bd),
            Vec3::new(c.x + bw, yb, c.z - bd),
        ]
    }
}

pub struct BaseBuilder<'a> {
    config: &'a BaseConfig,
}

impl<'a> BaseBuilder<'a> {
    pub fn new(config: &'a BaseConfig) -> Self {
        Self { config }
    }

    /// Size the platform to `footprint` plus margin, or to the fixed default
    /// when there is no footprint.
    pub fn build(&self, footprint: Option<Footprint>) -> Platform {
        let cfg = self.config;
        let (top_width, top_depth) = match footprint {
            Some(fp) if !fp.is_zero() => (fp.width + cfg.margin, fp.depth + cfg.margin),
            // The default size is the final top face; margin pads real footprints only.
            _ => (cfg.default_width, cfg.default_depth),
        };

        Platform {
            center: Vec3::new(0.0, -cfg.drop, 0.0),
            top_width,
            top_depth,
            bevel: cfg.bevel,
            thickness: cfg.thickness,
            color: cfg.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn zero_or_missing_footprint_uses_default() {
        let cfg = BaseConfig::default();
        let b = BaseBuilder::new(&cfg);
        for fp in [None, Some(Footprint::default())] {
            let p = b.build(fp);
            assert!(close(p.top_width, 30.0));
            assert!(close(p.top_depth, 10.0));
        }
    }

    #[test]
    fn footprint_is_padded_by_margin() {
        let cfg = BaseConfig::default();
        let p = BaseBuilder::new(&cfg).build(Some(Footprint {
            width: 58.3,
            depth: 7.7,
        }));
        assert!(close(p.top_width, 60.3));
        assert!(close(p.top_depth, 9.7));
        assert!(close(p.bottom_width(), 64.3));
        assert!(close(p.bottom_depth(), 13.7));
    }

    #[test]
    fn slab_hangs_below_ground() {
        let cfg = BaseConfig::default();
        let p = BaseBuilder::new(&cfg).build(None);
        assert!(close(p.center.y, -3.0));
        assert!(close(p.top_y(), -1.5));
        let corners = p.corners();
        assert!(corners[..4].iter().all(|c| close(c.y, -1.5)));
        assert!(corners[4..].iter().all(|c| close(c.y, -3.0)));
        assert!(close(corners[6].x - corners[2].x, 2.0));
    }

    #[test]
    fn top_face_gap_follows_drop_and_thickness() {
        let cfg = BaseConfig {
            drop: 4.0,
            thickness: 1.0,
            ..BaseConfig::default()
        };
        let p = BaseBuilder::new(&cfg).build(None);
        assert!(close(-p.top_y(), cfg.drop - cfg.thickness));

        let flush = BaseConfig {
            drop: 1.5,
            ..BaseConfig::default()
        };
        assert!(close(BaseBuilder::new(&flush).build(None).top_y(), 0.0));
    }
}
