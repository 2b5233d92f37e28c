/// Skyline scene description.
///
/// Maps a contribution series to one box per day:
///   - weeks run along +X, weekdays along +Z (`cell_spacing` apart)
///   - empty days become flat placeholder tiles in the level-0 color
///   - other days rise `baseline + count * scale`, capped at `max_height`
///   - the whole group is shifted to sit around the origin
///
/// The scene is rebuilt from scratch for every new series.
use glam::Vec3;

use crate::config::{LayoutConfig, SkylineConfig};
use crate::model::{ContributionDay, ContributionSeries, DAYS_PER_WEEK};
use crate::render::base::{BaseBuilder, Platform};
use crate::render::color::Rgb;

/// Width x depth covered by the skyline.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Footprint {
    pub width: f32,
    pub depth: f32,
}

impl Footprint {
    pub fn is_zero(&self) -> bool {
        self.width <= 0.0 || self.depth <= 0.0
    }
}

/// Day record attached to a cube for hover lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayMetadata {
    pub date: chrono::NaiveDate,
    pub count: u32,
    pub level: u8,
}

impl From<&ContributionDay> for DayMetadata {
    fn from(d: &ContributionDay) -> Self {
        Self {
            date: d.date,
            count: d.count,
            level: d.level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Rgb,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    /// Plain matte surface.
    pub fn matte(color: Rgb) -> Self {
        Self {
            color,
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

/// Axis-aligned box, positioned by its center in group-local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    pub center: Vec3,
    pub size: Vec3,
    pub material: Material,
    /// `None` for placeholders
    pub metadata: Option<DayMetadata>,
}

impl Cube {
    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// All day cubes plus the translation applied to them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkylineGroup {
    pub offset: Vec3,
    pub cubes: Vec<Cube>,
}

impl SkylineGroup {
    pub fn world_center(&self, cube: &Cube) -> Vec3 {
        cube.center + self.offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: f32,
    pub directional: f32,
    /// Unit vector pointing toward the light
    pub direction: Vec3,
}

/// Flat reference grid on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHelper {
    pub size: f32,
    pub divisions: u32,
    pub center_color: Rgb,
    pub color: Rgb,
}

/// Everything the viewport draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    pub lights: Lights,
    pub grid: GridHelper,
    pub skyline: SkylineGroup,
    pub platform: Option<Platform>,
}

impl Scene {
    /// Empty stage: background, lights and grid only.
    pub fn stage(config: &SkylineConfig) -> Self {
        let s = &config.scene;
        Self {
            background: s.background,
            lights: Lights {
                ambient: s.ambient_intensity,
                directional: s.directional_intensity,
                direction: Vec3::from_array(s.light_direction).normalize_or_zero(),
            },
            grid: GridHelper {
                size: s.grid_size,
                divisions: s.grid_divisions,
                center_color: s.grid_center_color,
                color: s.grid_color,
            },
            skyline: SkylineGroup::default(),
            platform: None,
        }
    }

    /// Full scene for `series`: stage, skyline and the platform beneath it.
    /// `None` or an empty series leaves the skyline empty and the platform at
    /// its default size.
    pub fn compose(config: &SkylineConfig, series: Option<&ContributionSeries>) -> Self {
        let days = series.map(|s| s.days.as_slice()).unwrap_or(&[]);
        let (skyline, footprint) = SceneBuilder::new(&config.layout).build(days);
        let platform = BaseBuilder::new(&config.base).build(Some(footprint));
        log::debug!(
            "Composed scene: {} cubes, footprint {:.1} x {:.1}",
            skyline.cubes.len(),
            footprint.width,
            footprint.depth
        );
        Self {
            skyline,
            platform: Some(platform),
            ..Self::stage(config)
        }
    }

    pub fn cube_count(&self) -> usize {
        self.skyline.cubes.len()
    }
}

pub struct SceneBuilder<'a> {
    layout: &'a LayoutConfig,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(layout: &'a LayoutConfig) -> Self {
        Self { layout }
    }

    /// Height of the box for a day with `count` contributions.
    pub fn cube_height(&self, count: u32) -> f32 {
        if count == 0 {
            self.layout.placeholder_height
        } else {
            (self.layout.height_baseline + count as f32 * self.layout.height_scale)
                .min(self.layout.max_height)
        }
    }

    fn level_color(&self, level: u8) -> Rgb {
        let palette = &self.layout.palette;
        palette[(level as usize).min(palette.len() - 1)]
    }

    /// Lay out one box per day. Returns the group and its footprint.
    pub fn build(&self, days: &[ContributionDay]) -> (SkylineGroup, Footprint) {
        if days.is_empty() {
            return (SkylineGroup::default(), Footprint::default());
        }

        let spacing = self.layout.cell_spacing;
        let side = self.layout.cube_size;
        let mut cubes = Vec::with_capacity(days.len());

        for (week_index, week) in days.chunks(DAYS_PER_WEEK).enumerate() {
            for (day_index, day) in week.iter().enumerate() {
                let height = self.cube_height(day.count);
                let center = Vec3::new(
                    week_index as f32 * spacing,
                    height / 2.0,
                    day_index as f32 * spacing,
                );

                let cube = if day.count == 0 {
                    Cube {
                        center,
                        size: Vec3::new(side, height, side),
                        material: Material::matte(self.level_color(0)),
                        metadata: None,
                    }
                } else {
                    Cube {
                        center,
                        size: Vec3::new(side, height, side),
                        material: Material {
                            color: self.level_color(day.level),
                            metalness: self.layout.metalness,
                            roughness: self.layout.roughness,
                        },
                        metadata: Some(DayMetadata::from(day)),
                    }
                };
                cubes.push(cube);
            }
        }

        let week_count = days.len().div_ceil(DAYS_PER_WEEK) as f32;
        let offset = Vec3::new(-week_count * spacing / 2.0, 0.0, self.layout.center_z);
        let footprint = Footprint {
            width: week_count * spacing,
            depth: DAYS_PER_WEEK as f32 * spacing,
        };

        (SkylineGroup { offset, cubes }, footprint)
    }
}
