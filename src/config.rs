//! Tunable constants for the client, layout, platform, camera and scene.
//!
//! Every field has a default so a config file only needs the values it
//! overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{SkylineError, SkylineResult};
use crate::render::color::Rgb;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkylineConfig {
    pub api: ApiConfig,
    pub layout: LayoutConfig,
    pub base: BaseConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
}

impl SkylineConfig {
    /// Read a JSON config file. Fields absent from the file keep their defaults.
    /// A file that does not parse is logged and reported as an error.
    pub fn load(path: &Path) -> SkylineResult<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| {
            log::warn!("Config {} does not parse: {}", path.display(), e);
            SkylineError::storage(format!("config {}: {}", path.display(), e))
        })
    }

    /// Like [`load`](Self::load) but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> SkylineResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

/// GraphQL endpoint and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: Url,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("https://api.github.com/graphql").expect("static endpoint URL"),
            user_agent: concat!("contrib-skyline/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 15,
        }
    }
}

/// Day-cell placement and cube sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between neighbouring cell centers on both axes
    pub cell_spacing: f32,
    /// Cube width/depth (leaves a gap of `cell_spacing - cube_size`)
    pub cube_size: f32,
    /// Height added per contribution
    pub height_scale: f32,
    /// Height of a cube with a single contribution, minus `height_scale`
    pub height_baseline: f32,
    pub max_height: f32,
    /// Height of the flat tile drawn for empty days
    pub placeholder_height: f32,
    /// Colors for levels 0..=4
    pub palette: [Rgb; 5],
    /// Z translation applied to the whole skyline group
    pub center_z: f32,
    pub metalness: f32,
    pub roughness: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_spacing: 1.1,
            cube_size: 0.9,
            height_scale: 0.2,
            height_baseline: 1.0,
            max_height: 10.0,
            placeholder_height: 0.1,
            palette: [
                Rgb::from_hex(0xebedf0),
                Rgb::from_hex(0x9be9a8),
                Rgb::from_hex(0x40c463),
                Rgb::from_hex(0x30a14e),
                Rgb::from_hex(0x216e39),
            ],
            center_z: -3.5,
            metalness: 0.3,
            roughness: 0.7,
        }
    }
}

/// Platform slab under the skyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseConfig {
    /// Added to each footprint dimension
    pub margin: f32,
    /// Horizontal run of each sloped edge
    pub bevel: f32,
    pub thickness: f32,
    /// Distance from the ground plane down to the slab's underside
    pub drop: f32,
    /// Used as-is when the skyline has no footprint
    pub default_width: f32,
    pub default_depth: f32,
    pub color: Rgb,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            margin: 2.0,
            bevel: 2.0,
            thickness: 1.5,
            drop: 3.0,
            default_width: 30.0,
            default_depth: 10.0,
            color: Rgb::from_hex(0x3a3f47),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Fraction of the pending orbit delta applied per frame
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Upper bound of the polar angle in radians (keeps the eye above ground)
    pub max_polar: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [20.0, 30.0, 40.0],
            target: [0.0, 0.0, 0.0],
            damping: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 2.0,
            max_distance: 400.0,
            max_polar: std::f32::consts::FRAC_PI_2 - 0.05,
        }
    }
}

/// Background, lights and the ground grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: Rgb,
    pub grid_size: f32,
    pub grid_divisions: u32,
    pub grid_center_color: Rgb,
    pub grid_color: Rgb,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub light_direction: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: Rgb::from_hex(0xf0f0f0),
            grid_size: 50.0,
            grid_divisions: 50,
            grid_center_color: Rgb::from_hex(0x444444),
            grid_color: Rgb::from_hex(0x888888),
            ambient_intensity: 0.6,
            directional_intensity: 0.8,
            light_direction: [1.0, 1.0, 1.0],
        }
    }
}
