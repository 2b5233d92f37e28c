pub mod base;
pub mod camera;
pub mod color;
pub mod geometry;
pub mod raster;
pub mod scene;

pub use base::{BaseBuilder, Platform};
pub use camera::{OrbitControls, PerspectiveCamera};
pub use color::Rgb;
pub use scene::{Footprint, Scene, SceneBuilder};
