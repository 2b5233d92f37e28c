pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod render;
pub mod viewport;

pub use config::SkylineConfig;
pub use error::{SkylineError, SkylineResult};
pub use model::{ContributionDay, ContributionSeries, DateRange};
