//! Overlay orchestrator: turns declarative host props into at most one live
//! renderer drawing into the overlay surface.

mod orchestrator;
mod props;
mod tests;

pub use orchestrator::{OverlayChange, OverlayStats, WeatherOverlay};
pub use props::{MotionPreference, OverlayProps};
