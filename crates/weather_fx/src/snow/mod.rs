//! Snow: depth-sized flakes pushed by wind and turbulence, wrapped around
//! the surface, drawn in one additive batch.

mod systems;
pub mod types;

pub use types::{Flake, SnowField, SNOW_MARGIN};

use crate::options::OptionsPatch;
use crate::renderer::EffectRenderer;
use crate::surface::SurfaceAdapter;

pub type SnowRenderer = EffectRenderer<SnowField>;

pub fn create_snow_renderer(surface: &SurfaceAdapter, initial: &OptionsPatch) -> SnowRenderer {
    SnowRenderer::new(surface, initial)
}
