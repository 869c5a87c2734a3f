//! Fog: a handful of large, soft, slowly rotating blobs drifting with the
//! wind over a constant haze.

mod systems;
pub mod types;

pub use types::{FogBlob, FogField};

use crate::options::OptionsPatch;
use crate::renderer::EffectRenderer;
use crate::surface::SurfaceAdapter;

pub type FogRenderer = EffectRenderer<FogField>;

pub fn create_fog_renderer(surface: &SurfaceAdapter, initial: &OptionsPatch) -> FogRenderer {
    FogRenderer::new(surface, initial)
}
