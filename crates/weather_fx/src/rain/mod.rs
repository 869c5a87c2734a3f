//! Rain: depth-scaled falling strokes recycled at the top edge, a capped
//! ground ripple queue, and an optional lightning flash at high intensity.

mod systems;
pub mod types;

pub use types::{Lightning, RainField, Raindrop, Ripple, MAX_RIPPLES, RAIN_MARGIN};

use crate::options::OptionsPatch;
use crate::renderer::EffectRenderer;
use crate::surface::SurfaceAdapter;

pub type RainRenderer = EffectRenderer<RainField>;

/// Rain renderer sized to `surface`, in the `Uninitialized` state.
pub fn create_rain_renderer(surface: &SurfaceAdapter, initial: &OptionsPatch) -> RainRenderer {
    RainRenderer::new(surface, initial)
}
