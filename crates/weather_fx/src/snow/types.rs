use bevy::math::Vec2;

use crate::options::{Rgb, VariantDefaults};
use crate::population::PopulationCurve;

// =============================================================================
// Defaults and Population
// =============================================================================

pub const SNOW_DEFAULTS: VariantDefaults = VariantDefaults {
    color: Rgb::WHITE,
    wind_speed: 0.5,
    wind_direction: 20.0,
};

/// Flakes on a 1280x720 surface: 60 at intensity 0, 600 at intensity 1.
pub const SNOW_POPULATION: PopulationCurve = PopulationCurve {
    base: 60.0,
    per_intensity: 540.0,
    min: 1,
    max: 3000,
    area_exponent: 1.0,
};

// =============================================================================
// Flake Shape
// =============================================================================

/// Wrap halo around the surface, logical px.
pub const SNOW_MARGIN: f32 = 24.0;

/// Radius of the farthest flake and the extra radius gained at `z = 1`.
pub const MIN_RADIUS: f32 = 0.6;
pub const DEPTH_RADIUS: f32 = 2.4;

/// Flakes nearer than this are drawn as enlarged bokeh discs.
pub const BOKEH_DEPTH: f32 = 0.85;
pub const BOKEH_SCALE: f32 = 1.8;

// =============================================================================
// Motion
// =============================================================================

/// Fall speed of the farthest flake and the extra speed at `z = 1`, px/s.
pub const FALL_BASE: f32 = 22.0;
pub const FALL_DEPTH: f32 = 58.0;

/// Drift px/s per unit of `windSpeed * (1 + intensity)`.
pub const WIND_PUSH: f32 = 40.0;

/// Turbulence sway amplitude in px/s; frequencies in rad/s.
pub const TURBULENCE_AMPLITUDE: f32 = 14.0;
pub const TURBULENCE_MIN_FREQ: f32 = 0.3;
pub const TURBULENCE_MAX_FREQ: f32 = 1.2;

// =============================================================================
// Drawing
// =============================================================================

/// Alpha of the batched flake pass at intensity 0 and the extra at 1.
pub const FLAKE_ALPHA: f32 = 0.45;
pub const FLAKE_INTENSITY_ALPHA: f32 = 0.35;

/// Per-flake, per-frame chance of a glitter highlight.
pub const GLITTER_CHANCE: f32 = 0.003;
pub const GLITTER_ALPHA: f32 = 0.9;

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flake {
    pub pos: Vec2,
    /// Depth in `[0, 1]`; 1 is nearest.
    pub z: f32,
    pub radius: f32,
    pub speed_var: f32,
    pub phase: f32,
    pub freq: f32,
}

/// Snow particle field.
#[derive(Debug, Default)]
pub struct SnowField {
    pub(crate) flakes: Vec<Flake>,
    /// Indices glittering this frame.
    pub(crate) glitter: Vec<usize>,
    pub(crate) elapsed: f32,
}

impl SnowField {
    pub fn flakes(&self) -> &[Flake] {
        &self.flakes
    }

    pub fn glitter(&self) -> &[usize] {
        &self.glitter
    }
}
