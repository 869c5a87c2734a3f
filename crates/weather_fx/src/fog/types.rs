use bevy::math::Vec2;

use crate::options::{Rgb, VariantDefaults};
use crate::population::PopulationCurve;

// =============================================================================
// Defaults and Population
// =============================================================================

pub const FOG_DEFAULTS: VariantDefaults = VariantDefaults {
    color: Rgb::new(210, 215, 225),
    wind_speed: 1.0,
    wind_direction: 0.0,
};

/// Blobs on a 1280x720 surface: 3 at intensity 0, 24 at intensity 1. Blobs
/// scale with the surface, so their count grows with the square root of the
/// area rather than linearly.
pub const FOG_POPULATION: PopulationCurve = PopulationCurve {
    base: 3.0,
    per_intensity: 21.0,
    min: 2,
    max: 48,
    area_exponent: 0.5,
};

// =============================================================================
// Blob Shape
// =============================================================================

/// Base radius as a fraction of the longer surface side.
pub const RADIUS_FRACTION: f32 = 0.35;
pub const MIN_RADIUS_VAR: f32 = 0.5;
pub const MAX_RADIUS_VAR: f32 = 1.2;

/// Horizontal stretch of the ellipse.
pub const MIN_STRETCH: f32 = 1.2;
pub const MAX_STRETCH: f32 = 2.2;

/// Rotation rate bound, rad/s.
pub const MAX_SPIN: f32 = 0.03;

// =============================================================================
// Motion
// =============================================================================

/// Drift px/s per unit of wind speed.
pub const BASE_SPEED: f32 = 18.0;

/// Secondary sinusoidal jitter, px/s.
pub const JITTER_AMPLITUDE: f32 = 4.0;
pub const JITTER_MIN_FREQ: f32 = 0.05;
pub const JITTER_MAX_FREQ: f32 = 0.2;

// =============================================================================
// Drawing
// =============================================================================

/// Haze alpha at intensity 0 and the extra at intensity 1.
pub const HAZE_ALPHA: f32 = 0.04;
pub const HAZE_INTENSITY_ALPHA: f32 = 0.12;

/// Per-blob centre alpha range before intensity scaling.
pub const MIN_BLOB_ALPHA: f32 = 0.10;
pub const MAX_BLOB_ALPHA: f32 = 0.22;

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogBlob {
    pub pos: Vec2,
    pub radius: f32,
    pub stretch: f32,
    pub rotation: f32,
    pub spin: f32,
    pub speed_var: f32,
    pub phase: f32,
    pub freq: f32,
    pub alpha: f32,
}

impl FogBlob {
    /// Wrap halo for this blob: it may drift fully off-screen before
    /// reappearing.
    pub fn margin(&self) -> f32 {
        self.radius * self.stretch
    }

    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.radius * self.stretch, self.radius)
    }
}

/// Fog particle field, ordered by radius descending.
#[derive(Debug, Default)]
pub struct FogField {
    pub(crate) blobs: Vec<FogBlob>,
    pub(crate) elapsed: f32,
}

impl FogField {
    pub fn blobs(&self) -> &[FogBlob] {
        &self.blobs
    }
}
