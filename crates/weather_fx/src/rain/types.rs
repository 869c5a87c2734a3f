use std::collections::VecDeque;

use bevy::math::Vec2;

use crate::options::{Rgb, VariantDefaults};
use crate::population::PopulationCurve;

// =============================================================================
// Defaults and Population
// =============================================================================

pub const RAIN_DEFAULTS: VariantDefaults = VariantDefaults {
    color: Rgb::new(174, 194, 224),
    wind_speed: 0.3,
    wind_direction: 0.0,
};

/// Drops on a 1280x720 surface: 80 at intensity 0, 600 at intensity 1.
pub const RAIN_POPULATION: PopulationCurve = PopulationCurve {
    base: 80.0,
    per_intensity: 520.0,
    min: 1,
    max: 2400,
    area_exponent: 1.0,
};

// =============================================================================
// Drop Physics
// =============================================================================

/// Drops leaving the surface by more than this (logical px) are recycled.
pub const RAIN_MARGIN: f32 = 100.0;

/// Farthest drop depth; 1.0 is nearest.
pub const MIN_DEPTH: f32 = 0.35;

/// Fall speed of a nearest drop, px/s.
pub const FALL_SPEED: f32 = 900.0;

/// Lateral px/s per unit of wind speed along the wind vector's x component.
pub const WIND_DRIFT: f32 = 220.0;

/// Shared sway: amplitude in px/s and angular frequency in rad/s.
pub const SWAY_AMPLITUDE: f32 = 60.0;
pub const SWAY_FREQUENCY: f32 = 0.7;

/// Per-drop wobble layered on the shared sway, px/s.
pub const WOBBLE_AMPLITUDE: f32 = 6.0;

/// Stroke length of a nearest drop, px.
pub const STROKE_LENGTH: f32 = 22.0;

/// Stroke width of a nearest drop, px.
pub const STROKE_WIDTH: f32 = 1.4;

// =============================================================================
// Ripples
// =============================================================================

/// Hard cap on live ripples; the oldest is evicted beyond it.
pub const MAX_RIPPLES: usize = 200;

/// Ripples spawned per second at intensity 1.
pub const RIPPLE_RATE: f32 = 40.0;

/// Seconds a ripple lives.
pub const RIPPLE_LIFETIME: f32 = 0.9;

/// Ripples spawn in the bottom part of the surface, below this fraction of
/// its height.
pub const RIPPLE_GROUND_LINE: f32 = 0.6;

/// Horizontal radius range at full expansion, px. Ripples are flattened to
/// `RIPPLE_ASPECT` vertically.
pub const RIPPLE_MIN_RADIUS: f32 = 6.0;
pub const RIPPLE_MAX_RADIUS: f32 = 18.0;
pub const RIPPLE_ASPECT: f32 = 0.35;

pub const RIPPLE_ALPHA: f32 = 0.45;

// =============================================================================
// Lightning and Ambient Tint
// =============================================================================

/// Lightning is only scheduled above this intensity.
pub const LIGHTNING_THRESHOLD: f32 = 0.7;

/// Seconds between strikes, drawn uniformly from this range.
pub const LIGHTNING_MIN_DELAY: f32 = 3.0;
pub const LIGHTNING_MAX_DELAY: f32 = 12.0;

/// Flash opacity lost per second.
pub const FLASH_DECAY: f32 = 2.5;

/// Random flicker added per frame, scaled by the current flash.
pub const FLASH_FLICKER: f32 = 0.12;

/// Flashes below this opacity snap to zero.
pub const FLASH_EPSILON: f32 = 0.01;

/// Peak alpha of the full-surface flash tint.
pub const FLASH_TINT_ALPHA: f32 = 0.55;

pub const AMBIENT_TINT: Rgb = Rgb::new(18, 26, 38);

/// Ambient tint alpha at intensity 0 and the extra at intensity 1.
pub const AMBIENT_BASE_ALPHA: f32 = 0.06;
pub const AMBIENT_INTENSITY_ALPHA: f32 = 0.14;

// =============================================================================
// Records
// =============================================================================

/// One falling drop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    pub pos: Vec2,
    /// Depth in `[MIN_DEPTH, 1]`; near drops are faster, longer and brighter.
    pub z: f32,
    pub speed_var: f32,
    pub length_var: f32,
    pub phase: f32,
}

/// Splash ring expanding on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub age: f32,
    pub max_radius: f32,
}

impl Ripple {
    /// Lifetime fraction in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.age / RIPPLE_LIFETIME).clamp(0.0, 1.0)
    }

    /// Current horizontal radius on an ease-out curve.
    pub fn radius(&self) -> f32 {
        let t = self.progress();
        self.max_radius * (1.0 - (1.0 - t).powi(3))
    }
}

/// Lightning timer and flash.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lightning {
    /// Seconds since the last strike or since scheduling began.
    pub timer: f32,
    /// Scheduled strike time; `None` while lightning is disabled.
    pub next_strike: Option<f32>,
    /// Flash opacity in `[0, 1]`.
    pub flash: f32,
    pub strikes: u32,
}

/// Rain particle field plus its ripple queue and lightning state.
#[derive(Debug, Default)]
pub struct RainField {
    pub(crate) drops: Vec<Raindrop>,
    pub(crate) ripples: VecDeque<Ripple>,
    pub(crate) lightning: Lightning,
    pub(crate) elapsed: f32,
    pub(crate) ambient_alpha: f32,
}

impl RainField {
    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn ripples(&self) -> impl Iterator<Item = &Ripple> {
        self.ripples.iter()
    }

    pub fn ripple_count(&self) -> usize {
        self.ripples.len()
    }

    pub fn lightning(&self) -> &Lightning {
        &self.lightning
    }
}
