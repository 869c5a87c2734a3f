//! Render options: the immutable snapshot a renderer reads every frame, and
//! the partial patch the host sends through `set_options`.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::fx_rng::fallback_seed;

/// Intensity used when neither the host nor a patch supplies one.
pub const DEFAULT_INTENSITY: f32 = 0.5;

/// 8-bit RGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels mapped to `[0, 1]`.
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

/// Per-variant starting values for the cosmetic options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantDefaults {
    pub color: Rgb,
    pub wind_speed: f32,
    /// Degrees; 0 blows toward +x, 90 toward +y (screen down).
    pub wind_direction: f32,
}

/// Partial options. `None` leaves the current value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    pub intensity: Option<f32>,
    pub seed: Option<u32>,
    pub color: Option<Rgb>,
    pub wind_speed: Option<f32>,
    pub wind_direction: Option<f32>,
    pub reduced_motion: Option<bool>,
}

impl OptionsPatch {
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_wind(mut self, speed: f32, direction_degrees: f32) -> Self {
        self.wind_speed = Some(speed);
        self.wind_direction = Some(direction_degrees);
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = Some(reduced);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Which fields a merge actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptionsDelta {
    pub intensity: bool,
    pub seed: bool,
    pub color: bool,
    pub wind: bool,
    pub reduced_motion: bool,
}

impl OptionsDelta {
    pub fn any(&self) -> bool {
        self.intensity || self.seed || self.color || self.wind || self.reduced_motion
    }

    /// Only intensity drives population size.
    pub fn changes_population(&self) -> bool {
        self.intensity
    }
}

/// Immutable, fully sanitised option snapshot.
///
/// Renderers keep it behind an `Arc` and swap the whole value on
/// `set_options`, so a frame never observes a half-applied update.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    intensity: f32,
    seed: u32,
    color: Rgb,
    wind_speed: f32,
    wind_direction: f32,
    reduced_motion: bool,
    wind_vector: Vec2,
}

impl RenderOptions {
    /// Build the initial snapshot for a variant. An unset seed falls back to a
    /// time-derived one.
    pub fn new(defaults: &VariantDefaults, patch: &OptionsPatch) -> Self {
        let wind_direction = normalize_degrees(defaults.wind_direction).unwrap_or(0.0);
        let base = Self {
            intensity: DEFAULT_INTENSITY,
            seed: patch.seed.unwrap_or_else(fallback_seed),
            color: defaults.color,
            wind_speed: sanitize_wind_speed(defaults.wind_speed).unwrap_or(0.0),
            wind_direction,
            reduced_motion: false,
            wind_vector: direction_vector(wind_direction),
        };
        base.merged(patch).0
    }

    /// Merge a patch into a new snapshot. Invalid fields are ignored or
    /// clamped, never rejected.
    pub fn merged(&self, patch: &OptionsPatch) -> (Self, OptionsDelta) {
        let mut next = self.clone();
        let mut delta = OptionsDelta::default();

        if let Some(raw) = patch.intensity {
            let intensity = sanitize_intensity(raw);
            if intensity != next.intensity {
                next.intensity = intensity;
                delta.intensity = true;
            }
        }
        if let Some(seed) = patch.seed {
            if seed != next.seed {
                next.seed = seed;
                delta.seed = true;
            }
        }
        if let Some(color) = patch.color {
            if color != next.color {
                next.color = color;
                delta.color = true;
            }
        }
        if let Some(speed) = patch.wind_speed.and_then(sanitize_wind_speed) {
            if speed != next.wind_speed {
                next.wind_speed = speed;
                delta.wind = true;
            }
        }
        if let Some(direction) = patch.wind_direction.and_then(normalize_degrees) {
            if direction != next.wind_direction {
                next.wind_direction = direction;
                next.wind_vector = direction_vector(direction);
                delta.wind = true;
            }
        }
        if let Some(reduced) = patch.reduced_motion {
            if reduced != next.reduced_motion {
                next.reduced_motion = reduced;
                delta.reduced_motion = true;
            }
        }

        (next, delta)
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn wind_speed(&self) -> f32 {
        self.wind_speed
    }

    /// Degrees in `[0, 360)`.
    pub fn wind_direction(&self) -> f32 {
        self.wind_direction
    }

    /// Unit vector `(cos θ, sin θ)` computed once per snapshot.
    pub fn wind_vector(&self) -> Vec2 {
        self.wind_vector
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Non-finite → 0, otherwise clamped to `[0, 1]`.
pub fn sanitize_intensity(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn sanitize_wind_speed(value: f32) -> Option<f32> {
    value.is_finite().then(|| value.max(0.0))
}

fn normalize_degrees(value: f32) -> Option<f32> {
    if !value.is_finite() {
        return None;
    }
    let wrapped = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    Some(if wrapped >= 360.0 { 0.0 } else { wrapped })
}

fn direction_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
