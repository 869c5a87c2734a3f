use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::options::{OptionsPatch, Rgb, DEFAULT_INTENSITY};
use crate::renderer::EffectKind;

/// Declarative host input for the overlay.
///
/// Deserializes from camelCase JSON with the effect under `"type"`, e.g.
/// `{"active":true,"type":"snow","intensity":0.6,"seed":7}`. Missing fields
/// take their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayProps {
    pub active: bool,
    #[serde(rename = "type")]
    pub kind: EffectKind,
    pub intensity: f32,
    pub seed: Option<u32>,
    /// `None` keeps the variant's default.
    pub wind_speed: Option<f32>,
    /// Degrees; `None` keeps the variant's default.
    pub wind_direction: Option<f32>,
    /// `None` keeps the variant's default.
    pub color: Option<Rgb>,
    /// Stacking order of the overlay node. Presentation only.
    pub z_index: i32,
    /// Animate even when the system asks for reduced motion.
    pub force_animate: bool,
}

impl Default for OverlayProps {
    fn default() -> Self {
        Self {
            active: true,
            kind: EffectKind::None,
            intensity: DEFAULT_INTENSITY,
            seed: None,
            wind_speed: None,
            wind_direction: None,
            color: None,
            z_index: 10,
            force_animate: false,
        }
    }
}

impl OverlayProps {
    pub fn with_kind(mut self, kind: EffectKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// A renderer should exist for these props.
    pub fn wants_renderer(&self) -> bool {
        self.active && self.kind != EffectKind::None
    }

    /// Options for the renderer. Unset props leave the renderer's current
    /// value in place.
    pub fn options_patch(&self, reduced_motion: bool) -> OptionsPatch {
        OptionsPatch {
            intensity: Some(self.intensity),
            seed: self.seed,
            color: self.color,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            reduced_motion: Some(reduced_motion),
        }
    }
}

/// System-level reduced-motion preference.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionPreference {
    pub prefers_reduced_motion: bool,
}
