//! Drawing backend abstraction.
//!
//! Renderers only ever talk to `dyn Canvas`, in logical pixels. The software
//! rasterizer in [`crate::raster`] is the default backend; [`NullCanvas`]
//! stands in when no backing store could be allocated.

use bevy::math::Vec2;

use crate::options::Rgb;

/// How a draw call composites onto what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Ordinary alpha compositing.
    #[default]
    SourceOver,
    /// `s + d - s*d`: overlapping draws brighten, never darken.
    Screen,
    /// Saturating add: dense overlap converges on white.
    Lighter,
}

/// Colour, opacity and blend mode for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Rgb,
    pub alpha: f32,
    pub blend: BlendMode,
}

impl Paint {
    pub fn new(color: Rgb, alpha: f32, blend: BlendMode) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
            blend,
        }
    }

    /// Nothing would be drawn.
    pub fn is_invisible(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// A filled disc in a batched dot pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
}

/// Rotated elliptical blob with a radial alpha falloff: full `alpha` at the
/// centre, half at `MID_STOP` of the radius, zero at the rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBlob {
    pub center: Vec2,
    pub radii: Vec2,
    pub rotation: f32,
    pub color: Rgb,
    pub alpha: f32,
}

impl RadialBlob {
    pub const MID_STOP: f32 = 0.55;

    /// Gradient alpha at normalised radius `t` (0 centre, 1 rim).
    pub fn alpha_at(&self, t: f32) -> f32 {
        if !(0.0..1.0).contains(&t) {
            return 0.0;
        }
        let falloff = if t < Self::MID_STOP {
            1.0 - 0.5 * (t / Self::MID_STOP)
        } else {
            0.5 * (1.0 - (t - Self::MID_STOP) / (1.0 - Self::MID_STOP))
        };
        self.alpha * falloff
    }

    /// Half extents of the axis-aligned box enclosing the rotated ellipse.
    pub fn half_extents(&self) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        let (a, b) = (self.radii.x, self.radii.y);
        Vec2::new(
            ((a * cos).powi(2) + (b * sin).powi(2)).sqrt(),
            ((a * sin).powi(2) + (b * cos).powi(2)).sqrt(),
        )
    }
}

/// Immediate-mode 2-D drawing surface.
pub trait Canvas {
    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, min: Vec2, size: Vec2, paint: Paint);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint);

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, paint: Paint);

    /// All dots in one pass with a shared paint.
    fn fill_dots(&mut self, dots: &[Dot], paint: Paint);

    /// Soft blobs in one pass. Backends may rasterize them at reduced
    /// resolution since the gradients carry no hard edges.
    fn fill_radial_blobs(&mut self, blobs: &[RadialBlob], blend: BlendMode);
}

/// Canvas that accepts every call and draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCanvas;

impl Canvas for NullCanvas {
    fn clear(&mut self) {}

    fn fill_rect(&mut self, _min: Vec2, _size: Vec2, _paint: Paint) {}

    fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _width: f32, _paint: Paint) {}

    fn stroke_ellipse(&mut self, _center: Vec2, _radii: Vec2, _width: f32, _paint: Paint) {}

    fn fill_dots(&mut self, _dots: &[Dot], _paint: Paint) {}

    fn fill_radial_blobs(&mut self, _blobs: &[RadialBlob], _blend: BlendMode) {}
}
