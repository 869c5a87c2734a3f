//! Surface adapter: owns the backing pixel store and maps logical pixels to
//! device pixels.

use bevy::log::{debug, warn};
use bevy::math::Vec2;

use crate::canvas::{Canvas, NullCanvas};
use crate::config::{
    MAX_BACKING_PIXELS, MAX_DEVICE_PIXEL_RATIO, MIN_SURFACE_DIM, RENDER_PIXEL_BUDGET,
};
use crate::raster::PixelSurface;

/// Logical geometry plus the device-pixel backing store drawn into.
#[derive(Debug)]
pub struct SurfaceAdapter {
    logical: Vec2,
    device_pixel_ratio: f32,
    backing: Option<PixelSurface>,
    null: NullCanvas,
}

impl SurfaceAdapter {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        let logical = clamp_logical_size(width, height);
        let dpr = clamp_device_pixel_ratio(device_pixel_ratio);
        Self {
            logical,
            device_pixel_ratio: dpr,
            backing: allocate_backing(logical, dpr),
            null: NullCanvas,
        }
    }

    /// Apply a new container geometry. Returns `true` when the geometry
    /// changed, in which case the backing store was reallocated (and cleared).
    pub fn set_geometry(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        let logical = clamp_logical_size(width, height);
        let dpr = clamp_device_pixel_ratio(device_pixel_ratio);
        if logical == self.logical && dpr == self.device_pixel_ratio {
            return false;
        }
        self.logical = logical;
        self.device_pixel_ratio = dpr;
        self.backing = allocate_backing(logical, dpr);
        true
    }

    /// Clamped logical size.
    pub fn logical_size(&self) -> Vec2 {
        self.logical
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Backing store dimensions in device pixels (0x0 without a backing store).
    pub fn device_size(&self) -> (u32, u32) {
        self.backing
            .as_ref()
            .map(|s| (s.width(), s.height()))
            .unwrap_or((0, 0))
    }

    /// Whether draws reach real pixels.
    pub fn has_context(&self) -> bool {
        self.backing.is_some()
    }

    /// The canvas renderers draw into; a no-op canvas without a backing store.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        match self.backing.as_mut() {
            Some(surface) => surface as &mut dyn Canvas,
            None => &mut self.null as &mut dyn Canvas,
        }
    }

    /// Read-only pixel access for readback and texture upload.
    pub fn pixels(&self) -> Option<&PixelSurface> {
        self.backing.as_ref()
    }

    pub fn clear(&mut self) {
        self.canvas().clear();
    }
}

/// Non-finite or sub-pixel dimensions collapse to the 1x1 minimum.
pub fn clamp_logical_size(width: f32, height: f32) -> Vec2 {
    let clamp = |v: f32| {
        if v.is_finite() {
            v.max(MIN_SURFACE_DIM)
        } else {
            MIN_SURFACE_DIM
        }
    };
    Vec2::new(clamp(width), clamp(height))
}

fn clamp_device_pixel_ratio(dpr: f32) -> f32 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Pixel ratio actually rasterized at: `dpr`, lowered when the backing store
/// would exceed [`RENDER_PIXEL_BUDGET`].
pub fn render_scale(logical: Vec2, dpr: f32) -> f32 {
    let device_area = logical.x * logical.y * dpr * dpr;
    if device_area <= RENDER_PIXEL_BUDGET {
        return dpr;
    }
    let budget_ratio = (RENDER_PIXEL_BUDGET / (logical.x * logical.y)).sqrt();
    dpr.min(budget_ratio.max(1.0))
}

fn device_size(logical: Vec2, dpr: f32) -> (u32, u32) {
    let to_device = |v: f32| (v * dpr).ceil().clamp(1.0, u32::MAX as f32) as u32;
    (to_device(logical.x), to_device(logical.y))
}

fn allocate_backing(logical: Vec2, dpr: f32) -> Option<PixelSurface> {
    let scale = render_scale(logical, dpr);
    let (w, h) = device_size(logical, scale);
    if u64::from(w) * u64::from(h) > MAX_BACKING_PIXELS {
        warn!("weather surface: {w}x{h} device pixels exceeds the backing limit, drawing disabled");
        return None;
    }
    debug!(
        "weather surface: {}x{} logical @{dpr} (rendered @{scale}) -> {w}x{h} device",
        logical.x, logical.y
    );
    Some(PixelSurface::new(w, h, scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BlendMode, Paint};
    use crate::options::Rgb;

    #[test]
    fn test_device_size_follows_pixel_ratio() {
        let surface = SurfaceAdapter::new(400.0, 300.0, 2.0);
        assert_eq!(surface.device_size(), (800, 600));
        assert_eq!(surface.logical_size(), Vec2::new(400.0, 300.0));
        assert!(surface.has_context());
    }

    #[test]
    fn test_fractional_ratio_rounds_up() {
        let surface = SurfaceAdapter::new(101.0, 33.0, 1.5);
        assert_eq!(surface.device_size(), (152, 50));
    }

    #[test]
    fn test_invalid_geometry_is_clamped() {
        let surface = SurfaceAdapter::new(f32::NAN, -20.0, f32::INFINITY);
        assert_eq!(surface.logical_size(), Vec2::ONE);
        assert_eq!(surface.device_pixel_ratio(), 1.0);
        assert_eq!(surface.device_size(), (1, 1));
    }

    #[test]
    fn test_pixel_ratio_is_capped() {
        let surface = SurfaceAdapter::new(10.0, 10.0, 50.0);
        assert_eq!(surface.device_pixel_ratio(), MAX_DEVICE_PIXEL_RATIO);
    }

    #[test]
    fn test_hidpi_backing_respects_pixel_budget() {
        let surface = SurfaceAdapter::new(1920.0, 1080.0, 2.0);
        assert_eq!(surface.device_pixel_ratio(), 2.0);
        let (w, h) = surface.device_size();
        let device = w as f32 * h as f32;
        assert!(device <= RENDER_PIXEL_BUDGET * 1.01, "{w}x{h}");
        assert!(w > 1920 && h > 1080);
        let scale = surface.pixels().map(|p| p.scale());
        assert!(scale.is_some_and(|s| s > 1.0 && s < 2.0));
    }

    #[test]
    fn test_pixel_budget_never_drops_below_logical() {
        assert_eq!(render_scale(Vec2::new(4000.0, 3000.0), 3.0), 1.0);
        assert_eq!(render_scale(Vec2::new(4000.0, 3000.0), 0.5), 0.5);
        assert_eq!(render_scale(Vec2::new(800.0, 600.0), 2.0), 2.0);
    }

    #[test]
    fn test_set_geometry_reports_reallocation() {
        let mut surface = SurfaceAdapter::new(100.0, 100.0, 1.0);
        assert!(!surface.set_geometry(100.0, 100.0, 1.0));
        assert!(surface.set_geometry(120.0, 100.0, 1.0));
        assert!(surface.set_geometry(120.0, 100.0, 2.0));
        assert_eq!(surface.device_size(), (240, 200));
    }

    #[test]
    fn test_oversized_surface_degrades_to_noop() {
        let mut surface = SurfaceAdapter::new(100_000.0, 100_000.0, 1.0);
        assert!(!surface.has_context());
        assert_eq!(surface.device_size(), (0, 0));
        // Drawing must be accepted and do nothing.
        surface.canvas().fill_rect(
            Vec2::ZERO,
            Vec2::splat(10.0),
            Paint::new(Rgb::WHITE, 1.0, BlendMode::SourceOver),
        );
        assert!(surface.pixels().is_none());

        // Shrinking restores a real context.
        assert!(surface.set_geometry(64.0, 64.0, 1.0));
        assert!(surface.has_context());
    }

    #[test]
    fn test_clear_wipes_backing_store() {
        let mut surface = SurfaceAdapter::new(8.0, 8.0, 1.0);
        surface.canvas().fill_rect(
            Vec2::ZERO,
            Vec2::splat(8.0),
            Paint::new(Rgb::WHITE, 1.0, BlendMode::SourceOver),
        );
        assert!(!surface.pixels().is_some_and(|p| p.is_clear()));
        surface.clear();
        assert!(surface.pixels().is_some_and(|p| p.is_clear()));
    }
}
