//! Software rasterizer backing the overlay canvas.
//!
//! Pixels are stored premultiplied in linear `f32` RGBA, in device pixels.
//! Draw calls arrive in logical pixels and are scaled by the device-pixel
//! ratio. Shapes use a one-pixel coverage ramp at their edges for anti-aliasing.
//!
//! Soft blobs are painted into a quarter-resolution layer and upsampled with
//! bilinear filtering, which keeps large fog banks to a handful of
//! full-surface passes per frame.

use std::ops::Range;

use bevy::math::Vec2;

use crate::canvas::{BlendMode, Canvas, Dot, Paint, RadialBlob};

/// Alpha below which a pixel counts as empty for readback helpers.
const LIT_ALPHA_THRESHOLD: f32 = 1.0 / 255.0;

/// Device pixels per soft-layer pixel along each axis.
pub const SOFT_LAYER_DIVISOR: u32 = 4;

/// Premultiplied RGBA pixel buffer implementing [`Canvas`].
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    scale: f32,
    pixels: Vec<[f32; 4]>,
    soft: Option<Box<SoftLayer>>,
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy)]
struct PixelSpan {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
}

/// Reduced-resolution scratch surface for soft blobs plus the row buffers
/// used to upsample it onto its parent.
#[derive(Debug, Clone)]
struct SoftLayer {
    surface: PixelSurface,
    columns: Vec<Tap>,
    upper: Vec<[f32; 4]>,
    lower: Vec<[f32; 4]>,
}

/// Bilinear sample position: two neighbouring layer texels and the weight of
/// the second.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: usize,
    hi: usize,
    t: f32,
}

impl PixelSurface {
    /// Allocate a transparent surface of `width` x `height` device pixels.
    /// `scale` maps logical coordinates onto device pixels.
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            scale: if scale.is_finite() && scale > 0.0 {
                scale
            } else {
                1.0
            },
            pixels: vec![[0.0; 4]; width as usize * height as usize],
            soft: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Premultiplied RGBA at a device pixel, or transparent when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        if x >= self.width || y >= self.height {
            return [0.0; 4];
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// No pixel carries any coverage.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|p| p[3] <= 0.0)
    }

    /// Number of pixels with visible alpha.
    pub fn lit_pixel_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|p| p[3] >= LIT_ALPHA_THRESHOLD)
            .count()
    }

    /// Mean alpha over the whole surface.
    pub fn mean_alpha(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        self.pixels.iter().map(|p| p[3]).sum::<f32>() / self.pixels.len() as f32
    }

    /// Straight-alpha RGBA8 bytes, row-major, for texture upload.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            let a = p[3].clamp(0.0, 1.0);
            if a <= 0.0 {
                out.extend_from_slice(&[0, 0, 0, 0]);
                continue;
            }
            for c in &p[..3] {
                out.push(to_byte(c / a));
            }
            out.push(to_byte(a));
        }
        out
    }

    fn to_device(&self, v: Vec2) -> Vec2 {
        v * self.scale
    }

    /// Pixels whose area intersects `[min, max]` (device space), clipped to
    /// the surface. `None` when nothing is visible or the input is not finite.
    fn span(&self, min: Vec2, max: Vec2) -> Option<PixelSpan> {
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let (width, height) = (self.width as f32, self.height as f32);
        if max.x < 0.0 || max.y < 0.0 || min.x >= width || min.y >= height {
            return None;
        }
        Some(PixelSpan {
            x0: min.x.floor().max(0.0) as usize,
            x1: (max.x.ceil() as usize).min(self.width as usize - 1),
            y0: min.y.floor().max(0.0) as usize,
            y1: (max.y.ceil() as usize).min(self.height as usize - 1),
        })
    }

    /// Visit every pixel centre in `span`, compositing the coverage returned
    /// by `coverage` (0 skips the pixel).
    fn paint_span(
        &mut self,
        span: PixelSpan,
        rgb: [f32; 3],
        blend: BlendMode,
        mut coverage: impl FnMut(Vec2) -> f32,
    ) {
        let stride = self.width as usize;
        for py in span.y0..=span.y1 {
            for px in span.x0..=span.x1 {
                let center = Vec2::new(px as f32 + 0.5, py as f32 + 0.5);
                let alpha = coverage(center);
                if alpha <= 0.0 {
                    continue;
                }
                let dst = &mut self.pixels[py * stride + px];
                composite(dst, rgb, alpha.min(1.0), blend);
            }
        }
    }

    /// Paint one blob at this surface's resolution. Returns `false` when it
    /// missed the surface entirely.
    fn paint_blob(&mut self, blob: &RadialBlob, blend: BlendMode) -> bool {
        if blob.alpha <= 0.0 {
            return false;
        }
        let c = self.to_device(blob.center);
        let r = (blob.radii * self.scale).max(Vec2::splat(0.5));
        let reach = (blob.half_extents() * self.scale).max(Vec2::splat(0.5)) + Vec2::ONE;
        let Some(span) = self.span(c - reach, c + reach) else {
            return false;
        };
        let (sin, cos) = blob.rotation.sin_cos();
        let inv = r.recip();
        self.paint_span(span, blob.color.to_unit(), blend, |p| {
            let d = p - c;
            let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos) * inv;
            let t_sq = local.length_squared();
            if t_sq >= 1.0 {
                return 0.0;
            }
            blob.alpha_at(t_sq.sqrt())
        });
        true
    }

    /// Bilinear-resample row `y` horizontally through `columns` into `out`.
    fn expand_row(&self, y: usize, columns: &[Tap], out: &mut [[f32; 4]]) {
        let width = self.width as usize;
        let row = &self.pixels[y * width..(y + 1) * width];
        for (dst, tap) in out.iter_mut().zip(columns) {
            *dst = lerp4(row[tap.lo], row[tap.hi], tap.t);
        }
    }
}

impl SoftLayer {
    fn new(width: u32, height: u32, scale: f32) -> Self {
        let layer_width = width.div_ceil(SOFT_LAYER_DIVISOR);
        let layer_height = height.div_ceil(SOFT_LAYER_DIVISOR);
        Self {
            surface: PixelSurface::new(
                layer_width,
                layer_height,
                scale / SOFT_LAYER_DIVISOR as f32,
            ),
            columns: (0..width).map(|x| tap(x, layer_width)).collect(),
            upper: vec![[0.0; 4]; width as usize],
            lower: vec![[0.0; 4]; width as usize],
        }
    }

    /// Composite the layer onto `dst` (rows of `stride` pixels) at full
    /// resolution.
    fn upsample_onto(&mut self, dst: &mut [[f32; 4]], stride: usize, blend: BlendMode) {
        let Self {
            surface,
            columns,
            upper,
            lower,
        } = self;
        let mut loaded: Option<(usize, usize)> = None;
        for (py, row) in dst.chunks_exact_mut(stride).enumerate() {
            let v = tap(py as u32, surface.height);
            if loaded != Some((v.lo, v.hi)) {
                if loaded.is_some_and(|(_, hi)| hi == v.lo) {
                    std::mem::swap(upper, lower);
                } else {
                    surface.expand_row(v.lo, columns, upper);
                }
                surface.expand_row(v.hi, columns, lower);
                loaded = Some((v.lo, v.hi));
            }
            for ((px, top), bottom) in row.iter_mut().zip(upper.iter()).zip(lower.iter()) {
                let src = lerp4(*top, *bottom, v.t);
                if src[3] > 0.0 {
                    composite_premultiplied(px, src, blend);
                }
            }
        }
    }
}

impl Canvas for PixelSurface {
    fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, paint: Paint) {
        if paint.is_invisible() || size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let dmin = self.to_device(min);
        let dmax = self.to_device(min + size);
        if !(dmin.is_finite() && dmax.is_finite()) {
            return;
        }
        // Pixels whose centre lies inside the rectangle.
        let columns = centres_within(dmin.x, dmax.x, self.width);
        let rows = centres_within(dmin.y, dmax.y, self.height);
        let src = premultiply(paint.color.to_unit(), paint.alpha);
        let stride = self.width as usize;
        let band = &mut self.pixels[rows.start * stride..rows.end * stride];
        for row in band.chunks_exact_mut(stride) {
            for dst in &mut row[columns.clone()] {
                composite_premultiplied(dst, src, paint.blend);
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint) {
        if paint.is_invisible() {
            return;
        }
        let a = self.to_device(from);
        let b = self.to_device(to);
        let half = (width * self.scale).max(1.0) * 0.5;
        let pad = Vec2::splat(half + 1.0);
        let Some(span) = self.span(a.min(b) - pad, a.max(b) + pad) else {
            return;
        };
        let alpha = paint.alpha;
        self.paint_span(span, paint.color.to_unit(), paint.blend, |p| {
            let d = distance_to_segment(p, a, b);
            (half + 0.5 - d).clamp(0.0, 1.0) * alpha
        });
    }

    fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, paint: Paint) {
        if paint.is_invisible() {
            return;
        }
        let c = self.to_device(center);
        let r = (radii * self.scale).max(Vec2::splat(0.5));
        let half = (width * self.scale).max(1.0) * 0.5;
        let pad = r + Vec2::splat(half + 1.0);
        let Some(span) = self.span(c - pad, c + pad) else {
            return;
        };
        let alpha = paint.alpha;
        let min_radius = r.x.min(r.y);
        self.paint_span(span, paint.color.to_unit(), paint.blend, |p| {
            let q = (p - c) / r;
            let d = (q.length() - 1.0).abs() * min_radius;
            (half + 0.5 - d).clamp(0.0, 1.0) * alpha
        });
    }

    fn fill_dots(&mut self, dots: &[Dot], paint: Paint) {
        if paint.is_invisible() {
            return;
        }
        let rgb = paint.color.to_unit();
        for dot in dots {
            let c = self.to_device(dot.center);
            let r = (dot.radius * self.scale).max(0.5);
            let pad = Vec2::splat(r + 1.0);
            let Some(span) = self.span(c - pad, c + pad) else {
                continue;
            };
            let alpha = paint.alpha;
            self.paint_span(span, rgb, paint.blend, |p| {
                (r + 0.5 - p.distance(c)).clamp(0.0, 1.0) * alpha
            });
        }
    }

    fn fill_radial_blobs(&mut self, blobs: &[RadialBlob], blend: BlendMode) {
        if blobs.iter().all(|b| b.alpha <= 0.0) {
            return;
        }
        let (width, height, scale) = (self.width, self.height, self.scale);
        let new_layer = || Box::new(SoftLayer::new(width, height, scale));
        let layer = self.soft.get_or_insert_with(new_layer);
        layer.surface.clear();
        let mut painted = false;
        for blob in blobs {
            painted |= layer.surface.paint_blob(blob, blend);
        }
        if painted {
            layer.upsample_onto(&mut self.pixels, width as usize, blend);
        }
    }
}

fn composite(dst: &mut [f32; 4], rgb: [f32; 3], alpha: f32, blend: BlendMode) {
    composite_premultiplied(dst, premultiply(rgb, alpha), blend);
}

fn composite_premultiplied(dst: &mut [f32; 4], src: [f32; 4], blend: BlendMode) {
    match blend {
        BlendMode::SourceOver => {
            let keep = 1.0 - src[3];
            for c in 0..4 {
                dst[c] = src[c] + dst[c] * keep;
            }
        }
        BlendMode::Screen => {
            for c in 0..4 {
                dst[c] = src[c] + dst[c] - src[c] * dst[c];
            }
        }
        BlendMode::Lighter => {
            for c in 0..4 {
                dst[c] = (dst[c] + src[c]).min(1.0);
            }
        }
    }
}

fn premultiply(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0] * alpha, rgb[1] * alpha, rgb[2] * alpha, alpha]
}

fn lerp4(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    std::array::from_fn(|c| a[c] + (b[c] - a[c]) * t)
}

/// Device pixel `i` sampled from a layer `len` texels long.
fn tap(i: u32, len: u32) -> Tap {
    let u = (i as f32 + 0.5) / SOFT_LAYER_DIVISOR as f32 - 0.5;
    if u <= 0.0 {
        return Tap {
            lo: 0,
            hi: 0,
            t: 0.0,
        };
    }
    let last = len as usize - 1;
    let lo = (u.floor() as usize).min(last);
    Tap {
        lo,
        hi: (lo + 1).min(last),
        t: u.fract(),
    }
}

/// Indices of pixels whose centres fall in `[lo, hi)`, clipped to `extent`.
fn centres_within(lo: f32, hi: f32, extent: u32) -> Range<usize> {
    let first = (lo - 0.5).ceil().clamp(0.0, extent as f32) as usize;
    let end = (hi - 0.5).ceil().clamp(0.0, extent as f32) as usize;
    first..end.max(first)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Rgb;

    fn white(alpha: f32, blend: BlendMode) -> Paint {
        Paint::new(Rgb::WHITE, alpha, blend)
    }

    #[test]
    fn test_new_surface_is_clear() {
        let s = PixelSurface::new(16, 8, 1.0);
        assert!(s.is_clear());
        assert_eq!(s.lit_pixel_count(), 0);
        assert_eq!(s.to_rgba8().len(), 16 * 8 * 4);
    }

    #[test]
    fn test_fill_rect_covers_exact_area() {
        let mut s = PixelSurface::new(10, 10, 1.0);
        s.fill_rect(
            Vec2::new(2.0, 3.0),
            Vec2::new(4.0, 2.0),
            white(1.0, BlendMode::SourceOver),
        );
        assert_eq!(s.lit_pixel_count(), 8);
        assert_eq!(s.pixel(2, 3)[3], 1.0);
        assert_eq!(s.pixel(1, 3)[3], 0.0);
        assert_eq!(s.pixel(6, 3)[3], 0.0);
    }

    #[test]
    fn test_device_pixel_ratio_scales_draws() {
        let mut s = PixelSurface::new(20, 20, 2.0);
        s.fill_rect(
            Vec2::ZERO,
            Vec2::new(5.0, 5.0),
            white(1.0, BlendMode::SourceOver),
        );
        assert_eq!(s.lit_pixel_count(), 100);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut s = PixelSurface::new(10, 10, 1.0);
        s.fill_rect(
            Vec2::ZERO,
            Vec2::splat(10.0),
            white(0.5, BlendMode::SourceOver),
        );
        assert!(!s.is_clear());
        s.clear();
        assert!(s.is_clear());
    }

    #[test]
    fn test_lighter_saturates_to_white() {
        let mut s = PixelSurface::new(4, 4, 1.0);
        let p = Paint::new(Rgb::new(128, 128, 128), 0.6, BlendMode::Lighter);
        for _ in 0..6 {
            s.fill_rect(Vec2::ZERO, Vec2::splat(4.0), p);
        }
        let px = s.pixel(1, 1);
        assert_eq!(px[3], 1.0);
        assert_eq!(px[0], 1.0);
    }

    #[test]
    fn test_screen_brightens_monotonically() {
        let mut s = PixelSurface::new(4, 4, 1.0);
        let p = Paint::new(Rgb::new(100, 150, 200), 0.3, BlendMode::Screen);
        let mut last = 0.0;
        for _ in 0..5 {
            s.fill_rect(Vec2::ZERO, Vec2::splat(4.0), p);
            let now = s.pixel(2, 2)[2];
            assert!(now > last);
            assert!(now <= 1.0);
            last = now;
        }
    }

    #[test]
    fn test_source_over_converges_to_source() {
        let mut s = PixelSurface::new(2, 2, 1.0);
        s.fill_rect(
            Vec2::ZERO,
            Vec2::splat(2.0),
            white(1.0, BlendMode::SourceOver),
        );
        let black = Paint::new(Rgb::new(0, 0, 0), 1.0, BlendMode::SourceOver);
        s.fill_rect(Vec2::ZERO, Vec2::splat(2.0), black);
        assert_eq!(s.pixel(0, 0), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_line_is_drawn_along_segment_only() {
        let mut s = PixelSurface::new(20, 20, 1.0);
        s.stroke_line(
            Vec2::new(2.0, 10.0),
            Vec2::new(18.0, 10.0),
            1.0,
            white(1.0, BlendMode::Screen),
        );
        assert!(s.pixel(10, 9)[3] > 0.0 || s.pixel(10, 10)[3] > 0.0);
        assert_eq!(s.pixel(10, 2)[3], 0.0);
        assert_eq!(s.pixel(10, 18)[3], 0.0);
    }

    #[test]
    fn test_offscreen_and_nan_draws_are_ignored() {
        let mut s = PixelSurface::new(10, 10, 1.0);
        let p = white(1.0, BlendMode::Lighter);
        s.fill_dots(
            &[
                Dot {
                    center: Vec2::new(-50.0, -50.0),
                    radius: 3.0,
                },
                Dot {
                    center: Vec2::new(f32::NAN, 2.0),
                    radius: 3.0,
                },
            ],
            p,
        );
        s.stroke_line(Vec2::new(100.0, 100.0), Vec2::new(200.0, 120.0), 2.0, p);
        assert!(s.is_clear());
    }

    #[test]
    fn test_dot_coverage_is_round() {
        let mut s = PixelSurface::new(21, 21, 1.0);
        s.fill_dots(
            &[Dot {
                center: Vec2::new(10.5, 10.5),
                radius: 5.0,
            }],
            white(1.0, BlendMode::Lighter),
        );
        assert_eq!(s.pixel(10, 10)[3], 1.0);
        assert_eq!(s.pixel(0, 0)[3], 0.0);
        assert_eq!(s.pixel(10, 18)[3], 0.0);
        // Area close to pi * r^2.
        let lit = s.lit_pixel_count() as f32;
        assert!(
            (lit - std::f32::consts::PI * 25.0).abs() < 25.0,
            "lit = {lit}"
        );
    }

    #[test]
    fn test_ellipse_ring_leaves_center_empty() {
        let mut s = PixelSurface::new(40, 40, 1.0);
        s.stroke_ellipse(
            Vec2::new(20.0, 20.0),
            Vec2::new(12.0, 6.0),
            1.0,
            white(1.0, BlendMode::SourceOver),
        );
        assert_eq!(s.pixel(20, 20)[3], 0.0);
        assert!(!s.is_clear());
    }

    #[test]
    fn test_radial_blob_fades_to_rim() {
        let mut s = PixelSurface::new(40, 40, 1.0);
        let blob = RadialBlob {
            center: Vec2::new(20.0, 20.0),
            radii: Vec2::new(15.0, 15.0),
            rotation: 0.3,
            color: Rgb::WHITE,
            alpha: 0.8,
        };
        s.fill_radial_blobs(&[blob], BlendMode::SourceOver);
        let center = s.pixel(20, 20)[3];
        let edge = s.pixel(33, 20)[3];
        assert!(center > edge);
        assert_eq!(s.pixel(0, 0)[3], 0.0);
    }

    #[test]
    fn test_soft_blobs_track_the_exact_gradient() {
        let mut s = PixelSurface::new(200, 160, 1.0);
        let blob = RadialBlob {
            center: Vec2::new(100.0, 80.0),
            radii: Vec2::new(90.0, 50.0),
            rotation: 0.4,
            color: Rgb::WHITE,
            alpha: 0.6,
        };
        s.fill_radial_blobs(&[blob], BlendMode::SourceOver);

        let (sin, cos) = blob.rotation.sin_cos();
        for (x, y) in [(100, 80), (130, 95), (60, 70), (150, 110), (100, 40)] {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - blob.center;
            let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
            let exact = blob.alpha_at((local / blob.radii).length());
            let got = s.pixel(x, y)[3];
            assert!((got - exact).abs() < 0.03, "({x},{y}): {got} vs {exact}");
        }
        assert_eq!(s.pixel(0, 0)[3], 0.0);
        assert_eq!(s.pixel(199, 159)[3], 0.0);
    }

    #[test]
    fn test_soft_blobs_composite_over_existing_pixels() {
        let mut s = PixelSurface::new(128, 128, 1.0);
        let black = Paint::new(Rgb::new(0, 0, 0), 1.0, BlendMode::SourceOver);
        s.fill_rect(Vec2::ZERO, Vec2::splat(128.0), black);
        let blob = RadialBlob {
            center: Vec2::splat(64.0),
            radii: Vec2::splat(120.0),
            rotation: 0.0,
            color: Rgb::WHITE,
            alpha: 0.5,
        };
        s.fill_radial_blobs(&[blob, blob], BlendMode::SourceOver);
        let center = s.pixel(64, 64);
        assert!((center[3] - 1.0).abs() < 1e-5);
        // Two half-alpha layers over black: 1 - 0.5^2 of white.
        assert!((center[0] - 0.75).abs() < 0.03, "{center:?}");
        let corner = s.pixel(0, 0);
        assert!((corner[3] - 1.0).abs() < 1e-5);
        assert!(corner[0] < center[0]);
    }

    #[test]
    fn test_soft_layer_covers_odd_sizes() {
        let mut s = PixelSurface::new(37, 11, 1.5);
        let blob = RadialBlob {
            center: Vec2::new(12.0, 4.0),
            radii: Vec2::splat(40.0),
            rotation: 0.0,
            color: Rgb::WHITE,
            alpha: 0.8,
        };
        s.fill_radial_blobs(&[blob], BlendMode::Lighter);
        assert_eq!(s.lit_pixel_count(), 37 * 11);
        s.clear();
        s.fill_radial_blobs(&[], BlendMode::Lighter);
        assert!(s.is_clear());
    }

    #[test]
    fn test_tap_weights_stay_inside_layer() {
        for len in [1, 2, 5] {
            for i in 0..len * SOFT_LAYER_DIVISOR {
                let t = tap(i, len);
                assert!(t.lo <= t.hi && (t.hi as u32) < len);
                assert!((0.0..1.0).contains(&t.t));
            }
        }
        assert_eq!(
            tap(0, 3),
            Tap {
                lo: 0,
                hi: 0,
                t: 0.0
            }
        );
    }

    #[test]
    fn test_rgba8_unpremultiplies() {
        let mut s = PixelSurface::new(1, 1, 1.0);
        s.fill_rect(
            Vec2::ZERO,
            Vec2::ONE,
            Paint::new(Rgb::new(255, 0, 0), 0.5, BlendMode::SourceOver),
        );
        let bytes = s.to_rgba8();
        assert_eq!(bytes[0], 255);
        assert_eq!(bytes[1], 0);
        assert_eq!(bytes[3], 128);
    }
}
