//! Population sizing and edge wrapping shared by the particle variants.

use bevy::math::Vec2;

use crate::config::REFERENCE_AREA;
use crate::options::sanitize_intensity;

/// How many particles a variant keeps for a given intensity and surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationCurve {
    /// Particles at intensity 0 on the reference area.
    pub base: f32,
    /// Extra particles at intensity 1 on the reference area.
    pub per_intensity: f32,
    pub min: usize,
    pub max: usize,
    /// 1.0 scales linearly with area; smaller values flatten the growth.
    pub area_exponent: f32,
}

impl PopulationCurve {
    /// Target count. Non-decreasing in `intensity` and in area for a fixed
    /// `jitter`.
    pub fn count(&self, intensity: f32, size: Vec2, jitter: f32) -> usize {
        let density = self.base + sanitize_intensity(intensity) * self.per_intensity;
        let area = (size.x.max(0.0) * size.y.max(0.0)) / REFERENCE_AREA;
        let scaled = density * area.powf(self.area_exponent) * jitter.max(0.0);
        let rounded = if scaled.is_finite() {
            scaled.round().min(self.max as f32) as usize
        } else {
            self.max
        };
        rounded.clamp(self.min, self.max)
    }
}

/// Axis carrying most of the motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn of(v: Vec2) -> Axis {
        if v.x.abs() > v.y.abs() {
            Axis::X
        } else {
            Axis::Y
        }
    }
}

/// Toroidal wrap of one coordinate over `[-margin, extent + margin]`.
///
/// A value past one edge reappears past the opposite edge by the same
/// overshoot. Returns the new value and whether a wrap happened.
pub fn wrap_coord(value: f32, extent: f32, margin: f32) -> (f32, bool) {
    let lo = -margin;
    let hi = extent + margin;
    if !value.is_finite() {
        return (lo, true);
    }
    let span = hi - lo;
    if value < lo {
        ((value + span).clamp(lo, hi), true)
    } else if value > hi {
        ((value - span).clamp(lo, hi), true)
    } else {
        (value, false)
    }
}

/// Which edges a particle crossed during a wrap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wrapped {
    pub x: bool,
    pub y: bool,
}

impl Wrapped {
    pub fn across(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }
}

/// Wrap a position on both axes with a shared margin.
pub fn wrap_position(pos: &mut Vec2, size: Vec2, margin: f32) -> Wrapped {
    let (x, wrapped_x) = wrap_coord(pos.x, size.x, margin);
    let (y, wrapped_y) = wrap_coord(pos.y, size.y, margin);
    pos.x = x;
    pos.y = y;
    Wrapped {
        x: wrapped_x,
        y: wrapped_y,
    }
}

/// Inside the wrap halo around the visible surface.
pub fn within_halo(pos: Vec2, size: Vec2, margin: f32) -> bool {
    (-margin..=size.x + margin).contains(&pos.x) && (-margin..=size.y + margin).contains(&pos.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVE: PopulationCurve = PopulationCurve {
        base: 100.0,
        per_intensity: 400.0,
        min: 10,
        max: 1000,
        area_exponent: 1.0,
    };

    #[test]
    fn test_count_monotone_in_intensity() {
        let size = Vec2::new(800.0, 600.0);
        let counts: Vec<usize> = (0..=20)
            .map(|i| CURVE.count(i as f32 / 20.0, size, 1.0))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
        assert!(counts[20] > counts[0]);
    }

    #[test]
    fn test_count_monotone_in_area() {
        let counts: Vec<usize> = (1..=20)
            .map(|i| CURVE.count(0.5, Vec2::new(100.0 * i as f32, 500.0), 1.0))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
    }

    #[test]
    fn test_count_respects_bounds() {
        assert_eq!(CURVE.count(1.0, Vec2::new(1.0e6, 1.0e6), 1.0), 1000);
        assert_eq!(CURVE.count(0.0, Vec2::ONE, 1.0), 10);
        assert_eq!(CURVE.count(f32::NAN, Vec2::ONE, 1.0), 10);
    }

    #[test]
    fn test_reference_area_gives_nominal_count() {
        let size = Vec2::new(1280.0, 720.0);
        assert_eq!(CURVE.count(0.5, size, 1.0), 300);
    }

    #[test]
    fn test_wrap_preserves_overshoot() {
        let (v, wrapped) = wrap_coord(-15.0, 100.0, 10.0);
        assert!(wrapped);
        assert_eq!(v, 105.0);
        let (v, wrapped) = wrap_coord(113.0, 100.0, 10.0);
        assert!(wrapped);
        assert_eq!(v, -7.0);
        let (v, wrapped) = wrap_coord(50.0, 100.0, 10.0);
        assert!(!wrapped);
        assert_eq!(v, 50.0);
    }

    #[test]
    fn test_wrap_clamps_huge_jumps() {
        let (v, _) = wrap_coord(10_000.0, 100.0, 10.0);
        assert!((-10.0..=110.0).contains(&v));
        let (v, _) = wrap_coord(f32::NAN, 100.0, 10.0);
        assert_eq!(v, -10.0);
    }

    #[test]
    fn test_dominant_axis() {
        assert_eq!(Axis::of(Vec2::new(3.0, 1.0)), Axis::X);
        assert_eq!(Axis::of(Vec2::new(0.5, -2.0)), Axis::Y);
        assert_eq!(Axis::of(Vec2::ZERO), Axis::Y);
    }

    #[test]
    fn test_wrap_position_reports_axes() {
        let mut p = Vec2::new(-30.0, 50.0);
        let w = wrap_position(&mut p, Vec2::new(100.0, 100.0), 20.0);
        assert!(w.x && !w.y);
        assert!(w.across(Axis::X));
        assert!(within_halo(p, Vec2::new(100.0, 100.0), 20.0));
    }
}
