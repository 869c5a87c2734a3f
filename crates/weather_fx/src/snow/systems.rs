use std::f32::consts::TAU;

use bevy::math::Vec2;

use crate::canvas::{BlendMode, Canvas, Dot, Paint};
use crate::options::{RenderOptions, VariantDefaults};
use crate::population::{wrap_position, Axis, PopulationCurve};
use crate::renderer::{EffectKind, FieldContext, Simulation};

use super::types::{
    Flake, SnowField, BOKEH_DEPTH, BOKEH_SCALE, DEPTH_RADIUS, FALL_BASE, FALL_DEPTH, FLAKE_ALPHA,
    FLAKE_INTENSITY_ALPHA, GLITTER_ALPHA, GLITTER_CHANCE, MIN_RADIUS, SNOW_DEFAULTS, SNOW_MARGIN,
    SNOW_POPULATION, TURBULENCE_AMPLITUDE, TURBULENCE_MAX_FREQ, TURBULENCE_MIN_FREQ, WIND_PUSH,
};

pub(crate) fn flake_radius(z: f32, size_var: f32) -> f32 {
    let radius = (MIN_RADIUS + z * DEPTH_RADIUS) * size_var;
    if z > BOKEH_DEPTH {
        radius * BOKEH_SCALE
    } else {
        radius
    }
}

/// Wind drift shared by every flake before depth scaling.
fn wind_drift(options: &RenderOptions) -> Vec2 {
    options.wind_vector() * options.wind_speed() * (1.0 + options.intensity()) * WIND_PUSH
}

/// Bulk field velocity: wind plus the fall of a mid-depth flake.
pub(crate) fn bulk_velocity(options: &RenderOptions) -> Vec2 {
    wind_drift(options) + Vec2::new(0.0, FALL_BASE + FALL_DEPTH * 0.5)
}

fn flake_velocity(flake: &Flake, drift: Vec2, elapsed: f32) -> Vec2 {
    let angle = elapsed * flake.freq + flake.phase;
    let turbulence = Vec2::new(angle.sin(), angle.cos() * 0.3) * TURBULENCE_AMPLITUDE;
    // Near flakes move faster across the screen (parallax).
    let parallax = 0.4 + 0.6 * flake.z;
    drift * parallax
        + Vec2::new(0.0, (FALL_BASE + FALL_DEPTH * flake.z) * flake.speed_var)
        + turbulence
}

impl Simulation for SnowField {
    type Particle = Flake;

    const KIND: EffectKind = EffectKind::Snow;
    const DEFAULTS: VariantDefaults = SNOW_DEFAULTS;
    const POPULATION: PopulationCurve = SNOW_POPULATION;

    fn particles(&self) -> &[Flake] {
        &self.flakes
    }

    fn particles_mut(&mut self) -> &mut Vec<Flake> {
        &mut self.flakes
    }

    fn spawn(ctx: &mut FieldContext<'_>) -> Flake {
        let pos = Vec2::new(
            ctx.rng.next_f32() * ctx.size.x,
            ctx.rng.next_f32() * ctx.size.y,
        );
        let z = ctx.rng.next_f32();
        let size_var = ctx.rng.range(0.7, 1.3);
        Flake {
            pos,
            z,
            radius: flake_radius(z, size_var),
            speed_var: ctx.rng.range(0.8, 1.2),
            phase: ctx.rng.range(0.0, TAU),
            freq: ctx.rng.range(TURBULENCE_MIN_FREQ, TURBULENCE_MAX_FREQ),
        }
    }

    fn population_changed(&mut self, _rebuilt: bool) {
        self.glitter.clear();
    }

    fn step(&mut self, dt: f32, ctx: &mut FieldContext<'_>) {
        self.elapsed += dt;
        let drift = wind_drift(ctx.options);
        let dominant = Axis::of(bulk_velocity(ctx.options));

        self.glitter.clear();
        for (index, flake) in self.flakes.iter_mut().enumerate() {
            let velocity = flake_velocity(flake, drift, self.elapsed);
            flake.pos += velocity * dt;
            let wrapped = wrap_position(&mut flake.pos, ctx.size, SNOW_MARGIN);
            // Re-randomise across the flow so wrapped flakes don't repeat
            // the same lanes.
            if wrapped.across(dominant) {
                match dominant {
                    Axis::Y => flake.pos.x = ctx.rng.next_f32() * ctx.size.x,
                    Axis::X => flake.pos.y = ctx.rng.next_f32() * ctx.size.y,
                }
            }
            if ctx.rng.chance(GLITTER_CHANCE) {
                self.glitter.push(index);
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions, _size: Vec2) {
        if self.flakes.is_empty() {
            return;
        }
        let dots: Vec<Dot> = self
            .flakes
            .iter()
            .map(|f| Dot {
                center: f.pos,
                radius: f.radius,
            })
            .collect();
        let alpha = FLAKE_ALPHA + FLAKE_INTENSITY_ALPHA * options.intensity();
        canvas.fill_dots(
            &dots,
            Paint::new(options.color(), alpha, BlendMode::Lighter),
        );

        let sparkles: Vec<Dot> = self
            .glitter
            .iter()
            .filter_map(|&i| self.flakes.get(i))
            .map(|f| Dot {
                center: f.pos,
                radius: f.radius * 1.3,
            })
            .collect();
        if !sparkles.is_empty() {
            canvas.fill_dots(
                &sparkles,
                Paint::new(options.color(), GLITTER_ALPHA, BlendMode::Lighter),
            );
        }
    }

    fn release(&mut self) {
        self.flakes = Vec::new();
        self.glitter = Vec::new();
    }
}
