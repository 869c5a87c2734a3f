use std::f32::consts::TAU;

use bevy::math::Vec2;

use crate::canvas::{BlendMode, Canvas, Paint, RadialBlob};
use crate::options::{RenderOptions, VariantDefaults};
use crate::population::{wrap_position, Axis, PopulationCurve};
use crate::renderer::{EffectKind, FieldContext, Simulation};

use super::types::{
    FogBlob, FogField, BASE_SPEED, FOG_DEFAULTS, FOG_POPULATION, HAZE_ALPHA, HAZE_INTENSITY_ALPHA,
    JITTER_AMPLITUDE, JITTER_MAX_FREQ, JITTER_MIN_FREQ, MAX_BLOB_ALPHA, MAX_RADIUS_VAR, MAX_SPIN,
    MAX_STRETCH, MIN_BLOB_ALPHA, MIN_RADIUS_VAR, MIN_STRETCH, RADIUS_FRACTION,
};

pub(crate) fn sort_by_radius_desc(blobs: &mut [FogBlob]) {
    blobs.sort_by(|a, b| b.radius.total_cmp(&a.radius));
}

fn haze_alpha(options: &RenderOptions) -> f32 {
    HAZE_ALPHA + HAZE_INTENSITY_ALPHA * options.intensity()
}

impl Simulation for FogField {
    type Particle = FogBlob;

    const KIND: EffectKind = EffectKind::Fog;
    const DEFAULTS: VariantDefaults = FOG_DEFAULTS;
    const POPULATION: PopulationCurve = FOG_POPULATION;

    fn particles(&self) -> &[FogBlob] {
        &self.blobs
    }

    fn particles_mut(&mut self) -> &mut Vec<FogBlob> {
        &mut self.blobs
    }

    fn spawn(ctx: &mut FieldContext<'_>) -> FogBlob {
        let base = ctx.size.x.max(ctx.size.y) * RADIUS_FRACTION;
        FogBlob {
            pos: Vec2::new(
                ctx.rng.next_f32() * ctx.size.x,
                ctx.rng.next_f32() * ctx.size.y,
            ),
            radius: base * ctx.rng.range(MIN_RADIUS_VAR, MAX_RADIUS_VAR),
            stretch: ctx.rng.range(MIN_STRETCH, MAX_STRETCH),
            rotation: ctx.rng.range(0.0, TAU),
            spin: ctx.rng.range(-MAX_SPIN, MAX_SPIN),
            speed_var: ctx.rng.range(0.6, 1.4),
            phase: ctx.rng.range(0.0, TAU),
            freq: ctx.rng.range(JITTER_MIN_FREQ, JITTER_MAX_FREQ),
            alpha: ctx.rng.range(MIN_BLOB_ALPHA, MAX_BLOB_ALPHA),
        }
    }

    fn population_changed(&mut self, _rebuilt: bool) {
        sort_by_radius_desc(&mut self.blobs);
    }

    fn step(&mut self, dt: f32, ctx: &mut FieldContext<'_>) {
        self.elapsed += dt;
        let wind = ctx.options.wind_vector() * ctx.options.wind_speed() * BASE_SPEED;
        let dominant = Axis::of(wind);

        for blob in &mut self.blobs {
            let angle = self.elapsed * blob.freq + blob.phase;
            let jitter = Vec2::new(angle.sin(), (angle * 0.8).cos()) * JITTER_AMPLITUDE;
            blob.pos += (wind * blob.speed_var + jitter) * dt;
            blob.rotation = (blob.rotation + blob.spin * dt).rem_euclid(TAU);

            let margin = blob.margin();
            let wrapped = wrap_position(&mut blob.pos, ctx.size, margin);
            if wrapped.across(dominant) {
                match dominant {
                    Axis::Y => blob.pos.x = ctx.rng.next_f32() * ctx.size.x,
                    Axis::X => blob.pos.y = ctx.rng.next_f32() * ctx.size.y,
                }
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions, size: Vec2) {
        canvas.fill_rect(
            Vec2::ZERO,
            size,
            Paint::new(options.color(), haze_alpha(options), BlendMode::SourceOver),
        );
        let strength = 0.5 + 0.5 * options.intensity();
        let blobs: Vec<RadialBlob> = self
            .blobs
            .iter()
            .map(|blob| RadialBlob {
                center: blob.pos,
                radii: blob.radii(),
                rotation: blob.rotation,
                color: options.color(),
                alpha: blob.alpha * strength,
            })
            .collect();
        canvas.fill_radial_blobs(&blobs, BlendMode::SourceOver);
    }
}
