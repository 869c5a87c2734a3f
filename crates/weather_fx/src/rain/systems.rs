use std::collections::VecDeque;
use std::f32::consts::TAU;

use bevy::math::Vec2;

use crate::canvas::{BlendMode, Canvas, Paint};
use crate::options::{RenderOptions, Rgb, VariantDefaults};
use crate::population::PopulationCurve;
use crate::renderer::{EffectKind, FieldContext, Simulation};

use super::types::*;

// =============================================================================
// Spawning
// =============================================================================

fn new_drop(ctx: &mut FieldContext<'_>, pos: Vec2) -> Raindrop {
    Raindrop {
        pos,
        z: ctx.rng.range(MIN_DEPTH, 1.0),
        speed_var: ctx.rng.range(0.8, 1.2),
        length_var: ctx.rng.range(0.7, 1.3),
        phase: ctx.rng.range(0.0, TAU),
    }
}

/// Recycle a drop at the top edge with a fresh column and depth. Variance and
/// phase stay with the slot.
fn respawn_at_top(drop: &mut Raindrop, ctx: &mut FieldContext<'_>) {
    drop.pos.x = ctx.rng.next_f32() * ctx.size.x;
    drop.pos.y = -ctx.rng.next_f32() * RAIN_MARGIN;
    drop.z = ctx.rng.range(MIN_DEPTH, 1.0);
}

fn out_of_bounds(pos: Vec2, size: Vec2) -> bool {
    pos.y > size.y + RAIN_MARGIN || pos.x < -RAIN_MARGIN || pos.x > size.x + RAIN_MARGIN
}

// =============================================================================
// Physics
// =============================================================================

/// Shared lateral speed before depth scaling.
fn lateral_speed(options: &RenderOptions, elapsed: f32) -> f32 {
    options.wind_vector().x * options.wind_speed() * WIND_DRIFT
        + (elapsed * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE
}

fn drop_velocity(drop: &Raindrop, lateral: f32, elapsed: f32) -> Vec2 {
    let wobble = (elapsed * 3.0 + drop.phase).sin() * WOBBLE_AMPLITUDE;
    Vec2::new(
        (lateral + wobble) * drop.z,
        FALL_SPEED * drop.z * drop.speed_var,
    )
}

fn step_drops(field: &mut RainField, dt: f32, ctx: &mut FieldContext<'_>) {
    let elapsed = field.elapsed;
    let lateral = lateral_speed(ctx.options, elapsed);
    for drop in &mut field.drops {
        let velocity = drop_velocity(drop, lateral, elapsed);
        drop.pos += velocity * dt;
        if !drop.pos.is_finite() || out_of_bounds(drop.pos, ctx.size) {
            respawn_at_top(drop, ctx);
        }
    }
}

fn step_ripples(ripples: &mut VecDeque<Ripple>, dt: f32, ctx: &mut FieldContext<'_>) {
    for ripple in ripples.iter_mut() {
        ripple.age += dt;
    }
    ripples.retain(|r| r.age < RIPPLE_LIFETIME);

    // Expected spawns this frame; the fractional part is a Bernoulli trial.
    let mut budget = ctx.options.intensity() * RIPPLE_RATE * dt;
    while budget > 0.0 {
        if ctx.rng.chance(budget) {
            let center = Vec2::new(
                ctx.rng.next_f32() * ctx.size.x,
                ctx.rng.range(ctx.size.y * RIPPLE_GROUND_LINE, ctx.size.y),
            );
            let max_radius = ctx.rng.range(RIPPLE_MIN_RADIUS, RIPPLE_MAX_RADIUS);
            if ripples.len() >= MAX_RIPPLES {
                ripples.pop_front();
            }
            ripples.push_back(Ripple {
                center,
                age: 0.0,
                max_radius,
            });
        }
        budget -= 1.0;
    }
}

fn step_lightning(lightning: &mut Lightning, dt: f32, ctx: &mut FieldContext<'_>) {
    if ctx.options.intensity() > LIGHTNING_THRESHOLD {
        let next = match lightning.next_strike {
            Some(next) => next,
            None => {
                let next = ctx.rng.range(LIGHTNING_MIN_DELAY, LIGHTNING_MAX_DELAY);
                lightning.timer = 0.0;
                lightning.next_strike = Some(next);
                next
            }
        };
        lightning.timer += dt;
        if lightning.timer >= next {
            lightning.flash = ctx.rng.range(0.7, 1.0);
            lightning.strikes += 1;
            lightning.timer = 0.0;
            lightning.next_strike = Some(ctx.rng.range(LIGHTNING_MIN_DELAY, LIGHTNING_MAX_DELAY));
            return;
        }
    } else {
        lightning.next_strike = None;
        lightning.timer = 0.0;
    }

    if lightning.flash > 0.0 {
        let flicker = (ctx.rng.next_f32() - 0.5) * FLASH_FLICKER * lightning.flash;
        let flash = lightning.flash - FLASH_DECAY * dt + flicker;
        lightning.flash = if flash < FLASH_EPSILON {
            0.0
        } else {
            flash.min(1.0)
        };
    }
}

fn ambient_alpha(options: &RenderOptions, elapsed: f32) -> f32 {
    let breathing = 1.0 + 0.1 * (elapsed * 0.25).sin();
    (AMBIENT_BASE_ALPHA + AMBIENT_INTENSITY_ALPHA * options.intensity()) * breathing
}

// =============================================================================
// Drawing
// =============================================================================

fn draw_rain(field: &RainField, canvas: &mut dyn Canvas, options: &RenderOptions, size: Vec2) {
    let intensity = options.intensity();

    canvas.fill_rect(
        Vec2::ZERO,
        size,
        Paint::new(AMBIENT_TINT, field.ambient_alpha, BlendMode::SourceOver),
    );
    if field.lightning.flash > 0.0 {
        canvas.fill_rect(
            Vec2::ZERO,
            size,
            Paint::new(
                Rgb::WHITE,
                field.lightning.flash * FLASH_TINT_ALPHA,
                BlendMode::Screen,
            ),
        );
    }

    let lateral = lateral_speed(options, field.elapsed);
    let strength = 0.5 + 0.5 * intensity;
    for drop in &field.drops {
        let velocity = drop_velocity(drop, lateral, field.elapsed);
        let dir = velocity.normalize_or_zero();
        let tail = drop.pos - dir * STROKE_LENGTH * drop.z * drop.length_var;
        let alpha = (0.2 + 0.55 * drop.z) * strength;
        canvas.stroke_line(
            tail,
            drop.pos,
            STROKE_WIDTH * drop.z,
            Paint::new(options.color(), alpha, BlendMode::Screen),
        );
    }

    for ripple in &field.ripples {
        let radius = ripple.radius();
        let alpha = (1.0 - ripple.progress()) * RIPPLE_ALPHA * strength;
        canvas.stroke_ellipse(
            ripple.center,
            Vec2::new(radius, radius * RIPPLE_ASPECT),
            1.0,
            Paint::new(options.color(), alpha, BlendMode::Screen),
        );
    }
}

// =============================================================================
// Simulation
// =============================================================================

impl Simulation for RainField {
    type Particle = Raindrop;

    const KIND: EffectKind = EffectKind::Rain;
    const DEFAULTS: VariantDefaults = RAIN_DEFAULTS;
    const POPULATION: PopulationCurve = RAIN_POPULATION;

    fn particles(&self) -> &[Raindrop] {
        &self.drops
    }

    fn particles_mut(&mut self) -> &mut Vec<Raindrop> {
        &mut self.drops
    }

    /// Scatter over the whole column, including the band above the top edge.
    fn spawn(ctx: &mut FieldContext<'_>) -> Raindrop {
        let pos = Vec2::new(
            ctx.rng.next_f32() * ctx.size.x,
            ctx.rng.range(-RAIN_MARGIN, ctx.size.y),
        );
        new_drop(ctx, pos)
    }

    fn population_changed(&mut self, rebuilt: bool) {
        // Ripple positions belong to the old geometry.
        if rebuilt {
            self.ripples.clear();
        }
    }

    fn step(&mut self, dt: f32, ctx: &mut FieldContext<'_>) {
        self.elapsed += dt;
        self.ambient_alpha = ambient_alpha(ctx.options, self.elapsed);
        step_lightning(&mut self.lightning, dt, ctx);
        step_drops(self, dt, ctx);
        step_ripples(&mut self.ripples, dt, ctx);
    }

    fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions, size: Vec2) {
        draw_rain(self, canvas, options, size);
    }

    fn release(&mut self) {
        self.drops = Vec::new();
        self.ripples = VecDeque::new();
        self.lightning = Lightning::default();
    }
}
