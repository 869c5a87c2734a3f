//! Renderer contract shared by every weather variant.
//!
//! [`EffectRenderer`] owns the lifecycle, the options snapshot, the RNG and
//! the frame timer. The variant-specific half (what a particle is, how it
//! moves, how it is drawn) lives behind [`Simulation`].

use std::sync::Arc;

use bevy::log::{debug, info};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::frame_clock::{clamp_frame_dt, FrameTimer};
use crate::fx_rng::FxRng;
use crate::options::{OptionsPatch, RenderOptions, VariantDefaults};
use crate::population::PopulationCurve;
use crate::surface::{clamp_logical_size, SurfaceAdapter};

/// Which effect an overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    #[default]
    None,
    Rain,
    Snow,
    Fog,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::None,
        EffectKind::Rain,
        EffectKind::Snow,
        EffectKind::Fog,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EffectKind::None => "none",
            EffectKind::Rain => "rain",
            EffectKind::Snow => "snow",
            EffectKind::Fog => "fog",
        }
    }
}

/// Renderer lifecycle. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererState {
    Uninitialized,
    Running,
    Stopped,
    Destroyed,
}

/// Object-safe renderer interface used by the overlay.
pub trait WeatherRenderer: Send + Sync {
    fn kind(&self) -> EffectKind;

    fn state(&self) -> RendererState;

    /// Current options snapshot.
    fn options(&self) -> &RenderOptions;

    fn particle_count(&self) -> usize;

    /// `Uninitialized | Stopped -> Running`. Idempotent.
    fn start(&mut self);

    /// `Running -> Stopped`; clears the canvas. Idempotent.
    fn stop(&mut self, canvas: &mut dyn Canvas);

    /// Stops and releases the particle field. Every later call is a no-op.
    fn destroy(&mut self, canvas: &mut dyn Canvas);

    /// New logical size (clamped to at least 1x1); rebuilds the field.
    fn resize(&mut self, width: f32, height: f32);

    /// Merge a partial update into a fresh options snapshot.
    fn set_options(&mut self, patch: &OptionsPatch);

    /// Advance and draw one frame. Ignored unless running.
    fn tick(&mut self, dt: f32, canvas: &mut dyn Canvas);

    /// Frame-clock callback: derives the delta from `now` and ticks.
    fn on_frame(&mut self, now: f64, canvas: &mut dyn Canvas);

    /// Draw the current field without advancing physics.
    fn render_still(&mut self, canvas: &mut dyn Canvas);
}

/// What a variant sees while spawning or stepping particles.
pub struct FieldContext<'a> {
    pub options: &'a RenderOptions,
    /// Logical surface size.
    pub size: Vec2,
    pub rng: &'a mut FxRng,
}

/// Variant-specific half of a renderer.
pub trait Simulation: Default + Send + Sync + 'static {
    type Particle: Send + Sync;

    const KIND: EffectKind;
    const DEFAULTS: VariantDefaults;
    const POPULATION: PopulationCurve;

    fn particles(&self) -> &[Self::Particle];

    fn particles_mut(&mut self) -> &mut Vec<Self::Particle>;

    /// A fresh particle scattered anywhere on the surface.
    fn spawn(ctx: &mut FieldContext<'_>) -> Self::Particle;

    /// Called after the particle array changed size. `rebuilt` is true for a
    /// full rebuild, false for a delta reconcile.
    fn population_changed(&mut self, _rebuilt: bool) {}

    /// Integrate one frame of physics, including any global effects.
    fn step(&mut self, dt: f32, ctx: &mut FieldContext<'_>);

    fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions, size: Vec2);

    /// Drop every particle and any auxiliary state.
    fn release(&mut self) {
        *self.particles_mut() = Vec::new();
    }
}

/// Owning renderer for one variant.
pub struct EffectRenderer<S: Simulation> {
    sim: S,
    options: Arc<RenderOptions>,
    size: Vec2,
    state: RendererState,
    rng: FxRng,
    timer: FrameTimer,
    /// Drawn once so counts stay monotone in intensity and area.
    count_jitter: f32,
}

impl<S: Simulation> EffectRenderer<S> {
    /// Build a renderer sized to `surface` and populate its field.
    pub fn new(surface: &SurfaceAdapter, patch: &OptionsPatch) -> Self {
        let options = RenderOptions::new(&S::DEFAULTS, patch);
        let mut rng = FxRng::from_seed(options.seed());
        let count_jitter = rng.range(0.9, 1.1);
        let mut renderer = Self {
            sim: S::default(),
            options: Arc::new(options),
            size: surface.logical_size(),
            state: RendererState::Uninitialized,
            rng,
            timer: FrameTimer::default(),
            count_jitter,
        };
        renderer.rebuild();
        info!(
            "{} renderer created: {} particles, seed {}",
            S::KIND.label(),
            renderer.sim.particles().len(),
            renderer.options.seed()
        );
        renderer
    }

    pub fn simulation(&self) -> &S {
        &self.sim
    }

    pub fn logical_size(&self) -> Vec2 {
        self.size
    }

    /// Particle count the current options and size call for.
    pub fn target_count(&self) -> usize {
        S::POPULATION.count(self.options.intensity(), self.size, self.count_jitter)
    }

    fn rebuild(&mut self) {
        let target = self.target_count();
        let mut ctx = FieldContext {
            options: &self.options,
            size: self.size,
            rng: &mut self.rng,
        };
        let field = self.sim.particles_mut();
        field.clear();
        field.reserve(target);
        for _ in 0..target {
            field.push(S::spawn(&mut ctx));
        }
        self.sim.population_changed(true);
        debug!("{} field rebuilt: {target} particles", S::KIND.label());
    }

    /// Spawn or truncate only the difference; survivors keep their state.
    fn reconcile(&mut self) {
        let target = self.target_count();
        let mut ctx = FieldContext {
            options: &self.options,
            size: self.size,
            rng: &mut self.rng,
        };
        let field = self.sim.particles_mut();
        let before = field.len();
        if field.len() > target {
            field.truncate(target);
        } else {
            field.reserve(target - field.len());
            while field.len() < target {
                field.push(S::spawn(&mut ctx));
            }
        }
        self.sim.population_changed(false);
        debug!(
            "{} field reconciled: {before} -> {target} particles",
            S::KIND.label()
        );
    }
}

impl<S: Simulation> WeatherRenderer for EffectRenderer<S> {
    fn kind(&self) -> EffectKind {
        S::KIND
    }

    fn state(&self) -> RendererState {
        self.state
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn particle_count(&self) -> usize {
        self.sim.particles().len()
    }

    fn start(&mut self) {
        match self.state {
            RendererState::Running | RendererState::Destroyed => return,
            RendererState::Uninitialized | RendererState::Stopped => {}
        }
        if self.sim.particles().is_empty() {
            self.rebuild();
        }
        self.timer.reset();
        self.state = RendererState::Running;
        debug!("{} renderer started", S::KIND.label());
    }

    fn stop(&mut self, canvas: &mut dyn Canvas) {
        if self.state == RendererState::Destroyed {
            return;
        }
        if self.state == RendererState::Running {
            self.state = RendererState::Stopped;
            debug!("{} renderer stopped", S::KIND.label());
        }
        canvas.clear();
    }

    fn destroy(&mut self, canvas: &mut dyn Canvas) {
        if self.state == RendererState::Destroyed {
            return;
        }
        self.stop(canvas);
        self.sim.release();
        self.state = RendererState::Destroyed;
        info!("{} renderer destroyed", S::KIND.label());
    }

    fn resize(&mut self, width: f32, height: f32) {
        if self.state == RendererState::Destroyed {
            return;
        }
        self.size = clamp_logical_size(width, height);
        self.rebuild();
    }

    fn set_options(&mut self, patch: &OptionsPatch) {
        if self.state == RendererState::Destroyed {
            return;
        }
        let (next, delta) = self.options.merged(patch);
        if !delta.any() {
            return;
        }
        self.options = Arc::new(next);
        if delta.seed {
            self.rng = FxRng::from_seed(self.options.seed());
        }
        if delta.changes_population() {
            self.reconcile();
        }
    }

    fn tick(&mut self, dt: f32, canvas: &mut dyn Canvas) {
        if self.state != RendererState::Running {
            return;
        }
        let dt = clamp_frame_dt(dt);
        canvas.clear();
        let mut ctx = FieldContext {
            options: &self.options,
            size: self.size,
            rng: &mut self.rng,
        };
        self.sim.step(dt, &mut ctx);
        self.sim.draw(canvas, &self.options, self.size);
    }

    fn on_frame(&mut self, now: f64, canvas: &mut dyn Canvas) {
        if self.state != RendererState::Running {
            return;
        }
        let dt = self.timer.delta(now);
        self.tick(dt, canvas);
    }

    fn render_still(&mut self, canvas: &mut dyn Canvas) {
        if self.state == RendererState::Destroyed {
            return;
        }
        canvas.clear();
        self.sim.draw(canvas, &self.options, self.size);
    }
}

/// Factory for `kind`; `None` for [`EffectKind::None`].
pub fn create_renderer(
    kind: EffectKind,
    surface: &SurfaceAdapter,
    patch: &OptionsPatch,
) -> Option<Box<dyn WeatherRenderer>> {
    match kind {
        EffectKind::None => None,
        EffectKind::Rain => Some(Box::new(crate::rain::create_rain_renderer(surface, patch))),
        EffectKind::Snow => Some(Box::new(crate::snow::create_snow_renderer(surface, patch))),
        EffectKind::Fog => Some(Box::new(crate::fog::create_fog_renderer(surface, patch))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BlendMode, Dot, Paint};
    use crate::options::Rgb;

    /// Minimal variant: one dot per particle, drifting right.
    #[derive(Default)]
    struct Dots {
        field: Vec<(Vec2, f32)>,
        changes: Vec<bool>,
    }

    impl Simulation for Dots {
        type Particle = (Vec2, f32);

        const KIND: EffectKind = EffectKind::Snow;
        const DEFAULTS: VariantDefaults = VariantDefaults {
            color: Rgb::WHITE,
            wind_speed: 0.0,
            wind_direction: 0.0,
        };
        const POPULATION: PopulationCurve = PopulationCurve {
            base: 10.0,
            per_intensity: 200.0,
            min: 1,
            max: 500,
            area_exponent: 1.0,
        };

        fn particles(&self) -> &[Self::Particle] {
            &self.field
        }

        fn particles_mut(&mut self) -> &mut Vec<Self::Particle> {
            &mut self.field
        }

        fn spawn(ctx: &mut FieldContext<'_>) -> Self::Particle {
            let pos = Vec2::new(
                ctx.rng.range(0.0, ctx.size.x),
                ctx.rng.range(0.0, ctx.size.y),
            );
            (pos, ctx.rng.next_f32())
        }

        fn population_changed(&mut self, rebuilt: bool) {
            self.changes.push(rebuilt);
        }

        fn step(&mut self, dt: f32, _ctx: &mut FieldContext<'_>) {
            for (pos, _) in &mut self.field {
                pos.x += 10.0 * dt;
            }
        }

        fn draw(&self, canvas: &mut dyn Canvas, options: &RenderOptions, _size: Vec2) {
            let dots: Vec<Dot> = self
                .field
                .iter()
                .map(|(center, _)| Dot {
                    center: *center,
                    radius: 2.0,
                })
                .collect();
            canvas.fill_dots(
                &dots,
                Paint::new(options.color(), 1.0, BlendMode::SourceOver),
            );
        }
    }

    fn renderer(patch: OptionsPatch) -> (SurfaceAdapter, EffectRenderer<Dots>) {
        let surface = SurfaceAdapter::new(400.0, 300.0, 1.0);
        let renderer = EffectRenderer::<Dots>::new(&surface, &patch.with_seed(11));
        (surface, renderer)
    }

    #[test]
    fn test_lifecycle_transitions() {
        let (mut surface, mut r) = renderer(OptionsPatch::default());
        assert_eq!(r.state(), RendererState::Uninitialized);
        r.start();
        assert_eq!(r.state(), RendererState::Running);
        r.start();
        assert_eq!(r.state(), RendererState::Running);
        r.stop(surface.canvas());
        assert_eq!(r.state(), RendererState::Stopped);
        r.stop(surface.canvas());
        assert_eq!(r.state(), RendererState::Stopped);
        r.start();
        assert_eq!(r.state(), RendererState::Running);
        r.destroy(surface.canvas());
        assert_eq!(r.state(), RendererState::Destroyed);
        assert_eq!(r.particle_count(), 0);
    }

    #[test]
    fn test_calls_after_destroy_are_noops() {
        let (mut surface, mut r) = renderer(OptionsPatch::default());
        r.destroy(surface.canvas());
        r.start();
        r.resize(500.0, 500.0);
        r.set_options(&OptionsPatch::default().with_intensity(1.0));
        r.tick(0.016, surface.canvas());
        r.render_still(surface.canvas());
        assert_eq!(r.state(), RendererState::Destroyed);
        assert_eq!(r.particle_count(), 0);
        assert!(surface.pixels().is_some_and(|p| p.is_clear()));
    }

    #[test]
    fn test_tick_only_runs_while_running() {
        let (mut surface, mut r) = renderer(OptionsPatch::default());
        let before: Vec<Vec2> = r.simulation().field.iter().map(|p| p.0).collect();
        r.tick(0.05, surface.canvas());
        let after: Vec<Vec2> = r.simulation().field.iter().map(|p| p.0).collect();
        assert_eq!(before, after);
        assert!(surface.pixels().is_some_and(|p| p.is_clear()));

        r.start();
        r.tick(0.05, surface.canvas());
        assert!((r.simulation().field[0].0.x - before[0].x - 0.5).abs() < 1e-4);
        assert!(surface.pixels().is_some_and(|p| !p.is_clear()));
    }

    #[test]
    fn test_stop_clears_canvas() {
        let (mut surface, mut r) = renderer(OptionsPatch::default());
        r.start();
        r.tick(0.016, surface.canvas());
        r.stop(surface.canvas());
        assert!(surface.pixels().is_some_and(|p| p.is_clear()));
    }

    #[test]
    fn test_resize_clamps_and_rebuilds() {
        let (_, mut r) = renderer(OptionsPatch::default());
        r.resize(f32::NAN, -5.0);
        assert_eq!(r.logical_size(), Vec2::ONE);
        assert_eq!(r.simulation().changes.last(), Some(&true));
        assert_eq!(r.particle_count(), Dots::POPULATION.min);
    }

    #[test]
    fn test_intensity_change_reconciles_delta() {
        let (_, mut r) = renderer(OptionsPatch::default().with_intensity(0.2));
        let before: Vec<(Vec2, f32)> = r.simulation().field.clone();
        r.set_options(&OptionsPatch::default().with_intensity(0.9));
        let after = &r.simulation().field;
        assert!(after.len() > before.len());
        assert_eq!(&after[..before.len()], &before[..]);
        assert_eq!(r.simulation().changes.last(), Some(&false));

        r.set_options(&OptionsPatch::default().with_intensity(0.1));
        let shrunk = &r.simulation().field;
        assert!(shrunk.len() < before.len());
        assert_eq!(&shrunk[..], &before[..shrunk.len()]);
    }

    #[test]
    fn test_cosmetic_change_keeps_field() {
        let (_, mut r) = renderer(OptionsPatch::default());
        let before = r.simulation().field.clone();
        let rebuilds = r.simulation().changes.len();
        r.set_options(
            &OptionsPatch::default()
                .with_color(Rgb::new(1, 2, 3))
                .with_wind(3.0, 180.0)
                .with_seed(99),
        );
        assert_eq!(r.simulation().field, before);
        assert_eq!(r.simulation().changes.len(), rebuilds);
        assert_eq!(r.options().seed(), 99);
        assert_eq!(r.options().color(), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_on_frame_first_delta_is_zero() {
        let (mut surface, mut r) = renderer(OptionsPatch::default());
        r.start();
        let before = r.simulation().field[0].0;
        r.on_frame(100.0, surface.canvas());
        assert_eq!(r.simulation().field[0].0, before);
        r.on_frame(100.05, surface.canvas());
        assert!(r.simulation().field[0].0.x > before.x);
    }

    #[test]
    fn test_render_still_draws_without_stepping() {
        let (mut surface, mut r) = renderer(OptionsPatch::default());
        let before = r.simulation().field.clone();
        r.render_still(surface.canvas());
        assert_eq!(r.simulation().field, before);
        assert!(surface.pixels().is_some_and(|p| !p.is_clear()));
    }

    #[test]
    fn test_create_renderer_none_kind() {
        let surface = SurfaceAdapter::new(10.0, 10.0, 1.0);
        assert!(create_renderer(EffectKind::None, &surface, &OptionsPatch::default()).is_none());
        let fog = create_renderer(EffectKind::Fog, &surface, &OptionsPatch::default());
        assert_eq!(fog.map(|r| r.kind()), Some(EffectKind::Fog));
    }
}
