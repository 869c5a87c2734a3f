use bevy::log::info;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::frame_clock::FrameClock;
use crate::options::OptionsPatch;
use crate::raster::PixelSurface;
use crate::renderer::{create_renderer, EffectKind, RendererState, WeatherRenderer};
use crate::surface::SurfaceAdapter;

use super::props::OverlayProps;

/// What `apply_props` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayChange {
    /// No renderer before, one now.
    Created,
    /// The effect kind changed; the old renderer was destroyed.
    Recreated,
    /// Same renderer, new options or motion state.
    Updated,
    /// The renderer was destroyed and the surface cleared.
    TornDown,
    Unchanged,
}

/// Point-in-time overlay summary for panels and headless output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStats {
    pub kind: EffectKind,
    pub state: Option<RendererState>,
    pub particles: usize,
    pub intensity: f32,
    pub seed: Option<u32>,
    pub lit_pixels: usize,
    pub device_width: u32,
    pub device_height: u32,
    pub frames: u64,
}

/// Owns the surface and at most one live renderer.
#[derive(Resource)]
pub struct WeatherOverlay {
    surface: SurfaceAdapter,
    renderer: Option<Box<dyn WeatherRenderer>>,
    applied: Option<OverlayProps>,
    prefers_reduced_motion: bool,
    frames: u64,
}

impl WeatherOverlay {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            surface: SurfaceAdapter::new(width, height, device_pixel_ratio),
            renderer: None,
            applied: None,
            prefers_reduced_motion: false,
            frames: 0,
        }
    }

    pub fn surface(&self) -> &SurfaceAdapter {
        &self.surface
    }

    pub fn pixels(&self) -> Option<&PixelSurface> {
        self.surface.pixels()
    }

    pub fn renderer(&self) -> Option<&dyn WeatherRenderer> {
        self.renderer.as_deref()
    }

    /// Props from the last `apply_props`.
    pub fn applied_props(&self) -> Option<&OverlayProps> {
        self.applied.as_ref()
    }

    pub fn prefers_reduced_motion(&self) -> bool {
        self.prefers_reduced_motion
    }

    /// Frames advanced while a renderer was running.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn motion_allowed(&self, props: &OverlayProps) -> bool {
        props.force_animate || !self.prefers_reduced_motion
    }

    /// Reconcile the live renderer with `props`.
    ///
    /// A kind change (or activation) recreates the renderer; option changes
    /// for the same kind go through a single `set_options`.
    pub fn apply_props(&mut self, props: &OverlayProps) -> OverlayChange {
        self.applied = Some(props.clone());

        if !props.wants_renderer() {
            return if self.teardown() {
                OverlayChange::TornDown
            } else {
                OverlayChange::Unchanged
            };
        }

        let motion = self.motion_allowed(props);
        let patch = props.options_patch(!motion);

        let same_kind = self
            .renderer
            .as_ref()
            .is_some_and(|r| r.kind() == props.kind);
        if same_kind {
            return self.update_renderer(&patch, motion);
        }

        let replaced = self.teardown();
        let Some(mut renderer) = create_renderer(props.kind, &self.surface, &patch) else {
            return OverlayChange::Unchanged;
        };
        if motion {
            renderer.start();
        } else {
            renderer.render_still(self.surface.canvas());
        }
        info!(
            "weather overlay: {} ({} particles, {})",
            props.kind.label(),
            renderer.particle_count(),
            if motion { "animated" } else { "still" }
        );
        self.renderer = Some(renderer);
        if replaced {
            OverlayChange::Recreated
        } else {
            OverlayChange::Created
        }
    }

    fn update_renderer(&mut self, patch: &OptionsPatch, motion: bool) -> OverlayChange {
        let Some(renderer) = self.renderer.as_mut() else {
            return OverlayChange::Unchanged;
        };
        let (_, delta) = renderer.options().merged(patch);
        if delta.any() {
            renderer.set_options(patch);
        }

        let running = renderer.state() == RendererState::Running;
        let motion_changed = running != motion;
        if motion && !running {
            renderer.start();
        } else if !motion && running {
            renderer.stop(self.surface.canvas());
        }
        if !motion && (delta.any() || motion_changed) {
            renderer.render_still(self.surface.canvas());
        }

        if delta.any() || motion_changed {
            OverlayChange::Updated
        } else {
            OverlayChange::Unchanged
        }
    }

    /// Record the system preference and re-apply the last props.
    pub fn set_prefers_reduced_motion(&mut self, prefers: bool) -> OverlayChange {
        if prefers == self.prefers_reduced_motion {
            return OverlayChange::Unchanged;
        }
        self.prefers_reduced_motion = prefers;
        match self.applied.clone() {
            Some(props) => self.apply_props(&props),
            None => OverlayChange::Unchanged,
        }
    }

    /// New container geometry. Returns `true` when the backing store changed.
    pub fn resize_surface(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> bool {
        if !self.surface.set_geometry(width, height, device_pixel_ratio) {
            return false;
        }
        let logical = self.surface.logical_size();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(logical.x, logical.y);
            if renderer.state() != RendererState::Running {
                renderer.render_still(self.surface.canvas());
            }
        }
        true
    }

    /// Feed one frame from `clock`.
    pub fn advance(&mut self, clock: &dyn FrameClock) {
        if let Some(renderer) = self.renderer.as_mut() {
            if renderer.state() == RendererState::Running {
                renderer.on_frame(clock.now_secs(), self.surface.canvas());
                self.frames += 1;
            }
        }
    }

    /// Drive one frame with an explicit delta.
    pub fn tick(&mut self, dt: f32) {
        if let Some(renderer) = self.renderer.as_mut() {
            if renderer.state() == RendererState::Running {
                renderer.tick(dt, self.surface.canvas());
                self.frames += 1;
            }
        }
    }

    /// Destroy the renderer and forget the applied props.
    pub fn unmount(&mut self) {
        self.teardown();
        self.applied = None;
    }

    pub fn stats(&self) -> OverlayStats {
        let (device_width, device_height) = self.surface.device_size();
        let renderer = self.renderer.as_deref();
        OverlayStats {
            kind: renderer.map_or(EffectKind::None, |r| r.kind()),
            state: renderer.map(|r| r.state()),
            particles: renderer.map_or(0, |r| r.particle_count()),
            intensity: renderer.map_or(0.0, |r| r.options().intensity()),
            seed: renderer.map(|r| r.options().seed()),
            lit_pixels: self.surface.pixels().map_or(0, |p| p.lit_pixel_count()),
            device_width,
            device_height,
            frames: self.frames,
        }
    }

    /// Returns whether a renderer existed.
    fn teardown(&mut self) -> bool {
        let Some(mut renderer) = self.renderer.take() else {
            return false;
        };
        renderer.destroy(self.surface.canvas());
        self.surface.clear();
        info!("weather overlay: {} torn down", renderer.kind().label());
        true
    }
}

impl Drop for WeatherOverlay {
    fn drop(&mut self) {
        self.teardown();
    }
}
