//! Keeps the [`WeatherOverlay`] resource in step with the window, the
//! overlay props and the frame clock.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use weather_fx::{MotionPreference, OverlayChange, OverlayProps, RendererState, WeatherOverlay};

/// Resize the overlay surface to the primary window.
///
/// Only marks the overlay changed when the backing store was reallocated, so
/// an idle overlay is not re-uploaded every frame.
pub fn sync_surface_geometry(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut overlay: ResMut<WeatherOverlay>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let resized = overlay.bypass_change_detection().resize_surface(
        window.width(),
        window.height(),
        window.scale_factor(),
    );
    if resized {
        let (w, h) = overlay.surface().device_size();
        debug!(
            "weather overlay surface {}x{} logical -> {w}x{h} device",
            window.width(),
            window.height()
        );
        overlay.set_changed();
    }
}

/// Push changed props or motion preference into the overlay.
pub fn apply_overlay_props(
    props: Res<OverlayProps>,
    motion: Res<MotionPreference>,
    mut overlay: ResMut<WeatherOverlay>,
) {
    if motion.is_changed() {
        let change = overlay
            .bypass_change_detection()
            .set_prefers_reduced_motion(motion.prefers_reduced_motion);
        if change != OverlayChange::Unchanged {
            overlay.set_changed();
        }
    }
    if props.is_changed() {
        let change = overlay.bypass_change_detection().apply_props(&props);
        if change != OverlayChange::Unchanged {
            debug!("weather overlay props applied: {change:?}");
            overlay.set_changed();
        }
    }
}

/// Feed the frame clock to a running renderer.
pub fn advance_overlay(time: Res<Time>, mut overlay: ResMut<WeatherOverlay>) {
    let running = overlay
        .renderer()
        .is_some_and(|r| r.state() == RendererState::Running);
    if running {
        overlay.advance(&*time);
    }
}
