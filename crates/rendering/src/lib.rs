use bevy::prelude::*;

pub mod camera;
pub mod overlay_image;
pub mod overlay_sync;

use overlay_image::OverlayImage;
use weather_fx::config::{HEADLESS_DEFAULT_HEIGHT, HEADLESS_DEFAULT_WIDTH};
use weather_fx::{settings, WeatherOverlay};

/// Draws the weather overlay over the primary window.
///
/// Props and the motion preference come from the environment unless the app
/// inserted its own resources before adding the plugin.
pub struct WeatherRenderingPlugin;

impl Plugin for WeatherRenderingPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<weather_fx::OverlayProps>() {
            app.insert_resource(settings::props_from_env());
        }
        if !app.world().contains_resource::<weather_fx::MotionPreference>() {
            app.insert_resource(settings::motion_preference_from_env());
        }

        // The first window sync replaces the placeholder geometry.
        let overlay = WeatherOverlay::new(HEADLESS_DEFAULT_WIDTH, HEADLESS_DEFAULT_HEIGHT, 1.0);
        app.insert_resource(overlay)
            .insert_resource(ClearColor(camera::BACKDROP))
            .init_resource::<OverlayImage>()
            .add_systems(
                Startup,
                (camera::setup_camera, overlay_image::spawn_overlay_node),
            )
            .add_systems(
                Update,
                (
                    overlay_sync::sync_surface_geometry,
                    overlay_sync::apply_overlay_props,
                    overlay_sync::advance_overlay,
                    overlay_image::upload_overlay_pixels,
                    overlay_image::sync_overlay_z_index,
                )
                    .chain(),
            );
    }
}
