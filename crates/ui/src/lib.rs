use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod theme;
pub mod weather_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<weather_panel::WeatherPanelVisible>()
            .add_systems(Startup, theme::apply_overlay_theme)
            .add_systems(
                Update,
                (
                    weather_panel::weather_panel_keybinds,
                    weather_panel::weather_panel_ui,
                )
                    .chain()
                    .before(rendering::overlay_sync::apply_overlay_props),
            );
    }
}
