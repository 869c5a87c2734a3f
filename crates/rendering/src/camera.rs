use bevy::prelude::*;

/// Backdrop colour under the overlay when no map is loaded.
pub const BACKDROP: Color = Color::srgb(0.16, 0.19, 0.22);

/// The overlay is a UI node, so a plain 2D camera is all it needs.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Name::new("Overlay Camera")));
}
