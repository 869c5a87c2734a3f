//! Full-window UI image that shows the overlay's pixel surface.

use bevy::picking::PickingBehavior;
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use weather_fx::raster::PixelSurface;
use weather_fx::{OverlayProps, WeatherOverlay};

/// Handle to the texture the overlay uploads into.
#[derive(Resource, Default)]
pub struct OverlayImage(pub Handle<Image>);

/// Marker for the overlay's UI node.
#[derive(Component)]
pub struct WeatherOverlayNode;

fn extent_of(pixels: &PixelSurface) -> Extent3d {
    Extent3d {
        width: pixels.width(),
        height: pixels.height(),
        depth_or_array_layers: 1,
    }
}

/// Build a texture holding the surface's current pixels.
pub fn create_overlay_image(pixels: &PixelSurface) -> Image {
    let mut image = Image::new(
        extent_of(pixels),
        TextureDimension::D2,
        pixels.to_rgba8(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = bevy::image::ImageSampler::linear();
    image
}

/// The overlay covers the whole window, draws above the map and never takes
/// pointer input.
pub fn spawn_overlay_node(
    mut commands: Commands,
    props: Res<OverlayProps>,
    image: Res<OverlayImage>,
) {
    commands.spawn((
        ImageNode::new(image.0.clone()),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        ZIndex(props.z_index),
        PickingBehavior::IGNORE,
        WeatherOverlayNode,
        Name::new("Weather Overlay"),
    ));
}

/// Copy the surface into the overlay texture whenever the overlay changed.
///
/// Same-sized frames overwrite the existing image data; a new device size
/// swaps in a fresh image.
pub fn upload_overlay_pixels(
    overlay: Res<WeatherOverlay>,
    mut images: ResMut<Assets<Image>>,
    mut handle: ResMut<OverlayImage>,
    mut nodes: Query<&mut ImageNode, With<WeatherOverlayNode>>,
) {
    if !overlay.is_changed() {
        return;
    }
    let Some(pixels) = overlay.pixels() else {
        return;
    };

    let extent = extent_of(pixels);
    if let Some(image) = images.get_mut(&handle.0) {
        if image.texture_descriptor.size == extent {
            image.data = pixels.to_rgba8();
            return;
        }
    }

    let old = std::mem::replace(&mut handle.0, images.add(create_overlay_image(pixels)));
    images.remove(&old);
    for mut node in &mut nodes {
        node.image = handle.0.clone();
    }
    debug!(
        "weather overlay texture reallocated at {}x{}",
        extent.width, extent.height
    );
}

/// Keep the node's stacking order in step with the props.
pub fn sync_overlay_z_index(
    props: Res<OverlayProps>,
    mut nodes: Query<&mut ZIndex, With<WeatherOverlayNode>>,
) {
    if !props.is_changed() {
        return;
    }
    for mut z in &mut nodes {
        if z.0 != props.z_index {
            z.0 = props.z_index;
        }
    }
}
