//! Weather overlay controls panel.
//!
//! An egui window that edits the [`OverlayProps`] resource: effect type,
//! intensity, seed, wind, tint and motion settings. Edits go through a copy
//! and are written back only when something changed, so an idle panel does
//! not trigger a props re-apply every frame.
//!
//! Keys (ignored while a text field has focus):
//! - F1 toggles the panel
//! - 0 / 1 / 2 / 3 pick none / rain / snow / fog

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use weather_fx::options::Rgb;
use weather_fx::{EffectKind, MotionPreference, OverlayProps, RendererState, WeatherOverlay};

// =============================================================================
// Resources
// =============================================================================

/// Whether the weather panel is visible.
#[derive(Resource)]
pub struct WeatherPanelVisible(pub bool);

impl Default for WeatherPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn weather_panel_keybinds(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut visible: ResMut<WeatherPanelVisible>,
    mut props: ResMut<OverlayProps>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }

    if keyboard.just_pressed(KeyCode::F1) {
        visible.0 = !visible.0;
    }
    for key in keyboard.get_just_pressed() {
        if let Some(kind) = kind_for_key(*key) {
            if props.kind != kind {
                props.kind = kind;
            }
        }
    }
}

/// Renders the weather controls window.
pub fn weather_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<WeatherPanelVisible>,
    mut props: ResMut<OverlayProps>,
    mut motion: ResMut<MotionPreference>,
    overlay: Res<WeatherOverlay>,
) {
    if !visible.0 {
        return;
    }

    let mut edited = props.clone();
    let mut reduced = motion.prefers_reduced_motion;

    let mut open = true;
    egui::Window::new("Weather")
        .open(&mut open)
        .resizable(false)
        .default_width(260.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.spacing_mut().item_spacing.y = 6.0;

            ui.heading(status_line(&overlay));
            ui.separator();

            ui.checkbox(&mut edited.active, "Active");
            ui.horizontal(|ui| {
                for kind in EffectKind::ALL {
                    ui.selectable_value(&mut edited.kind, kind, kind_title(kind));
                }
            });
            ui.add(egui::Slider::new(&mut edited.intensity, 0.0..=1.0).text("intensity"));

            ui.separator();
            seed_controls(ui, &mut edited, &overlay);
            wind_controls(ui, &mut edited, &overlay);
            color_controls(ui, &mut edited, &overlay);

            ui.separator();
            ui.checkbox(&mut reduced, "Prefer reduced motion");
            ui.checkbox(&mut edited.force_animate, "Animate anyway");

            ui.separator();
            stats_grid(ui, &overlay);
        });

    if !open {
        visible.0 = false;
    }
    if edited != *props {
        *props = edited;
    }
    if reduced != motion.prefers_reduced_motion {
        motion.prefers_reduced_motion = reduced;
    }
}

// =============================================================================
// Sections
// =============================================================================

fn seed_controls(ui: &mut egui::Ui, props: &mut OverlayProps, overlay: &WeatherOverlay) {
    let mut fixed = props.seed.is_some();
    ui.horizontal(|ui| {
        ui.checkbox(&mut fixed, "Fixed seed");
        if !fixed {
            props.seed = None;
            return;
        }
        let seed = props
            .seed
            .get_or_insert_with(|| overlay.stats().seed.unwrap_or(0));
        ui.add(egui::DragValue::new(seed));
    });
}

fn wind_controls(ui: &mut egui::Ui, props: &mut OverlayProps, overlay: &WeatherOverlay) {
    let mut custom = props.wind_speed.is_some() || props.wind_direction.is_some();
    ui.checkbox(&mut custom, "Custom wind");
    if !custom {
        props.wind_speed = None;
        props.wind_direction = None;
        return;
    }

    let current = overlay.renderer().map(|r| r.options());
    let speed = props
        .wind_speed
        .get_or_insert_with(|| current.map_or(0.5, |o| o.wind_speed()));
    ui.add(egui::Slider::new(speed, 0.0..=2.0).text("speed"));
    let direction = props
        .wind_direction
        .get_or_insert_with(|| current.map_or(0.0, |o| o.wind_direction()));
    ui.add(
        egui::Slider::new(direction, 0.0..=359.0)
            .text("direction")
            .suffix("°"),
    );
}

fn color_controls(ui: &mut egui::Ui, props: &mut OverlayProps, overlay: &WeatherOverlay) {
    let mut custom = props.color.is_some();
    ui.horizontal(|ui| {
        ui.checkbox(&mut custom, "Custom tint");
        if !custom {
            props.color = None;
            return;
        }
        let color = props.color.get_or_insert_with(|| {
            overlay
                .renderer()
                .map_or(Rgb::WHITE, |r| r.options().color())
        });
        let mut rgb = [color.r, color.g, color.b];
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            *color = Rgb::new(rgb[0], rgb[1], rgb[2]);
        }
    });
}

fn stats_grid(ui: &mut egui::Ui, overlay: &WeatherOverlay) {
    let stats = overlay.stats();
    egui::Grid::new("weather_stats")
        .num_columns(2)
        .show(ui, |ui| {
            ui.label("Particles");
            ui.label(stats.particles.to_string());
            ui.end_row();
            ui.label("Surface");
            ui.label(format!("{}x{}", stats.device_width, stats.device_height));
            ui.end_row();
            ui.label("Lit pixels");
            ui.label(stats.lit_pixels.to_string());
            ui.end_row();
            ui.label("Frames");
            ui.label(stats.frames.to_string());
            ui.end_row();
        });
}

// =============================================================================
// Helpers
// =============================================================================

fn kind_for_key(key: KeyCode) -> Option<EffectKind> {
    match key {
        KeyCode::Digit0 => Some(EffectKind::None),
        KeyCode::Digit1 => Some(EffectKind::Rain),
        KeyCode::Digit2 => Some(EffectKind::Snow),
        KeyCode::Digit3 => Some(EffectKind::Fog),
        _ => None,
    }
}

fn kind_title(kind: EffectKind) -> &'static str {
    match kind {
        EffectKind::None => "None",
        EffectKind::Rain => "Rain",
        EffectKind::Snow => "Snow",
        EffectKind::Fog => "Fog",
    }
}

fn state_label(state: Option<RendererState>) -> &'static str {
    match state {
        None => "off",
        Some(RendererState::Uninitialized) => "idle",
        Some(RendererState::Running) => "running",
        Some(RendererState::Stopped) => "paused",
        Some(RendererState::Destroyed) => "destroyed",
    }
}

fn status_line(overlay: &WeatherOverlay) -> String {
    let stats = overlay.stats();
    if stats.state.is_none() {
        return "Clear skies".to_string();
    }
    format!(
        "{} ({:.0}%, {})",
        kind_title(stats.kind),
        stats.intensity * 100.0,
        state_label(stats.state)
    )
}
