use bevy_egui::{egui, EguiContexts};

/// Slate panels that read over both bright fog and dark rain.
pub fn apply_overlay_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let panel = egui::Color32::from_rgba_unmultiplied(28, 33, 42, 235);
    let inactive = egui::Color32::from_rgb(46, 54, 68);
    let hover = egui::Color32::from_rgb(64, 78, 98);
    let accent = egui::Color32::from_rgb(120, 170, 215);

    for (widget, fill) in [
        (&mut style.visuals.widgets.inactive, inactive),
        (&mut style.visuals.widgets.hovered, hover),
        (&mut style.visuals.widgets.active, accent),
    ] {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.corner_radius = egui::CornerRadius::same(4);
    }
    style.visuals.widgets.noninteractive.bg_fill = panel;

    style.visuals.window_fill = panel;
    style.visuals.panel_fill = panel;
    style.visuals.window_corner_radius = egui::CornerRadius::same(6);
    style.visuals.selection.bg_fill = accent;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    ctx.set_style(style);
}
