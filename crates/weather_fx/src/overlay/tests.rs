#[cfg(test)]
mod tests {
    use crate::frame_clock::ManualClock;
    use crate::overlay::{OverlayChange, OverlayProps, WeatherOverlay};
    use crate::renderer::{EffectKind, RendererState};

    fn overlay() -> WeatherOverlay {
        WeatherOverlay::new(320.0, 240.0, 1.0)
    }

    fn rain() -> OverlayProps {
        OverlayProps::default()
            .with_kind(EffectKind::Rain)
            .with_seed(42)
    }

    fn state(o: &WeatherOverlay) -> Option<RendererState> {
        o.renderer().map(|r| r.state())
    }

    // -------------------------------------------------------------------------
    // Creation and teardown
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_apply_creates_and_starts() {
        let mut o = overlay();
        assert_eq!(o.apply_props(&rain()), OverlayChange::Created);
        assert_eq!(state(&o), Some(RendererState::Running));
        assert_eq!(o.renderer().map(|r| r.kind()), Some(EffectKind::Rain));
    }

    #[test]
    fn test_none_kind_or_inactive_renders_nothing() {
        let mut o = overlay();
        assert_eq!(
            o.apply_props(&OverlayProps::default()),
            OverlayChange::Unchanged
        );
        assert!(o.renderer().is_none());

        let mut inactive = rain();
        inactive.active = false;
        assert_eq!(o.apply_props(&inactive), OverlayChange::Unchanged);
        assert!(o.renderer().is_none());
    }

    #[test]
    fn test_deactivate_tears_down_and_clears() {
        let mut o = overlay();
        o.apply_props(&rain());
        for _ in 0..5 {
            o.tick(1.0 / 60.0);
        }
        assert!(o.pixels().is_some_and(|p| !p.is_clear()));

        let mut off = rain();
        off.active = false;
        assert_eq!(o.apply_props(&off), OverlayChange::TornDown);
        assert!(o.renderer().is_none());
        assert!(o.pixels().is_some_and(|p| p.is_clear()));

        // Flipping back on creates a fresh renderer.
        assert_eq!(o.apply_props(&rain()), OverlayChange::Created);
    }

    #[test]
    fn test_kind_change_recreates() {
        let mut o = overlay();
        o.apply_props(&rain());
        let snow = rain().with_kind(EffectKind::Snow);
        assert_eq!(o.apply_props(&snow), OverlayChange::Recreated);
        assert_eq!(o.renderer().map(|r| r.kind()), Some(EffectKind::Snow));
        assert_eq!(state(&o), Some(RendererState::Running));
    }

    #[test]
    fn test_none_kind_tears_down() {
        let mut o = overlay();
        o.apply_props(&rain());
        assert_eq!(
            o.apply_props(&rain().with_kind(EffectKind::None)),
            OverlayChange::TornDown
        );
        assert!(o.renderer().is_none());
    }

    // -------------------------------------------------------------------------
    // In-place updates
    // -------------------------------------------------------------------------

    #[test]
    fn test_intensity_change_updates_in_place() {
        let mut o = overlay();
        o.apply_props(&rain().with_intensity(0.2));
        let before = o.stats().particles;
        for i in 0..20 {
            let props = rain().with_intensity(0.2 + i as f32 * 0.04);
            let change = o.apply_props(&props);
            assert_ne!(change, OverlayChange::Recreated);
            assert_ne!(change, OverlayChange::Created);
        }
        assert!(o.stats().particles > before);
        assert!((o.stats().intensity - 0.96).abs() < 1e-5);
    }

    #[test]
    fn test_same_props_are_unchanged() {
        let mut o = overlay();
        o.apply_props(&rain());
        assert_eq!(o.apply_props(&rain()), OverlayChange::Unchanged);
        // z-index is presentation only.
        let mut raised = rain();
        raised.z_index = 99;
        assert_eq!(o.apply_props(&raised), OverlayChange::Unchanged);
    }

    #[test]
    fn test_seed_and_wind_change_update_options() {
        let mut o = overlay();
        o.apply_props(&rain());
        let mut props = rain().with_seed(7);
        props.wind_speed = Some(2.0);
        props.wind_direction = Some(45.0);
        assert_eq!(o.apply_props(&props), OverlayChange::Updated);
        let options = o.renderer().map(|r| r.options().clone());
        assert_eq!(options.as_ref().map(|o| o.seed()), Some(7));
        assert_eq!(options.as_ref().map(|o| o.wind_speed()), Some(2.0));
    }

    // -------------------------------------------------------------------------
    // Reduced motion
    // -------------------------------------------------------------------------

    #[test]
    fn test_reduced_motion_draws_a_still_frame() {
        let mut o = overlay();
        o.set_prefers_reduced_motion(true);
        assert_eq!(o.apply_props(&rain()), OverlayChange::Created);
        assert_eq!(state(&o), Some(RendererState::Uninitialized));
        assert_eq!(
            o.renderer().map(|r| r.options().reduced_motion()),
            Some(true)
        );
        assert!(o.pixels().is_some_and(|p| !p.is_clear()));

        // Frames are ignored while frozen.
        o.tick(1.0 / 60.0);
        assert_eq!(o.frames(), 0);
    }

    #[test]
    fn test_force_animate_overrides_preference() {
        let mut o = overlay();
        o.set_prefers_reduced_motion(true);
        let mut props = rain();
        props.force_animate = true;
        o.apply_props(&props);
        assert_eq!(state(&o), Some(RendererState::Running));
    }

    #[test]
    fn test_preference_toggle_keeps_renderer() {
        let mut o = overlay();
        o.apply_props(&rain());
        assert_eq!(o.set_prefers_reduced_motion(true), OverlayChange::Updated);
        assert_eq!(state(&o), Some(RendererState::Stopped));
        assert!(o.pixels().is_some_and(|p| !p.is_clear()));
        assert_eq!(o.set_prefers_reduced_motion(false), OverlayChange::Updated);
        assert_eq!(state(&o), Some(RendererState::Running));
        assert_eq!(
            o.set_prefers_reduced_motion(false),
            OverlayChange::Unchanged
        );
    }

    // -------------------------------------------------------------------------
    // Geometry and frames
    // -------------------------------------------------------------------------

    #[test]
    fn test_resize_surface_resizes_renderer() {
        let mut o = overlay();
        o.apply_props(&rain());
        assert!(o.resize_surface(200.0, 100.0, 2.0));
        assert_eq!(o.surface().device_size(), (400, 200));
        assert!(!o.resize_surface(200.0, 100.0, 2.0));
        let stats = o.stats();
        assert_eq!((stats.device_width, stats.device_height), (400, 200));
    }

    #[test]
    fn test_advance_uses_clock() {
        let mut o = overlay();
        o.apply_props(&rain());
        let mut clock = ManualClock::new();
        for _ in 0..10 {
            clock.advance(1.0 / 60.0);
            o.advance(&clock);
        }
        assert_eq!(o.frames(), 10);
        assert!(o.stats().lit_pixels > 0);
    }

    #[test]
    fn test_unmount_clears_everything() {
        let mut o = overlay();
        o.apply_props(&rain());
        o.tick(1.0 / 60.0);
        o.unmount();
        assert!(o.renderer().is_none());
        assert!(o.applied_props().is_none());
        assert!(o.pixels().is_some_and(|p| p.is_clear()));
    }

    #[test]
    fn test_props_json_shape() {
        let props: OverlayProps = serde_json::from_str(
            r#"{"active":true,"type":"snow","intensity":0.6,"seed":7,"zIndex":3,"forceAnimate":true}"#,
        )
        .unwrap();
        assert_eq!(props.kind, EffectKind::Snow);
        assert_eq!(props.seed, Some(7));
        assert_eq!(props.z_index, 3);
        assert!(props.force_animate);

        let defaults: OverlayProps = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, OverlayProps::default());
    }
}
