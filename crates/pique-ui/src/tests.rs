#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pique_core::{
        EdgeInsets, Haptics, Impulse, PointerEvent, PointerPhase, Rect, Size, TestClock, Vec2,
        now, set_clock, set_haptics,
    };
    use web_time::Duration;

    use crate::catalog::{CustomReactionCatalog, DefaultReactionCatalog, ReactionCatalog};
    use crate::config::{AppearingSide, OverlayConfig, PressDuration};
    use crate::controller::{GeometrySnapshot, OverlayController, PresentationRequest};
    use crate::error::CatalogError;
    use crate::glyph::ReactionGlyph;
    use crate::host::HostMount;
    use crate::menu::{ActionMenu, MenuEntry, MenuItem};
    use crate::presenter::{OverlayPhase, boundary_offset};
    use crate::scene::{ContentPainter, SceneNode};
    use crate::strip::{ReactionStrip, appearing_delay};
    use crate::trigger::LongPressTrigger;

    fn test_clock() -> TestClock {
        let clock = TestClock::new();
        set_clock(Rc::new(clock.clone()));
        clock
    }

    struct RecordingHaptics(Rc<RefCell<Vec<Impulse>>>);

    impl Haptics for RecordingHaptics {
        fn impulse(&self, style: Impulse) {
            self.0.borrow_mut().push(style);
        }
    }

    fn record_haptics() -> Rc<RefCell<Vec<Impulse>>> {
        let store = Rc::new(RefCell::new(Vec::new()));
        set_haptics(Rc::new(RecordingHaptics(store.clone())));
        store
    }

    fn noop_painter() -> ContentPainter {
        Rc::new(|_scene, _frame, _alpha| {})
    }

    fn request(side: AppearingSide, menu: Vec<MenuEntry>) -> PresentationRequest {
        PresentationRequest {
            content: noop_painter(),
            geometry: GeometrySnapshot::new(
                Size::new(120.0, 44.0),
                Rect::new(24.0, 400.0, 120.0, 44.0),
            ),
            menu,
            appearing_side: side,
            on_reaction_change: Rc::new(|_| {}),
        }
    }

    fn event(phase: PointerPhase, x: f32, y: f32) -> PointerEvent {
        PointerEvent::new(phase, Vec2::new(x, y), now())
    }

    // ---- controller ----

    #[test]
    fn visible_is_bracketed_by_show_and_hide() {
        let _clock = test_clock();
        let controller = OverlayController::new();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = seen.clone();
        controller.visible().subscribe(move |v| seen2.borrow_mut().push(*v));

        assert!(!controller.is_visible());
        controller.show(request(AppearingSide::Leading, vec![]), None);
        assert!(controller.is_visible());
        assert!(controller.presented().get().is_some());

        controller.hide();
        assert!(!controller.is_visible());
        // Exit animation may still need the presentation.
        assert!(controller.presented().get().is_some());

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn toggle_reaction_is_an_involution() {
        let _clock = test_clock();
        let controller = OverlayController::new();

        let changes: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
        let changes2 = changes.clone();
        let mut req = request(AppearingSide::Leading, vec![]);
        req.on_reaction_change = Rc::new(move |r| {
            changes2.borrow_mut().push(r.map(str::to_owned));
        });
        controller.show(req, None);

        controller.toggle_reaction("👍");
        assert_eq!(controller.selected_reaction().get().as_deref(), Some("👍"));
        controller.toggle_reaction("👍");
        assert_eq!(controller.selected_reaction().get(), None);

        assert_eq!(
            *changes.borrow(),
            vec![Some("👍".to_string()), None]
        );
    }

    #[test]
    fn every_mutation_notifies_exactly_once() {
        let controller = OverlayController::new();
        let count = Rc::new(RefCell::new(0));
        let count2 = count.clone();
        controller
            .drag_location()
            .subscribe(move |_| *count2.borrow_mut() += 1);

        controller.set_drag_location(Some(Vec2::new(1.0, 1.0)));
        controller.set_drag_location(None);
        assert_eq!(*count.borrow(), 2);
    }

    // ---- boundary clamping ----

    #[test]
    fn boundary_offset_zero_when_stack_fits() {
        let config = OverlayConfig::default();
        // strip 100 + 8 + content 84 + 8 + menu 100 = 300 total.
        let offset = boundary_offset(
            Size::new(400.0, 800.0),
            EdgeInsets::new(40.0, 0.0, 20.0, 0.0),
            400.0,
            100.0,
            84.0,
            100.0,
            &config,
        );
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn boundary_offset_shifts_down_by_top_overflow() {
        let config = OverlayConfig::default();
        let offset = boundary_offset(
            Size::new(400.0, 800.0),
            EdgeInsets::new(40.0, 0.0, 20.0, 0.0),
            50.0,
            100.0,
            84.0,
            100.0,
            &config,
        );
        // Stack top sits at -100; shifting to the 40-unit inset needs +140.
        assert_eq!(offset, 140.0);
    }

    #[test]
    fn boundary_offset_shifts_up_by_bottom_overflow() {
        let config = OverlayConfig::default();
        let offset = boundary_offset(
            Size::new(400.0, 800.0),
            EdgeInsets::new(40.0, 0.0, 20.0, 0.0),
            750.0,
            100.0,
            84.0,
            100.0,
            &config,
        );
        // Bottom bound is 800 - 20 - 50 = 730; stack bottom lands at 900.
        assert_eq!(offset, -170.0);
    }

    #[test]
    fn boundary_offset_short_circuits_on_zero_screen() {
        let config = OverlayConfig::default();
        let offset = boundary_offset(
            Size::ZERO,
            EdgeInsets::default(),
            50.0,
            100.0,
            84.0,
            100.0,
            &config,
        );
        assert_eq!(offset, 0.0);
    }

    // ---- stagger ----

    #[test]
    fn stagger_delays_for_leading_side() {
        let config = OverlayConfig::default();
        assert_eq!(
            appearing_delay(AppearingSide::Leading, 0, 9, &config),
            Some(Duration::from_millis(60))
        );
        assert_eq!(
            appearing_delay(AppearingSide::Leading, 7, 9, &config),
            Some(Duration::from_millis(480))
        );
        assert_eq!(appearing_delay(AppearingSide::Leading, 8, 9, &config), None);
    }

    #[test]
    fn stagger_delays_for_trailing_side() {
        let config = OverlayConfig::default();
        assert_eq!(
            appearing_delay(AppearingSide::Trailing, 0, 9, &config),
            Some(Duration::from_millis(540))
        );
        assert_eq!(
            appearing_delay(AppearingSide::Trailing, 7, 9, &config),
            Some(Duration::from_millis(120))
        );
        assert_eq!(appearing_delay(AppearingSide::Trailing, 8, 9, &config), None);
    }

    // ---- glyph ----

    #[test]
    fn drag_popup_then_release_selects_exactly_once() {
        let clock = test_clock();
        let haptics_log = record_haptics();
        let config = OverlayConfig::default();

        let mut glyph = ReactionGlyph::new("❤️".into(), Some(Duration::from_millis(60)), &config);
        clock.advance(Duration::from_secs(2));
        glyph.update(); // Entrance finished
        glyph.set_frame(Rect::new(100.0, 100.0, 36.0, 34.0));

        // Inside the frame scaled 4x vertically but outside the raw frame.
        let hover = Vec2::new(110.0, 80.0);
        assert!(!glyph.on_drag_location(Some(hover), &config));
        assert!(glyph.is_popped());
        assert_eq!(*haptics_log.borrow(), vec![Impulse::Light]);

        // Repeated locations inside do not re-fire the haptic.
        assert!(!glyph.on_drag_location(Some(Vec2::new(112.0, 90.0)), &config));
        assert_eq!(haptics_log.borrow().len(), 1);

        // Release while popped selects once.
        assert!(glyph.on_drag_location(None, &config));
        assert!(!glyph.on_drag_location(None, &config));
    }

    #[test]
    fn glyph_not_yet_appeared_ignores_drags() {
        let _clock = test_clock();
        let config = OverlayConfig::default();

        let mut glyph = ReactionGlyph::new("👍".into(), Some(Duration::from_millis(60)), &config);
        glyph.set_frame(Rect::new(100.0, 100.0, 36.0, 34.0));

        assert!(!glyph.on_drag_location(Some(Vec2::new(110.0, 110.0)), &config));
        assert!(!glyph.is_popped());
    }

    #[test]
    fn moving_off_a_glyph_before_release_does_not_select() {
        let clock = test_clock();
        let config = OverlayConfig::default();

        let mut glyph = ReactionGlyph::new("😂".into(), Some(Duration::from_millis(60)), &config);
        clock.advance(Duration::from_secs(2));
        glyph.update();
        glyph.set_frame(Rect::new(100.0, 100.0, 36.0, 34.0));

        glyph.on_drag_location(Some(Vec2::new(110.0, 110.0)), &config);
        assert!(glyph.is_popped());
        glyph.on_drag_location(Some(Vec2::new(500.0, 500.0)), &config);
        assert!(!glyph.is_popped());
        assert!(!glyph.on_drag_location(None, &config));
    }

    // ---- strip ----

    fn strip_with_default_catalog(side: AppearingSide, config: &OverlayConfig) -> ReactionStrip {
        ReactionStrip::new(DefaultReactionCatalog.reactions(), side, config)
    }

    #[test]
    fn strip_scroll_is_clamped_to_content() {
        let clock = test_clock();
        let config = OverlayConfig::default();
        let controller = OverlayController::new();

        let mut strip = strip_with_default_catalog(AppearingSide::Leading, &config);
        strip.layout(Rect::new(0.0, 0.0, 200.0, 98.0), &config);

        let t = now();
        strip.handle_pointer_down(Vec2::new(100.0, 80.0), t);
        clock.advance(Duration::from_millis(10));
        // Move past the press slop immediately: this touch scrolls.
        strip.handle_pointer_move(Vec2::new(80.0, 80.0), &controller, &config);
        strip.handle_pointer_move(Vec2::new(60.0, 80.0), &controller, &config);
        assert!(strip.scroll_offset() > 0.0);

        strip.handle_pointer_move(Vec2::new(-2000.0, 80.0), &controller, &config);
        let cell = config.glyph_cell().width;
        let max = (9.0 * cell - (200.0 - config.strip_padding_x * 2.0)).max(0.0);
        assert_eq!(strip.scroll_offset(), max);

        strip.handle_pointer_up(&controller);
        assert!(controller.drag_location().get().is_none());
    }

    #[test]
    fn held_press_claims_the_drag_and_freezes_scrolling() {
        let clock = test_clock();
        let config = OverlayConfig::default();
        let controller = OverlayController::new();

        let mut strip = strip_with_default_catalog(AppearingSide::Leading, &config);
        strip.layout(Rect::new(0.0, 0.0, 320.0, 98.0), &config);

        strip.handle_pointer_down(Vec2::new(100.0, 80.0), now());
        clock.advance(config.strip_press_duration);
        strip.tick(now(), &controller, &config);
        assert!(strip.is_drag_claimed());
        assert_eq!(
            controller.drag_location().get(),
            Some(Vec2::new(100.0, 80.0))
        );

        let offset_before = strip.scroll_offset();
        strip.handle_pointer_move(Vec2::new(40.0, 80.0), &controller, &config);
        assert_eq!(strip.scroll_offset(), offset_before);
        assert_eq!(
            controller.drag_location().get(),
            Some(Vec2::new(40.0, 80.0))
        );

        strip.handle_pointer_up(&controller);
        assert_eq!(controller.drag_location().get(), None);
        assert!(!strip.is_drag_claimed());
    }

    // ---- catalog ----

    #[test]
    fn default_catalog_has_nine_symbols() {
        let reactions = DefaultReactionCatalog.reactions();
        assert_eq!(reactions.len(), 9);
        assert_eq!(reactions[1], "❤️");
    }

    #[test]
    fn custom_catalog_validates_entries() {
        assert!(matches!(
            CustomReactionCatalog::new(vec![]),
            Err(CatalogError::Empty)
        ));
        assert!(matches!(
            CustomReactionCatalog::new(vec!["ok".into()]),
            Err(CatalogError::NotASingleSymbol(_))
        ));

        let catalog =
            CustomReactionCatalog::new(vec!["👍🏽".into(), "❤️".into(), "🎉".into()]).unwrap();
        assert_eq!(catalog.reactions().len(), 3);
    }

    // ---- menu ----

    #[test]
    fn menu_measures_items_and_dividers() {
        let config = OverlayConfig::default();
        let menu = ActionMenu::new(vec![
            MenuEntry::Item(MenuItem::new("Reply", || {})),
            MenuEntry::Divider,
            MenuEntry::Item(MenuItem::new("Delete", || {}).icon("trash").destructive()),
        ]);

        let size = menu.size(&config);
        assert_eq!(size.width, config.menu_width);
        let item_h = config.menu_font_size * 1.25 + config.menu_item_padding_y * 2.0;
        assert_eq!(size.height, item_h * 2.0 + 1.0);
    }

    #[test]
    fn menu_hit_test_skips_dividers() {
        let config = OverlayConfig::default();
        let menu = ActionMenu::new(vec![
            MenuEntry::Item(MenuItem::new("Reply", || {})),
            MenuEntry::Divider,
            MenuEntry::Item(MenuItem::new("Delete", || {})),
        ]);
        let origin = Vec2::new(0.0, 0.0);
        let item_h = config.menu_font_size * 1.25 + config.menu_item_padding_y * 2.0;

        assert_eq!(menu.hit_test(origin, Vec2::new(10.0, item_h / 2.0), &config), Some(0));
        assert_eq!(
            menu.hit_test(origin, Vec2::new(10.0, item_h + 0.5), &config),
            None
        );
        assert_eq!(
            menu.hit_test(origin, Vec2::new(10.0, item_h + 1.0 + item_h / 2.0), &config),
            Some(2)
        );
        assert_eq!(menu.hit_test(origin, Vec2::new(300.0, 10.0), &config), None);
    }

    // ---- trigger ----

    fn make_trigger(
        controller: &OverlayController,
        config: &Rc<OverlayConfig>,
        selection: &Rc<RefCell<Option<String>>>,
    ) -> LongPressTrigger {
        LongPressTrigger::new(
            controller.clone(),
            config.clone(),
            PressDuration::Default,
            AppearingSide::Leading,
            selection.clone(),
            noop_painter(),
            vec![MenuEntry::Item(MenuItem::new("Reply", || {}))],
        )
    }

    #[test]
    fn sub_threshold_press_does_not_present() {
        let clock = test_clock();
        let controller = OverlayController::new();
        let config = Rc::new(OverlayConfig::default());
        let selection = Rc::new(RefCell::new(None));
        let mut trigger = make_trigger(&controller, &config, &selection);
        trigger.set_geometry(GeometrySnapshot::new(
            Size::new(120.0, 44.0),
            Rect::new(24.0, 400.0, 120.0, 44.0),
        ));

        trigger.handle_pointer(&event(PointerPhase::Down, 60.0, 420.0));
        clock.advance(Duration::from_millis(250));
        trigger.tick(now());
        assert!(!controller.is_visible());

        trigger.handle_pointer(&event(PointerPhase::Up, 60.0, 420.0));
        clock.advance(Duration::from_millis(200));
        trigger.tick(now());
        assert!(!controller.is_visible());
    }

    #[test]
    fn movement_past_slop_cancels_recognition() {
        let clock = test_clock();
        let controller = OverlayController::new();
        let config = Rc::new(OverlayConfig::default());
        let selection = Rc::new(RefCell::new(None));
        let mut trigger = make_trigger(&controller, &config, &selection);
        trigger.set_geometry(GeometrySnapshot::new(
            Size::new(120.0, 44.0),
            Rect::new(24.0, 400.0, 120.0, 44.0),
        ));

        trigger.handle_pointer(&event(PointerPhase::Down, 60.0, 420.0));
        trigger.handle_pointer(&event(PointerPhase::Move, 75.0, 420.0));
        clock.advance(Duration::from_millis(400));
        trigger.tick(now());
        assert!(!controller.is_visible());
    }

    #[test]
    fn long_press_without_geometry_is_ignored() {
        let clock = test_clock();
        let haptics_log = record_haptics();
        let controller = OverlayController::new();
        let config = Rc::new(OverlayConfig::default());
        let selection = Rc::new(RefCell::new(None));
        let mut trigger = make_trigger(&controller, &config, &selection);

        // No geometry captured yet: the press can't even anchor to a frame.
        trigger.handle_pointer(&event(PointerPhase::Down, 60.0, 420.0));
        clock.advance(Duration::from_millis(500));
        trigger.tick(now());
        assert!(!controller.is_visible());
        assert!(haptics_log.borrow().is_empty());
    }

    #[test]
    fn long_press_presents_with_latest_geometry() {
        let clock = test_clock();
        let haptics_log = record_haptics();
        let controller = OverlayController::new();
        let config = Rc::new(OverlayConfig::default());
        let selection = Rc::new(RefCell::new(Some("👍".to_string())));
        let mut trigger = make_trigger(&controller, &config, &selection);
        trigger.set_geometry(GeometrySnapshot::new(
            Size::new(120.0, 44.0),
            Rect::new(24.0, 400.0, 120.0, 44.0),
        ));

        trigger.handle_pointer(&event(PointerPhase::Down, 60.0, 420.0));
        clock.advance(Duration::from_millis(300));
        trigger.tick(now());

        assert!(controller.is_visible());
        assert_eq!(*haptics_log.borrow(), vec![Impulse::Heavy]);
        assert_eq!(controller.selected_reaction().get().as_deref(), Some("👍"));
        assert_eq!(controller.drag_location().get(), Some(Vec2::ZERO));
        let presented = controller.presented().get().unwrap();
        assert_eq!(presented.geometry.global_frame, Rect::new(24.0, 400.0, 120.0, 44.0));
    }

    // ---- presenter / host ----

    struct Harness {
        clock: TestClock,
        controller: OverlayController,
        host: HostMount,
    }

    fn harness() -> Harness {
        let clock = test_clock();
        let controller = OverlayController::new();
        let mut host = HostMount::new(
            controller.clone(),
            OverlayConfig::default(),
            Rc::new(DefaultReactionCatalog),
        )
        .unwrap();
        host.set_screen_size(Size::new(390.0, 844.0));
        host.set_safe_area_insets(EdgeInsets::new(47.0, 0.0, 34.0, 0.0));
        Harness {
            clock,
            controller,
            host,
        }
    }

    impl Harness {
        /// Advance in small steps, ticking the host each step.
        fn run(&mut self, total: Duration) {
            let step = Duration::from_millis(16);
            let mut elapsed = Duration::ZERO;
            while elapsed < total {
                self.clock.advance(step);
                elapsed += step;
                self.host.frame(now());
            }
        }

        fn phase(&self) -> OverlayPhase {
            self.host.presenter().unwrap().phase()
        }
    }

    #[test]
    fn presenter_pops_in_backdrop_first_then_settles() {
        let mut h = harness();
        h.controller
            .show(request(AppearingSide::Leading, vec![]), None);

        h.host.frame(now());
        assert!(h.host.is_overlay_mounted());
        assert_eq!(h.phase(), OverlayPhase::PoppingIn);
        assert!(h.host.scroll_locked());

        // Before the mount delay elapses only the backdrop moves.
        h.run(Duration::from_millis(64));
        let first = h.host.frame(now()).nodes.first().cloned();
        match first {
            Some(SceneNode::Backdrop { alpha }) => assert!(alpha > 0.0),
            other => panic!("expected backdrop first, got {other:?}"),
        }
        assert_eq!(h.phase(), OverlayPhase::PoppingIn);

        h.run(Duration::from_millis(600));
        assert_eq!(h.phase(), OverlayPhase::Steady);
    }

    #[test]
    fn backdrop_tap_dismisses_and_unmounts() {
        let mut h = harness();
        h.controller
            .show(request(AppearingSide::Leading, vec![]), None);
        h.host.frame(now());
        h.run(Duration::from_millis(700));
        assert_eq!(h.phase(), OverlayPhase::Steady);

        h.host.handle_pointer(&event(PointerPhase::Down, 5.0, 60.0));
        h.clock.advance(Duration::from_millis(40));
        h.host.handle_pointer(&event(PointerPhase::Up, 5.0, 60.0));
        h.host.frame(now());
        assert_eq!(h.phase(), OverlayPhase::PoppingOut);

        h.run(Duration::from_secs(2));
        assert!(!h.controller.is_visible());
        assert!(!h.host.is_overlay_mounted());
        assert!(h.controller.presented().get().is_none());
        assert!(!h.host.scroll_locked());
    }

    #[test]
    fn menu_item_runs_action_then_dismisses_without_reaction_change() {
        let fired = Rc::new(RefCell::new(false));
        let fired2 = fired.clone();

        let mut h = harness();
        h.controller.show(
            request(
                AppearingSide::Leading,
                vec![
                    MenuEntry::Item(MenuItem::new("Reply", move || *fired2.borrow_mut() = true)),
                    MenuEntry::Divider,
                    MenuEntry::Item(MenuItem::new("Delete", || {}).destructive()),
                ],
            ),
            None,
        );
        h.host.frame(now());
        h.run(Duration::from_millis(700));

        let menu_frame = h.host.presenter().unwrap().menu_frame();
        let first_item = Vec2::new(menu_frame.x + 20.0, menu_frame.y + 10.0);
        h.host
            .handle_pointer(&event(PointerPhase::Down, first_item.x, first_item.y));
        h.clock.advance(Duration::from_millis(40));
        h.host
            .handle_pointer(&event(PointerPhase::Up, first_item.x, first_item.y));
        h.host.frame(now());

        assert!(*fired.borrow());
        assert_eq!(h.phase(), OverlayPhase::PoppingOut);
        assert_eq!(h.controller.selected_reaction().get(), None);
    }

    #[test]
    fn glyph_tap_selects_then_settles_and_pops_out() {
        let mut h = harness();
        h.controller
            .show(request(AppearingSide::Leading, vec![]), None);
        h.host.frame(now());
        h.run(Duration::from_secs(1)); // Steady, all glyphs in

        let glyph_frame = h.host.presenter().unwrap().strip().glyphs()[2].frame();
        let p = Vec2::new(glyph_frame.mid_x(), glyph_frame.mid_y());
        h.host.handle_pointer(&event(PointerPhase::Down, p.x, p.y));
        h.clock.advance(Duration::from_millis(40));
        h.host.handle_pointer(&event(PointerPhase::Up, p.x, p.y));
        h.host.frame(now());

        assert_eq!(h.controller.selected_reaction().get().as_deref(), Some("😂"));
        assert!(h.host.presenter().unwrap().strip().glyphs()[2].is_chosen());
        assert_eq!(h.phase(), OverlayPhase::Steady);

        // The settle delay passes, then the overlay leaves on its own.
        h.run(h.host.config().settle_delay + Duration::from_millis(32));
        assert_eq!(h.phase(), OverlayPhase::PoppingOut);
    }

    #[test]
    fn second_host_install_fails_until_first_is_dropped() {
        let controller = OverlayController::new();
        let host = HostMount::new(
            controller.clone(),
            OverlayConfig::default(),
            Rc::new(DefaultReactionCatalog),
        )
        .unwrap();

        assert!(
            HostMount::new(
                controller.clone(),
                OverlayConfig::default(),
                Rc::new(DefaultReactionCatalog),
            )
            .is_err()
        );

        drop(host);
        assert!(
            HostMount::new(
                controller,
                OverlayConfig::default(),
                Rc::new(DefaultReactionCatalog),
            )
            .is_ok()
        );
    }

    // ---- end to end ----

    #[test]
    fn long_press_drag_onto_heart_and_release() {
        let mut h = harness();
        let haptics_log = record_haptics();
        let config = h.host.config().clone();

        let selection: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let mut trigger = make_trigger(&h.controller, &config, &selection);
        trigger.set_geometry(GeometrySnapshot::new(
            Size::new(120.0, 44.0),
            Rect::new(24.0, 400.0, 120.0, 44.0),
        ));

        // Hold long enough to present.
        trigger.handle_pointer(&event(PointerPhase::Down, 60.0, 420.0));
        h.clock.advance(Duration::from_millis(300));
        trigger.tick(now());
        assert!(h.controller.is_visible());
        assert_eq!(*haptics_log.borrow(), vec![Impulse::Heavy]);

        h.host.frame(now());
        assert!(h.host.is_overlay_mounted());
        h.run(Duration::from_secs(1));
        assert_eq!(h.phase(), OverlayPhase::Steady);
        assert_eq!(
            h.host.presenter().unwrap().strip().glyphs().len(),
            9
        );

        // Count selection notifications from here on.
        let changes = Rc::new(RefCell::new(Vec::new()));
        let changes2 = changes.clone();
        h.controller
            .selected_reaction()
            .subscribe(move |v| changes2.borrow_mut().push(v.clone()));

        // Without lifting, slide onto the heart.
        let heart = h.host.presenter().unwrap().strip().glyphs()[1].frame();
        let p = Vec2::new(heart.mid_x(), heart.mid_y());
        trigger.handle_pointer(&event(PointerPhase::Move, p.x, p.y));
        h.host.frame(now());
        assert!(h.host.presenter().unwrap().strip().glyphs()[1].is_popped());
        assert_eq!(*haptics_log.borrow(), vec![Impulse::Heavy, Impulse::Light]);

        // Release: the popped glyph is selected.
        trigger.handle_pointer(&event(PointerPhase::Up, p.x, p.y));
        h.host.frame(now());
        assert_eq!(*selection.borrow(), Some("❤️".to_string()));
        assert_eq!(*changes.borrow(), vec![Some("❤️".to_string())]);
        assert_eq!(h.phase(), OverlayPhase::Steady);

        // After the settle delay the overlay pops out and hides.
        h.run(config.settle_delay + Duration::from_millis(32));
        assert_eq!(h.phase(), OverlayPhase::PoppingOut);
        h.run(Duration::from_secs(2));
        assert!(!h.controller.is_visible());
        assert!(!h.host.is_overlay_mounted());
        assert_eq!(*selection.borrow(), Some("❤️".to_string()));
        assert_eq!(changes.borrow().len(), 1);
    }

    #[test]
    fn drag_release_over_nothing_dismisses_without_change() {
        let mut h = harness();
        let config = h.host.config().clone();

        let selection: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
        let mut trigger = make_trigger(&h.controller, &config, &selection);
        trigger.set_geometry(GeometrySnapshot::new(
            Size::new(120.0, 44.0),
            Rect::new(24.0, 400.0, 120.0, 44.0),
        ));

        trigger.handle_pointer(&event(PointerPhase::Down, 60.0, 420.0));
        h.clock.advance(Duration::from_millis(300));
        trigger.tick(now());
        h.host.frame(now());
        h.run(Duration::from_secs(1));
        assert_eq!(h.phase(), OverlayPhase::Steady);

        // Drag well away from every glyph, then let go.
        trigger.handle_pointer(&event(PointerPhase::Move, 200.0, 800.0));
        h.host.frame(now());
        trigger.handle_pointer(&event(PointerPhase::Up, 200.0, 800.0));
        h.host.frame(now());

        assert_eq!(h.phase(), OverlayPhase::PoppingOut);
        assert_eq!(*selection.borrow(), None);
    }
}
