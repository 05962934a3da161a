#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use web_time::Duration;

    use crate::animation::*;
    use crate::geometry::*;
    use crate::signal::*;

    fn test_clock() -> TestClock {
        let clock = TestClock::new();
        set_clock(Rc::new(clock.clone()));
        clock
    }

    #[test]
    fn signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn signal_notifies_synchronously() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let seen2 = seen.clone();
        sig.subscribe(move |v| seen2.borrow_mut().push(*v));

        sig.set(1);
        sig.set(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn signal_unsubscribe_stops_notifications() {
        let sig = signal(0);
        let count = Rc::new(RefCell::new(0));

        let count2 = count.clone();
        let key = sig.subscribe(move |_| *count2.borrow_mut() += 1);

        sig.set(1);
        sig.unsubscribe(key);
        sig.set(2);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn signal_subscriber_may_unsubscribe_itself() {
        let sig = signal(0);
        let count = Rc::new(RefCell::new(0));
        let key_slot: Rc<RefCell<Option<SubKey>>> = Rc::new(RefCell::new(None));

        let count2 = count.clone();
        let key_slot2 = key_slot.clone();
        let sig2 = sig.clone();
        let key = sig.subscribe(move |_| {
            *count2.borrow_mut() += 1;
            if let Some(k) = key_slot2.borrow_mut().take() {
                sig2.unsubscribe(k);
            }
        });
        *key_slot.borrow_mut() = Some(key);

        sig.set(1);
        sig.set(2);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn rect_contains() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);

        assert!(rect.contains(Vec2::new(50.0, 30.0)));
        assert!(!rect.contains(Vec2::new(5.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 70.0)));
    }

    #[test]
    fn rect_scaled_vertically_grows_around_center() {
        let rect = Rect::new(0.0, 100.0, 40.0, 20.0);
        let scaled = rect.scaled_vertically(4.0);

        assert_eq!(scaled.h, 80.0);
        assert_eq!(scaled.y, 70.0);
        assert_eq!(scaled.x, rect.x);
        assert_eq!(scaled.w, rect.w);
        assert_eq!(scaled.mid_y(), rect.mid_y());
    }

    #[test]
    fn tween_is_deterministic_on_test_clock() {
        let clock = test_clock();

        let mut a = AnimatedValue::new(
            0.0f32,
            AnimationSpec::tween(Duration::from_millis(1000), Easing::Linear),
        );
        a.set_target(10.0);

        clock.advance(Duration::from_millis(250));
        assert!(a.update());
        assert!((*a.get() - 2.5).abs() < 0.01);

        clock.advance(Duration::from_millis(750));
        assert!(!a.update());
        assert!((*a.get() - 10.0).abs() < 0.001);
    }

    #[test]
    fn delay_holds_the_start_value() {
        let clock = test_clock();

        let spec = AnimationSpec::tween(Duration::from_millis(100), Easing::Linear)
            .with_delay(Duration::from_millis(200));
        let mut a = AnimatedValue::new(0.0f32, spec);
        a.set_target(1.0);

        clock.advance(Duration::from_millis(150));
        assert!(a.update());
        assert_eq!(*a.get(), 0.0);

        clock.advance(Duration::from_millis(100));
        assert!(a.update());
        assert!((*a.get() - 0.5).abs() < 0.01);

        clock.advance(Duration::from_millis(200));
        assert!(!a.update());
        assert_eq!(*a.get(), 1.0);
    }

    #[test]
    fn spring_settles_at_target() {
        let clock = test_clock();

        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::spring_response(0.2, 0.7));
        a.set_target(1.0);

        clock.advance(Duration::from_millis(50));
        assert!(a.update());
        let early = *a.get();
        assert!(early > 0.0 && early < 1.5);

        clock.advance(Duration::from_secs(2));
        assert!(!a.update());
        assert_eq!(*a.get(), 1.0);
    }

    #[test]
    fn speed_scales_duration() {
        let spec = AnimationSpec::tween(Duration::from_millis(400), Easing::Linear).speed(2.0);
        assert_eq!(spec.duration, Duration::from_millis(200));
    }

    #[test]
    fn snap_to_does_not_animate() {
        let _clock = test_clock();

        let mut a = AnimatedValue::new(0.0f32, AnimationSpec::default());
        a.snap_to(5.0);
        assert!(!a.is_animating());
        assert_eq!(*a.get(), 5.0);
    }
}
