//! # Animation values and the clock
//!
//! Animations are explicit: a component owns an [`AnimatedValue`], retargets
//! it on state transitions, and samples it every tick. Time comes from an
//! installable [`Clock`] so tests can drive animations deterministically with
//! [`TestClock`].

use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;

use web_time::{Duration, Instant};

thread_local! {
    static CLOCK: RefCell<Rc<dyn Clock>> = RefCell::new(Rc::new(SystemClock));
}

pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Install the clock animations sample. Tests install a [`TestClock`].
pub fn set_clock(clock: Rc<dyn Clock>) {
    CLOCK.with(|c| *c.borrow_mut() = clock);
}

pub fn now() -> Instant {
    CLOCK.with(|c| c.borrow().now())
}

/// A clock you can drive by hand.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<RefCell<Instant>>,
}

impl TestClock {
    pub fn new() -> Self {
        TestClock {
            t: Rc::new(RefCell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.t.borrow_mut() += by;
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        *self.t.borrow()
    }
}

/// Fraction of the remaining distance considered settled for springs.
const SPRING_EPSILON: f32 = 0.005;

#[derive(Clone, Copy, Debug)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Damped spring, normalized to the unit interval. `omega` is the
    /// undamped angular frequency scaled by the spec duration; `zeta` the
    /// damping ratio.
    Spring { zeta: f32, omega: f32 },
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::Spring { zeta, omega } => {
                if zeta < 1.0 {
                    let omega_d = omega * (1.0 - zeta * zeta).sqrt();
                    1.0 - (-zeta * omega * t).exp()
                        * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
                } else {
                    // Critically damped
                    1.0 - (-omega * t).exp() * (1.0 + omega * t)
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
    pub delay: Duration,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseInOut,
            delay: Duration::ZERO,
        }
    }
}

impl AnimationSpec {
    pub fn tween(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            delay: Duration::ZERO,
        }
    }

    /// Spring parameterized by response (period of the undamped system, in
    /// seconds) and damping fraction, the way interactive UI springs are
    /// usually specified. Duration is the time to settle within 0.5%.
    pub fn spring_response(response: f32, damping_fraction: f32) -> Self {
        let omega0 = TAU / response.max(1e-3);
        Self::from_spring(omega0, damping_fraction.clamp(0.05, 1.0))
    }

    /// Spring parameterized by stiffness and damping coefficient (unit mass).
    pub fn interpolating_spring(stiffness: f32, damping: f32) -> Self {
        let omega0 = stiffness.max(1e-3).sqrt();
        let zeta = (damping / (2.0 * omega0)).clamp(0.05, 1.0);
        Self::from_spring(omega0, zeta)
    }

    /// Gentle non-bouncy spring.
    pub fn smooth() -> Self {
        Self::spring_response(0.5, 1.0)
    }

    fn from_spring(omega0: f32, zeta: f32) -> Self {
        let settle = -SPRING_EPSILON.ln() / (zeta * omega0);
        Self {
            duration: Duration::from_secs_f32(settle),
            easing: Easing::Spring {
                zeta,
                omega: omega0 * settle,
            },
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Scales playback rate; `speed(2.0)` runs twice as fast.
    pub fn speed(mut self, factor: f32) -> Self {
        let factor = factor.max(1e-3);
        self.duration = Duration::from_secs_f32(self.duration.as_secs_f32() / factor);
        self.delay = Duration::from_secs_f32(self.delay.as_secs_f32() / factor);
        self
    }
}

pub trait Interpolate {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Value that transitions toward its target over time.
pub struct AnimatedValue<T: Interpolate + Clone> {
    current: T,
    target: T,
    start: T,
    spec: AnimationSpec,
    start_time: Option<Instant>,
}

impl<T: Interpolate + Clone> AnimatedValue<T> {
    pub fn new(initial: T, spec: AnimationSpec) -> Self {
        Self {
            current: initial.clone(),
            target: initial.clone(),
            start: initial,
            spec,
            start_time: None,
        }
    }

    /// Begin animating from the current value toward `target`, applying the
    /// spec's delay from this call.
    pub fn set_target(&mut self, target: T) {
        self.start = self.current.clone();
        self.target = target;
        self.start_time = Some(now());
    }

    /// Retarget with a different spec (e.g. a faster exit curve).
    pub fn set_target_with(&mut self, target: T, spec: AnimationSpec) {
        self.spec = spec;
        self.set_target(target);
    }

    /// Jump to `value` with no animation.
    pub fn snap_to(&mut self, value: T) {
        self.current = value.clone();
        self.target = value;
        self.start_time = None;
    }

    /// Advance against the clock. Returns true while animating.
    pub fn update(&mut self) -> bool {
        let Some(start) = self.start_time else {
            return false;
        };
        let elapsed = now().saturating_duration_since(start);

        if elapsed < self.spec.delay {
            return true; // Waiting out the delay
        }
        let animation_time = elapsed - self.spec.delay;

        if animation_time >= self.spec.duration {
            self.current = self.target.clone();
            self.start_time = None;
            return false;
        }

        let t = animation_time.as_secs_f32() / self.spec.duration.as_secs_f32();
        let eased = self.spec.easing.interpolate(t);
        self.current = self.start.interpolate(&self.target, eased);
        true
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn is_animating(&self) -> bool {
        self.start_time.is_some()
    }
}
