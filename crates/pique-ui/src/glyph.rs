use pique_core::haptics;
use pique_core::{AnimatedValue, Impulse, Rect, Vec2};
use web_time::Duration;

use crate::config::OverlayConfig;
use crate::scene::{Scene, SceneNode};

/// One animated, tappable reaction symbol.
///
/// A glyph owns its entrance, pop-up, and pulse animations and tracks its own
/// on-screen frame; the strip routes drag-location changes to it and forwards
/// the selection it reports.
pub struct ReactionGlyph {
    symbol: String,
    appear: AnimatedValue<f32>,
    appeared: bool,
    pop: AnimatedValue<f32>,
    popped: bool,
    pulse: AnimatedValue<f32>,
    pulse_returning: bool,
    chosen: bool,
    frame: Rect,
}

impl ReactionGlyph {
    /// `appearing_delay: None` means the glyph appears immediately, skipping
    /// the entrance animation.
    pub(crate) fn new(
        symbol: String,
        appearing_delay: Option<Duration>,
        config: &OverlayConfig,
    ) -> Self {
        let mut appear = AnimatedValue::new(
            0.0f32,
            match appearing_delay {
                Some(delay) => config.glyph_appear_spec().with_delay(delay),
                None => config.glyph_appear_spec(),
            },
        );
        let mut appeared = false;
        if appearing_delay.is_some() {
            appear.set_target(1.0);
        } else {
            appear.snap_to(1.0);
            appeared = true;
        }

        ReactionGlyph {
            symbol,
            appear,
            appeared,
            pop: AnimatedValue::new(0.0, config.glyph_pop_spec()),
            popped: false,
            pulse: AnimatedValue::new(1.0, config.pulse_spec()),
            pulse_returning: true,
            chosen: false,
            frame: Rect::default(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn is_popped(&self) -> bool {
        self.popped
    }

    pub fn is_chosen(&self) -> bool {
        self.chosen
    }

    /// Re-evaluate the pop-up state for a new shared drag location. Returns
    /// true when the drag ended while this glyph was popped, i.e. the glyph's
    /// symbol should be selected.
    pub(crate) fn on_drag_location(
        &mut self,
        location: Option<Vec2>,
        config: &OverlayConfig,
    ) -> bool {
        if !self.appeared {
            return false;
        }

        let should_pop = location.is_some_and(|p| {
            self.frame
                .scaled_vertically(config.pop_hit_vscale)
                .contains(p)
        });

        if should_pop && !self.popped {
            haptics::impulse(Impulse::Light);
        }

        let fire = !should_pop && location.is_none() && self.popped;

        if self.popped != should_pop {
            self.popped = should_pop;
            self.pop.set_target(if should_pop { 1.0 } else { 0.0 });
        }
        fire
    }

    /// Called when the shared selection changes; landing on this glyph runs
    /// the shrink-and-return pulse.
    pub(crate) fn on_selection_changed(&mut self, selected: Option<&str>, config: &OverlayConfig) {
        self.chosen = selected == Some(self.symbol.as_str());
        if self.chosen {
            self.pulse.set_target(config.shrink_factor);
            self.pulse_returning = false;
        }
    }

    /// Advance animations; returns true while any is running.
    pub(crate) fn update(&mut self) -> bool {
        let appearing = self.appear.update();
        if !appearing && !self.appeared {
            self.appeared = true;
        }

        let popping = self.pop.update();

        let pulsing = self.pulse.update();
        if !pulsing && !self.pulse_returning {
            self.pulse.set_target(1.0);
            self.pulse_returning = true;
        }

        appearing || popping || pulsing || self.pulse.is_animating()
    }

    /// `strip_anchor`/`strip_scale` apply the strip's own pop-in/out scaling
    /// on top of the glyph's animations.
    pub(crate) fn emit(
        &self,
        scene: &mut Scene,
        strip_anchor: Vec2,
        strip_scale: f32,
        alpha: f32,
        config: &OverlayConfig,
    ) {
        let center = Vec2::new(self.frame.mid_x(), self.frame.mid_y());

        if self.chosen {
            scene.push(SceneNode::Circle {
                center: Vec2::new(
                    strip_anchor.x + (center.x - strip_anchor.x) * strip_scale,
                    strip_anchor.y + (center.y - strip_anchor.y) * strip_scale,
                ),
                radius: self.frame.w / 2.0 * strip_scale,
                color: config.highlight_color,
                alpha,
            });
        }

        let scale = *self.appear.get()
            * (1.0 + (config.pop_scale - 1.0) * *self.pop.get())
            * *self.pulse.get();
        let lift = -self.frame.h * *self.pop.get();

        let mut rect = self
            .frame
            .scaled_around(center, scale)
            .scaled_around(strip_anchor, strip_scale);
        rect.y += lift * strip_scale;

        scene.push(SceneNode::Text {
            rect,
            text: self.symbol.clone(),
            size: config.glyph_font_size * scale * strip_scale,
            color: config.label_color,
            alpha,
        });
    }
}
