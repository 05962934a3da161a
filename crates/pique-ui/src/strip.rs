//! The horizontally scrollable reaction row.
//!
//! Scrolling is immediate and clamped to content. While a press-drag
//! sequence is active over the strip the scroll offset is frozen: the drag
//! drives reaction hover instead of scroll position. The strip runs its own
//! short-press recognizer (hold 0.1 s within 5 units) to claim a new touch
//! for dragging after the overlay is already up.

use pique_core::{Rect, Size, Vec2};
use web_time::{Duration, Instant};

use crate::config::{AppearingSide, OverlayConfig};
use crate::controller::OverlayController;
use crate::glyph::ReactionGlyph;
use crate::scene::{Scene, SceneNode};

/// Single-axis scroll offset with clamping. Consumes a requested delta and
/// returns the leftover motion.
pub(crate) struct HorizontalScrollState {
    offset: f32,
    viewport_width: f32,
    content_width: f32,
}

impl HorizontalScrollState {
    fn new() -> Self {
        HorizontalScrollState {
            offset: 0.0,
            viewport_width: 0.0,
            content_width: 0.0,
        }
    }

    fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    pub(crate) fn set_viewport_width(&mut self, w: f32) {
        self.viewport_width = w.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub(crate) fn set_content_width(&mut self, w: f32) {
        self.content_width = w.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    pub(crate) fn offset(&self) -> f32 {
        self.offset
    }

    pub(crate) fn scroll_immediate(&mut self, dx: f32) -> f32 {
        let before = self.offset;
        self.offset = (before + dx).clamp(0.0, self.max_offset());
        dx - (self.offset - before)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StripPress {
    Idle,
    Pressing { start: Instant, origin: Vec2 },
    /// Short press held: the drag now drives hover, scrolling is frozen.
    Claimed,
    Scrolling { last_x: f32 },
}

pub struct ReactionStrip {
    glyphs: Vec<ReactionGlyph>,
    side: AppearingSide,
    scroll: HorizontalScrollState,
    press: StripPress,
    frame: Rect,
}

impl ReactionStrip {
    pub(crate) fn new(reactions: Vec<String>, side: AppearingSide, config: &OverlayConfig) -> Self {
        let count = reactions.len();
        let glyphs = reactions
            .into_iter()
            .enumerate()
            .map(|(index, symbol)| {
                ReactionGlyph::new(symbol, appearing_delay(side, index, count, config), config)
            })
            .collect();

        ReactionStrip {
            glyphs,
            side,
            scroll: HorizontalScrollState::new(),
            press: StripPress::Idle,
            frame: Rect::default(),
        }
    }

    pub fn glyphs(&self) -> &[ReactionGlyph] {
        &self.glyphs
    }

    pub fn is_drag_claimed(&self) -> bool {
        self.press == StripPress::Claimed
    }

    pub(crate) fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    /// Measured bounds: the row plus the pop-up headroom above it.
    pub(crate) fn size(&self, screen: Size, config: &OverlayConfig) -> Size {
        Size::new(
            screen.width * config.strip_span_fraction,
            self.row_height(config) + config.strip_headroom,
        )
    }

    fn row_height(&self, config: &OverlayConfig) -> f32 {
        config.glyph_cell().height + config.strip_padding_y * 2.0
    }

    /// Position the strip and every glyph (global coordinates).
    pub(crate) fn layout(&mut self, frame: Rect, config: &OverlayConfig) {
        self.frame = frame;

        let cell = config.glyph_cell();
        self.scroll
            .set_viewport_width(frame.w - config.strip_padding_x * 2.0);
        self.scroll
            .set_content_width(cell.width * self.glyphs.len() as f32);

        let y = frame.y + config.strip_headroom + config.strip_padding_y;
        let x0 = frame.x + config.strip_padding_x - self.scroll.offset();
        for (i, glyph) in self.glyphs.iter_mut().enumerate() {
            glyph.set_frame(Rect::new(
                x0 + cell.width * i as f32,
                y,
                cell.width,
                cell.height,
            ));
        }
    }

    pub(crate) fn handle_pointer_down(&mut self, position: Vec2, time: Instant) {
        if self.frame.contains(position) {
            self.press = StripPress::Pressing {
                start: time,
                origin: position,
            };
        }
    }

    pub(crate) fn handle_pointer_move(
        &mut self,
        position: Vec2,
        controller: &OverlayController,
        config: &OverlayConfig,
    ) {
        match self.press {
            StripPress::Pressing { origin, .. } => {
                // Moving before the hold elapses turns the touch into a scroll.
                if origin.distance_to(position) > config.strip_press_slop {
                    self.press = StripPress::Scrolling { last_x: position.x };
                }
            }
            StripPress::Claimed => controller.set_drag_location(Some(position)),
            StripPress::Scrolling { last_x } => {
                self.scroll.scroll_immediate(last_x - position.x);
                self.press = StripPress::Scrolling { last_x: position.x };
            }
            StripPress::Idle => {}
        }
    }

    pub(crate) fn handle_pointer_up(&mut self, controller: &OverlayController) {
        if self.press == StripPress::Claimed {
            controller.set_drag_location(None);
        }
        self.press = StripPress::Idle;
    }

    /// Time-based half of the claim recognizer.
    pub(crate) fn tick(&mut self, now: Instant, controller: &OverlayController, config: &OverlayConfig) {
        if let StripPress::Pressing { start, origin } = self.press
            && now.saturating_duration_since(start) >= config.strip_press_duration
        {
            self.press = StripPress::Claimed;
            controller.set_drag_location(Some(origin));
        }
    }

    /// Route a drag-location change to every glyph; returns the symbol to
    /// select when one reports a release-over-it.
    pub(crate) fn on_drag_location(
        &mut self,
        location: Option<Vec2>,
        config: &OverlayConfig,
    ) -> Option<String> {
        let mut selected = None;
        for glyph in &mut self.glyphs {
            if glyph.on_drag_location(location, config) && selected.is_none() {
                selected = Some(glyph.symbol().to_string());
            }
        }
        selected
    }

    pub(crate) fn on_selection_changed(&mut self, selected: Option<&str>, config: &OverlayConfig) {
        for glyph in &mut self.glyphs {
            glyph.on_selection_changed(selected, config);
        }
    }

    pub(crate) fn update(&mut self) -> bool {
        let mut animating = false;
        for glyph in &mut self.glyphs {
            animating |= glyph.update();
        }
        animating
    }

    pub(crate) fn emit(&self, scene: &mut Scene, scale: f32, alpha: f32, config: &OverlayConfig) {
        let anchor = Vec2::new(
            self.frame.x + self.side.unit_anchor_x() * self.frame.w,
            self.frame.y + config.strip_headroom + self.row_height(config) / 2.0,
        );

        let row = Rect::new(
            self.frame.x,
            self.frame.y + config.strip_headroom,
            self.frame.w,
            self.row_height(config),
        );
        scene.push(SceneNode::Rect {
            rect: row.scaled_around(anchor, scale),
            color: config.strip_background,
            radius: config.strip_corner_radius,
            alpha,
        });

        for glyph in &self.glyphs {
            glyph.emit(scene, anchor, scale, alpha, config);
        }
    }
}

pub(crate) fn appearing_delay(
    side: AppearingSide,
    index: usize,
    count: usize,
    config: &OverlayConfig,
) -> Option<Duration> {
    if index >= config.stagger_cap {
        return None;
    }
    let steps = match side {
        AppearingSide::Leading => index + 1,
        AppearingSide::Trailing => count - index,
    };
    Some(config.stagger_step * steps as u32)
}
