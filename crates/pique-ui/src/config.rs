use pique_core::{AnimationSpec, Color, Easing, Size};
use web_time::Duration;

/// How long a press must be held before the overlay presents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PressDuration {
    Fast,
    #[default]
    Default,
    Slow,
}

impl PressDuration {
    pub const ALL: [PressDuration; 3] =
        [PressDuration::Fast, PressDuration::Default, PressDuration::Slow];

    pub fn duration(self) -> Duration {
        match self {
            PressDuration::Fast => Duration::from_millis(200),
            PressDuration::Default => Duration::from_millis(300),
            PressDuration::Slow => Duration::from_millis(400),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PressDuration::Fast => "Fast",
            PressDuration::Default => "Default",
            PressDuration::Slow => "Slow",
        }
    }
}

/// Which horizontal edge the picker anchors to; derived from message
/// direction (sent vs. received) by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppearingSide {
    Leading,
    Trailing,
}

impl AppearingSide {
    /// Scale-in anchor as a unit x coordinate of the strip.
    pub fn unit_anchor_x(self) -> f32 {
        match self {
            AppearingSide::Leading => 0.0,
            AppearingSide::Trailing => 1.0,
        }
    }
}

/// Every tunable of the overlay. Constructed once by the host and shared;
/// components read it, never mutate it.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    /// Vertical spacing between strip, content, and menu.
    pub spacing: f32,
    /// Backdrop leads the pop-in by this much.
    pub mount_delay: Duration,
    /// Dwell after a reaction is chosen before the overlay pops out.
    pub settle_delay: Duration,
    /// The blur fades out late, after the strip/menu have started shrinking.
    pub backdrop_exit_delay: Duration,
    /// Extra space kept above the bottom safe-area inset.
    // FIXME: why 50?
    pub bottom_reserve: f32,
    /// Padding on the appearing-side edge of the stack.
    pub stack_edge_padding: f32,
    /// Scale the strip and menu shrink to while popping out.
    pub exit_scale: f32,

    /// Movement allowed before a pending long press is cancelled.
    pub press_slop: f32,
    /// Travel before an overlay drag engages.
    pub drag_min_distance: f32,

    pub glyph_size: Size,
    pub glyph_font_size: f32,
    pub glyph_padding: f32,
    /// Hover scale while a drag lingers over a glyph.
    pub pop_scale: f32,
    /// Vertical tolerance multiplier for the drag hit-test.
    pub pop_hit_vscale: f32,
    /// Shrink-and-return pulse when selection lands on a glyph.
    pub shrink_factor: f32,
    pub pulse_duration: Duration,

    pub strip_padding_x: f32,
    pub strip_padding_y: f32,
    /// Headroom above the row so popped glyphs are not clipped.
    pub strip_headroom: f32,
    pub strip_corner_radius: f32,
    /// Strip width as a fraction of the screen width.
    pub strip_span_fraction: f32,
    pub stagger_step: Duration,
    /// Glyphs from this index on appear immediately.
    pub stagger_cap: usize,
    /// Hold time for the strip's own recognizer to claim the drag.
    pub strip_press_duration: Duration,
    pub strip_press_slop: f32,

    pub menu_width: f32,
    pub menu_corner_radius: f32,
    pub menu_item_padding_x: f32,
    pub menu_item_padding_y: f32,
    pub menu_font_size: f32,
    pub divider_inset: f32,
    /// The menu slides in from this far above its resting place.
    pub menu_slide_offset: f32,

    pub strip_background: Color,
    pub menu_background: Color,
    pub highlight_color: Color,
    pub label_color: Color,
    pub secondary_label_color: Color,
    pub destructive_color: Color,
    pub divider_color: Color,
    pub shadow_color: Color,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            spacing: 8.0,
            mount_delay: Duration::from_millis(100),
            settle_delay: Duration::from_millis(300),
            backdrop_exit_delay: Duration::from_millis(150),
            bottom_reserve: 50.0,
            stack_edge_padding: 8.0,
            exit_scale: 0.4,

            press_slop: 10.0,
            drag_min_distance: 20.0,

            glyph_size: Size::new(36.0, 34.0),
            glyph_font_size: 28.0,
            glyph_padding: 4.0,
            pop_scale: 1.5,
            pop_hit_vscale: 4.0,
            shrink_factor: 0.6,
            pulse_duration: Duration::from_millis(100),

            strip_padding_x: 14.0,
            strip_padding_y: 12.0,
            strip_headroom: 40.0,
            strip_corner_radius: 36.0,
            strip_span_fraction: 0.8,
            stagger_step: Duration::from_millis(60),
            stagger_cap: 8,
            strip_press_duration: Duration::from_millis(100),
            strip_press_slop: 5.0,

            menu_width: 250.0,
            menu_corner_radius: 13.0,
            menu_item_padding_x: 16.0,
            menu_item_padding_y: 12.0,
            menu_font_size: 16.0,
            divider_inset: 12.0,
            menu_slide_offset: 50.0,

            strip_background: Color::WHITE,
            menu_background: Color::from_hex("#F2F2F2E6"),
            highlight_color: Color::from_hex("#CCCCCC"),
            label_color: Color::BLACK,
            secondary_label_color: Color::from_hex("#3C3C4399"),
            destructive_color: Color::from_hex("#FF3B30"),
            divider_color: Color::from_hex("#3C3C434A"),
            shadow_color: Color::BLACK.with_alpha(51),
        }
    }
}

impl OverlayConfig {
    /// Spring the strip, menu, and content pop in with.
    pub fn pop_in_spec(&self) -> AnimationSpec {
        AnimationSpec::spring_response(0.2, 0.7).with_delay(self.mount_delay)
    }

    /// Faster smooth curve for the pop-out.
    pub fn pop_out_spec(&self) -> AnimationSpec {
        AnimationSpec::smooth().speed(2.0)
    }

    /// Staggered glyph entrance.
    pub fn glyph_appear_spec(&self) -> AnimationSpec {
        AnimationSpec::interpolating_spring(170.0, 16.0)
    }

    /// Glyph pop-up / pop-down while dragging.
    pub fn glyph_pop_spec(&self) -> AnimationSpec {
        AnimationSpec::spring_response(0.2, 0.7)
    }

    /// One half of the shrink-and-return pulse.
    pub fn pulse_spec(&self) -> AnimationSpec {
        AnimationSpec::tween(self.pulse_duration, Easing::Linear)
    }

    /// Glyph cell: the symbol box plus its horizontal padding.
    pub fn glyph_cell(&self) -> Size {
        Size::new(
            self.glyph_size.width + self.glyph_padding * 2.0,
            self.glyph_size.height,
        )
    }
}
