//! Overlay presentation: one instance per show/hide cycle.
//!
//! The presenter runs the phase machine
//! `Idle → PoppingIn → Steady → PoppingOut → Idle`, owns the strip and menu,
//! clamps the stack into the safe area, routes taps, and emits the scene.
//! The host mounts it when the controller becomes visible and drops it once
//! the exit animation has completed.

use std::rc::Rc;

use pique_core::haptics;
use pique_core::{AnimatedValue, AnimationSpec, EdgeInsets, Impulse, PointerEvent, PointerPhase, Rect, Size, Vec2};
use web_time::{Duration, Instant};

use crate::config::{AppearingSide, OverlayConfig};
use crate::controller::{OverlayController, PresentationRequest, ReactionChoice};
use crate::menu::ActionMenu;
use crate::scene::{Scene, SceneNode};
use crate::strip::ReactionStrip;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayPhase {
    Idle,
    PoppingIn,
    Steady,
    PoppingOut,
}

const TAP_MAX_DURATION: Duration = Duration::from_millis(250);

pub struct OverlayPresenter {
    controller: OverlayController,
    config: Rc<OverlayConfig>,
    request: Rc<PresentationRequest>,
    strip: ReactionStrip,
    menu: ActionMenu,

    phase: OverlayPhase,
    /// Drives strip/menu scale and opacity and the content fade; 0..1.
    pop: AnimatedValue<f32>,
    backdrop: AnimatedValue<f32>,
    popping_out: bool,
    finished: bool,

    screen: Size,
    insets: EdgeInsets,
    boundary_offset: f32,
    content_frame: Rect,
    menu_frame: Rect,

    settle_deadline: Option<Instant>,
    last_drag: Option<Vec2>,
    press: Option<(Instant, Vec2)>,
}

impl OverlayPresenter {
    pub fn new(
        controller: OverlayController,
        request: Rc<PresentationRequest>,
        reactions: Vec<String>,
        screen: Size,
        insets: EdgeInsets,
        config: Rc<OverlayConfig>,
    ) -> Self {
        let strip = ReactionStrip::new(reactions, request.appearing_side, &config);
        let menu = ActionMenu::new(request.menu.clone());

        let mut pop = AnimatedValue::new(0.0f32, config.pop_in_spec());
        pop.set_target(1.0);
        let mut backdrop = AnimatedValue::new(0.0f32, backdrop_spec());
        backdrop.set_target(1.0);

        let last_drag = controller.drag_location().get();
        let mut presenter = OverlayPresenter {
            controller,
            config,
            request,
            strip,
            menu,
            phase: OverlayPhase::PoppingIn,
            pop,
            backdrop,
            popping_out: false,
            finished: false,
            screen,
            insets,
            boundary_offset: 0.0,
            content_frame: Rect::default(),
            menu_frame: Rect::default(),
            settle_deadline: None,
            last_drag,
            press: None,
        };
        presenter.layout_pass();
        presenter
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn strip(&self) -> &ReactionStrip {
        &self.strip
    }

    pub fn boundary_offset(&self) -> f32 {
        self.boundary_offset
    }

    pub fn menu_frame(&self) -> Rect {
        self.menu_frame
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
    }

    pub fn set_safe_area_insets(&mut self, insets: EdgeInsets) {
        self.insets = insets;
    }

    /// Advance one frame. Returns true while anything is still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.finished {
            return false;
        }

        self.strip.tick(now, &self.controller, &self.config);

        let drag = self.controller.drag_location().get();
        if drag != self.last_drag {
            let released_mid_drag =
                drag.is_none() && self.last_drag.is_some_and(|p| p != Vec2::ZERO);
            self.last_drag = drag;

            if let Some(symbol) = self.strip.on_drag_location(drag, &self.config) {
                self.select_reaction(&symbol, now);
            } else if released_mid_drag && self.phase == OverlayPhase::Steady {
                // Drag released with nothing under the cursor.
                self.begin_pop_out();
            }
        }

        if let Some(deadline) = self.settle_deadline
            && now >= deadline
        {
            self.settle_deadline = None;
            self.begin_pop_out();
        }

        let mut animating = self.backdrop.update();
        animating |= self.pop.update();
        animating |= self.strip.update();

        match self.phase {
            OverlayPhase::PoppingIn if !self.pop.is_animating() => {
                self.phase = OverlayPhase::Steady;
            }
            OverlayPhase::PoppingOut
                if !self.pop.is_animating() && !self.backdrop.is_animating() =>
            {
                log::debug!("overlay pop-out complete");
                self.controller.hide();
                self.phase = OverlayPhase::Idle;
                self.finished = true;
            }
            _ => {}
        }

        self.layout_pass();

        animating
            || self.settle_deadline.is_some()
            || (!self.finished && self.phase != OverlayPhase::Steady)
    }

    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if matches!(self.phase, OverlayPhase::Idle | OverlayPhase::PoppingOut) {
            return; // A running pop-out always completes.
        }
        match event.phase {
            PointerPhase::Down => {
                self.press = Some((event.time, event.position));
                self.strip.handle_pointer_down(event.position, event.time);
            }
            PointerPhase::Move => {
                self.strip
                    .handle_pointer_move(event.position, &self.controller, &self.config);
            }
            PointerPhase::Up => {
                self.strip.handle_pointer_up(&self.controller);
                if let Some((start, origin)) = self.press.take() {
                    let is_tap = event.time.saturating_duration_since(start) < TAP_MAX_DURATION
                        && origin.distance_to(event.position) < self.config.press_slop;
                    if is_tap {
                        self.tap(event.position, event.time);
                    }
                }
            }
            PointerPhase::Cancel => {
                self.strip.handle_pointer_up(&self.controller);
                self.press = None;
            }
        }
    }

    /// Dismiss the overlay, optionally selecting a reaction first.
    pub fn dismiss(&mut self, choice: ReactionChoice, now: Instant) {
        match choice {
            ReactionChoice::NoChange => self.begin_pop_out(),
            ReactionChoice::Selected(symbol) => self.select_reaction(&symbol, now),
        }
    }

    fn tap(&mut self, position: Vec2, now: Instant) {
        if let Some(symbol) = self
            .strip
            .glyphs()
            .iter()
            .find(|g| g.frame().contains(position))
            .map(|g| g.symbol().to_string())
        {
            haptics::impulse(Impulse::Light);
            self.select_reaction(&symbol, now);
            return;
        }

        if let Some(index) = self.menu.hit_test(
            Vec2::new(self.menu_frame.x, self.menu_frame.y),
            position,
            &self.config,
        ) {
            self.menu.activate(index);
            self.begin_pop_out();
            return;
        }

        // Taps on the strip body or the presented content do nothing.
        if self.strip_frame().contains(position) || self.content_frame.contains(position) {
            return;
        }

        self.begin_pop_out(); // Backdrop
    }

    fn select_reaction(&mut self, symbol: &str, now: Instant) {
        self.controller.toggle_reaction(symbol);
        let selected = self.controller.selected_reaction().get();
        self.strip.on_selection_changed(selected.as_deref(), &self.config);
        // Let the user see the result before the overlay leaves.
        self.settle_deadline = Some(now + self.config.settle_delay);
    }

    fn begin_pop_out(&mut self) {
        if self.popping_out || self.finished {
            return;
        }
        log::debug!("overlay popping out");
        self.popping_out = true;
        self.phase = OverlayPhase::PoppingOut;
        self.settle_deadline = None;
        self.pop.set_target_with(0.0, self.config.pop_out_spec());
        self.backdrop.set_target_with(
            0.0,
            backdrop_spec().with_delay(self.config.backdrop_exit_delay),
        );
    }

    fn strip_frame(&self) -> Rect {
        let size = self.strip.size(self.screen, &self.config);
        Rect::new(self.stack_x(size.width), self.stack_top(), size.width, size.height)
    }

    fn stack_x(&self, stack_width: f32) -> f32 {
        let x = (self.screen.width - stack_width) / 2.0;
        match self.request.appearing_side {
            AppearingSide::Leading => x + self.config.stack_edge_padding,
            AppearingSide::Trailing => x - self.config.stack_edge_padding,
        }
    }

    fn stack_top(&self) -> f32 {
        let strip_h = self.strip.size(self.screen, &self.config).height;
        let menu_h = self.menu.size(&self.config).height;
        let content_h = self.request.geometry.size.height;
        let total = strip_h + self.config.spacing + content_h + self.config.spacing + menu_h;
        let center_y =
            self.request.geometry.global_frame.mid_y() - (strip_h / 2.0 - menu_h / 2.0);
        center_y - total / 2.0 + self.effective_offset()
    }

    fn effective_offset(&self) -> f32 {
        self.boundary_offset * *self.pop.get()
    }

    fn layout_pass(&mut self) {
        let strip_size = self.strip.size(self.screen, &self.config);
        let menu_size = self.menu.size(&self.config);
        let geometry = self.request.geometry;

        self.boundary_offset = boundary_offset(
            self.screen,
            self.insets,
            geometry.global_frame.mid_y(),
            strip_size.height,
            geometry.size.height,
            menu_size.height,
            &self.config,
        );

        let strip_frame = self.strip_frame();
        self.strip.layout(strip_frame, &self.config);

        let mut content_frame = geometry.global_frame;
        content_frame.y += self.effective_offset();
        self.content_frame = content_frame;

        let menu_x = match self.request.appearing_side {
            AppearingSide::Leading => strip_frame.x,
            AppearingSide::Trailing => strip_frame.x + strip_frame.w - menu_size.width,
        };
        self.menu_frame = Rect::new(
            menu_x,
            strip_frame.y
                + strip_frame.h
                + self.config.spacing
                + geometry.size.height
                + self.config.spacing,
            menu_size.width,
            menu_size.height,
        );
    }

    /// Scale the strip and menu draw at: `pop` on the way in, shrinking to
    /// the exit scale on the way out.
    fn display_scale(&self) -> f32 {
        let pop = *self.pop.get();
        if self.popping_out {
            self.config.exit_scale + (1.0 - self.config.exit_scale) * pop
        } else {
            pop
        }
    }

    /// Emit the current frame, back to front.
    pub fn emit(&self, scene: &mut Scene) {
        let pop = *self.pop.get();
        let scale = self.display_scale();

        scene.push(SceneNode::Backdrop {
            alpha: *self.backdrop.get(),
        });

        let content_center = Vec2::new(self.content_frame.mid_x(), self.content_frame.mid_y());
        (self.request.content)(
            scene,
            self.content_frame.scaled_around(content_center, scale),
            pop,
        );

        self.strip.emit(scene, scale, pop, &self.config);

        let menu_offset = -self.config.menu_slide_offset * (1.0 - pop);
        self.menu
            .emit(scene, self.menu_frame, scale, pop, menu_offset, &self.config);
    }
}

fn backdrop_spec() -> AnimationSpec {
    AnimationSpec::spring_response(0.5, 0.8)
}

/// Vertical shift that keeps the whole stack (strip + content + menu) inside
/// the safe area. Zero-sized screens short-circuit to no shift.
pub fn boundary_offset(
    screen: Size,
    insets: EdgeInsets,
    content_mid_y: f32,
    strip_height: f32,
    content_height: f32,
    menu_height: f32,
    config: &OverlayConfig,
) -> f32 {
    if screen.is_zero() {
        return 0.0;
    }

    let total =
        strip_height + config.spacing + content_height + config.spacing + menu_height;
    let center_y = content_mid_y - (strip_height / 2.0 - menu_height / 2.0);

    let top = center_y - total / 2.0;
    let bottom = center_y + total / 2.0;

    let safe_top = insets.top;
    let safe_bottom = screen.height - insets.bottom - config.bottom_reserve;

    if top < safe_top {
        safe_top - top
    } else if bottom > safe_bottom {
        safe_bottom - bottom
    } else {
        0.0
    }
}
