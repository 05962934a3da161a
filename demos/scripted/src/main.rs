//! Headless walkthrough of one full overlay interaction: long-press a
//! message bubble, drag onto "❤️" without lifting, release, and watch the
//! overlay settle and leave. Run with `RUST_LOG=debug` to see the component's
//! own transition logs.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use pique_core::{
    Color, EdgeInsets, Haptics, Impulse, PointerEvent, PointerPhase, Rect, Size, TestClock, Vec2,
    now, set_clock, set_haptics,
};
use pique_ui::{
    AppearingSide, DefaultReactionCatalog, GeometrySnapshot, HostMount, LongPressTrigger,
    MenuEntry, MenuItem, OverlayConfig, OverlayController, PressDuration, SceneNode,
};
use web_time::Duration;

struct ConsoleHaptics;

impl Haptics for ConsoleHaptics {
    fn impulse(&self, style: Impulse) {
        println!("  * haptic impulse: {style:?}");
    }
}

struct Walkthrough {
    clock: TestClock,
    host: HostMount,
    trigger: LongPressTrigger,
}

impl Walkthrough {
    /// Advance in 16 ms frames, ticking the recognizer and the host.
    fn run(&mut self, total: Duration) {
        let step = Duration::from_millis(16);
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            self.clock.advance(step);
            elapsed += step;
            self.trigger.tick(now());
            self.host.frame(now());
        }
    }

    fn pointer(&mut self, phase: PointerPhase, position: Vec2) {
        let event = PointerEvent::new(phase, position, now());
        self.trigger.handle_pointer(&event);
        self.host.handle_pointer(&event);
    }

    fn describe_scene(&mut self) {
        let scene = self.host.frame(now());
        let mut backdrops = 0;
        let mut rects = 0;
        let mut texts = 0;
        for node in &scene.nodes {
            match node {
                SceneNode::Backdrop { .. } => backdrops += 1,
                SceneNode::Rect { .. } | SceneNode::Circle { .. } | SceneNode::Shadow { .. } => {
                    rects += 1
                }
                SceneNode::Text { .. } => texts += 1,
            }
        }
        println!("  scene: {backdrops} backdrop, {rects} shapes, {texts} labels");
    }
}

fn bubble_painter() -> pique_ui::ContentPainter {
    Rc::new(|scene, frame: Rect, alpha| {
        scene.push(SceneNode::Rect {
            rect: frame,
            color: Color::from_hex("#2196F3"),
            radius: 16.0,
            alpha,
        });
        scene.push(SceneNode::Text {
            rect: frame.inset_by(12.0, 10.0),
            text: "Test Message".into(),
            size: 15.0,
            color: Color::WHITE,
            alpha,
        });
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let clock = TestClock::new();
    set_clock(Rc::new(clock.clone()));
    set_haptics(Rc::new(ConsoleHaptics));

    let controller = OverlayController::new();
    let mut host = HostMount::new(
        controller.clone(),
        OverlayConfig::default(),
        Rc::new(DefaultReactionCatalog),
    )?;
    host.set_screen_size(Size::new(390.0, 844.0));
    host.set_safe_area_insets(EdgeInsets::new(47.0, 0.0, 34.0, 0.0));

    let reaction: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let mut trigger = LongPressTrigger::new(
        controller.clone(),
        host.config().clone(),
        PressDuration::Default,
        AppearingSide::Leading,
        reaction.clone(),
        bubble_painter(),
        vec![
            MenuEntry::Item(MenuItem::new("Reply", || println!("  * menu: reply"))),
            MenuEntry::Divider,
            MenuEntry::Item(
                MenuItem::new("Delete", || println!("  * menu: delete"))
                    .icon("trash")
                    .destructive(),
            ),
        ],
    );

    // The layout pass the embedding app would do every frame.
    let bubble = Rect::new(24.0, 400.0, 140.0, 44.0);
    trigger.set_geometry(GeometrySnapshot::new(bubble.size(), bubble));

    let mut w = Walkthrough {
        clock,
        host,
        trigger,
    };

    println!("press and hold the bubble...");
    w.pointer(PointerPhase::Down, Vec2::new(60.0, 420.0));
    w.run(Duration::from_millis(320));
    println!("overlay visible: {}", controller.is_visible());

    w.run(Duration::from_millis(700));
    println!("overlay settled;");
    w.describe_scene();

    let heart = w
        .host
        .presenter()
        .expect("overlay mounted")
        .strip()
        .glyphs()[1]
        .frame();
    println!("drag onto the heart without lifting...");
    w.pointer(
        PointerPhase::Move,
        Vec2::new(heart.mid_x(), heart.mid_y()),
    );
    w.run(Duration::from_millis(200));

    println!("release.");
    w.pointer(PointerPhase::Up, Vec2::new(heart.mid_x(), heart.mid_y()));
    w.run(Duration::from_millis(48));
    println!("stored reaction: {:?}", reaction.borrow());

    w.run(Duration::from_secs(2));
    println!(
        "overlay visible: {}, mounted: {}",
        controller.is_visible(),
        w.host.is_overlay_mounted()
    );

    Ok(())
}
