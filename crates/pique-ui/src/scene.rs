//! Resolved paint list. The presenter emits one [`Scene`] per frame; a
//! renderer walks the nodes back to front and draws them. Nodes carry final
//! screen-space rects and alpha, so no transform stack is needed.

use std::rc::Rc;

use pique_core::{Color, Rect, Vec2};

#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }
}

#[derive(Clone, Debug)]
pub enum SceneNode {
    /// Full-screen blur layer, dimmed behind the presentation.
    Backdrop { alpha: f32 },
    Rect {
        rect: Rect,
        color: Color,
        radius: f32,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Text {
        rect: Rect,
        text: String,
        size: f32,
        color: Color,
        alpha: f32,
    },
    Shadow {
        rect: Rect,
        radius: f32,
        blur: f32,
        offset: Vec2,
        color: Color,
        alpha: f32,
    },
}

/// Draws the captured content into `rect` at the given alpha. This is how a
/// presented view is "snapshotted": the embedding app supplies a painter for
/// the wrapped content, and the presenter replays it at the captured frame.
pub type ContentPainter = Rc<dyn Fn(&mut Scene, Rect, f32)>;
