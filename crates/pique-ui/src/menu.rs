use std::fmt;
use std::rc::Rc;

use pique_core::{Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::config::OverlayConfig;
use crate::scene::{Scene, SceneNode};

/// One tappable action. Activation runs the action, then the overlay
/// dismisses with a no-reaction-change signal.
#[derive(Clone)]
pub struct MenuItem {
    pub label: String,
    pub icon: Option<String>,
    pub destructive: bool,
    pub action: Rc<dyn Fn()>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, action: impl Fn() + 'static) -> Self {
        MenuItem {
            label: label.into(),
            icon: None,
            destructive: false,
            action: Rc::new(action),
        }
    }

    pub fn icon(mut self, name: impl Into<String>) -> Self {
        self.icon = Some(name.into());
        self
    }

    /// Renders in the warning color.
    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("destructive", &self.destructive)
            .field("action", &"<callback>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub enum MenuEntry {
    Item(MenuItem),
    Divider,
}

const DIVIDER_HEIGHT: f32 = 1.0;

/// The contextual action list under the presented content.
pub(crate) struct ActionMenu {
    entries: Vec<MenuEntry>,
}

impl ActionMenu {
    pub(crate) fn new(entries: Vec<MenuEntry>) -> Self {
        ActionMenu { entries }
    }

    pub(crate) fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    fn item_height(&self, config: &OverlayConfig) -> f32 {
        config.menu_font_size * 1.25 + config.menu_item_padding_y * 2.0
    }

    pub(crate) fn size(&self, config: &OverlayConfig) -> Size {
        let height = self
            .entries
            .iter()
            .map(|e| match e {
                MenuEntry::Item(_) => self.item_height(config),
                MenuEntry::Divider => DIVIDER_HEIGHT,
            })
            .sum();
        Size::new(config.menu_width, height)
    }

    fn entry_frames(&self, origin: Vec2, config: &OverlayConfig) -> SmallVec<[Rect; 8]> {
        let mut frames = SmallVec::new();
        let mut y = origin.y;
        for entry in &self.entries {
            let h = match entry {
                MenuEntry::Item(_) => self.item_height(config),
                MenuEntry::Divider => DIVIDER_HEIGHT,
            };
            frames.push(Rect::new(origin.x, y, config.menu_width, h));
            y += h;
        }
        frames
    }

    /// Index of the item under `point`, given the menu's resting top-left.
    pub(crate) fn hit_test(
        &self,
        origin: Vec2,
        point: Vec2,
        config: &OverlayConfig,
    ) -> Option<usize> {
        self.entry_frames(origin, config)
            .iter()
            .enumerate()
            .find(|(i, frame)| {
                matches!(self.entries[*i], MenuEntry::Item(_)) && frame.contains(point)
            })
            .map(|(i, _)| i)
    }

    /// Runs the item's action. The caller dismisses afterwards.
    pub(crate) fn activate(&self, index: usize) {
        if let Some(MenuEntry::Item(item)) = self.entries.get(index) {
            (item.action)();
        }
    }

    pub(crate) fn emit(
        &self,
        scene: &mut Scene,
        frame: Rect,
        scale: f32,
        alpha: f32,
        y_offset: f32,
        config: &OverlayConfig,
    ) {
        let anchor = Vec2::new(frame.mid_x(), frame.mid_y());
        let mut drawn = frame.scaled_around(anchor, scale);
        drawn.y += y_offset;

        scene.push(SceneNode::Shadow {
            rect: drawn,
            radius: config.menu_corner_radius,
            blur: 10.0,
            offset: Vec2::new(0.0, 4.0),
            color: config.shadow_color,
            alpha,
        });
        scene.push(SceneNode::Rect {
            rect: drawn,
            color: config.menu_background,
            radius: config.menu_corner_radius,
            alpha,
        });

        for (entry, entry_frame) in self
            .entries
            .iter()
            .zip(self.entry_frames(Vec2::new(frame.x, frame.y), config))
        {
            let mut rect = entry_frame.scaled_around(anchor, scale);
            rect.y += y_offset;

            match entry {
                MenuEntry::Item(item) => {
                    let color = if item.destructive {
                        config.destructive_color
                    } else {
                        config.label_color
                    };
                    let inner = rect.inset_by(
                        config.menu_item_padding_x * scale,
                        config.menu_item_padding_y * scale,
                    );
                    scene.push(SceneNode::Text {
                        rect: inner,
                        text: item.label.clone(),
                        size: config.menu_font_size * scale,
                        color,
                        alpha,
                    });
                    if let Some(icon) = &item.icon {
                        let icon_w = config.menu_font_size * scale;
                        scene.push(SceneNode::Text {
                            rect: Rect::new(
                                inner.x + inner.w - icon_w,
                                inner.y,
                                icon_w,
                                inner.h,
                            ),
                            text: icon.clone(),
                            size: config.menu_font_size * scale,
                            color: if item.destructive {
                                color
                            } else {
                                config.secondary_label_color
                            },
                            alpha,
                        });
                    }
                }
                MenuEntry::Divider => {
                    scene.push(SceneNode::Rect {
                        rect: rect.inset_by(config.divider_inset * scale, 0.0),
                        color: config.divider_color,
                        radius: 0.0,
                        alpha,
                    });
                }
            }
        }
    }
}
