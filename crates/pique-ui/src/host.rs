//! Top-level integration point. Install one host per view hierarchy; it owns
//! the controller, mounts the presenter while a presentation is active, and
//! is the only thing that clears `presented` (after the exit animation).

use std::cell::Cell;
use std::rc::Rc;

use pique_core::{EdgeInsets, PointerEvent, Size, SubKey};
use web_time::Instant;

use crate::catalog::ReactionCatalog;
use crate::config::OverlayConfig;
use crate::controller::OverlayController;
use crate::error::InstallError;
use crate::presenter::OverlayPresenter;
use crate::scene::Scene;

thread_local! {
    static HOST_INSTALLED: Cell<bool> = const { Cell::new(false) };
}

pub struct HostMount {
    controller: OverlayController,
    config: Rc<OverlayConfig>,
    catalog: Rc<dyn ReactionCatalog>,
    screen: Size,
    insets: EdgeInsets,
    presenter: Option<OverlayPresenter>,
    scene: Scene,
    /// Embedding lists freeze their own scrolling while the overlay is up.
    scroll_locked: Rc<Cell<bool>>,
    visible_sub: SubKey,
}

impl HostMount {
    pub fn new(
        controller: OverlayController,
        config: OverlayConfig,
        catalog: Rc<dyn ReactionCatalog>,
    ) -> Result<Self, InstallError> {
        if HOST_INSTALLED.with(|i| i.replace(true)) {
            return Err(InstallError::AlreadyInstalled);
        }

        let scroll_locked = Rc::new(Cell::new(false));
        let visible_sub = {
            let scroll_locked = scroll_locked.clone();
            controller.visible().subscribe(move |visible| {
                log::debug!("overlay visible: {visible}");
                scroll_locked.set(*visible);
            })
        };

        Ok(HostMount {
            controller,
            config: Rc::new(config),
            catalog,
            screen: Size::ZERO,
            insets: EdgeInsets::default(),
            presenter: None,
            scene: Scene::default(),
            scroll_locked,
            visible_sub,
        })
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn config(&self) -> &Rc<OverlayConfig> {
        &self.config
    }

    pub fn set_screen_size(&mut self, screen: Size) {
        self.screen = screen;
        if let Some(p) = &mut self.presenter {
            p.set_screen_size(screen);
        }
    }

    pub fn set_safe_area_insets(&mut self, insets: EdgeInsets) {
        self.insets = insets;
        if let Some(p) = &mut self.presenter {
            p.set_safe_area_insets(insets);
        }
    }

    pub fn is_overlay_mounted(&self) -> bool {
        self.presenter.is_some()
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked.get()
    }

    pub fn presenter(&self) -> Option<&OverlayPresenter> {
        self.presenter.as_ref()
    }

    /// Forward a pointer event to the mounted overlay, if any.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if let Some(p) = &mut self.presenter {
            p.handle_pointer(event);
        }
    }

    /// Advance one frame and emit the overlay scene (empty when nothing is
    /// presented). Mounts the presenter when a presentation begins and drops
    /// it once the exit animation has finished.
    pub fn frame(&mut self, now: Instant) -> &Scene {
        if self.presenter.is_none()
            && self.controller.is_visible()
            && let Some(request) = self.controller.presented().get()
        {
            log::debug!("mounting overlay presenter");
            self.presenter = Some(OverlayPresenter::new(
                self.controller.clone(),
                request,
                self.catalog.reactions(),
                self.screen,
                self.insets,
                self.config.clone(),
            ));
        }

        self.scene.clear();
        let mut unmount = false;
        if let Some(p) = &mut self.presenter {
            p.tick(now);
            p.emit(&mut self.scene);
            unmount = p.is_finished() && !self.controller.is_visible();
        }
        if unmount {
            log::debug!("unmounting overlay presenter");
            self.presenter = None;
            self.controller.clear_presented();
            self.scene.clear();
        }
        &self.scene
    }
}

impl Drop for HostMount {
    fn drop(&mut self) {
        self.controller.visible().unsubscribe(self.visible_sub);
        HOST_INSTALLED.with(|i| i.set(false));
    }
}
