//! Scene registry with deferred switching.
//!
//! `request_change` only records the target. `process_pending_switch` runs
//! the hide/init/show sequence and is meant to be called once per frame,
//! after update and render, so a switch asked for mid-update never swaps
//! buffers under a render in progress.
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::input::HeldActions;
use crate::render::framebuffer::Framebuffer;
use crate::scene::{Frame, GameScene, MenuScene, Scene, SceneCommand, SceneId, Viewport};

struct Slot<S> {
    scene: S,
    initialized: bool,
}

impl<S> Slot<S> {
    fn new(scene: S) -> Self {
        Self {
            scene,
            initialized: false,
        }
    }
}

/// Runs `$body` with `$slot` bound to the slot registered for `$id`,
/// yielding `None` when nothing is registered there.
macro_rules! with_slot {
    ($self:ident, $id:expr, |$slot:ident| $body:expr) => {
        match $id {
            SceneId::Menu => $self.menu.as_mut().map(|$slot| $body),
            SceneId::Game => $self.game.as_mut().map(|$slot| $body),
        }
    };
}

pub struct SceneManager<M = MenuScene, G = GameScene> {
    menu: Option<Slot<M>>,
    game: Option<Slot<G>>,
    current: Option<SceneId>,
    pending: Option<SceneId>,
    viewport: Viewport,
}

impl<M: Scene, G: Scene> SceneManager<M, G> {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            menu: None,
            game: None,
            current: None,
            pending: None,
            viewport,
        }
    }

    pub fn register_menu(&mut self, scene: M) {
        self.menu = Some(Slot::new(scene));
    }

    pub fn register_game(&mut self, scene: G) {
        self.game = Some(Slot::new(scene));
    }

    pub fn is_registered(&self, id: SceneId) -> bool {
        match id {
            SceneId::Menu => self.menu.is_some(),
            SceneId::Game => self.game.is_some(),
        }
    }

    pub fn is_initialized(&self, id: SceneId) -> bool {
        match id {
            SceneId::Menu => self.menu.as_ref().is_some_and(|s| s.initialized),
            SceneId::Game => self.game.as_ref().is_some_and(|s| s.initialized),
        }
    }

    pub fn current(&self) -> Option<SceneId> {
        self.current
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<SceneId> {
        self.pending
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn menu(&self) -> Option<&M> {
        self.menu.as_ref().map(|s| &s.scene)
    }

    pub fn menu_mut(&mut self) -> Option<&mut M> {
        self.menu.as_mut().map(|s| &mut s.scene)
    }

    pub fn game(&self) -> Option<&G> {
        self.game.as_ref().map(|s| &s.scene)
    }

    pub fn game_mut(&mut self) -> Option<&mut G> {
        self.game.as_mut().map(|s| &mut s.scene)
    }

    /// Record `id` as the scene to show at the next switch point.
    ///
    /// Unregistered targets are ignored.
    pub fn request_change(&mut self, id: SceneId) {
        if !self.is_registered(id) {
            warn!(scene = ?id, "scene_change_ignored_unregistered");
            return;
        }
        debug!(scene = ?id, "scene_change_requested");
        self.pending = Some(id);
    }

    /// Apply the pending change, if any: hide the current scene, initialise
    /// the target on first use, show it and make it current.
    pub fn process_pending_switch(&mut self) {
        let Some(next) = self.pending.take() else {
            return;
        };
        if !self.is_registered(next) {
            return;
        }

        if let Some(cur) = self.current {
            with_slot!(self, cur, |slot| slot.scene.on_hide());
        }

        let viewport = self.viewport;
        with_slot!(self, next, |slot| {
            if !slot.initialized {
                slot.scene.on_init(viewport);
                slot.initialized = true;
            }
            slot.scene.on_show();
        });

        info!(from = ?self.current, to = ?next, "scene_switched");
        self.current = Some(next);
    }

    /// Update the active scene and act on the command it returns.
    pub fn update(&mut self, now: f64, dt: f32, input: HeldActions) {
        let Some(cur) = self.current else {
            return;
        };
        let frame = Frame { now, dt, input };
        let command = with_slot!(self, cur, |slot| slot.scene.on_update(&frame)).unwrap_or_default();
        self.apply(command);
    }

    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::None => {}
            SceneCommand::SwitchTo(id) => self.request_change(id),
            SceneCommand::PlayLevel(path) => self.play_level(path),
        }
    }

    /// Queue `path` on the game scene and ask for it to become active.
    pub fn play_level(&mut self, path: PathBuf) {
        match self.game.as_mut() {
            Some(slot) => {
                slot.scene.queue_level(path);
                self.request_change(SceneId::Game);
            }
            None => warn!(path = %path.display(), "play_level_without_game_scene"),
        }
    }

    pub fn render(&mut self, screen: &mut Framebuffer) {
        if let Some(cur) = self.current {
            with_slot!(self, cur, |slot| slot.scene.on_render(screen));
        }
    }

    /// Forward a window resize to every initialised scene. Scenes initialised
    /// later are created at this size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        for id in [SceneId::Menu, SceneId::Game] {
            with_slot!(self, id, |slot| {
                if slot.initialized {
                    slot.scene.on_resize(viewport);
                }
            });
        }
    }

    /// Destroy every initialised scene. Nothing is current afterwards.
    pub fn shutdown(&mut self) {
        for id in [SceneId::Menu, SceneId::Game] {
            with_slot!(self, id, |slot| {
                if slot.initialized {
                    slot.scene.on_destroy();
                    slot.initialized = false;
                }
            });
        }
        self.current = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        init: u32,
        show: u32,
        hide: u32,
        resize: u32,
        next: Option<SceneCommand>,
    }

    impl Scene for Counter {
        fn on_init(&mut self, _: Viewport) {
            self.init += 1;
        }
        fn on_show(&mut self) {
            self.show += 1;
        }
        fn on_hide(&mut self) {
            self.hide += 1;
        }
        fn on_update(&mut self, _: &Frame) -> SceneCommand {
            self.next.take().unwrap_or_default()
        }
        fn on_render(&mut self, _: &mut Framebuffer) {}
        fn on_resize(&mut self, _: Viewport) {
            self.resize += 1;
        }
    }

    fn manager() -> SceneManager<Counter, Counter> {
        let mut sm = SceneManager::new(Viewport::new(32, 24));
        sm.register_menu(Counter::default());
        sm.register_game(Counter::default());
        sm
    }

    #[test]
    fn request_is_deferred() {
        let mut sm = manager();
        sm.request_change(SceneId::Menu);
        assert!(sm.has_pending());
        assert_eq!(sm.current(), None);
        assert_eq!(sm.menu().unwrap().init, 0);

        sm.process_pending_switch();
        assert!(!sm.has_pending());
        assert_eq!(sm.current(), Some(SceneId::Menu));
        assert_eq!(sm.menu().unwrap().init, 1);
        assert_eq!(sm.menu().unwrap().show, 1);
    }

    #[test]
    fn switch_from_update_waits_for_switch_point() {
        let mut sm = manager();
        sm.request_change(SceneId::Menu);
        sm.process_pending_switch();

        sm.menu_mut().unwrap().next = Some(SceneCommand::SwitchTo(SceneId::Game));
        sm.update(0.0, 0.016, HeldActions::none());
        assert_eq!(sm.current(), Some(SceneId::Menu));
        assert_eq!(sm.pending(), Some(SceneId::Game));

        sm.process_pending_switch();
        assert_eq!(sm.current(), Some(SceneId::Game));
        assert_eq!(sm.menu().unwrap().hide, 1);
    }

    #[test]
    fn resize_skips_uninitialised() {
        let mut sm = manager();
        sm.request_change(SceneId::Menu);
        sm.process_pending_switch();
        sm.resize(Viewport::new(64, 48));
        assert_eq!(sm.menu().unwrap().resize, 1);
        assert_eq!(sm.game().unwrap().resize, 0);
        assert_eq!(sm.viewport(), Viewport::new(64, 48));
    }

    #[test]
    fn unregistered_target_is_ignored() {
        let mut sm: SceneManager<Counter, Counter> = SceneManager::new(Viewport::new(8, 8));
        sm.register_menu(Counter::default());
        sm.request_change(SceneId::Game);
        assert!(!sm.has_pending());
        sm.process_pending_switch();
        assert_eq!(sm.current(), None);
    }
}
