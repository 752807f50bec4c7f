//! Frame orchestration independent of any window system.
//!
//! The host owns the window and the clock source; every tick it hands
//! [`App::frame`] the current time and the held actions, then presents
//! [`App::screen`].
use tracing::info;

use crate::core::input::HeldActions;
use crate::render::framebuffer::Framebuffer;
use crate::scene::{GameScene, MenuScene, Scene, SceneId, SceneManager, Viewport};

/// Longest step fed to the simulation, in seconds.
pub const MAX_FRAME_DT: f32 = 0.05;

/// Turns absolute timestamps into clamped per-frame deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick, in `[0, MAX_FRAME_DT]`. The first
    /// tick returns 0.
    pub fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last.replace(now) {
            Some(prev) => (now - prev) as f32,
            None => 0.0,
        };
        dt.clamp(0.0, MAX_FRAME_DT)
    }
}

pub struct App<M = MenuScene, G = GameScene> {
    screen: Framebuffer,
    scenes: SceneManager<M, G>,
    clock: FrameClock,
}

impl<M: Scene, G: Scene> App<M, G> {
    pub fn new(viewport: Viewport, menu: M, game: G) -> Self {
        let mut scenes = SceneManager::new(viewport);
        scenes.register_menu(menu);
        scenes.register_game(game);
        Self {
            screen: Framebuffer::new(viewport.width, viewport.height),
            scenes,
            clock: FrameClock::new(),
        }
    }

    /// Activate `first` before the first frame is drawn.
    pub fn start(&mut self, first: SceneId) {
        self.scenes.request_change(first);
        self.scenes.process_pending_switch();
        info!(scene = ?self.scenes.current(), "app_started");
    }

    pub fn screen(&self) -> &Framebuffer {
        &self.screen
    }

    pub fn scenes(&self) -> &SceneManager<M, G> {
        &self.scenes
    }

    pub fn scenes_mut(&mut self) -> &mut SceneManager<M, G> {
        &mut self.scenes
    }

    /// One tick: update, render, then apply any switch requested during it.
    pub fn frame(&mut self, now: f64, input: HeldActions) {
        let dt = self.clock.tick(now);
        self.scenes.update(now, dt, input);
        self.scenes.render(&mut self.screen);
        self.scenes.process_pending_switch();
    }

    /// Recreate the screen at the new size and notify the scenes.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.scenes.viewport() {
            return;
        }
        info!(w = viewport.width, h = viewport.height, "window_resized");
        self.screen = Framebuffer::new(viewport.width, viewport.height);
        self.scenes.resize(viewport);
    }

    pub fn shutdown(&mut self) {
        self.scenes.shutdown();
        info!("app_shutdown");
    }
}
