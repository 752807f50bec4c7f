//! Full-screen modes and the manager that switches between them.
//!
//! Every mode implements [`Scene`]. The [`SceneManager`] owns one instance
//! per [`SceneId`], initialises each lazily on first activation, and only
//! swaps the active scene at the end of a frame.
use std::path::PathBuf;

use crate::core::input::HeldActions;
use crate::render::framebuffer::Framebuffer;

pub mod game;
pub mod manager;
pub mod menu;

pub use game::GameScene;
pub use manager::SceneManager;
pub use menu::MenuScene;

/// The closed set of modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Menu,
    Game,
}

/// Window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Inputs to one update.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Seconds since start-up.
    pub now: f64,
    /// Clamped seconds since the previous frame.
    pub dt: f32,
    pub input: HeldActions,
}

/// What a scene asks for at the end of its update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SceneCommand {
    #[default]
    None,
    SwitchTo(SceneId),
    /// Queue a level file on the game scene, then switch to it.
    PlayLevel(PathBuf),
}

/// Lifecycle hooks shared by every mode.
pub trait Scene {
    /// Allocate buffers. Runs once, just before the first `on_show`.
    fn on_init(&mut self, viewport: Viewport);
    fn on_show(&mut self) {}
    fn on_hide(&mut self) {}
    fn on_update(&mut self, frame: &Frame) -> SceneCommand;
    /// Draw into the shared screen buffer.
    fn on_render(&mut self, screen: &mut Framebuffer);
    /// Recreate every owned buffer at the new size.
    fn on_resize(&mut self, viewport: Viewport);
    fn on_destroy(&mut self) {}
    /// Remember a level to load; only scenes that play levels care.
    fn queue_level(&mut self, _path: PathBuf) {}
}
