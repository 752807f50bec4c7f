//! In-game mode: first-person view with a minimap in the corner.
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::camera::Camera;
use crate::core::input::Action;
use crate::core::map::{GridMap, load_level};
use crate::core::process_events::process_events;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::{draw_minimap, minimap_size};
use crate::render::render3d::render_3d;
use crate::scene::{Frame, Scene, SceneCommand, SceneId, Viewport};

pub const DEFAULT_MINIMAP_SCALE: u32 = 6;
/// Where the minimap lands on the screen.
pub const MINIMAP_OFFSET: (i32, i32) = (8, 8);

pub struct GameScene {
    canvas: Option<Framebuffer>,
    minimap: Option<Framebuffer>,
    map: GridMap,
    camera: Camera,
    pending_level: Option<PathBuf>,
    minimap_scale: u32,
}

impl Default for GameScene {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMAP_SCALE)
    }
}

impl GameScene {
    pub fn new(minimap_scale: u32) -> Self {
        Self {
            canvas: None,
            minimap: None,
            map: GridMap::builtin(),
            camera: Camera::default(),
            pending_level: None,
            minimap_scale: minimap_scale.max(1),
        }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn pending_level(&self) -> Option<&Path> {
        self.pending_level.as_deref()
    }

    pub fn canvas(&self) -> Option<&Framebuffer> {
        self.canvas.as_ref()
    }

    pub fn minimap(&self) -> Option<&Framebuffer> {
        self.minimap.as_ref()
    }

    fn recreate_minimap(&mut self) {
        let (w, h) = minimap_size(&self.map, self.minimap_scale);
        self.minimap = Some(Framebuffer::new(w, h));
    }

    /// Replace the map with the level at `path`. On failure the current map
    /// and camera stay.
    fn load(&mut self, path: &Path) {
        let map = match load_level(path) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "level_load_failed");
                return;
            }
        };
        let Some(spawn) = map.find_spawn() else {
            warn!(path = %path.display(), "level_has_no_floor");
            return;
        };

        info!(path = %path.display(), w = map.width(), h = map.height(), "level_loaded");
        self.map = map;
        self.camera = Camera {
            pos: spawn,
            ..Camera::default()
        };
        self.recreate_minimap();
    }
}

impl Scene for GameScene {
    fn on_init(&mut self, viewport: Viewport) {
        // a queued level survives; it is applied on the first update
        self.map = GridMap::builtin();
        self.camera = Camera::default();
        self.canvas = Some(Framebuffer::new(viewport.width, viewport.height));
        self.recreate_minimap();
        debug!(w = viewport.width, h = viewport.height, "game_init");
    }

    fn on_update(&mut self, frame: &Frame) -> SceneCommand {
        // levels are only parsed while this scene is the active one
        if let Some(path) = self.pending_level.take() {
            self.load(&path);
        }

        process_events(&mut self.camera, &self.map, &frame.input, frame.dt);

        if frame.input.is_held(Action::OpenMenu) {
            return SceneCommand::SwitchTo(SceneId::Menu);
        }
        SceneCommand::None
    }

    fn on_render(&mut self, screen: &mut Framebuffer) {
        if let Some(canvas) = self.canvas.as_mut() {
            render_3d(canvas, &self.map, &self.camera);
            screen.blit(canvas, 0, 0);
        }
        if let Some(minimap) = self.minimap.as_mut() {
            draw_minimap(minimap, &self.map, &self.camera, self.minimap_scale);
            screen.blit(minimap, MINIMAP_OFFSET.0, MINIMAP_OFFSET.1);
        }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.canvas = Some(Framebuffer::new(viewport.width, viewport.height));
    }

    fn on_destroy(&mut self) {
        self.canvas = None;
        self.minimap = None;
        self.map = GridMap::builtin();
        self.camera = Camera::default();
        self.pending_level = None;
    }

    fn queue_level(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "level_queued");
        self.pending_level = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::HeldActions;
    use crate::render::minimap::MINIMAP_WALL;
    use glam::Vec2;

    fn frame(input: HeldActions) -> Frame {
        Frame {
            now: 0.0,
            dt: 0.016,
            input,
        }
    }

    #[test]
    fn starts_on_builtin_map() {
        let mut game = GameScene::default();
        game.on_init(Viewport::new(64, 48));
        assert!(game.map().is_builtin());
        assert_eq!(game.camera().pos, Vec2::new(12.0, 12.0));
        let mm = game.minimap().unwrap();
        assert_eq!((mm.width, mm.height), (144, 144));
    }

    #[test]
    fn missing_level_keeps_current_map() {
        let mut game = GameScene::default();
        game.on_init(Viewport::new(64, 48));
        game.queue_level(PathBuf::from("no/such/level.cub3d"));
        assert!(game.pending_level().is_some());
        game.on_update(&frame(HeldActions::none()));
        assert!(game.pending_level().is_none());
        assert!(game.map().is_builtin());
        assert_eq!(game.camera().pos, Vec2::new(12.0, 12.0));
    }

    #[test]
    fn open_menu_requests_menu() {
        let mut game = GameScene::default();
        game.on_init(Viewport::new(64, 48));
        let held: HeldActions = [Action::OpenMenu].into_iter().collect();
        assert_eq!(game.on_update(&frame(held)), SceneCommand::SwitchTo(SceneId::Menu));
        assert_eq!(game.on_update(&frame(HeldActions::none())), SceneCommand::None);
    }

    #[test]
    fn render_composites_minimap_over_view() {
        let mut game = GameScene::default();
        game.on_init(Viewport::new(320, 240));
        let mut screen = Framebuffer::new(320, 240);
        game.on_render(&mut screen);
        // top-left tile of the built-in map is a wall
        assert_eq!(screen.get_pixel(8, 8), MINIMAP_WALL);
        assert_eq!(screen.get_pixel(300, 2), crate::render::render3d::SKY);
    }

    #[test]
    fn reinit_after_destroy_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("side.cub3d");
        std::fs::write(&path, "1 1 1 1\n1 1 0 1\n1 1 1 1\n").unwrap();

        let mut game = GameScene::default();
        game.on_init(Viewport::new(64, 48));
        game.queue_level(path);
        game.on_update(&frame(HeldActions::none()));
        assert_eq!(game.camera().pos, Vec2::new(2.5, 1.5));

        game.queue_level(PathBuf::from("never/loaded.cub3d"));
        game.on_destroy();
        assert!(game.pending_level().is_none());

        game.on_init(Viewport::new(64, 48));
        assert!(game.map().is_builtin());
        assert_eq!(*game.camera(), Camera::default());
        assert!(!game.map().is_wall(12, 12));
    }

    #[test]
    fn level_queued_before_init_is_kept() {
        let mut game = GameScene::default();
        game.queue_level(PathBuf::from("some/level.cub3d"));
        game.on_init(Viewport::new(64, 48));
        assert_eq!(game.pending_level(), Some(Path::new("some/level.cub3d")));
    }

    #[test]
    fn resize_only_touches_view_canvas() {
        let mut game = GameScene::default();
        game.on_init(Viewport::new(64, 48));
        game.on_resize(Viewport::new(100, 50));
        let canvas = game.canvas().unwrap();
        assert_eq!((canvas.width, canvas.height), (100, 50));
        assert_eq!(game.minimap().unwrap().width, 144);
    }
}
