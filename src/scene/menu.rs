//! Level-select menu: animated backdrop plus a paged 2x2 grid of entries.
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::input::{Action, HeldActions};
use crate::core::map::list_levels;
use crate::render::framebuffer::{Color, Framebuffer};
use crate::render::menu_bg::{DEFAULT_SEED, MenuBg};
use crate::scene::{Frame, Scene, SceneCommand, SceneId, Viewport};

pub const GRID_COLS: usize = 2;
pub const GRID_ROWS: usize = 2;
pub const PER_PAGE: usize = GRID_COLS * GRID_ROWS;

const PANEL_W: i32 = 640;
const PANEL_H: i32 = 420;
const GAP: i32 = 16;
const PAGER_H: i32 = 20;
const BORDER: i32 = 8;
const DEMO_ENTRIES: usize = 3;

const ITEM_EDGE: Color = Color::rgb(90, 90, 90);
const ITEM_FILL: Color = Color::rgb(200, 200, 200);
const ITEM_SELECTED: Color = Color::rgb(255, 210, 90);
const PAGER_FILL: Color = Color::BLACK;
const PAGER_MARK: Color = Color::rgb(200, 200, 200);

/// Screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// One selectable line of the menu. `path` is `None` for the demo entries,
/// which play the built-in map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub path: Option<PathBuf>,
}

impl MenuEntry {
    fn for_level(path: PathBuf) -> Self {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            label,
            path: Some(path),
        }
    }

    fn demo(n: usize) -> Self {
        Self {
            label: format!("Demo {n}"),
            path: None,
        }
    }
}

/// Entries for every level under `dir`, or the demo set when there are none.
pub fn build_entries(dir: &Path) -> Vec<MenuEntry> {
    let levels = match list_levels(dir) {
        Ok(levels) => levels,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "level_dir_unreadable");
            Vec::new()
        }
    };
    if levels.is_empty() {
        return (1..=DEMO_ENTRIES).map(MenuEntry::demo).collect();
    }
    levels.into_iter().map(MenuEntry::for_level).collect()
}

/// A grid cell ready to be drawn or labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub rect: Rect,
    pub label: &'a str,
    pub selected: bool,
}

pub struct MenuScene {
    levels_dir: PathBuf,
    canvas: Option<Framebuffer>,
    bg: Option<MenuBg>,
    entries: Vec<MenuEntry>,
    selected: usize,
    enabled: bool,
    prev_input: Option<HeldActions>,
    viewport: Viewport,
}

impl MenuScene {
    pub fn new(levels_dir: impl Into<PathBuf>) -> Self {
        Self {
            levels_dir: levels_dir.into(),
            canvas: None,
            bg: None,
            entries: Vec::new(),
            selected: 0,
            enabled: false,
            prev_input: None,
            viewport: Viewport::default(),
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn canvas(&self) -> Option<&Framebuffer> {
        self.canvas.as_ref()
    }

    pub fn page(&self) -> usize {
        self.selected / PER_PAGE
    }

    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(PER_PAGE).max(1)
    }

    /// "current / total", one-based.
    pub fn page_label(&self) -> String {
        format!("{} / {}", self.page() + 1, self.page_count())
    }

    /// The panel holding the grid and pager, centred and clipped to the window.
    pub fn panel_rect(&self) -> Rect {
        let vw = self.viewport.width as i32;
        let vh = self.viewport.height as i32;
        let w = PANEL_W.min(vw);
        let h = PANEL_H.min(vh);
        Rect::new((vw - w) / 2, (vh - h) / 2, w, h)
    }

    pub fn pager_rect(&self) -> Rect {
        let p = self.panel_rect();
        Rect::new(p.x, p.y + p.h - PAGER_H, p.w, PAGER_H)
    }

    fn cell_rect(&self, slot: usize) -> Rect {
        let p = self.panel_rect();
        let grid_h = p.h - PAGER_H - GAP;
        let cw = (p.w - GAP * (GRID_COLS as i32 - 1)) / GRID_COLS as i32;
        let ch = (grid_h - GAP * (GRID_ROWS as i32 - 1)) / GRID_ROWS as i32;
        let col = (slot % GRID_COLS) as i32;
        let row = (slot / GRID_COLS) as i32;
        Rect::new(p.x + col * (cw + GAP), p.y + row * (ch + GAP), cw, ch)
    }

    /// Cells of the current page, in slot order.
    pub fn visible_items(&self) -> Vec<ItemView<'_>> {
        let first = self.page() * PER_PAGE;
        self.entries
            .iter()
            .enumerate()
            .skip(first)
            .take(PER_PAGE)
            .map(|(i, e)| ItemView {
                rect: self.cell_rect(i - first),
                label: &e.label,
                selected: i == self.selected,
            })
            .collect()
    }

    fn navigate(&mut self, pressed: HeldActions) {
        let n = self.entries.len();
        if n == 0 {
            return;
        }
        let mut sel = self.selected;
        if pressed.is_held(Action::MoveBack) && sel + GRID_COLS < n {
            sel += GRID_COLS;
        }
        if pressed.is_held(Action::MoveForward) && sel >= GRID_COLS {
            sel -= GRID_COLS;
        }
        if (pressed.is_held(Action::StrafeRight) || pressed.is_held(Action::TurnRight)) && sel + 1 < n {
            sel += 1;
        }
        if (pressed.is_held(Action::StrafeLeft) || pressed.is_held(Action::TurnLeft)) && sel > 0 {
            sel -= 1;
        }
        if sel != self.selected {
            debug!(from = self.selected, to = sel, "menu_selection_moved");
            self.selected = sel;
        }
    }

    fn activate(&self) -> SceneCommand {
        let Some(entry) = self.entries.get(self.selected) else {
            return SceneCommand::None;
        };
        info!(label = %entry.label, "menu_entry_chosen");
        match &entry.path {
            Some(path) => SceneCommand::PlayLevel(path.clone()),
            None => SceneCommand::SwitchTo(SceneId::Game),
        }
    }

    fn draw_items(&self, canvas: &mut Framebuffer) {
        for item in self.visible_items() {
            let Rect { x, y, w, h } = item.rect;
            canvas.fill_rect(x, y, w, h, ITEM_EDGE);
            let fill = if item.selected { ITEM_SELECTED } else { ITEM_FILL };
            canvas.fill_rect(x + BORDER, y + BORDER, w - 2 * BORDER, h - 2 * BORDER, fill);
        }

        let pager = self.pager_rect();
        canvas.fill_rect(pager.x, pager.y, pager.w, pager.h, PAGER_FILL);
        let pages = self.page_count() as i32;
        let seg = pager.w / pages;
        canvas.fill_rect(pager.x + seg * self.page() as i32, pager.y + 6, seg, pager.h - 12, PAGER_MARK);
    }
}

impl Scene for MenuScene {
    fn on_init(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.canvas = Some(Framebuffer::new(viewport.width, viewport.height));
        self.bg = Some(MenuBg::new(viewport.width, viewport.height, DEFAULT_SEED));
        self.entries = build_entries(&self.levels_dir);
        self.selected = 0;
        info!(entries = self.entries.len(), dir = %self.levels_dir.display(), "menu_ready");
    }

    fn on_show(&mut self) {
        self.enabled = true;
        self.prev_input = None;
    }

    fn on_hide(&mut self) {
        self.enabled = false;
    }

    fn on_update(&mut self, frame: &Frame) -> SceneCommand {
        if let Some(bg) = self.bg.as_mut() {
            bg.update(frame.now, frame.dt);
        }
        if !self.enabled {
            return SceneCommand::None;
        }

        // keys still down from the previous scene do not count as presses
        let pressed = match self.prev_input.replace(frame.input) {
            Some(prev) => frame.input.pressed_since(&prev),
            None => HeldActions::none(),
        };
        self.navigate(pressed);
        if pressed.is_held(Action::Confirm) {
            return self.activate();
        }
        SceneCommand::None
    }

    fn on_render(&mut self, screen: &mut Framebuffer) {
        let Some(mut canvas) = self.canvas.take() else {
            return;
        };
        if let Some(bg) = self.bg.as_ref() {
            bg.render(&mut canvas);
        }
        self.draw_items(&mut canvas);
        screen.blit(&canvas, 0, 0);
        self.canvas = Some(canvas);
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.canvas = Some(Framebuffer::new(viewport.width, viewport.height));
        if let Some(bg) = self.bg.as_mut() {
            bg.resize(viewport.width, viewport.height);
        }
    }

    fn on_destroy(&mut self) {
        self.canvas = None;
        self.bg = None;
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(input: HeldActions) -> Frame {
        Frame {
            now: 0.0,
            dt: 0.016,
            input,
        }
    }

    fn press(menu: &mut MenuScene, action: Action) -> SceneCommand {
        menu.on_update(&frame(HeldActions::none()));
        menu.on_update(&frame([action].into_iter().collect()))
    }

    fn shown(dir: &Path) -> MenuScene {
        let mut menu = MenuScene::new(dir);
        menu.on_init(Viewport::new(800, 600));
        menu.on_show();
        menu
    }

    #[test]
    fn missing_dir_gives_demo_entries() {
        let menu = shown(Path::new("definitely/not/here"));
        let labels: Vec<_> = menu.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Demo 1", "Demo 2", "Demo 3"]);
        assert!(menu.entries().iter().all(|e| e.path.is_none()));
    }

    #[test]
    fn demo_entry_switches_to_game() {
        let mut menu = shown(Path::new("definitely/not/here"));
        assert_eq!(press(&mut menu, Action::Confirm), SceneCommand::SwitchTo(SceneId::Game));
    }

    #[test]
    fn held_confirm_from_previous_scene_is_ignored() {
        let mut menu = shown(Path::new("definitely/not/here"));
        let held: HeldActions = [Action::Confirm].into_iter().collect();
        assert_eq!(menu.on_update(&frame(held)), SceneCommand::None);
        assert_eq!(menu.on_update(&frame(held)), SceneCommand::None);
    }

    #[test]
    fn grid_navigation_is_clamped() {
        let mut menu = shown(Path::new("definitely/not/here"));
        press(&mut menu, Action::StrafeLeft);
        assert_eq!(menu.selected(), 0);
        press(&mut menu, Action::MoveBack);
        assert_eq!(menu.selected(), 2);
        press(&mut menu, Action::TurnRight);
        assert_eq!(menu.selected(), 2);
        press(&mut menu, Action::MoveForward);
        assert_eq!(menu.selected(), 0);
        press(&mut menu, Action::StrafeRight);
        assert_eq!(menu.selected(), 1);
    }

    #[test]
    fn hidden_menu_ignores_input() {
        let mut menu = shown(Path::new("definitely/not/here"));
        menu.on_hide();
        assert_eq!(press(&mut menu, Action::Confirm), SceneCommand::None);
    }

    #[test]
    fn layout_is_centred() {
        let menu = shown(Path::new("definitely/not/here"));
        assert_eq!(menu.panel_rect(), Rect::new(80, 90, 640, 420));
        let items = menu.visible_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].rect, Rect::new(80, 90, 312, 184));
        assert_eq!(items[1].rect, Rect::new(408, 90, 312, 184));
        assert_eq!(items[2].rect, Rect::new(80, 290, 312, 184));
        assert!(items[0].selected);
        assert_eq!(menu.pager_rect(), Rect::new(80, 490, 640, 20));
        assert_eq!(menu.page_label(), "1 / 1");
    }

    #[test]
    fn render_highlights_selection() {
        let mut menu = shown(Path::new("definitely/not/here"));
        let mut screen = Framebuffer::new(800, 600);
        menu.on_render(&mut screen);
        assert_eq!(screen.get_pixel(80 + 100, 90 + 100), ITEM_SELECTED);
        assert_eq!(screen.get_pixel(408 + 100, 90 + 100), ITEM_FILL);
        assert_eq!(screen.get_pixel(80, 90), ITEM_EDGE);
    }

    #[test]
    fn resize_recreates_canvas() {
        let mut menu = shown(Path::new("definitely/not/here"));
        menu.on_resize(Viewport::new(320, 240));
        let canvas = menu.canvas().unwrap();
        assert_eq!((canvas.width, canvas.height), (320, 240));
        assert_eq!(menu.panel_rect(), Rect::new(0, 0, 320, 240));
    }
}
