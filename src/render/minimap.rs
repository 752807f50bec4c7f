//! Top-down map overlay.
use crate::core::camera::Camera;
use crate::core::map::GridMap;
use crate::render::framebuffer::{Color, Framebuffer};
use crate::render::line::line;

pub const MINIMAP_BG: Color = Color::BLACK;
pub const MINIMAP_WALL: Color = Color::rgb(220, 220, 220);
pub const MINIMAP_FLOOR: Color = Color::rgb(30, 30, 30);
pub const MINIMAP_PLAYER: Color = Color::rgb(255, 50, 50);
pub const MINIMAP_FACING: Color = Color::rgb(255, 100, 100);

/// Side of the square player marker, in pixels.
const MARKER: i32 = 5;
/// Length of the facing line, in pixels.
const FACING_LEN: f32 = 10.0;

/// Size in pixels of a minimap for `map` drawn at `scale`.
pub fn minimap_size(map: &GridMap, scale: u32) -> (u32, u32) {
    (map.width() as u32 * scale, map.height() as u32 * scale)
}

pub fn draw_minimap(fb: &mut Framebuffer, map: &GridMap, camera: &Camera, scale: u32) {
    fb.fill(MINIMAP_BG);
    let s = scale as i32;
    for y in 0..map.height() as i32 {
        for x in 0..map.width() as i32 {
            let c = if map.is_wall(x, y) { MINIMAP_WALL } else { MINIMAP_FLOOR };
            fb.fill_rect(x * s, y * s, s, s, c);
        }
    }

    let px = (camera.pos.x * scale as f32) as i32;
    let py = (camera.pos.y * scale as f32) as i32;
    fb.fill_rect(px - MARKER / 2, py - MARKER / 2, MARKER, MARKER, MINIMAP_PLAYER);

    let lx = px + (camera.dir.x * FACING_LEN) as i32;
    let ly = py + (camera.dir.y * FACING_LEN) as i32;
    line(fb, px, py, lx, ly, MINIMAP_FACING);
}
