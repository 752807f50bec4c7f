//! Perspective renderer: one flat-colored wall strip per column over a
//! sky/floor background.
use crate::core::camera::Camera;
use crate::core::map::GridMap;
use crate::render::casters::{Side, camera_x, cast_ray, ray_direction};
use crate::render::framebuffer::{Color, Framebuffer};

pub const SKY: Color = Color::rgb(135, 206, 235);
pub const FLOOR: Color = Color::rgb(40, 40, 40);

const WALL_1: Color = Color::rgb(200, 0, 0);
const WALL_2: Color = Color::rgb(0, 200, 0);
const WALL_3: Color = Color::rgb(0, 0, 200);
const WALL_4: Color = Color::rgb(200, 200, 0);
const WALL_OTHER: Color = Color::rgb(200, 200, 200);

/// Base color for a wall tile code.
pub fn wall_color(tile: i32) -> Color {
    match tile {
        1 => WALL_1,
        2 => WALL_2,
        3 => WALL_3,
        4 => WALL_4,
        _ => WALL_OTHER,
    }
}

/// Shaded color of a hit: walls crossed on the Y axis are drawn at half
/// brightness.
pub fn shade(tile: i32, side: Side) -> Color {
    let base = wall_color(tile);
    match side {
        Side::X => base,
        Side::Y => base.halved(),
    }
}

/// Projected wall height in pixels for a buffer `height` tall.
#[inline]
pub fn line_height(height: u32, perp_dist: f32) -> i32 {
    (height as f32 / perp_dist) as i32
}

/// Unclipped inclusive row range of a strip centred on the horizon.
#[inline]
pub fn strip_range(height: u32, perp_dist: f32) -> (i32, i32) {
    let line_h = line_height(height, perp_dist);
    let mid = height as i32 / 2;
    (-line_h / 2 + mid, line_h / 2 + mid)
}

/// Sky above the horizon, floor below.
pub fn paint_ceiling_and_floor(fb: &mut Framebuffer) {
    let hh = (fb.height / 2) as i32;
    let w = fb.width as i32;
    fb.fill_rect(0, 0, w, hh, SKY);
    fb.fill_rect(0, hh, w, fb.height as i32 - hh, FLOOR);
}

pub fn render_3d(fb: &mut Framebuffer, map: &GridMap, camera: &Camera) {
    paint_ceiling_and_floor(fb);
    if fb.width == 0 || fb.height == 0 {
        return;
    }
    for x in 0..fb.width {
        let ray = ray_direction(camera, camera_x(x, fb.width));
        let hit = cast_ray(map, camera, ray);
        let (y0, y1) = strip_range(fb.height, hit.perp_dist);
        fb.draw_vertical(x as i32, y0, y1, shade(hit.tile, hit.side));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn palette_has_fallback() {
        assert_eq!(wall_color(1), Color::rgb(200, 0, 0));
        assert_eq!(wall_color(4), Color::rgb(200, 200, 0));
        assert_eq!(wall_color(9), Color::rgb(200, 200, 200));
        assert_eq!(wall_color(-3), Color::rgb(200, 200, 200));
    }

    #[test]
    fn y_side_is_half_bright() {
        assert_eq!(shade(2, Side::X), Color::rgb(0, 200, 0));
        assert_eq!(shade(2, Side::Y), Color::rgb(0, 100, 0));
    }

    #[test]
    fn strip_is_centred() {
        assert_eq!(strip_range(100, 1.0), (0, 100));
        assert_eq!(strip_range(100, 2.0), (25, 75));
        assert_eq!(strip_range(100, 4.0), (38, 62));
    }

    #[test]
    fn tiny_distance_does_not_overflow() {
        let (y0, y1) = strip_range(600, crate::render::casters::MIN_PERP_DIST);
        assert!(y0 < 0);
        assert!(y1 > 600);
    }

    #[test]
    fn background_split_at_horizon() {
        let mut fb = Framebuffer::new(4, 6);
        paint_ceiling_and_floor(&mut fb);
        assert_eq!(fb.get_pixel(0, 2), SKY);
        assert_eq!(fb.get_pixel(3, 3), FLOOR);
        assert_eq!(fb.get_pixel(3, 5), FLOOR);
    }

    #[test]
    fn every_column_gets_a_wall() {
        let map = GridMap::builtin();
        let cam = Camera::default();
        let mut fb = Framebuffer::new(64, 48);
        render_3d(&mut fb, &map, &cam);
        let mid = (fb.height / 2) as i32;
        for x in 0..fb.width as i32 {
            let c = fb.get_pixel(x, mid);
            assert_ne!(c, SKY);
            assert_ne!(c, FLOOR);
        }
    }

    #[test]
    fn facing_a_near_wall_fills_the_column() {
        let map = GridMap::from_rows(&[[1, 1, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
        let cam = Camera::new(Vec2::new(1.5, 1.1), Vec2::new(0.0, -1.0), Vec2::new(0.66, 0.0));
        let mut fb = Framebuffer::new(8, 40);
        render_3d(&mut fb, &map, &cam);
        let centre = (fb.width / 2) as i32;
        for y in 0..fb.height as i32 {
            assert_eq!(fb.get_pixel(centre, y), Color::rgb(100, 0, 0));
        }
    }
}
