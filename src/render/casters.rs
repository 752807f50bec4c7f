//! Grid DDA ray casting.
use glam::Vec2;

use crate::core::camera::Camera;
use crate::core::map::GridMap;

/// Step length used on an axis the ray never crosses.
pub const DEGENERATE_DELTA: f32 = 1e30;

/// Smallest perpendicular distance the projection divides by.
pub const MIN_PERP_DIST: f32 = 1e-6;

/// Which grid line the ray crossed last before hitting the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical line (stepped along X).
    X,
    /// Crossed a horizontal line (stepped along Y).
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersect {
    /// Distance along the camera's forward axis, never below [`MIN_PERP_DIST`].
    pub perp_dist: f32,
    /// Tile code of the wall that was hit.
    pub tile: i32,
    pub side: Side,
    pub map_x: i32,
    pub map_y: i32,
}

/// Ray direction for a column offset `camera_x` in `[-1, 1]`.
#[inline]
pub fn ray_direction(camera: &Camera, camera_x: f32) -> Vec2 {
    camera.dir + camera.plane * camera_x
}

/// `[-1, 1]` offset of column `x` in a buffer `width` pixels wide.
#[inline]
pub fn camera_x(x: u32, width: u32) -> f32 {
    2.0 * x as f32 / width as f32 - 1.0
}

#[inline]
fn delta(component: f32) -> f32 {
    if component == 0.0 {
        DEGENERATE_DELTA
    } else {
        (1.0 / component).abs()
    }
}

/// Walk the grid from the camera along `ray` until a wall tile is found.
///
/// Terminates on any map because out-of-range cells read as walls.
pub fn cast_ray(map: &GridMap, camera: &Camera, ray: Vec2) -> Intersect {
    let pos = camera.pos;
    let mut map_x = pos.x.floor() as i32;
    let mut map_y = pos.y.floor() as i32;

    let delta_x = delta(ray.x);
    let delta_y = delta(ray.y);

    let (step_x, mut side_x) = if ray.x < 0.0 {
        (-1, (pos.x - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - pos.x) * delta_x)
    };
    let (step_y, mut side_y) = if ray.y < 0.0 {
        (-1, (pos.y - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - pos.y) * delta_y)
    };

    let (tile, side) = loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            Side::X
        } else {
            side_y += delta_y;
            map_y += step_y;
            Side::Y
        };
        let tile = map.tile_at(map_x, map_y);
        if tile > 0 {
            break (tile, side);
        }
    };

    let perp_dist = match side {
        Side::X => side_x - delta_x,
        Side::Y => side_y - delta_y,
    };

    Intersect {
        perp_dist: perp_dist.max(MIN_PERP_DIST),
        tile,
        side,
        map_x,
        map_y,
    }
}
