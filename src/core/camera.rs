//! Viewer pose: position, facing and camera plane.
use glam::Vec2;

use crate::core::map::GridMap;

/// Position/direction/plane triple used by the raycaster.
///
/// `plane` is perpendicular to `dir`; its length is `tan(fov / 2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pos: Vec2,
    pub dir: Vec2,
    pub plane: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pos: Vec2::new(12.0, 12.0),
            dir: Vec2::new(-1.0, 0.0),
            plane: Vec2::new(0.0, 0.66),
        }
    }
}

impl Camera {
    pub fn new(pos: Vec2, dir: Vec2, plane: Vec2) -> Self {
        Self { pos, dir, plane }
    }

    /// Horizontal field of view in radians.
    pub fn fov(&self) -> f32 {
        2.0 * (self.plane.length() / self.dir.length()).atan()
    }

    /// Sideways unit, `(-dir.y, dir.x)`.
    #[inline]
    pub fn strafe_dir(&self) -> Vec2 {
        Vec2::new(-self.dir.y, self.dir.x)
    }

    /// Move along `dir` and the strafe vector, one axis at a time.
    ///
    /// X is tested against the current Y cell, then Y against the (possibly
    /// updated) current X cell, so blocked diagonals slide along the wall.
    pub fn move_by(&mut self, forward: f32, strafe: f32, map: &GridMap) {
        let next = self.pos + self.dir * forward + self.strafe_dir() * strafe;
        if !map.is_wall(next.x.floor() as i32, self.pos.y.floor() as i32) {
            self.pos.x = next.x;
        }
        if !map.is_wall(self.pos.x.floor() as i32, next.y.floor() as i32) {
            self.pos.y = next.y;
        }
    }

    /// Rotate `dir` and `plane` together by `angle` radians.
    pub fn rotate_by(&mut self, angle: f32) {
        let rot = Vec2::from_angle(angle);
        self.dir = rot.rotate(self.dir);
        self.plane = rot.rotate(self.plane);
    }
}
