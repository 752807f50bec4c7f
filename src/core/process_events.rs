//! Held actions + frame time -> camera motion.
use crate::core::camera::Camera;
use crate::core::input::{Action, HeldActions};
use crate::core::map::GridMap;

/// Walking speed in tiles per second.
pub const MOVE_SPEED: f32 = 3.0;
/// Turning speed in radians per second.
pub const ROT_SPEED: f32 = 2.0;

fn axis(held: &HeldActions, pos: Action, neg: Action) -> f32 {
    let mut v = 0.0;
    if held.is_held(pos) {
        v += 1.0;
    }
    if held.is_held(neg) {
        v -= 1.0;
    }
    v
}

/// Apply one update's worth of movement and turning to `camera`.
pub fn process_events(camera: &mut Camera, map: &GridMap, held: &HeldActions, dt: f32) {
    let step = MOVE_SPEED * dt;
    let forward = axis(held, Action::MoveForward, Action::MoveBack) * step;
    let strafe = axis(held, Action::StrafeRight, Action::StrafeLeft) * step;
    if forward != 0.0 || strafe != 0.0 {
        camera.move_by(forward, strafe, map);
    }

    let turn = axis(held, Action::TurnLeft, Action::TurnRight);
    if turn != 0.0 {
        camera.rotate_by(turn * ROT_SPEED * dt);
    }
}
