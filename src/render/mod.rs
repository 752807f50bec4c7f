//! Rendering utilities and the raycasting renderer.
//!
//! Re-exports:
//! - `framebuffer`: CPU framebuffer and drawing primitives
//! - `casters`: Grid DDA ray casting
//! - `line`: Bresenham integer line drawing
//! - `render3d`: Column renderer for walls, sky and floor
//! - `minimap`: Top-down map overlay
//! - `menu_bg`: Animated menu background

pub mod casters;
pub mod framebuffer;
pub mod line;
pub mod menu_bg;
pub mod minimap;
pub mod render3d;

pub use casters::{Intersect, Side, cast_ray};
pub use framebuffer::{Color, Framebuffer};
pub use minimap::draw_minimap;
pub use render3d::render_3d;
