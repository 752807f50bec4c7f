//! Core game types and logic (map data, camera, input).
//!
//! Re-exports:
//! - `map`: Tile grid, level parsing and discovery
//! - `error`: Level loading errors
//! - `camera`: Viewer pose and collision-aware movement
//! - `input`: Logical actions and held-action snapshots
//! - `process_events`: Input handling and movement

pub mod camera;
pub mod error;
pub mod input;
pub mod map;
pub mod process_events;

pub use camera::Camera;
pub use error::{MapError, MapErrorKind};
pub use input::{Action, HeldActions};
pub use map::{GridMap, list_levels, load_level, parse_level, parse_level_bytes};
