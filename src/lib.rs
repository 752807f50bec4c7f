//! First-person grid raycaster with a menu and a game mode.

pub mod app;
pub mod config;
pub mod core;
pub mod render;
pub mod scene;
