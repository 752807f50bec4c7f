//! Command-line configuration.
use std::path::PathBuf;

use clap::Parser;

use crate::scene::{SceneId, Viewport};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Grid raycaster with a level-select menu")]
pub struct Cli {
    /// Window width in pixels.
    #[arg(long, short = 'W', default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Window height in pixels.
    #[arg(long, short = 'H', default_value_t = 600, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    #[arg(long, default_value = "Raycaster")]
    pub title: String,

    /// Directory scanned for `.cub3d` levels.
    #[arg(long, default_value = "assets/maps")]
    pub levels_dir: PathBuf,

    /// Skip the menu and play this level.
    #[arg(long)]
    pub level: Option<PathBuf>,

    /// Minimap pixels per tile.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..=32))]
    pub minimap_scale: u32,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,
}

impl Cli {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn first_scene(&self) -> SceneId {
        if self.level.is_some() {
            SceneId::Game
        } else {
            SceneId::Menu
        }
    }
}
