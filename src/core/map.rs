//! Tile grid, `.cub3d` level parsing and level discovery.
//!
//! A level file is plain text. `#` starts a comment, blank lines are skipped,
//! every other line is one row of integer tiles separated by whitespace and/or
//! a comma. `0` is floor, anything above `0` is a wall.
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec2;
use tracing::{debug, warn};

use crate::core::error::MapError;

/// Extension (case-insensitive) of level files picked up by [`list_levels`].
pub const LEVEL_EXTENSION: &str = "cub3d";

/// Tile reported for any coordinate outside the grid.
pub const OUT_OF_BOUNDS_TILE: i32 = 1;

const WORLD_W: usize = 24;
const WORLD_H: usize = 24;

#[rustfmt::skip]
static WORLD_DATA: [i32; WORLD_W * WORLD_H] = [
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,2,2,2,2,2,2,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,2,0,0,0,0,2,0,0,0,0,3,3,3,0,0,0,1,
    1,0,0,0,0,0,0,2,0,0,0,0,2,0,0,0,0,3,0,3,0,0,0,1,
    1,0,0,0,0,0,0,2,0,0,0,0,2,0,0,0,0,3,3,3,0,0,0,1,
    1,0,0,0,0,0,0,2,2,2,2,2,2,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,4,0,0,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,4,0,0,0,0,0,0,4,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,4,4,4,4,4,4,4,4,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,
];

/// Row-major tile grid.
///
/// The built-in map borrows static data and is never freed; parsed maps own
/// their tiles and are dropped when replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    tiles: Cow<'static, [i32]>,
}

impl GridMap {
    /// The 24x24 map shipped with the game.
    pub fn builtin() -> Self {
        Self {
            width: WORLD_W,
            height: WORLD_H,
            tiles: Cow::Borrowed(&WORLD_DATA[..]),
        }
    }

    /// Build a map from rows of equal length.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, MapError> {
        let mut grid = RowCollector::default();
        for (i, row) in rows.iter().enumerate() {
            grid.push(i + 1, row.as_ref())?;
        }
        grid.finish()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.tiles, Cow::Borrowed(_))
    }

    /// Tile code at `(x, y)`; outside the grid this is [`OUT_OF_BOUNDS_TILE`].
    #[inline]
    pub fn tile_at(&self, x: i32, y: i32) -> i32 {
        if x < 0 || y < 0 {
            return OUT_OF_BOUNDS_TILE;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return OUT_OF_BOUNDS_TILE;
        }
        self.tiles[y * self.width + x]
    }

    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y) > 0
    }

    /// Centre of the floor cell closest to the middle of the grid.
    ///
    /// Ties go to the first cell in row-major order. `None` when every cell
    /// is a wall.
    pub fn find_spawn(&self) -> Option<Vec2> {
        let mid = Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5);
        let mut best: Option<(Vec2, f32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.tiles[y * self.width + x] > 0 {
                    continue;
                }
                let centre = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = centre.distance_squared(mid);
                if best.map(|(_, bd)| d < bd).unwrap_or(true) {
                    best = Some((centre, d));
                }
            }
        }
        best.map(|(c, _)| c)
    }
}

/// Accumulates parsed rows and enforces the rectangular shape.
#[derive(Default)]
struct RowCollector {
    width: Option<usize>,
    height: usize,
    tiles: Vec<i32>,
}

impl RowCollector {
    fn push(&mut self, line: usize, row: &[i32]) -> Result<(), MapError> {
        if row.is_empty() {
            return Ok(());
        }
        match self.width {
            None => self.width = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(MapError::NonRectangularGrid {
                    line,
                    expected,
                    found: row.len(),
                });
            }
            Some(_) => {}
        }
        self.tiles.extend_from_slice(row);
        self.height += 1;
        Ok(())
    }

    fn finish(self) -> Result<GridMap, MapError> {
        let width = self.width.unwrap_or(0);
        if width == 0 || self.height == 0 {
            return Err(MapError::EmptyGrid);
        }
        Ok(GridMap {
            width,
            height: self.height,
            tiles: Cow::Owned(self.tiles),
        })
    }
}

/// Parse the text of a level file.
pub fn parse_level(text: &str) -> Result<GridMap, MapError> {
    parse_level_bytes(text.as_bytes())
}

/// Parse raw level bytes.
///
/// Comments are cut before any text decoding, so they may hold arbitrary
/// bytes. Invalid UTF-8 left in a row ends up in a [`MapError::MalformedToken`].
pub fn parse_level_bytes(bytes: &[u8]) -> Result<GridMap, MapError> {
    let mut grid = RowCollector::default();
    for (idx, line) in bytes.split(|&b| b == b'\n').enumerate() {
        // anything after '#' is a comment
        let content = match line.iter().position(|&b| b == b'#') {
            Some(at) => &line[..at],
            None => line,
        };
        let content = String::from_utf8_lossy(content);
        let trimmed = content.trim();
        if trimmed.is_empty() {
            continue;
        }
        let row = parse_row(idx + 1, trimmed)?;
        grid.push(idx + 1, &row)?;
    }
    grid.finish()
}

/// Read and parse a level file.
pub fn load_level(path: impl AsRef<Path>) -> Result<GridMap, MapError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = parse_level_bytes(&bytes)?;
    debug!(path = %path.display(), w = map.width, h = map.height, "level_parsed");
    Ok(map)
}

fn parse_row(line: usize, text: &str) -> Result<Vec<i32>, MapError> {
    let mut row = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == ',')
            .unwrap_or(rest.len());
        let token = &rest[..end];
        let value = token.parse::<i32>().map_err(|_| MapError::MalformedToken {
            line,
            token: if token.is_empty() { ",".to_string() } else { token.to_string() },
        })?;
        row.push(value);
        rest = rest[end..].trim_start();
        if let Some(after) = rest.strip_prefix(',') {
            rest = after.trim_start();
        }
    }
    Ok(row)
}

fn has_level_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(LEVEL_EXTENSION))
        .unwrap_or(false)
}

/// Regular, non-hidden `.cub3d` files directly inside `dir`, sorted by path.
pub fn list_levels(dir: impl AsRef<Path>) -> io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "level_dir_entry_unreadable");
                continue;
            }
        };
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if !has_level_extension(&path) {
            continue;
        }
        // follows symlinks, like stat()
        if fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
