use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::strip_scale_suffix;

/// One of the two parallel visual variants of an icon set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Folder name the theme lives under inside a category directory.
    pub fn dir_name(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A discovered icon file. Dimensions come from the header probe, pixels are
/// only decoded when the icon is composited.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// File stem with any `@2x` / `@3x` scale suffix removed.
    pub base_name: String,
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

impl ImageRecord {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32, theme: Theme) -> Self {
        let path = path.into();
        let base_name = base_name_of(&path);
        Self {
            path,
            base_name,
            width,
            height,
            theme,
        }
    }

    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
}

fn base_name_of(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    strip_scale_suffix(&stem).to_string()
}

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if the two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x >= other.x + other.w
            || other.x >= self.x + self.w
            || self.y >= other.y + other.h
            || other.y >= self.y + self.h)
    }
}

/// An icon placed within a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Frame {
    /// Theme-agnostic base name of the icon.
    pub key: String,
    pub theme: Theme,
    /// Grid cell reserved for the icon (square, `cell_height` on a side).
    pub cell: Rect,
}

/// A single atlas page (logical record). `size` is the square side length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: usize,
    pub size: u32,
    pub frames: Vec<Frame>,
}

/// Statistics about how well the grid pages were filled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    pub num_pages: usize,
    pub num_frames: usize,
    /// Sum of `size * size` over all pages.
    pub total_page_area: u64,
    /// Sum of reserved cell areas.
    pub used_cell_area: u64,
    /// `used_cell_area / total_page_area` (0.0 to 1.0).
    pub occupancy: f64,
    pub max_page_size: u32,
}

impl PackStats {
    pub fn from_pages<'a>(pages: impl IntoIterator<Item = &'a Page>) -> Self {
        let mut num_pages = 0;
        let mut num_frames = 0;
        let mut total_page_area = 0u64;
        let mut used_cell_area = 0u64;
        let mut max_page_size = 0u32;
        for page in pages {
            num_pages += 1;
            total_page_area += (page.size as u64) * (page.size as u64);
            max_page_size = max_page_size.max(page.size);
            for frame in &page.frames {
                num_frames += 1;
                used_cell_area += (frame.cell.w as u64) * (frame.cell.h as u64);
            }
        }
        let occupancy = if total_page_area > 0 {
            used_cell_area as f64 / total_page_area as f64
        } else {
            0.0
        };
        Self {
            num_pages,
            num_frames,
            total_page_area,
            used_cell_area,
            occupancy,
            max_page_size,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Icons: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_pages,
            self.num_frames,
            self.occupancy * 100.0,
            self.total_page_area,
            self.used_cell_area,
        )
    }
}
