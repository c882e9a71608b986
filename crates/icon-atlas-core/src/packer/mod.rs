//! Fixed-stride grid placement of icons onto one square page.

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::compositing::blit_rgba;
use crate::error::Result;
use crate::model::{Frame, ImageRecord, Page, Rect};
use crate::sizing::AtlasSizing;

pub mod grid;

pub use grid::GridCursor;

/// Geometry of one page: its side and the cells given to the leading
/// `cells.len()` input images. Everything after those is leftover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub side: u32,
    pub cells: Vec<Rect>,
}

impl PageLayout {
    pub fn placed(&self) -> usize {
        self.cells.len()
    }
}

/// Output RGBA page and its logical page record.
pub struct OutputPage {
    pub page: Page,
    pub rgba: RgbaImage,
}

/// Page side for a round: the sizing's power-of-two side, raised so at least
/// one cell fits, then capped at `max_side`.
pub fn page_side(sizing: &AtlasSizing, max_side: u32) -> u32 {
    let cell_side = (sizing.cell_height as u64).next_power_of_two();
    sizing.min_side.max(cell_side).min(max_side as u64) as u32
}

/// Lays out `images` in input order on a page of `page_side(sizing, max_side)`,
/// every icon taking a `cell_height` square. Stops at the first icon that does
/// not fit; no icon is ever split across pages.
pub fn layout_page(images: &[ImageRecord], sizing: &AtlasSizing, max_side: u32) -> PageLayout {
    let side = page_side(sizing, max_side);
    let mut cursor = GridCursor::new(side, sizing.cell_height);
    let cells: Vec<Rect> = images.iter().map_while(|_| cursor.next_cell()).collect();
    PageLayout { side, cells }
}

/// Lays out `images` and composites the placed ones onto a fresh canvas.
/// Returns the page (numbered `id`) and the unplaced images in original order.
///
/// Each placed icon is opened, decoded and dropped before the next one.
pub fn pack_page(
    mut images: Vec<ImageRecord>,
    sizing: &AtlasSizing,
    max_side: u32,
    id: usize,
) -> Result<(OutputPage, Vec<ImageRecord>)> {
    let layout = layout_page(&images, sizing, max_side);
    let leftover = images.split_off(layout.placed());

    let mut canvas = RgbaImage::new(layout.side, layout.side);
    let mut frames = Vec::with_capacity(images.len());
    for (record, cell) in images.into_iter().zip(layout.cells) {
        let icon = ImageReader::open(&record.path)?
            .with_guessed_format()?
            .decode()?
            .to_rgba8();
        blit_rgba(&icon, &mut canvas, cell.x, cell.y);
        frames.push(Frame {
            key: record.base_name,
            theme: record.theme,
            cell,
        });
    }
    debug!(
        id,
        side = layout.side,
        placed = frames.len(),
        leftover = leftover.len(),
        "packed page"
    );

    let page = Page {
        id,
        size: layout.side,
        frames,
    };
    Ok((OutputPage { page, rgba: canvas }, leftover))
}
