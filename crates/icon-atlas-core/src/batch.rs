//! Multi-page builds: repeat sizing + packing on the leftovers until every
//! icon has a cell.

use tracing::{debug, instrument};

use crate::error::{AtlasError, Result};
use crate::model::{Frame, ImageRecord, Page};
use crate::packer::{OutputPage, layout_page, pack_page};
use crate::sizing::{AtlasSizing, compute_sizing};

fn oversized(sizing: &AtlasSizing, max_side: u32) -> AtlasError {
    AtlasError::OversizedCell {
        cell: sizing.cell_height,
        max_side,
    }
}

/// Packs `images` into as many pages as needed. Each round re-sizes the page
/// against what is still unplaced, so later pages get progressively tighter.
///
/// Fails with `OversizedCell` when a round cannot place a single icon.
#[instrument(skip_all, fields(images = images.len(), max_side = max_side))]
pub fn build_all(images: Vec<ImageRecord>, max_side: u32) -> Result<Vec<OutputPage>> {
    let mut pages = Vec::new();
    let mut remaining = images;
    while !remaining.is_empty() {
        let sizing = compute_sizing(&remaining);
        let before = remaining.len();
        let (page, leftover) = pack_page(remaining, &sizing, max_side, pages.len())?;
        if leftover.len() == before {
            return Err(oversized(&sizing, max_side));
        }
        debug!(round = pages.len(), side = page.page.size, leftover = leftover.len(), "round done");
        pages.push(page);
        remaining = leftover;
    }
    Ok(pages)
}

/// Layout-only twin of [`build_all`]: same rounds and cells, no pixel data.
pub fn plan_pages(images: &[ImageRecord], max_side: u32) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    let mut remaining = images;
    while !remaining.is_empty() {
        let sizing = compute_sizing(remaining);
        let layout = layout_page(remaining, &sizing, max_side);
        if layout.placed() == 0 {
            return Err(oversized(&sizing, max_side));
        }
        let (placed, rest) = remaining.split_at(layout.placed());
        let frames = placed
            .iter()
            .zip(&layout.cells)
            .map(|(record, cell)| Frame {
                key: record.base_name.clone(),
                theme: record.theme,
                cell: *cell,
            })
            .collect();
        pages.push(Page {
            id: pages.len(),
            size: layout.side,
            frames,
        });
        remaining = rest;
    }
    Ok(pages)
}
