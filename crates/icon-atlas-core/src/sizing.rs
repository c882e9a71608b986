use serde::{Deserialize, Serialize};

use crate::model::ImageRecord;

/// Canvas requirements of a set of same-size icons, recomputed every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasSizing {
    /// Sum of `width * height` over the set.
    pub total_area: u64,
    /// Tallest icon; used as both row and column stride.
    pub cell_height: u32,
    /// Smallest power of two whose square holds `total_area`.
    pub min_side: u64,
}

/// Computes the sizing of `images`. An empty set yields a 1px side and a zero
/// stride; callers only pass validated, non-empty catalogs.
pub fn compute_sizing(images: &[ImageRecord]) -> AtlasSizing {
    let total_area: u64 = images.iter().map(ImageRecord::area).sum();
    let cell_height = images.iter().map(|r| r.height).max().unwrap_or(0);
    AtlasSizing {
        total_area,
        cell_height,
        min_side: min_pow2_side(total_area),
    }
}

/// `next_pow2(ceil(sqrt(area)))`.
pub fn min_pow2_side(area: u64) -> u64 {
    ceil_sqrt(area).next_power_of_two()
}

fn ceil_sqrt(v: u64) -> u64 {
    let r = v.isqrt();
    if r * r < v { r + 1 } else { r }
}
