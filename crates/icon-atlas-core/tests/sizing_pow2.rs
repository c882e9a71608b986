use icon_atlas_core::prelude::*;
use icon_atlas_core::min_pow2_side;
use rand::{Rng, SeedableRng};

fn is_pow2(v: u64) -> bool {
    v != 0 && (v & (v - 1)) == 0
}

fn icons(n: usize, side: u32) -> Vec<ImageRecord> {
    (0..n)
        .map(|i| ImageRecord::new(format!("Dark/icon{i}.png"), side, side, Theme::Dark))
        .collect()
}

#[test]
fn ten_sixteen_px_icons_need_64() {
    let info = compute_sizing(&icons(10, 16));
    assert_eq!(info.total_area, 2560);
    assert_eq!(info.cell_height, 16);
    assert_eq!(info.min_side, 64);
}

#[test]
fn cell_height_is_tallest_icon() {
    let mut list = icons(3, 16);
    list.push(ImageRecord::new("Dark/tall.png", 16, 40, Theme::Dark));
    let info = compute_sizing(&list);
    assert_eq!(info.cell_height, 40);
    assert_eq!(info.total_area, 3 * 256 + 16 * 40);
}

#[test]
fn perfect_square_is_exact() {
    assert_eq!(min_pow2_side(64 * 64), 64);
    assert_eq!(min_pow2_side(1024 * 1024), 1024);
    assert_eq!(min_pow2_side(1), 1);
}

#[test]
fn rounding_is_tight_for_random_areas() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    for _ in 0..2000 {
        let area: u64 = rng.gen_range(1..=50_000_000);
        let side = min_pow2_side(area);
        assert!(is_pow2(side), "side {side} for area {area}");
        assert!(side * side >= area, "side {side} too small for {area}");
        let half = side / 2;
        assert!(half * half < area, "side {side} not tight for {area}");
    }
}

#[test]
fn later_rounds_get_tighter() {
    let all = icons(300, 64);
    let first = compute_sizing(&all);
    let rest = compute_sizing(&all[256..]);
    assert_eq!(first.min_side, 2048);
    assert_eq!(rest.min_side, 512);
}
